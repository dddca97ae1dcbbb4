//! Move-selection agents: random, plain minimax and alpha-beta

use crate::eval::{evaluate_with_depth, EvalKind, Weights};
use crate::game::Board;
use crate::moves::Move;
use crate::pieces::Player;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

// ============================================================================
// AGENT CONTRACT
// ============================================================================

/// Anything that, given a board, returns a chosen legal move for the
/// side to move. `None` only when that side has no legal move.
pub trait Agent {
    fn choose_move(&mut self, board: &Board) -> Option<Move>;
}

// ============================================================================
// RANDOM AI
// ============================================================================

/// Uniform random legal move; easy difficulty and sanity-test opponent
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Default for RandomAI {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAI {
    fn choose_move(&mut self, board: &Board) -> Option<Move> {
        let moves = board.legal_moves(board.turn());
        moves.choose(&mut self.rng).cloned()
    }
}

// ============================================================================
// MINIMAX AI (reference baseline)
// ============================================================================

/// Exhaustive unpruned minimax. Shares the leaf-scoring contract with
/// `AlphaBetaAI`, so it serves as a value oracle on small positions.
pub struct MinimaxAI {
    pub depth: u32,
    weights: Weights,
    eval: EvalKind,
}

impl MinimaxAI {
    pub fn new(depth: u32, eval: EvalKind) -> Self {
        Self { depth, weights: Weights::default(), eval }
    }

    /// Exact minimax value of a position at the given depth
    pub fn value(&self, board: &Board, depth: u32) -> f32 {
        minimax(board, depth, &self.weights, self.eval)
    }
}

impl Agent for MinimaxAI {
    fn choose_move(&mut self, board: &Board) -> Option<Move> {
        let moves = board.legal_moves(board.turn());
        let maximizing = board.turn() == Player::Red;

        let mut best: Option<Move> = None;
        let mut best_value = worst_for(maximizing);

        for mv in moves {
            let mut child = board.clone();
            child.apply_move(&mv);
            let value = minimax(&child, self.depth.saturating_sub(1), &self.weights, self.eval);
            if best.is_none() || improves(maximizing, value, best_value) {
                best_value = value;
                best = Some(mv);
            }
        }
        best
    }
}

fn minimax(board: &Board, depth: u32, weights: &Weights, eval: EvalKind) -> f32 {
    if depth == 0 || board.is_over() {
        return evaluate_with_depth(board, weights, eval, depth);
    }

    let maximizing = board.turn() == Player::Red;
    let mut best = worst_for(maximizing);

    for mv in board.legal_moves(board.turn()) {
        let mut child = board.clone();
        child.apply_move(&mv);
        let value = minimax(&child, depth - 1, weights, eval);
        best = if maximizing { best.max(value) } else { best.min(value) };
    }
    best
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Depth- or time-bounded alpha-beta search. Red maximizes, White
/// minimizes; the roles are fixed per color.
pub struct AlphaBetaAI {
    pub depth: u32,
    /// Total move-choice budget; when set, each root move gets an equal
    /// timed sub-search via iterative deepening
    pub time_limit: Option<Duration>,
    pub eval: EvalKind,
    weights: Weights,
    jitter: f32,
    rng: ChaCha8Rng,
}

impl AlphaBetaAI {
    pub fn new(depth: u32, eval: EvalKind) -> Self {
        Self::with_seed(depth, eval, 42)
    }

    pub fn with_seed(depth: u32, eval: EvalKind, seed: u64) -> Self {
        Self {
            depth,
            time_limit: None,
            eval,
            weights: Weights::default(),
            jitter: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn timed(depth: u32, time_limit: Duration, eval: EvalKind) -> Self {
        let mut ai = Self::new(depth, eval);
        ai.time_limit = Some(time_limit);
        ai
    }

    /// Evaluation jitter scale; non-zero trades repeatability for variety
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Exact search value of a position at the given depth (full window)
    pub fn value(&mut self, board: &Board, depth: u32) -> f32 {
        self.alpha_beta(board, depth, f32::NEG_INFINITY, f32::INFINITY)
    }

    fn leaf(&mut self, board: &Board, depth: u32) -> f32 {
        let base = evaluate_with_depth(board, &self.weights, self.eval, depth);
        if self.jitter > 0.0 && !board.is_over() {
            base + (self.rng.gen::<f32>() - 0.5) * self.jitter
        } else {
            base
        }
    }

    fn alpha_beta(&mut self, board: &Board, depth: u32, mut alpha: f32, mut beta: f32) -> f32 {
        if depth == 0 || board.is_over() {
            return self.leaf(board, depth);
        }

        let moves = board.legal_moves(board.turn());

        if board.turn() == Player::Red {
            let mut best = f32::NEG_INFINITY;
            for mv in moves {
                let mut child = board.clone();
                child.apply_move(&mv);
                let value = self.alpha_beta(&child, depth - 1, alpha, beta);
                best = best.max(value);
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            best
        } else {
            let mut best = f32::INFINITY;
            for mv in moves {
                let mut child = board.clone();
                child.apply_move(&mv);
                let value = self.alpha_beta(&child, depth - 1, alpha, beta);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Iterative deepening under a per-move deadline, capped at the
    /// configured depth. A pass is never aborted mid-recursion; a pass
    /// that finishes past the deadline is discarded in favor of the
    /// last fully completed depth. Depth 0 always counts, so a value
    /// always exists.
    fn timed_value(&mut self, board: &Board, deadline: Instant) -> f32 {
        let mut value = self.alpha_beta(board, 0, f32::NEG_INFINITY, f32::INFINITY);

        for depth in 1..=self.depth {
            if Instant::now() >= deadline {
                break;
            }
            match self.deepening_pass(board, depth, deadline) {
                Some(pass) => value = pass,
                None => break,
            }
        }
        value
    }

    /// One full-depth pass of the deepening loop. Runs to completion
    /// regardless of the clock; the value counts only when the pass
    /// finished by the deadline, otherwise it is discarded.
    fn deepening_pass(&mut self, board: &Board, depth: u32, deadline: Instant) -> Option<f32> {
        let pass = self.alpha_beta(board, depth, f32::NEG_INFINITY, f32::INFINITY);
        if Instant::now() <= deadline {
            Some(pass)
        } else {
            None
        }
    }
}

impl Agent for AlphaBetaAI {
    fn choose_move(&mut self, board: &Board) -> Option<Move> {
        let moves = board.legal_moves(board.turn());
        if moves.is_empty() {
            return None;
        }

        let maximizing = board.turn() == Player::Red;
        // Even split of the total budget across root moves
        let per_move = self.time_limit.map(|total| total / moves.len() as u32);

        let mut best: Option<Move> = None;
        let mut best_value = worst_for(maximizing);

        for mv in moves {
            let mut child = board.clone();
            child.apply_move(&mv);
            let value = match per_move {
                Some(budget) => {
                    let deadline = Instant::now() + budget;
                    self.timed_value(&child, deadline)
                }
                None => self.value(&child, self.depth.saturating_sub(1)),
            };
            // Strict improvement only: ties go to the first move generated
            if best.is_none() || improves(maximizing, value, best_value) {
                best_value = value;
                best = Some(mv);
            }
        }
        best
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn worst_for(maximizing: bool) -> f32 {
    if maximizing {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    }
}

fn improves(maximizing: bool, value: f32, incumbent: f32) -> bool {
    if maximizing {
        value > incumbent
    } else {
        value < incumbent
    }
}

// ============================================================================
// TESTS
// ============================================================================
