//! Board state, move generation and rules

use crate::board::{Square, DIAGONALS};
use crate::moves::Move;
use crate::pieces::{Control, Piece, PieceKind, Player};
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Board construction failure
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size must be even, got {0}")]
    OddSize(usize),
    #[error("board size must be at most {MAX_SIZE}, got {0}")]
    TooLarge(usize),
}

/// Largest supported board; coordinates are `i8`
pub const MAX_SIZE: usize = 128;

// ============================================================================
// BOARD
// ============================================================================

/// The live game board.
///
/// The grid is a flat array of cell states, so `clone()` is the deep
/// copy the search layer takes once per explored move. The per-player
/// square lists are caches that must always mirror grid occupancy.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,

    /// Cell states, row-major (index = y * size + x)
    grid: Vec<Option<Piece>>,

    /// The player who moves next
    turn: Player,

    /// Piece-location caches, one per player
    red_squares: Vec<Square>,
    white_squares: Vec<Square>,

    /// Who drives each side (driver-facing, unused by search)
    identities: FxHashMap<Player, Control>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a board with the standard initial setup: men on the dark
    /// squares (`(x + y)` odd), White filling the top rows, Red the
    /// bottom rows, two empty rows between. Red moves first.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        let mut board = Self::empty(size)?;

        for y in 0..(size / 2).saturating_sub(1) {
            for x in 0..size {
                if (x + y) % 2 == 1 {
                    board.place(Square::new(x as i8, y as i8), Piece::man(Player::White));
                }
            }
        }

        for y in size / 2 + 1..size {
            for x in 0..size {
                if (x + y) % 2 == 1 {
                    board.place(Square::new(x as i8, y as i8), Piece::man(Player::Red));
                }
            }
        }

        Ok(board)
    }

    /// Create an empty board, for assembling positions square by square
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size % 2 != 0 {
            return Err(BoardError::OddSize(size));
        }
        if size > MAX_SIZE {
            return Err(BoardError::TooLarge(size));
        }

        Ok(Self {
            size,
            grid: vec![None; size * size],
            turn: Player::Red,
            red_squares: Vec::new(),
            white_squares: Vec::new(),
            identities: FxHashMap::default(),
        })
    }

    /// Put a piece on an empty square, keeping the caches in sync
    pub fn place(&mut self, square: Square, piece: Piece) {
        debug_assert!(self.on_grid(square), "placement off the grid");
        let idx = self.index(square);
        debug_assert!(self.grid[idx].is_none(), "placement on occupied square");
        self.grid[idx] = Some(piece);
        self.cache_mut(piece.owner).push(square);
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn set_turn(&mut self, player: Player) {
        self.turn = player;
    }

    pub fn on_grid(&self, square: Square) -> bool {
        square.x >= 0
            && square.y >= 0
            && (square.x as usize) < self.size
            && (square.y as usize) < self.size
    }

    /// Piece at a square; `None` for empty squares and for off-grid
    /// coordinates (no-such-square sentinel, not an error)
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if self.on_grid(square) {
            self.grid[self.index(square)]
        } else {
            None
        }
    }

    /// Squares currently holding the given player's pieces
    pub fn pieces(&self, player: Player) -> &[Square] {
        match player {
            Player::Red => &self.red_squares,
            Player::White => &self.white_squares,
        }
    }

    /// Assign a control kind to a side
    pub fn set_player(&mut self, player: Player, control: Control) {
        self.identities.insert(player, control);
    }

    pub fn controller(&self, player: Player) -> Option<Control> {
        self.identities.get(&player).copied()
    }

    /// Control kind of the side to move
    pub fn turn_controller(&self) -> Option<Control> {
        self.controller(self.turn)
    }

    fn index(&self, square: Square) -> usize {
        square.y as usize * self.size + square.x as usize
    }

    fn cache_mut(&mut self, player: Player) -> &mut Vec<Square> {
        match player {
            Player::Red => &mut self.red_squares,
            Player::White => &mut self.white_squares,
        }
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// All legal moves for the piece on `square`, provided it belongs
    /// to the side to move. Used by drivers to validate human input.
    pub fn legal_moves_for(&self, square: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = self.piece_at(square) {
            if piece.owner == self.turn {
                self.collect_moves(square, piece.owner, piece.kind, None, &mut moves);
            }
        }
        moves
    }

    /// All legal moves for a whole side
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::new();
        for &square in self.pieces(player) {
            if let Some(piece) = self.piece_at(square) {
                self.collect_moves(square, player, piece.kind, None, &mut moves);
            }
        }
        moves
    }

    /// Collect moves for one piece, recursing into capture chains.
    ///
    /// Simple steps are forward-restricted for men; captures run in all
    /// four diagonals for men and kings alike (deliberate rule choice).
    /// Chain discovery never mutates the board: the accumulated chain is
    /// threaded down as `chained`, and every chain prefix is pushed as a
    /// legal move of its own (capturing longer is never forced).
    fn collect_moves(
        &self,
        from: Square,
        player: Player,
        kind: PieceKind,
        chained: Option<&Move>,
        out: &mut Vec<Move>,
    ) {
        for &(dx, dy) in &DIAGONALS {
            let neighbor = from.offset(dx, dy);
            match self.piece_at(neighbor) {
                None => {
                    if !self.on_grid(neighbor) {
                        continue;
                    }
                    // Simple step: only as the first (and only) segment
                    if chained.is_none() && self.step_allowed(player, kind, dy) {
                        out.push(Move::step(from, neighbor));
                    }
                }
                Some(other) if other.owner != player => {
                    let landing = from.offset(2 * dx, 2 * dy);
                    if !self.on_grid(landing) || self.piece_at(landing).is_some() {
                        continue;
                    }
                    // A square may be captured once per chain
                    if chained.is_some_and(|c| c.captures.contains(&neighbor)) {
                        continue;
                    }
                    let jump = Move::jump(from, landing, neighbor);
                    let chain = match chained {
                        Some(prefix) => prefix.followed_by(&jump),
                        None => jump,
                    };
                    out.push(chain.clone());
                    self.collect_moves(landing, player, kind, Some(&chain), out);
                }
                Some(_) => {}
            }
        }
    }

    fn step_allowed(&self, player: Player, kind: PieceKind, dy: i8) -> bool {
        kind == PieceKind::King || dy == player.forward()
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a previously-enumerated legal move. The only live-board
    /// mutator: relocates the piece, clears every captured square from
    /// the grid and the caches, promotes a man reaching its farthest
    /// row, and flips the turn.
    pub fn apply_move(&mut self, m: &Move) {
        let origin_idx = self.index(m.origin);
        let dest_idx = self.index(m.destination);
        let mut piece = self.grid[origin_idx].take().expect("no piece on move origin");

        let cache = self.cache_mut(piece.owner);
        if let Some(pos) = cache.iter().position(|&s| s == m.origin) {
            cache.remove(pos);
        }
        cache.push(m.destination);

        for &captured_sq in &m.captures {
            let idx = self.index(captured_sq);
            if let Some(captured) = self.grid[idx].take() {
                let cache = self.cache_mut(captured.owner);
                if let Some(pos) = cache.iter().position(|&s| s == captured_sq) {
                    cache.remove(pos);
                }
            }
        }

        let far_row = match piece.owner {
            Player::Red => 0,
            Player::White => (self.size - 1) as i8,
        };
        if piece.kind == PieceKind::Man && m.destination.y == far_row {
            piece.kind = PieceKind::King;
        }

        self.grid[dest_idx] = Some(piece);
        self.turn = self.turn.opponent();
    }

    // ========================================================================
    // GAME END
    // ========================================================================

    /// Winner, if the game is over. A player with no pieces has lost;
    /// otherwise the side to move loses if none of its pieces can move
    /// (stalemate is a loss, not a draw).
    pub fn find_winner(&self) -> Option<Player> {
        if self.red_squares.is_empty() {
            return Some(Player::White);
        }
        if self.white_squares.is_empty() {
            return Some(Player::Red);
        }

        for &square in self.pieces(self.turn) {
            if let Some(piece) = self.piece_at(square) {
                let mut moves = Vec::new();
                self.collect_moves(square, self.turn, piece.kind, None, &mut moves);
                if !moves.is_empty() {
                    return None;
                }
            }
        }
        Some(self.turn.opponent())
    }

    pub fn is_over(&self) -> bool {
        self.find_winner().is_some()
    }

    /// Endgame heuristic: more than six kings on the board
    pub fn in_ending(&self) -> bool {
        let kings = self
            .red_squares
            .iter()
            .chain(self.white_squares.iter())
            .filter_map(|&sq| self.piece_at(sq))
            .filter(Piece::is_king)
            .count();
        kings > 6
    }
}

// ============================================================================
// DEBUG DUMP
// ============================================================================

/// Two characters per cell: XX/XK red man/king, OO/OK white man/king.
/// A debugging aid, not a stable interchange format.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--------------------")?;
        for y in 0..self.size {
            for x in 0..self.size {
                let code = match self.piece_at(Square::new(x as i8, y as i8)) {
                    None => "  ",
                    Some(p) => match (p.owner, p.kind) {
                        (Player::Red, PieceKind::Man) => "XX",
                        (Player::Red, PieceKind::King) => "XK",
                        (Player::White, PieceKind::Man) => "OO",
                        (Player::White, PieceKind::King) => "OK",
                    },
                };
                write!(f, "{}", code)?;
            }
            writeln!(f)?;
        }
        write!(f, "--------------------")
    }
}

// ============================================================================
// TESTS
// ============================================================================
