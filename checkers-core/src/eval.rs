//! Static position evaluation
//!
//! Red is the maximizing side, White the minimizing side, fixed per
//! color. Terminal scores dominate every heuristic score.

use crate::game::Board;
use crate::pieces::{PieceKind, Player};
use serde::{Deserialize, Serialize};

/// Win value (effectively infinite)
pub const WIN_VALUE: f32 = 100_000.0;

/// Which static evaluation an agent uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvalKind {
    /// Material only
    PieceValue,
    /// Material plus advancement and central-file terms
    Positional,
}

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Weights {
    pub man_value: f32,
    pub king_value: f32,
    /// Reward per row advanced toward the promotion row
    pub advance_weight: f32,
    /// Reward for occupying central files
    pub center_weight: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            man_value: 1.0,
            king_value: 1.75,
            advance_weight: 0.1,
            center_weight: 0.05,
        }
    }
}

/// Evaluate a non-terminal position, Red-positive
pub fn evaluate(board: &Board, weights: &Weights, kind: EvalKind) -> f32 {
    let mut score = 0.0f32;

    for player in [Player::Red, Player::White] {
        let sign = match player {
            Player::Red => 1.0,
            Player::White => -1.0,
        };

        for &square in board.pieces(player) {
            let piece = match board.piece_at(square) {
                Some(p) => p,
                None => continue,
            };

            let mut value = match piece.kind {
                PieceKind::Man => weights.man_value,
                PieceKind::King => weights.king_value,
            };

            if kind == EvalKind::Positional {
                value += weights.advance_weight * advancement(board, player, square.y);
                value += weights.center_weight * centrality(board, square.x);
            }

            score += sign * value;
        }
    }

    score
}

/// Evaluate a position that may be terminal; `depth` is the remaining
/// search depth, so wins found closer to the root score higher.
pub fn evaluate_with_depth(board: &Board, weights: &Weights, kind: EvalKind, depth: u32) -> f32 {
    match board.find_winner() {
        Some(Player::Red) => WIN_VALUE + depth as f32,
        Some(Player::White) => -(WIN_VALUE + depth as f32),
        None => evaluate(board, weights, kind),
    }
}

/// Rows advanced from the player's home row, for men pushing toward
/// promotion (kings included; a promoted piece stays near the action)
fn advancement(board: &Board, player: Player, y: i8) -> f32 {
    let last = board.size() as f32 - 1.0;
    match player {
        Player::Red => last - y as f32,
        Player::White => y as f32,
    }
}

/// Distance-from-edge measure of the file: 0 at the edges, peaking at
/// the two central files
fn centrality(board: &Board, x: i8) -> f32 {
    let last = board.size() as f32 - 1.0;
    let from_center = (x as f32 - last / 2.0).abs();
    last / 2.0 - from_center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use crate::pieces::Piece;

    #[test]
    fn test_initial_position_is_balanced() {
        let board = Board::new(8).unwrap();
        for kind in [EvalKind::PieceValue, EvalKind::Positional] {
            let score = evaluate(&board, &Weights::default(), kind);
            assert!(
                score.abs() < 0.001,
                "symmetric position scored {} with {:?}",
                score,
                kind
            );
        }
    }

    #[test]
    fn test_king_outweighs_man() {
        let weights = Weights::default();
        let mut board = Board::empty(8).unwrap();
        board.place(Square::new(2, 3), Piece::king(Player::Red));
        board.place(Square::new(5, 4), Piece::man(Player::White));

        let score = evaluate(&board, &weights, EvalKind::PieceValue);
        assert!((score - (weights.king_value - weights.man_value)).abs() < 0.001);
    }

    #[test]
    fn test_advancement_rewarded() {
        let weights = Weights::default();

        let mut back = Board::empty(8).unwrap();
        back.place(Square::new(1, 6), Piece::man(Player::Red));
        back.place(Square::new(1, 1), Piece::man(Player::White));

        let mut forward = Board::empty(8).unwrap();
        forward.place(Square::new(1, 2), Piece::man(Player::Red));
        forward.place(Square::new(1, 1), Piece::man(Player::White));

        let s_back = evaluate(&back, &weights, EvalKind::Positional);
        let s_forward = evaluate(&forward, &weights, EvalKind::Positional);
        assert!(s_forward > s_back, "advanced red man should score higher");
    }

    #[test]
    fn test_terminal_dominates_material() {
        // White has no pieces left, so Red has won outright
        let mut board = Board::empty(8).unwrap();
        board.place(Square::new(0, 0), Piece::king(Player::Red));
        board.set_turn(Player::White);

        let score = evaluate_with_depth(&board, &Weights::default(), EvalKind::PieceValue, 3);
        assert!(score >= WIN_VALUE);
    }

    #[test]
    fn test_faster_win_scores_higher() {
        let mut board = Board::empty(8).unwrap();
        board.place(Square::new(0, 0), Piece::king(Player::Red));
        board.set_turn(Player::White);

        let weights = Weights::default();
        let shallow = evaluate_with_depth(&board, &weights, EvalKind::PieceValue, 5);
        let deep = evaluate_with_depth(&board, &weights, EvalKind::PieceValue, 1);
        assert!(shallow > deep);
    }
}
