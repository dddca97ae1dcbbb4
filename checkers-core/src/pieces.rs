//! Players, piece kinds and control identities

use serde::{Deserialize, Serialize};

/// Player color. Red sits on the high rows and moves toward row 0;
/// White sits on the low rows and moves toward the last row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::White,
            Player::White => Player::Red,
        }
    }

    /// Forward row direction for this player's men (-1 or +1)
    pub fn forward(self) -> i8 {
        match self {
            Player::Red => -1,
            Player::White => 1,
        }
    }
}

/// Piece kind. The man -> king promotion is one-way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    Man,
    King,
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Player,
}

impl Piece {
    pub const fn man(owner: Player) -> Self {
        Self { kind: PieceKind::Man, owner }
    }

    pub const fn king(owner: Player) -> Self {
        Self { kind: PieceKind::King, owner }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }
}

/// Who is driving a side. Consumed by the external driver only; the
/// rules engine and search never branch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Human,
    Bot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Red.opponent(), Player::White);
        assert_eq!(Player::White.opponent(), Player::Red);
    }

    #[test]
    fn test_forward_directions() {
        assert_eq!(Player::Red.forward(), -1);
        assert_eq!(Player::White.forward(), 1);
    }

    #[test]
    fn test_piece_constructors() {
        let p = Piece::man(Player::Red);
        assert_eq!(p.kind, PieceKind::Man);
        assert_eq!(p.owner, Player::Red);
        assert!(!p.is_king());
        assert!(Piece::king(Player::White).is_king());
    }
}
