//! Square grid geometry for the checkers board

use serde::{Deserialize, Serialize};

/// A board coordinate (column x, row y)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: i8,
    pub y: i8,
}

impl Square {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Square offset by (dx, dy); may be off the grid. Validity is
    /// board-size dependent, so the board filters off-grid results.
    pub fn offset(&self, dx: i8, dy: i8) -> Square {
        Square::new(self.x + dx, self.y + dy)
    }
}

/// Diagonal direction vectors (dx, dy)
/// Index: 0=NW, 1=NE, 2=SW, 3=SE (y grows downward toward White's home row)
pub const DIAGONALS: [(i8, i8); 4] = [
    (-1, -1), // NW
    (1, -1),  // NE
    (-1, 1),  // SW
    (1, 1),   // SE
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        let sq = Square::new(3, 4);
        assert_eq!(sq.offset(1, -1), Square::new(4, 3));
        assert_eq!(sq.offset(-2, 2), Square::new(1, 6));
    }

    #[test]
    fn test_offset_can_leave_grid() {
        // Offsets from the corner go negative; filtering happens at
        // the board, not here.
        let (dx, dy) = DIAGONALS[0];
        assert_eq!(Square::new(0, 0).offset(dx, dy), Square::new(-1, -1));
    }
}
