//! Moves and capture-chain composition

use crate::board::Square;
use serde::{Deserialize, Serialize};

/// A legal move: an origin, a destination and the ordered list of
/// captured squares. Empty `captures` means a simple diagonal step;
/// length > 1 means a multi-jump chain where each jump pivots on the
/// previous landing square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub origin: Square,
    pub destination: Square,
    pub captures: Vec<Square>,
}

impl Move {
    /// A simple (non-capturing) step
    pub fn step(origin: Square, destination: Square) -> Self {
        Self { origin, destination, captures: Vec::new() }
    }

    /// A single jump capturing one square
    pub fn jump(origin: Square, destination: Square, captured: Square) -> Self {
        Self { origin, destination, captures: vec![captured] }
    }

    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// Extend this move with a follow-up jump starting where this one
    /// landed. Captures are concatenated into a fresh move, so sibling
    /// branches of the chain search never share an accumulator.
    pub fn followed_by(&self, next: &Move) -> Move {
        debug_assert_eq!(
            self.destination, next.origin,
            "chained move must start on the previous landing square"
        );
        let mut captures = Vec::with_capacity(self.captures.len() + next.captures.len());
        captures.extend_from_slice(&self.captures);
        captures.extend_from_slice(&next.captures);
        Move {
            origin: self.origin,
            destination: next.destination,
            captures,
        }
    }
}
