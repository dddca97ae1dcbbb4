//! Checkers engine and AI
//!
//! This crate provides the core game logic:
//! - Square-grid geometry and piece types
//! - Board state, legal-move generation (multi-jump chains included)
//!   and win detection
//! - Static position evaluation
//! - Move-selection agents: random, plain minimax and alpha-beta with
//!   optional time-boxed iterative deepening
//!
//! Rendering, input handling and any async wrapper around move choice
//! live outside this crate; drivers consume the board queries, the
//! `apply_move` mutator and the [`Agent`] contract.

pub mod ai;
pub mod board;
pub mod eval;
pub mod game;
pub mod moves;
pub mod pieces;

// Re-exports for convenient access
pub use ai::{Agent, AlphaBetaAI, MinimaxAI, RandomAI};
pub use board::{Square, DIAGONALS};
pub use eval::{evaluate, EvalKind, Weights, WIN_VALUE};
pub use game::{Board, BoardError, MAX_SIZE};
pub use moves::Move;
pub use pieces::{Control, Piece, PieceKind, Player};
