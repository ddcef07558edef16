//! Board simulation engine for a falling-block stacking game.
//!
//! This crate provides the two leaf components of the training system:
//!
//! - [`PieceCatalog`] - Immutable piece geometry tables (7 piece kinds with
//!   their orientations and column contact profiles)
//! - [`Board`] - The 21×10 playing field with placement, collision detection,
//!   and line clearing
//!
//! The engine is deliberately free of any evaluation or search logic: it only
//! answers "what moves are legal for this piece" and "what happens to the
//! field when this move is played". Heuristic extraction and move selection
//! live in `stackris-evaluator`.
//!
//! # Example
//!
//! ```
//! use stackris_engine::{Board, PieceCatalog, PieceKind};
//!
//! let mut board = Board::new(PieceCatalog::standard());
//! let moves = board.legal_moves(PieceKind::O);
//! let cleared = board.try_place(PieceKind::O, moves[0]).unwrap();
//! assert_eq!(cleared, 0);
//! ```

pub use self::{board::*, catalog::*};

pub mod board;
pub mod catalog;

/// Placement rejected because the piece would extend past the top of the board.
///
/// Once returned, the board is terminal: every further placement attempt is
/// rejected with the same error.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece tops out the board")]
pub struct TopOutError;
