//! Core types for chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates (row/column, row 0 is black's back rank)
//! - [`Move`] for move representation
//! - FEN parsing and validation

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::{Square, SquareError};
