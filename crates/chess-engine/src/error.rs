//! Error types for building states and applying moves.

use chess_core::{Color, FenError, Move, Square};
use thiserror::Error;

/// Errors raised when a game state cannot be built from its parts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("invalid board: expected exactly one {color} king, found {count}")]
    InvalidKingCount { color: Color, count: usize },
}

/// Errors raised when a move cannot be applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("piece on {square} does not belong to {color}")]
    WrongSide { square: Square, color: Color },

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("invalid move text: {0}")]
    InvalidUci(String),

    #[error("game has already ended")]
    GameOver,
}
