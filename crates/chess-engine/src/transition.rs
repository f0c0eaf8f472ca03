//! Applying moves to game states.

use crate::error::MoveError;
use crate::movegen::legal_targets;
use crate::GameState;
use chess_core::{Color, Move, Square};

/// Applies a move for the side to move and returns the resulting state.
///
/// The move must be one of [`legal_moves`](crate::legal_moves) for the piece
/// on `from`. The input state is left untouched.
pub fn apply_move(state: &GameState, from: Square, to: Square) -> Result<GameState, MoveError> {
    let piece = state.piece_at(from).ok_or(MoveError::EmptySquare(from))?;
    if piece.color != state.side_to_move() {
        return Err(MoveError::WrongSide {
            square: from,
            color: state.side_to_move(),
        });
    }
    if !legal_targets(state.board(), from).contains(&to) {
        return Err(MoveError::IllegalMove(Move::new(from, to)));
    }
    Ok(apply_move_unchecked(state, from, to))
}

/// Applies a move already known to be legal, skipping validation.
///
/// Intended for callers that took the move from [`GameState::legal_moves`].
/// Passing anything else yields a state that may not be reachable by legal
/// play.
pub fn apply_move_unchecked(state: &GameState, from: Square, to: Square) -> GameState {
    let mover = state.side_to_move();
    let fullmove_number = match mover {
        Color::White => state.fullmove_number(),
        Color::Black => state.fullmove_number().saturating_add(1),
    };
    GameState::from_parts(
        state.board().with_move(from, to),
        mover.opposite(),
        fullmove_number,
    )
}
