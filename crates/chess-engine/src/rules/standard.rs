//! Standard chess rules implementation.

use super::{DrawReason, GameResult, RuleSet};
use crate::error::MoveError;
use crate::{apply_move, GameState, MoveList};
use chess_core::{Color, Move};

/// Standard chess movement with the simplifications this engine makes:
/// - Castling (kingside and queenside)
/// - Pawn promotion, always to a queen
/// - Check, checkmate, and stalemate detection
///
/// En passant and the repetition, fifty-move and insufficient-material
/// draws are not part of these rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_state(&self) -> GameState {
        GameState::initial()
    }

    fn generate_moves(&self, state: &GameState) -> MoveList {
        state.legal_moves()
    }

    fn make_move(&self, state: &GameState, m: Move) -> Result<GameState, MoveError> {
        apply_move(state, m.from(), m.to())
    }

    fn is_check(&self, state: &GameState) -> bool {
        state.is_check()
    }

    fn game_result(&self, state: &GameState) -> Option<GameResult> {
        if state.is_checkmate() {
            // The side to move loses.
            return Some(match state.side_to_move() {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            });
        }
        if state.is_stalemate() {
            return Some(GameResult::Draw(DrawReason::Stalemate));
        }
        None
    }
}
