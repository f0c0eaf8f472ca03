//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait which bundles everything a
//! driver needs to run a game: the starting state, move generation, move
//! application and result detection. [`Game`](crate::Game) and the search
//! only talk to the rules through game states, so a different rule set can
//! be swapped in without touching them.

mod standard;

pub use standard::StandardChess;

use crate::error::MoveError;
use crate::{GameState, MoveList};
use chess_core::Move;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "1-0"),
            GameResult::BlackWins => write!(f, "0-1"),
            GameResult::Draw(_) => write!(f, "1/2-1/2"),
        }
    }
}

/// Trait for implementing rule sets.
///
/// # Example
///
/// ```
/// use chess_engine::StandardChess;
/// use chess_engine::rules::RuleSet;
///
/// let state = StandardChess.initial_state();
/// let moves = StandardChess.generate_moves(&state);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the initial state for this rule set.
    fn initial_state(&self) -> GameState;

    /// Generates all legal moves for the side to move.
    fn generate_moves(&self, state: &GameState) -> MoveList;

    /// Returns true if the given move is legal in the state.
    fn is_legal(&self, state: &GameState, m: Move) -> bool {
        self.generate_moves(state).contains(m)
    }

    /// Makes a move, returning the new state.
    fn make_move(&self, state: &GameState, m: Move) -> Result<GameState, MoveError>;

    /// Attempts to make a move, returning `None` if illegal.
    fn try_make_move(&self, state: &GameState, m: Move) -> Option<GameState> {
        self.make_move(state, m).ok()
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, state: &GameState) -> bool;

    /// Returns the game result if the game is over, otherwise `None`.
    fn game_result(&self, state: &GameState) -> Option<GameResult>;

    /// Returns true if the game is over.
    fn is_game_over(&self, state: &GameState) -> bool {
        self.game_result(state).is_some()
    }
}
