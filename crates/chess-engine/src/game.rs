//! Full game management with history tracking.
//!
//! The [`Game`] struct keeps every [`GameState`] reached so far, which gives
//! undo for free: popping a snapshot restores the exact prior board.

use crate::error::{MoveError, StateError};
use crate::rules::{GameResult, RuleSet, StandardChess};
use crate::{legal_moves, GameState};
use chess_core::{Move, Square};

/// A complete chess game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    /// Every state reached, starting position first. Never empty.
    states: Vec<GameState>,
    /// Moves played, one per transition between consecutive states.
    moves: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_state(StandardChess.initial_state())
    }

    /// Creates a game from a custom starting state.
    pub fn from_state(state: GameState) -> Self {
        Game {
            states: vec![state],
            moves: Vec::new(),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, StateError> {
        Ok(Self::from_state(GameState::from_fen(fen)?))
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        // `states` always holds at least the starting state.
        &self.states[self.states.len() - 1]
    }

    /// Returns the starting state.
    pub fn start_state(&self) -> &GameState {
        &self.states[0]
    }

    /// Returns the legal destinations for the piece on `square`.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        legal_moves(square, self.state())
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.state().is_check()
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        StandardChess.game_result(self.state())
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.state().is_terminal()
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[Move] {
        &self.moves
    }

    /// Returns every state reached, starting position first.
    pub fn states(&self) -> &[GameState] {
        &self.states
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Makes a move from one square to another.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }

        let next = StandardChess.make_move(self.state(), Move::new(from, to))?;
        self.states.push(next);
        self.moves.push(Move::new(from, to));
        Ok(())
    }

    /// Makes a move given in coordinate notation, such as `e2e4`.
    pub fn make_move_uci(&mut self, uci: &str) -> Result<(), MoveError> {
        let m = Move::from_uci(uci).ok_or_else(|| MoveError::InvalidUci(uci.to_string()))?;
        self.make_move(m.from(), m.to())
    }

    /// Takes back the last move, returning it. Returns `None` at the start
    /// of the game.
    pub fn undo(&mut self) -> Option<Move> {
        let m = self.moves.pop()?;
        self.states.pop();
        Some(m)
    }

    /// Returns the current state as a FEN string.
    pub fn to_fen(&self) -> String {
        self.state().to_fen()
    }
}
