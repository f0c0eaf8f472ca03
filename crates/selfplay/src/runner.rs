//! Game loop for engine-vs-engine play.

use crate::config::SelfplayConfig;
use chess_core::{Color, Move};
use chess_engine::{Game, GameResult, GameState, MoveError};
use chess_search::Opponent;
use rand::rngs::StdRng;
use std::fmt;

/// A finished (or abandoned) game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Moves played, in order.
    pub moves: Vec<Move>,
    /// Position after the last move.
    pub final_state: GameState,
    /// Outcome, or `None` when the ply limit was reached first.
    pub result: Option<GameResult>,
}

impl GameRecord {
    /// Moves in coordinate notation, separated by spaces.
    pub fn move_text(&self) -> String {
        self.moves
            .iter()
            .map(|m| m.to_uci())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "moves: {}", self.move_text())?;
        writeln!(f, "final: {}", self.final_state.to_fen())?;
        match self.result {
            Some(result) => write!(f, "result: {}", result),
            None => write!(f, "result: * (stopped after {} plies)", self.moves.len()),
        }
    }
}

/// Plays games between two configured opponents.
pub struct SelfPlay {
    white: Opponent<StdRng>,
    black: Opponent<StdRng>,
    max_plies: usize,
}

impl SelfPlay {
    /// Creates both players from the configuration. Each side gets its own
    /// generator derived from the configured seed.
    pub fn new(config: &SelfplayConfig) -> Self {
        SelfPlay {
            white: Opponent::seeded(config.white.clone(), config.seed),
            black: Opponent::seeded(config.black.clone(), config.seed.wrapping_add(1)),
            max_plies: config.max_plies,
        }
    }

    /// Plays from `start` until the game ends or the ply limit is reached.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] if a player picks a move the rules reject.
    pub fn play(&mut self, start: GameState) -> Result<GameRecord, MoveError> {
        let mut game = Game::from_state(start);

        while !game.is_game_over() && game.ply_count() < self.max_plies {
            let side = game.state().side_to_move();
            let player = match side {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };
            let Some(m) = player.select_move(game.state()) else {
                break;
            };
            game.make_move(m.from(), m.to())?;
            tracing::info!(ply = game.ply_count(), %side, mv = %m, "move played");
        }

        let result = game.result();
        match result {
            Some(result) => tracing::info!(%result, plies = game.ply_count(), "game over"),
            None => tracing::info!(plies = game.ply_count(), "ply limit reached"),
        }

        Ok(GameRecord {
            moves: game.move_history().to_vec(),
            final_state: game.state().clone(),
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::DrawReason;
    use chess_search::{SearchConfig, Strategy};

    fn heuristic() -> SearchConfig {
        SearchConfig {
            strategy: Strategy::Heuristic,
            ..SearchConfig::default()
        }
    }

    fn config(white: SearchConfig, black: SearchConfig, max_plies: usize) -> SelfplayConfig {
        SelfplayConfig {
            seed: 11,
            max_plies,
            start_fen: None,
            white,
            black,
        }
    }

    #[test]
    fn stops_at_ply_limit() {
        let config = config(heuristic(), heuristic(), 6);
        let record = SelfPlay::new(&config).play(GameState::initial()).unwrap();
        assert_eq!(record.moves.len(), 6);
        assert_eq!(record.result, None);
        assert_eq!(record.final_state.side_to_move(), Color::White);
        assert!(record.to_string().contains("stopped after 6 plies"));
    }

    #[test]
    fn same_seed_replays_the_same_game() {
        let config = config(heuristic(), heuristic(), 12);
        let a = SelfPlay::new(&config).play(GameState::initial()).unwrap();
        let b = SelfPlay::new(&config).play(GameState::initial()).unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.final_state, b.final_state);
    }

    #[test]
    fn minimax_delivers_mate() {
        let white = SearchConfig {
            level: 0,
            ..SearchConfig::default()
        };
        let config = config(white, heuristic(), 10);
        let start = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let record = SelfPlay::new(&config).play(start).unwrap();
        assert_eq!(record.move_text(), "a1a8");
        assert_eq!(record.result, Some(GameResult::WhiteWins));
        assert!(record.to_string().ends_with("result: 1-0"));
    }

    #[test]
    fn finished_start_plays_nothing() {
        let config = config(heuristic(), heuristic(), 10);
        let start = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let record = SelfPlay::new(&config).play(start).unwrap();
        assert!(record.moves.is_empty());
        assert_eq!(record.result, Some(GameResult::Draw(DrawReason::Stalemate)));
    }
}
