//! Move selection for an automated chess opponent.
//!
//! Two strategies are available:
//! - [`Strategy::Minimax`] - depth-bounded minimax with alpha-beta pruning
//!   over the static [`evaluate`] score
//! - [`Strategy::Heuristic`] - one-ply move scoring with a random pick among
//!   the best few moves
//!
//! [`Opponent`] bundles a [`SearchConfig`] with a random number generator so
//! that games can be replayed from a seed.
//!
//! # Example
//!
//! ```
//! use chess_engine::GameState;
//! use chess_search::{select_move, Opponent, SearchConfig, Strategy};
//!
//! let state = GameState::initial();
//! assert!(select_move(&state, 1).is_some());
//!
//! let config = SearchConfig {
//!     strategy: Strategy::Heuristic,
//!     ..SearchConfig::default()
//! };
//! let mut opponent = Opponent::seeded(config, 7);
//! assert!(opponent.select_move(&state).is_some());
//! ```

pub mod evaluate;
pub mod heuristic;
pub mod minimax;

pub use evaluate::{evaluate, Score};
pub use minimax::{
    depth_for_level, search, search_with_limits, SearchLimits, SearchOutcome, MAX_DEPTH,
};

use chess_core::Move;
use chess_engine::GameState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How an [`Opponent`] picks its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Minimax with alpha-beta pruning.
    #[default]
    Minimax,
    /// One-ply scoring, random among the top moves.
    Heuristic,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Minimax => write!(f, "minimax"),
            Strategy::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Search settings for one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Move selection strategy. Defaults to minimax.
    #[serde(default)]
    pub strategy: Strategy,
    /// Difficulty level; minimax searches `level + 1` plies, at most
    /// [`MAX_DEPTH`]. Defaults to 2.
    #[serde(default = "default_level")]
    pub level: u8,
    /// Optional time limit for a minimax search, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

fn default_level() -> u8 {
    2
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            strategy: Strategy::default(),
            level: default_level(),
            deadline_ms: None,
        }
    }
}

impl SearchConfig {
    /// Search depth in plies for this level.
    pub fn depth(&self) -> u8 {
        depth_for_level(self.level)
    }

    /// Time limit for a search, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

/// An automated player.
#[derive(Debug, Clone)]
pub struct Opponent<R> {
    config: SearchConfig,
    rng: R,
}

impl Opponent<StdRng> {
    /// Creates an opponent whose random choices are fixed by `seed`.
    pub fn seeded(config: SearchConfig, seed: u64) -> Self {
        Opponent::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Opponent<R> {
    /// Creates an opponent drawing randomness from `rng`.
    pub fn new(config: SearchConfig, rng: R) -> Self {
        Opponent { config, rng }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Chooses a move for the side to move, or `None` if it has no legal
    /// move.
    pub fn select_move(&mut self, state: &GameState) -> Option<Move> {
        match self.config.strategy {
            Strategy::Minimax => {
                search(state, self.config.depth(), self.config.deadline()).best_move
            }
            Strategy::Heuristic => heuristic::choose_move(state, &mut self.rng),
        }
    }
}

/// Chooses a move with minimax at the given level, without a deadline.
pub fn select_move(state: &GameState, level: u8) -> Option<Move> {
    search(state, depth_for_level(level), None).best_move
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::apply_move;
    use proptest::prelude::*;
    use super::Strategy;

    const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

    #[test]
    fn config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.strategy, Strategy::Minimax);
        assert_eq!(config.level, 2);
        assert_eq!(config.depth(), 3);
        assert_eq!(config.deadline(), None);
    }

    #[test]
    fn config_from_toml() {
        let config: SearchConfig = toml::from_str(
            r#"
strategy = "heuristic"
level = 4
deadline_ms = 250
"#,
        )
        .unwrap();
        assert_eq!(config.strategy, Strategy::Heuristic);
        assert_eq!(config.depth(), 5);
        assert_eq!(config.deadline(), Some(Duration::from_millis(250)));

        let partial: SearchConfig = toml::from_str("level = 0").unwrap();
        assert_eq!(partial.strategy, Strategy::Minimax);
        assert_eq!(partial.depth(), 1);
    }

    #[test]
    fn config_rejects_unknown_strategy() {
        assert!(toml::from_str::<SearchConfig>(r#"strategy = "random""#).is_err());
    }

    #[test]
    fn config_roundtrip() {
        let config = SearchConfig {
            strategy: Strategy::Heuristic,
            level: 1,
            deadline_ms: Some(100),
        };
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: SearchConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn no_move_when_game_is_over() {
        let mated = GameState::from_fen(FOOLS_MATE).unwrap();
        assert_eq!(select_move(&mated, 2), None);

        let mut opponent = Opponent::seeded(
            SearchConfig {
                strategy: Strategy::Heuristic,
                ..SearchConfig::default()
            },
            3,
        );
        assert_eq!(opponent.select_move(&mated), None);
    }

    #[test]
    fn selected_move_is_legal() {
        let state = GameState::initial();
        let m = select_move(&state, 1).unwrap();
        assert!(apply_move(&state, m.from(), m.to()).is_ok());
    }

    #[test]
    fn crowded_board_is_searchable() {
        let state =
            GameState::from_fen("QQQQQQQk/Q6Q/Q6Q/Q6Q/Q2Q3Q/Q6Q/Q6Q/KQQQQQQQ w - - 0 1").unwrap();
        let m = select_move(&state, 0).unwrap();
        assert!(state.legal_moves().contains(m));
    }

    #[test]
    fn finds_mate_in_one() {
        let state = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let m = select_move(&state, 0).unwrap();
        let after = apply_move(&state, m.from(), m.to()).unwrap();
        assert!(after.is_checkmate());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn same_seed_same_move(seed in any::<u64>(), level in 0u8..2) {
            let state = apply_move(
                &GameState::initial(),
                chess_core::Square::from_algebraic("e2").unwrap(),
                chess_core::Square::from_algebraic("e4").unwrap(),
            )
            .unwrap();
            for strategy in [Strategy::Minimax, Strategy::Heuristic] {
                let config = SearchConfig { strategy, level, deadline_ms: None };
                let a = Opponent::seeded(config.clone(), seed).select_move(&state);
                let b = Opponent::seeded(config, seed).select_move(&state);
                prop_assert!(a.is_some());
                prop_assert_eq!(a, b);
            }
        }
    }
}
