//! Minimax search with alpha-beta pruning.
//!
//! White maximizes and black minimizes the [`evaluate`] score. The tree is
//! searched to a fixed depth with no move ordering, so the root keeps the
//! first of several equally scored moves.

use crate::evaluate::{evaluate, Score};
use chess_core::{Color, Move};
use chess_engine::{apply_move_unchecked, GameState};
use std::time::{Duration, Instant};

/// Deepest search allowed, in plies.
pub const MAX_DEPTH: u8 = 5;

/// How many nodes to visit between clock reads.
const TIME_CHECK_INTERVAL: u64 = 256;

/// Maps a difficulty level to a search depth in plies.
pub fn depth_for_level(level: u8) -> u8 {
    level.saturating_add(1).min(MAX_DEPTH)
}

/// Conditions that cut a search short. The default has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Wall-clock budget, measured from the start of the search.
    pub deadline: Option<Duration>,
    /// Node budget; the search stops on the node that reaches it.
    pub max_nodes: Option<u64>,
}

impl SearchLimits {
    /// Limits with only a time budget.
    pub fn deadline(deadline: Option<Duration>) -> Self {
        SearchLimits {
            deadline,
            max_nodes: None,
        }
    }
}

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Chosen move, `None` when the side to move has no legal move.
    pub best_move: Option<Move>,
    /// Score of the chosen move, when at least one root move was searched
    /// to completion.
    pub score: Option<Score>,
    /// Nodes visited.
    pub nodes: u64,
    /// Depth searched.
    pub depth: u8,
    /// True if a limit cut the search short.
    pub stopped: bool,
}

/// Search state
struct Searcher {
    nodes: u64,
    start_time: Instant,
    max_time: Option<Duration>,
    max_nodes: Option<u64>,
    stopped: bool,
}

impl Searcher {
    fn new(limits: SearchLimits) -> Self {
        Searcher {
            nodes: 0,
            start_time: Instant::now(),
            max_time: limits.deadline,
            max_nodes: limits.max_nodes,
            stopped: false,
        }
    }

    fn check_limits(&mut self) {
        if self.max_nodes.is_some_and(|max| self.nodes >= max) {
            self.stopped = true;
        } else if self.nodes % TIME_CHECK_INTERVAL == 0 {
            self.poll_deadline();
        }
    }

    fn poll_deadline(&mut self) {
        if let Some(max_time) = self.max_time {
            if self.start_time.elapsed() >= max_time {
                self.stopped = true;
            }
        }
    }

    fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.nodes += 1;
        self.check_limits();

        if self.stopped {
            return 0;
        }

        // Terminal node
        if depth == 0 || state.is_terminal() {
            return evaluate(state);
        }

        let moves = state.legal_moves();

        match state.side_to_move() {
            Color::White => {
                let mut best = Score::MIN;
                for m in &moves {
                    let child = apply_move_unchecked(state, m.from(), m.to());
                    let score = self.alpha_beta(&child, depth - 1, alpha, beta);
                    if self.stopped {
                        return 0;
                    }
                    best = best.max(score);
                    alpha = alpha.max(score);
                    if beta <= alpha {
                        break;
                    }
                }
                best
            }
            Color::Black => {
                let mut best = Score::MAX;
                for m in &moves {
                    let child = apply_move_unchecked(state, m.from(), m.to());
                    let score = self.alpha_beta(&child, depth - 1, alpha, beta);
                    if self.stopped {
                        return 0;
                    }
                    best = best.min(score);
                    beta = beta.min(score);
                    if beta <= alpha {
                        break;
                    }
                }
                best
            }
        }
    }
}

/// Searches `depth` plies (clamped to 1..=[`MAX_DEPTH`]) and returns the
/// best move for the side to move.
///
/// Root moves are tried in generation order and only a strictly better
/// score replaces the current best. With a deadline, the search stops once
/// it passes and keeps the best root move searched to completion, falling
/// back to the first legal move.
pub fn search(state: &GameState, depth: u8, deadline: Option<Duration>) -> SearchOutcome {
    search_with_limits(state, depth, SearchLimits::deadline(deadline))
}

/// Like [`search`], with any combination of [`SearchLimits`].
pub fn search_with_limits(state: &GameState, depth: u8, limits: SearchLimits) -> SearchOutcome {
    let depth = depth.clamp(1, MAX_DEPTH);
    let mut searcher = Searcher::new(limits);

    let moves = state.legal_moves();
    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            score: None,
            nodes: 0,
            depth,
            stopped: false,
        };
    }

    let maximizing = state.side_to_move() == Color::White;
    let mut best: Option<(Move, Score)> = None;
    let mut alpha = Score::MIN;
    let mut beta = Score::MAX;

    for m in &moves {
        searcher.poll_deadline();
        if searcher.stopped {
            break;
        }

        let child = apply_move_unchecked(state, m.from(), m.to());
        let score = searcher.alpha_beta(&child, depth - 1, alpha, beta);

        if searcher.stopped {
            break;
        }

        let improves = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((*m, score));
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }
    }

    let best_move = best.map(|(m, _)| m).unwrap_or(moves[0]);
    let score = best.map(|(_, s)| s);

    tracing::debug!(
        depth,
        nodes = searcher.nodes,
        score = ?score,
        best = %best_move,
        stopped = searcher.stopped,
        elapsed_ms = searcher.start_time.elapsed().as_millis() as u64,
        "minimax search finished"
    );

    SearchOutcome {
        best_move: Some(best_move),
        score,
        nodes: searcher.nodes,
        depth,
        stopped: searcher.stopped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    /// Plain minimax without pruning, for cross-checking.
    fn reference(state: &GameState, depth: u8) -> Score {
        if depth == 0 || state.is_terminal() {
            return evaluate(state);
        }
        let scores = state
            .legal_moves()
            .as_slice()
            .iter()
            .map(|m| reference(&apply_move_unchecked(state, m.from(), m.to()), depth - 1))
            .collect::<Vec<_>>();
        match state.side_to_move() {
            Color::White => scores.into_iter().max().unwrap_or(0),
            Color::Black => scores.into_iter().min().unwrap_or(0),
        }
    }

    #[test]
    fn depth_from_level() {
        assert_eq!(depth_for_level(0), 1);
        assert_eq!(depth_for_level(1), 2);
        assert_eq!(depth_for_level(2), 3);
        assert_eq!(depth_for_level(4), 5);
        assert_eq!(depth_for_level(9), 5);
        assert_eq!(depth_for_level(u8::MAX), 5);
    }

    #[test]
    fn no_move_when_mated() {
        let state = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let outcome = search(&state, 3, None);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, None);
    }

    #[test]
    fn no_move_when_stalemated() {
        let state = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(search(&state, 2, None).best_move, None);
    }

    #[test]
    fn takes_a_hanging_queen() {
        let state = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let outcome = search(&state, 1, None);
        assert_eq!(outcome.best_move, Some(Move::new(sq("d2"), sq("d5"))));
    }

    #[test]
    fn black_takes_a_hanging_queen() {
        let state = GameState::from_fen("4k3/3r4/8/8/3Q4/8/8/4K3 b - - 0 1").unwrap();
        let outcome = search(&state, 2, None);
        assert_eq!(outcome.best_move, Some(Move::new(sq("d7"), sq("d4"))));
        assert!(outcome.score.unwrap() < 0);
    }

    #[test]
    fn root_score_matches_plain_minimax() {
        let state = GameState::from_fen("4k3/8/8/3q4/8/2N5/3R4/4K3 w - - 0 1").unwrap();
        let outcome = search(&state, 2, None);
        assert_eq!(outcome.score, Some(reference(&state, 2)));
    }

    #[test]
    fn depth_is_clamped() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert_eq!(search(&state, 0, None).depth, 1);
        assert_eq!(search(&state, 9, Some(Duration::ZERO)).depth, MAX_DEPTH);
    }

    #[test]
    fn expired_deadline_returns_first_legal_move() {
        let state = GameState::initial();
        let outcome = search(&state, 4, Some(Duration::ZERO));
        assert!(outcome.stopped);
        assert_eq!(outcome.best_move, Some(state.legal_moves()[0]));
        assert_eq!(outcome.score, None);
    }

    #[test]
    fn stop_after_first_root_moves_keeps_best_completed() {
        let state = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let limits = SearchLimits {
            deadline: None,
            max_nodes: Some(3),
        };
        let outcome = search_with_limits(&state, 1, limits);
        assert!(outcome.stopped);
        assert_eq!(outcome.nodes, 3);

        // Two depth-1 root moves finished before the third node hit the budget.
        let moves = state.legal_moves();
        let scored: Vec<(Move, Score)> = moves.as_slice()[..2]
            .iter()
            .map(|&m| (m, evaluate(&apply_move_unchecked(&state, m.from(), m.to()))))
            .collect();
        let expected = if scored[1].1 > scored[0].1 { scored[1] } else { scored[0] };
        assert_eq!(outcome.best_move, Some(expected.0));
        assert_eq!(outcome.score, Some(expected.1));
    }

    #[test]
    fn node_budget_above_tree_size_changes_nothing() {
        let state = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let unbounded = search(&state, 2, None);
        let limits = SearchLimits {
            deadline: None,
            max_nodes: Some(unbounded.nodes + 1),
        };
        let bounded = search_with_limits(&state, 2, limits);
        assert!(!bounded.stopped);
        assert_eq!(bounded, unbounded);
    }

    #[test]
    fn generous_deadline_matches_unbounded_search() {
        let state = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let unbounded = search(&state, 2, None);
        let bounded = search(&state, 2, Some(Duration::from_secs(60)));
        assert_eq!(bounded.best_move, unbounded.best_move);
        assert_eq!(bounded.score, unbounded.score);
        assert!(!bounded.stopped);
    }

    #[test]
    fn searching_does_not_change_the_state() {
        let state = GameState::initial();
        let before = state.clone();
        let _ = search(&state, 2, None);
        assert_eq!(state, before);
    }
}
