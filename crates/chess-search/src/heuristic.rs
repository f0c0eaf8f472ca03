//! One-ply heuristic move picker.
//!
//! Every legal move gets a score from simple features of the move itself
//! and of the position right after it. One of the best few moves is then
//! picked at random, which keeps play varied without blundering wildly.

use chess_core::{Move, PieceKind};
use chess_engine::{apply_move_unchecked, GameState};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of top-ranked moves the random pick chooses from.
pub const TOP_CHOICES: usize = 3;

const CAPTURE_WEIGHT: i32 = 10;
const CENTER_BONUS: i32 = 3;
const EXTENDED_CENTER_BONUS: i32 = 1;
const PROMOTION_BONUS: i32 = 80;
const DEVELOPMENT_BONUS: i32 = 2;
const CASTLING_BONUS: i32 = 5;
const CHECK_BONUS: i32 = 4;
const MATE_BONUS: i32 = 1000;

/// Scores a legal move for the side to move. Higher is better.
pub fn score_move(state: &GameState, m: Move) -> i32 {
    let board = state.board();
    let Some(piece) = board.get(m.from()) else {
        return 0;
    };
    let (from, to) = (m.from(), m.to());
    let mut score = 0;

    if let Some(victim) = board.get(to) {
        if victim.color != piece.color {
            score += CAPTURE_WEIGHT * victim.kind.value();
        }
    }

    let (row, col) = (to.row(), to.col());
    if (3..=4).contains(&row) && (3..=4).contains(&col) {
        score += CENTER_BONUS;
    } else if (2..=5).contains(&row) && (2..=5).contains(&col) {
        score += EXTENDED_CENTER_BONUS;
    }

    match piece.kind {
        PieceKind::Pawn => {
            score += i32::from(from.row().abs_diff(to.row()));
            if to.row() == piece.color.promotion_rank() {
                score += PROMOTION_BONUS;
            }
        }
        PieceKind::Knight | PieceKind::Bishop => {
            if !piece.has_moved && from.row() == piece.color.back_rank() {
                score += DEVELOPMENT_BONUS;
            }
        }
        PieceKind::King => {
            if from.col().abs_diff(to.col()) == 2 {
                score += CASTLING_BONUS;
            }
        }
        PieceKind::Rook | PieceKind::Queen => {}
    }

    let after = apply_move_unchecked(state, from, to);
    if after.is_checkmate() {
        score += MATE_BONUS;
    } else if after.is_check() {
        score += CHECK_BONUS;
    }

    score
}

/// Scores every legal move and sorts best first. Equal scores keep their
/// generation order.
pub fn rank_moves(state: &GameState) -> Vec<(Move, i32)> {
    let mut ranked: Vec<(Move, i32)> = state
        .legal_moves()
        .as_slice()
        .iter()
        .map(|&m| (m, score_move(state, m)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Picks uniformly among the [`TOP_CHOICES`] best-ranked moves.
pub fn choose_move<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<Move> {
    let ranked = rank_moves(state);
    let top = &ranked[..ranked.len().min(TOP_CHOICES)];
    let choice = top.choose(rng).map(|(m, _)| *m);
    if let Some(m) = choice {
        tracing::debug!(candidates = top.len(), chosen = %m, "heuristic move chosen");
    }
    choice
}
