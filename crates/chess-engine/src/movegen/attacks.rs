//! Attack detection.
//!
//! These predicates look outward from the target square instead of
//! generating moves for every enemy piece. King attacks are plain adjacency,
//! so nothing here depends on king move generation (which itself needs
//! attack detection for castling).

use crate::Board;
use chess_core::{Color, PieceKind, Square};

/// Knight jump offsets as (row, col) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The eight neighbouring squares as (row, col) deltas.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Diagonal ray directions.
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Orthogonal ray directions.
pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Returns true if a king standing on `king` attacks `target`.
#[inline]
pub fn king_attacks(king: Square, target: Square) -> bool {
    king.is_adjacent(target)
}

/// Returns the first occupied square along a ray, if any.
fn first_blocker(board: &Board, from: Square, (d_row, d_col): (i8, i8)) -> Option<Square> {
    let mut current = from.offset(d_row, d_col);
    while let Some(sq) = current {
        if !board.is_vacant(sq) {
            return Some(sq);
        }
        current = sq.offset(d_row, d_col);
    }
    None
}

/// Returns true if the given square is attacked by any piece of `by_color`.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    // Pawns: an attacking pawn stands one step "behind" the target from its
    // own point of view.
    let pawn_row = -by_color.pawn_direction();
    for d_col in [-1, 1] {
        if let Some(from) = sq.offset(pawn_row, d_col) {
            if board
                .get(from)
                .is_some_and(|p| p.is(PieceKind::Pawn, by_color))
            {
                return true;
            }
        }
    }

    for (d_row, d_col) in KNIGHT_OFFSETS {
        if let Some(from) = sq.offset(d_row, d_col) {
            if board
                .get(from)
                .is_some_and(|p| p.is(PieceKind::Knight, by_color))
            {
                return true;
            }
        }
    }

    if board
        .king_square(by_color)
        .is_some_and(|king| king_attacks(king, sq))
    {
        return true;
    }

    for dir in BISHOP_DIRECTIONS {
        if let Some(from) = first_blocker(board, sq, dir) {
            if board
                .get(from)
                .is_some_and(|p| p.color == by_color && p.kind.slides_diagonally())
            {
                return true;
            }
        }
    }

    for dir in ROOK_DIRECTIONS {
        if let Some(from) = first_blocker(board, sq, dir) {
            if board
                .get(from)
                .is_some_and(|p| p.color == by_color && p.kind.slides_orthogonally())
            {
                return true;
            }
        }
    }

    false
}

/// Returns true if the king of the given color is attacked.
///
/// A board without that king is never in check.
pub fn is_king_attacked(board: &Board, king_color: Color) -> bool {
    match board.king_square(king_color) {
        Some(king_sq) => is_square_attacked(board, king_sq, king_color.opposite()),
        None => false,
    }
}
