//! Move generation.
//!
//! Candidate (pseudo-legal) targets are generated per piece kind by walking
//! the mailbox board, then filtered by replaying each candidate on a scratch
//! board and rejecting the ones that leave the mover's own king attacked.
//!
//! Generation is keyed on the piece standing on a square, not on whose turn
//! it is, so the same functions answer "where can this piece go" and "what
//! can this side play".

mod attacks;
pub mod perft;

use crate::{Board, GameState};
use chess_core::{Color, Move, Piece, PieceKind, Square};

pub use attacks::{is_king_attacked, is_square_attacked, king_attacks};
use attacks::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};

/// A list of moves.
///
/// Ordinary positions stay under 218 legal moves, but FEN import accepts any
/// board with one king per side, so the list grows on demand.
#[derive(Clone, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Typical upper bound on legal moves, used as the initial capacity.
    pub const TYPICAL_MAX_MOVES: usize = 218;

    /// Creates an empty move list.
    #[inline]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(Self::TYPICAL_MAX_MOVES),
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns true if the list contains the move.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.moves.contains(&m)
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Returns the legal destination squares for the piece on `square`.
///
/// An empty square yields no moves. Turn order is not checked.
pub fn legal_moves(square: Square, state: &GameState) -> Vec<Square> {
    legal_targets(state.board(), square)
}

/// Returns the legal destination squares for the piece on `from`.
pub fn legal_targets(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };
    let mut targets = pseudo_legal_targets(board, from);
    targets.retain(|&to| !is_king_attacked(&board.with_move(from, to), piece.color));
    targets
}

/// Generates all legal moves for the pieces of the given color.
pub fn generate_moves(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, _) in board.pieces_of(color) {
        for to in legal_targets(board, from) {
            moves.push(Move::new(from, to));
        }
    }
    moves
}

/// Returns true if the given color has at least one legal move.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| !legal_targets(board, from).is_empty())
}

/// Returns the candidate destinations for the piece on `from`, including
/// castling, without checking whether the mover's king ends up attacked.
pub fn pseudo_legal_targets(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    let mut targets = Vec::with_capacity(28);
    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, from, piece.color, &mut targets),
        PieceKind::Knight => step_targets(board, from, piece.color, &KNIGHT_OFFSETS, &mut targets),
        PieceKind::Bishop => {
            slide_targets(board, from, piece.color, &BISHOP_DIRECTIONS, &mut targets)
        }
        PieceKind::Rook => slide_targets(board, from, piece.color, &ROOK_DIRECTIONS, &mut targets),
        PieceKind::Queen => {
            slide_targets(board, from, piece.color, &BISHOP_DIRECTIONS, &mut targets);
            slide_targets(board, from, piece.color, &ROOK_DIRECTIONS, &mut targets);
        }
        PieceKind::King => {
            step_targets(board, from, piece.color, &KING_OFFSETS, &mut targets);
            castling_targets(board, from, piece, &mut targets);
        }
    }
    targets
}

/// Pushes, single and double, plus diagonal captures onto enemy pieces.
fn pawn_targets(board: &Board, from: Square, color: Color, targets: &mut Vec<Square>) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_vacant(one) {
            targets.push(one);
            if from.row() == color.pawn_rank() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_vacant(two) {
                        targets.push(two);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(to) = from.offset(dir, d_col) {
            if board.get(to).is_some_and(|p| p.color != color) {
                targets.push(to);
            }
        }
    }
}

/// Single-step pieces: knight jumps and king steps.
fn step_targets(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if board.get(to).map_or(true, |p| p.color != color) {
                targets.push(to);
            }
        }
    }
}

/// Sliding pieces: each ray runs until the edge, stops before a friendly
/// piece and includes an enemy blocker as a capture.
fn slide_targets(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut current = from.offset(d_row, d_col);
        while let Some(to) = current {
            match board.get(to) {
                None => targets.push(to),
                Some(blocker) => {
                    if blocker.color != color {
                        targets.push(to);
                    }
                    break;
                }
            }
            current = to.offset(d_row, d_col);
        }
    }
}

/// Castling destinations for an unmoved king on its home square.
///
/// Requires an unmoved friendly rook in the corner, empty squares between
/// king and rook, the king not in check, and no attacked square on the
/// king's path including its destination.
fn castling_targets(board: &Board, from: Square, king: Piece, targets: &mut Vec<Square>) {
    let us = king.color;
    let them = us.opposite();

    if king.has_moved || from.row() != us.back_rank() || from.col() != 4 {
        return;
    }
    if is_square_attacked(board, from, them) {
        return;
    }

    // (rook column, king destination column)
    for (rook_col, dest_col) in [(7u8, 6u8), (0, 2)] {
        let rook_ready = from
            .with_col(rook_col)
            .and_then(|sq| board.get(sq))
            .is_some_and(|rook| rook.is(PieceKind::Rook, us) && !rook.has_moved);
        if !rook_ready {
            continue;
        }

        let (low, high) = if rook_col > from.col() {
            (from.col() + 1, rook_col)
        } else {
            (rook_col + 1, from.col())
        };
        let between_empty = (low..high)
            .filter_map(|col| from.with_col(col))
            .all(|sq| board.is_vacant(sq));
        if !between_empty {
            continue;
        }

        let (path_low, path_high) = if dest_col > from.col() {
            (from.col() + 1, dest_col)
        } else {
            (dest_col, from.col() - 1)
        };
        let path_safe = (path_low..=path_high)
            .filter_map(|col| from.with_col(col))
            .all(|sq| !is_square_attacked(board, sq, them));
        if !path_safe {
            continue;
        }

        if let Some(dest) = from.with_col(dest_col) {
            targets.push(dest);
        }
    }
}
