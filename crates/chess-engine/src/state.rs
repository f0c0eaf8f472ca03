//! Immutable game state snapshots.

use crate::error::StateError;
use crate::movegen::{generate_moves, has_legal_move, is_king_attacked, MoveList};
use crate::Board;
use chess_core::{Color, FenParser, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position together with the side to move and its cached status.
///
/// States are never mutated once built. Applying a move produces a new
/// state (see [`apply_move`](crate::apply_move)), so earlier snapshots stay
/// valid and can be kept around for history or search.
///
/// The check, checkmate and stalemate flags describe the side to move and
/// are computed once on construction.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateRepr", into = "StateRepr")]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    is_check: bool,
    is_checkmate: bool,
    is_stalemate: bool,
    fullmove_number: u32,
}

/// Serialized form: the status flags are derived data and are rebuilt.
#[derive(Serialize, Deserialize)]
struct StateRepr {
    board: Board,
    side_to_move: Color,
    fullmove_number: u32,
}

impl TryFrom<StateRepr> for GameState {
    type Error = StateError;

    fn try_from(repr: StateRepr) -> Result<Self, Self::Error> {
        GameState::with_fullmove(repr.board, repr.side_to_move, repr.fullmove_number)
    }
}

impl From<GameState> for StateRepr {
    fn from(state: GameState) -> Self {
        StateRepr {
            board: state.board,
            side_to_move: state.side_to_move,
            fullmove_number: state.fullmove_number,
        }
    }
}

impl GameState {
    /// Builds a state at move 1, rejecting boards without exactly one king
    /// per side.
    pub fn new(board: Board, side_to_move: Color) -> Result<Self, StateError> {
        Self::with_fullmove(board, side_to_move, 1)
    }

    /// Builds a state with an explicit fullmove number.
    pub fn with_fullmove(
        board: Board,
        side_to_move: Color,
        fullmove_number: u32,
    ) -> Result<Self, StateError> {
        for color in Color::ALL {
            let count = board.count(PieceKind::King, color);
            if count != 1 {
                return Err(StateError::InvalidKingCount { color, count });
            }
        }
        Ok(Self::from_parts(board, side_to_move, fullmove_number.max(1)))
    }

    /// The standard starting position with white to move.
    pub fn initial() -> Self {
        Self::from_parts(Board::standard(), Color::White, 1)
    }

    /// Builds a state without validating kings. Used after applying a legal
    /// move to an already valid state.
    pub(crate) fn from_parts(board: Board, side_to_move: Color, fullmove_number: u32) -> Self {
        let is_check = is_king_attacked(&board, side_to_move);
        let can_move = has_legal_move(&board, side_to_move);
        GameState {
            is_check,
            is_checkmate: is_check && !can_move,
            is_stalemate: !is_check && !can_move,
            board,
            side_to_move,
            fullmove_number,
        }
    }

    /// Parses a FEN string into a state.
    ///
    /// Kings and rooks on their home squares count as unmoved only when the
    /// castling field grants the matching right. Pawns off their starting
    /// rank, and other pieces off their back rank, count as moved. The en
    /// passant field is ignored.
    pub fn from_fen(fen: &str) -> Result<Self, StateError> {
        let parsed = FenParser::parse(fen)?;
        let mut board = Board::empty();
        for (sq, kind, color) in parsed.pieces() {
            let piece = Piece::new(kind, color);
            let piece = if starts_unmoved(&parsed, sq, kind, color) {
                piece
            } else {
                piece.moved()
            };
            board.put(sq, piece);
        }
        Self::with_fullmove(board, parsed.side_to_move(), parsed.fullmove_number)
    }

    /// Returns the FEN string for this state.
    ///
    /// Castling rights are derived from the moved flags of kings and rooks
    /// on their home squares. The halfmove clock is not tracked and is
    /// always written as 0.
    pub fn to_fen(&self) -> String {
        let active = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!(
            "{} {} {} - 0 {}",
            self.board.placement_fen(),
            active,
            castling_field(&self.board),
            self.fullmove_number
        )
    }

    /// Returns the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns true if the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.is_check
    }

    /// Returns true if the side to move is checkmated.
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }

    /// Returns true if the side to move is stalemated.
    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.is_stalemate
    }

    /// Returns true if the game has ended in this state.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_checkmate || self.is_stalemate
    }

    /// Returns the fullmove number, starting at 1 and incremented after
    /// each black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Generates every legal move for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        generate_moves(&self.board, self.side_to_move)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameState({})", self.to_fen())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move", self.side_to_move)?;
        if self.is_checkmate {
            write!(f, " (checkmate)")?;
        } else if self.is_stalemate {
            write!(f, " (stalemate)")?;
        } else if self.is_check {
            write!(f, " (check)")?;
        }
        Ok(())
    }
}

fn castling_chars(color: Color) -> (char, char) {
    match color {
        Color::White => ('K', 'Q'),
        Color::Black => ('k', 'q'),
    }
}

/// Decides whether a piece read from FEN has never moved.
fn starts_unmoved(fen: &FenParser, sq: Square, kind: PieceKind, color: Color) -> bool {
    let (kingside, queenside) = castling_chars(color);
    let on_back_rank = sq.row() == color.back_rank();
    match kind {
        PieceKind::Pawn => sq.row() == color.pawn_rank(),
        PieceKind::King => {
            on_back_rank
                && sq.col() == 4
                && (fen.has_castling_right(kingside) || fen.has_castling_right(queenside))
        }
        PieceKind::Rook => {
            on_back_rank
                && ((sq.col() == 7 && fen.has_castling_right(kingside))
                    || (sq.col() == 0 && fen.has_castling_right(queenside)))
        }
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => on_back_rank,
    }
}

fn castling_field(board: &Board) -> String {
    let mut field = String::new();
    for color in Color::ALL {
        let home = color.back_rank();
        let unmoved = |col: u8, kind: PieceKind| {
            Square::new(home, col)
                .and_then(|sq| board.get(sq))
                .is_some_and(|p| p.is(kind, color) && !p.has_moved)
        };
        if !unmoved(4, PieceKind::King) {
            continue;
        }
        let (kingside, queenside) = castling_chars(color);
        if unmoved(7, PieceKind::Rook) {
            field.push(kingside);
        }
        if unmoved(0, PieceKind::Rook) {
            field.push(queenside);
        }
    }
    if field.is_empty() {
        field.push('-');
    }
    field
}
