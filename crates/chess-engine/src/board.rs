//! Mailbox board representation.

use chess_core::{Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Back rank piece order from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of optional pieces, indexed `[row][col]`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

/// Returns the standard starting position with no piece marked as moved.
pub fn initialize_board() -> Board {
    Board::standard()
}

impl Board {
    /// Creates a board with no pieces on it.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_rank() as usize;
            let pawns = color.pawn_rank() as usize;
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.squares[back][col] = Some(Piece::new(*kind, color));
                board.squares[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_vacant(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Places a piece on a square, replacing whatever was there.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.row() as usize][sq.col() as usize] = Some(piece);
    }

    /// Removes and returns the piece on a square.
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row() as usize][sq.col() as usize].take()
    }

    /// Iterates over every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the squares holding pieces of the given color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Returns the square of the given color's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(PieceKind::King, color))
            .map(|(sq, _)| sq)
    }

    /// Counts the pieces of a kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces().filter(|(_, piece)| piece.is(kind, color)).count()
    }

    /// Returns the board after moving the piece on `from` to `to`.
    ///
    /// Handles the two side effects of a move: a king travelling two columns
    /// brings the corner rook to the square it crossed, and a pawn reaching the
    /// far rank becomes a queen. Every piece that moves is marked as moved. No
    /// legality checks are made; moving from an empty square returns an
    /// unchanged copy.
    pub fn with_move(&self, from: Square, to: Square) -> Board {
        let mut next = self.clone();
        let Some(piece) = next.remove(from) else {
            return next;
        };

        if piece.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
            let kingside = to.col() > from.col();
            let (rook_from, rook_to) = if kingside {
                (to.with_col(7), to.with_col(to.col() - 1))
            } else {
                (to.with_col(0), to.with_col(to.col() + 1))
            };
            if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                if let Some(rook) = next.remove(rook_from) {
                    next.put(rook_to, rook.moved());
                }
            }
        }

        let landed = if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_rank() {
            piece.promoted_to(PieceKind::Queen)
        } else {
            piece
        };
        next.put(to, landed.moved());
        next
    }

    /// Returns the piece placement field of a FEN string.
    pub fn placement_fen(&self) -> String {
        let mut fen = String::new();
        for row in 0..8 {
            let mut empty_count = 0;
            for col in 0..8 {
                match self.squares[row][col] {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }
        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8 {
                let c = self.squares[row][col].map_or('.', |piece| piece.to_fen_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement_fen())
    }
}
