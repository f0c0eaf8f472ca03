//! Board square representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a row/column pair lies outside the board.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("square ({row}, {col}) is off the board")]
pub struct SquareError {
    pub row: u8,
    pub col: u8,
}

/// A square on the chess board, addressed by row and column (both 0-7).
///
/// Row 0 is black's back rank (rank 8) and row 7 is white's back rank
/// (rank 1); column 0 is the a-file. The orientation never flips.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SquareRepr", into = "SquareRepr")]
pub struct Square {
    row: u8,
    col: u8,
}

/// Unchecked wire form of a [`Square`].
#[derive(Serialize, Deserialize)]
struct SquareRepr {
    row: u8,
    col: u8,
}

impl TryFrom<SquareRepr> for Square {
    type Error = SquareError;

    fn try_from(repr: SquareRepr) -> Result<Self, Self::Error> {
        Square::new(repr.row, repr.col).ok_or(SquareError {
            row: repr.row,
            col: repr.col,
        })
    }
}

impl From<Square> for SquareRepr {
    fn from(sq: Square) -> Self {
        SquareRepr {
            row: sq.row,
            col: sq.col,
        }
    }
}

impl Square {
    /// Creates a square from row and column, or `None` if either is out of range.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Creates a square from index (0-63, row-major from a8).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square {
                row: index / 8,
                col: index % 8,
            })
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square {
            row: 7 - (rank - b'1'),
            col: file - b'a',
        })
    }

    /// Returns the row (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the index (0-63, row-major from a8).
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// Returns the square shifted by the given deltas, or `None` if that
    /// leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        if row < 0 || row > 7 || col < 0 || col > 7 {
            None
        } else {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        }
    }

    /// Returns the same row with a different column, if on the board.
    #[inline]
    pub const fn with_col(self, col: u8) -> Option<Self> {
        Square::new(self.row, col)
    }

    /// Returns true if the two squares touch (including diagonally).
    #[inline]
    pub const fn is_adjacent(self, other: Square) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr <= 1 && dc <= 1 && (dr | dc) != 0
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(|i| Square {
            row: i / 8,
            col: i % 8,
        })
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        format!("{}{}", file, rank)
    }

    // Home squares
    pub const A1: Square = Square { row: 7, col: 0 };
    pub const C1: Square = Square { row: 7, col: 2 };
    pub const D1: Square = Square { row: 7, col: 3 };
    pub const E1: Square = Square { row: 7, col: 4 };
    pub const F1: Square = Square { row: 7, col: 5 };
    pub const G1: Square = Square { row: 7, col: 6 };
    pub const H1: Square = Square { row: 7, col: 7 };
    pub const A8: Square = Square { row: 0, col: 0 };
    pub const C8: Square = Square { row: 0, col: 2 };
    pub const D8: Square = Square { row: 0, col: 3 };
    pub const E8: Square = Square { row: 0, col: 4 };
    pub const F8: Square = Square { row: 0, col: 5 };
    pub const G8: Square = Square { row: 0, col: 6 };
    pub const H8: Square = Square { row: 0, col: 7 };
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
