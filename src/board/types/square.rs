//! Square types and utilities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// Number of playable squares.
pub const SQUARE_COUNT: usize = 32;

/// Diagonal directions as (row delta, column delta), in generation order:
/// north-east, north-west, south-east, south-west. North is increasing row.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// One of the 32 playable squares.
///
/// Stored as a dense index `0..32` (`row * 4 + column / 2`). Playable squares
/// are those where `row + column` is even, so row 0 holds columns 0, 2, 4, 6.
/// The public square number used in notation is `index + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    /// Create a square from (row, column), `None` if off-board or unplayable
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < 8 && col < 8 && (row + col) % 2 == 0 {
            Some(Square((row * 4 + col / 2) as u8))
        } else {
            None
        }
    }

    /// Create a square from its dense index (0-31)
    #[must_use]
    pub const fn from_index(idx: usize) -> Option<Self> {
        if idx < SQUARE_COUNT {
            Some(Square(idx as u8))
        } else {
            None
        }
    }

    /// Create a square from its notation number (1-32)
    #[must_use]
    pub const fn from_number(number: usize) -> Option<Self> {
        if number == 0 {
            None
        } else {
            Square::from_index(number - 1)
        }
    }

    /// Iterate all playable squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT as u8).map(Square)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Notation number (1-32)
    #[inline]
    #[must_use]
    pub const fn number(self) -> usize {
        self.0 as usize + 1
    }

    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.0 as usize / 4
    }

    #[inline]
    #[must_use]
    pub const fn col(self) -> usize {
        let row = self.row();
        (self.0 as usize % 4) * 2 + (row % 2)
    }

    /// The square reached by moving `steps` times along a diagonal direction
    #[must_use]
    pub fn offset(self, (dr, dc): (isize, isize), steps: isize) -> Option<Square> {
        let row = self.row() as isize + dr * steps;
        let col = self.col() as isize + dc * steps;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Square::new(row as usize, col as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        if row >= 8 {
            return Err(SquareError::RowOutOfBounds { row });
        }
        if col >= 8 {
            return Err(SquareError::ColumnOutOfBounds { col });
        }
        Square::new(row, col).ok_or(SquareError::Unplayable { row, col })
    }
}

impl FromStr for Square {
    type Err = SquareError;

    /// Accepts a square number (`1`-`32`) or algebraic notation (`a1`-`h8`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };

        if let Ok(number) = s.parse::<usize>() {
            return Square::from_number(number).ok_or(SquareError::NumberOutOfRange { number });
        }

        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let col = match bytes[0] {
            b'a'..=b'h' => (bytes[0] - b'a') as usize,
            _ => return Err(invalid()),
        };
        let row = match bytes[1] {
            b'1'..=b'8' => (bytes[1] - b'1') as usize,
            _ => return Err(invalid()),
        };
        Square::try_from((row, col))
    }
}
