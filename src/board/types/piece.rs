//! Piece, rank and color types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side colors. Black always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Both colors in index order (Black=0, White=1)
    pub const BOTH: [Color; 2] = [Color::Black, Color::White];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Row this color starts from and defends (0 for Black, 7 for White)
    #[inline]
    #[must_use]
    pub const fn back_row(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 7,
        }
    }

    /// Row on which a man of this color is crowned
    #[inline]
    #[must_use]
    pub const fn promotion_row(self) -> usize {
        self.opponent().back_row()
    }

    /// Row delta of a forward step (+1 for Black, -1 for White)
    #[inline]
    #[must_use]
    pub(crate) const fn forward(self) -> isize {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// Single-letter tag used by the FEN text form
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'B' => Some(Color::Black),
            'W' => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Piece rank. A man is promoted to king on the opponent's back row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Man,
    King,
}

impl Rank {
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Rank::Man => 0,
            Rank::King => 1,
        }
    }
}

/// A piece on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    #[inline]
    #[must_use]
    pub const fn man(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::Man,
        }
    }

    #[inline]
    #[must_use]
    pub const fn king(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::King,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self.rank, Rank::King)
    }

    /// Returns the same piece with king rank
    #[inline]
    #[must_use]
    pub const fn crowned(self) -> Self {
        Piece::king(self.color)
    }

    /// Index into 4-entry tables (black man, black king, white man, white king)
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.color.index() * 2 + self.rank.index()
    }

    /// Board diagram character: `b`/`w` for men, `B`/`W` for kings
    #[must_use]
    pub fn to_char(self) -> char {
        let c = self.color.to_char();
        if self.is_king() {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = if self.is_king() { "king" } else { "man" };
        write!(f, "{} {rank}", self.color)
    }
}
