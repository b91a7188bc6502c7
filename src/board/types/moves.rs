//! Move representation.

use std::fmt;
use std::str::FromStr;

use crate::board::error::MoveParseError;

use super::square::Square;

/// A full turn by one piece: origin, the squares it lands on in order, and
/// the squares of the pieces it captures (one per jump, empty for a simple
/// move).
///
/// Two moves are equal when they describe the same path; the captured
/// squares follow from the path.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    from: Square,
    landings: Vec<Square>,
    captured: Vec<Square>,
}

impl Move {
    /// A single non-capturing step
    #[must_use]
    pub fn simple(from: Square, to: Square) -> Self {
        Move {
            from,
            landings: vec![to],
            captured: Vec::new(),
        }
    }

    /// A capture chain. `landings` and `captured` must have the same length.
    #[must_use]
    pub(crate) fn jumps(from: Square, landings: Vec<Square>, captured: Vec<Square>) -> Self {
        debug_assert_eq!(landings.len(), captured.len());
        Move {
            from,
            landings,
            captured,
        }
    }

    #[inline]
    #[must_use]
    pub fn from(&self) -> Square {
        self.from
    }

    /// Final square of the moving piece
    #[inline]
    #[must_use]
    pub fn to(&self) -> Square {
        self.landings.last().copied().unwrap_or(self.from)
    }

    #[inline]
    #[must_use]
    pub fn landings(&self) -> &[Square] {
        &self.landings
    }

    #[inline]
    #[must_use]
    pub fn captured(&self) -> &[Square] {
        &self.captured
    }

    #[inline]
    #[must_use]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Iterate the individual (from, to) hops of the move
    pub fn steps(&self) -> impl Iterator<Item = (Square, Square)> + '_ {
        std::iter::once(self.from)
            .chain(self.landings.iter().copied())
            .zip(self.landings.iter().copied())
    }

    /// Returns true if this move follows the given path
    #[must_use]
    pub fn matches_path(&self, path: &MovePath) -> bool {
        self.from == path.from && self.landings == path.landings
    }

    #[must_use]
    pub fn path(&self) -> MovePath {
        MovePath {
            from: self.from,
            landings: self.landings.clone(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}", self.from)?;
        for sq in &self.landings {
            write!(f, "{sep}{sq}")?;
        }
        Ok(())
    }
}

/// The path of a move without capture information, as written in notation
/// (`9-13`, `9x18x27`) or received from a peer. Resolve it against the legal
/// moves of a position to obtain a [`Move`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MovePath {
    pub from: Square,
    pub landings: Vec<Square>,
}

impl FromStr for MovePath {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoveParseError::Empty);
        }
        let squares = s
            .split(['-', 'x', 'X'])
            .map(|part| {
                part.parse::<Square>()
                    .map_err(|_| MoveParseError::InvalidSquare {
                        notation: s.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let Some((&from, landings)) = squares.split_first() else {
            return Err(MoveParseError::Empty);
        };
        if landings.is_empty() {
            return Err(MoveParseError::MissingDestination {
                notation: s.to_string(),
            });
        }
        Ok(MovePath {
            from,
            landings: landings.to_vec(),
        })
    }
}

impl fmt::Display for MovePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        for sq in &self.landings {
            write!(f, "-{sq}")?;
        }
        Ok(())
    }
}
