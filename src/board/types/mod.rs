//! Core checkers types.
//!
//! - `Color`, `Rank` and `Piece` - piece identity
//! - `Square` - one of the 32 playable squares
//! - `Move` and `MovePath` - move representation and its textual path

mod moves;
mod piece;
mod square;

pub use moves::{Move, MovePath};
pub use piece::{Color, Piece, Rank};
pub use square::{Square, SQUARE_COUNT};

pub(crate) use square::DIRECTIONS;
