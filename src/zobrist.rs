//! Zobrist hashing for checkers positions.
//!
//! Hashes are used by the game state to count repeated positions.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, Piece, Square, SQUARE_COUNT};

pub(crate) struct ZobristKeys {
    // piece_keys[square_index][piece_index]: black man, black king, white man, white king
    pub(crate) piece_keys: [[u64; 4]; SQUARE_COUNT],
    pub(crate) white_to_move_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // fixed seed, hashes are reproducible
        let mut piece_keys = [[0; 4]; SQUARE_COUNT];

        for square in &mut piece_keys {
            for key in square.iter_mut() {
                *key = rng.gen();
            }
        }

        let white_to_move_key = rng.gen();

        ZobristKeys {
            piece_keys,
            white_to_move_key,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[inline]
pub(crate) fn piece_key(sq: Square, piece: Piece) -> u64 {
    ZOBRIST.piece_keys[sq.index()][piece.index()]
}

#[inline]
pub(crate) fn side_key(side: Color) -> u64 {
    match side {
        Color::Black => 0,
        Color::White => ZOBRIST.white_to_move_key,
    }
}
