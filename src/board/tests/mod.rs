//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `movegen.rs` - Legal move generation, mandatory capture and chains
//! - `game.rs` - Move application, promotion and win detection
//! - `draw.rs` - Draw detection (no-progress and repetition)
//! - `fen.rs` - FEN parsing and formatting
//! - `search.rs` - Move choice by the search
//! - `proptest.rs` - Property-based tests over random playouts

mod draw;
mod fen;

use crate::board::{GameState, Move, Square};

pub(super) fn sq(number: usize) -> Square {
    Square::from_number(number).expect("square number in 1..=32")
}

pub(super) fn move_texts(moves: &[Move]) -> Vec<String> {
    let mut texts: Vec<String> = moves.iter().map(ToString::to_string).collect();
    texts.sort();
    texts
}

pub(super) fn play(game: &mut GameState, text: &str) {
    let mv = game.parse_move(text).expect("move should be legal");
    game.apply_move(&mv).expect("parsed move should apply");
}
