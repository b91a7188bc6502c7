//! Checkers board representation and game logic.
//!
//! Standard 8x8 checkers: men move and capture diagonally forward, kings in
//! all four directions, captures are mandatory and chains continue until
//! no jump remains.
//!
//! # Example
//! ```
//! use checkers_engine::board::GameState;
//!
//! let mut game = GameState::new();
//! assert_eq!(game.legal_moves().len(), 7);
//! let mv = game.parse_move("11-15").unwrap();
//! game.apply_move(&mv).unwrap();
//! ```

mod builder;
mod error;
mod fen;
mod game;
mod make_move;
mod movegen;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::BoardBuilder;
pub use error::{FenError, IllegalMoveError, MoveParseError, SquareError};
pub use game::{GameConfig, GameState, GameStatus, DEFAULT_DRAW_PLIES, DEFAULT_REPETITION_LIMIT};
pub use make_move::MoveEffects;
pub use movegen::legal_moves;
pub use state::Board;
pub use types::{Color, Move, MovePath, Piece, Rank, Square, SQUARE_COUNT};

// Public API - search functions and configuration
pub use search::{choose_move, EvalParams, SearchLimits, SearchResult};

pub(crate) use types::DIRECTIONS;
