pub mod board;
pub mod engine;
pub mod events;
pub mod net;
pub mod protocol;
pub mod sync;
pub mod timer;
mod zobrist;

pub use board::{choose_move, Board, Color, GameState, GameStatus, Move, Piece, Square};
pub use events::{GameEvent, GameEvents};
pub use net::{NetworkSession, SyncError};
