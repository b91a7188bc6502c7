//! Players and self-play.
//!
//! A [`Player`] picks moves for whichever side it is seated on; the
//! simulation helpers pair two players over one game or a batch.

mod player;
mod simulation;

pub use player::{Player, RandomPlayer, SearchPlayer};
pub use simulation::{play_game, simulate, GameRecord, SimulationSummary, DEFAULT_MAX_PLIES};
