//! Notifications delivered to drivers.
//!
//! A driver attaches an [`EventQueue`] to a game or network session and
//! drains it after each call to learn about applied moves (for animation),
//! status changes and connection lifecycle.

use std::fmt;

use crate::board::{Color, GameStatus, Move};
use crate::sync::EventQueue;

/// Queue type carried by games and sessions
pub type GameEvents = EventQueue<GameEvent>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was applied to the game state
    MoveApplied { side: Color, mv: Move },
    /// The game status changed (always to a terminal status during play)
    StatusChanged(GameStatus),
    /// A network match started; `local` is the color this peer plays
    Connected { local: Color, peer: String },
    /// A move from the peer passed validation and was applied
    PeerMoveReceived(Move),
    /// The network match ended
    Disconnected { reason: DisconnectReason },
}

/// Why a network match ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisconnectReason {
    /// This side closed the session
    Local,
    /// The peer closed the connection or said goodbye
    PeerClosed,
    /// The peer sent input that failed validation
    Desync(String),
    /// Transport failure
    Io(String),
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisconnectReason::Local => write!(f, "closed locally"),
            DisconnectReason::PeerClosed => write!(f, "peer disconnected"),
            DisconnectReason::Desync(detail) => write!(f, "desynchronized: {detail}"),
            DisconnectReason::Io(detail) => write!(f, "connection error: {detail}"),
        }
    }
}
