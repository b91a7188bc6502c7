//! Two-peer play over TCP.
//!
//! The host accepts one connection and plays Black; the guest connects and
//! plays White. Each peer owns a full [`GameState`](crate::board::GameState)
//! replica and the peers exchange only moves, so every received move is
//! checked against the local legal moves before it is applied.

mod error;
mod message;
mod session;

pub use error::{DesyncReason, SyncError};
pub use message::{decode_line, encode_line, MoveMessage, WireMessage};
pub use session::{
    resolve_peer, NetConfig, NetworkSession, Role, DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORT,
    MAX_LINE_BYTES,
};
