//! Error types for network play.

use std::fmt;
use std::io;

use crate::board::IllegalMoveError;

/// Why a message from the peer was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesyncReason {
    /// The line is not a valid wire message
    Malformed(String),
    /// A square number outside 1-32
    UnknownSquare(u32),
    /// The move is not legal for the peer in the local replica
    IllegalMove(String),
}

impl fmt::Display for DesyncReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesyncReason::Malformed(detail) => write!(f, "malformed message: {detail}"),
            DesyncReason::UnknownSquare(number) => write!(f, "unknown square {number}"),
            DesyncReason::IllegalMove(notation) => write!(f, "illegal move '{notation}'"),
        }
    }
}

/// Error type for network session operations
#[derive(Debug)]
pub enum SyncError {
    /// The peer's input failed validation; the connection has been shut down
    Desync(DesyncReason),
    /// The peer went away or the transport failed
    ConnectionLost,
    /// A locally chosen move was rejected; nothing was sent
    IllegalMove(IllegalMoveError),
    /// `send_move` called while the peer is to move
    NotLocalTurn,
    /// `receive_move` called while the local side is to move
    NotPeerTurn,
    /// The session already ended
    Closed,
    /// Connection setup failed
    Io(io::Error),
}

impl SyncError {
    /// Fatal errors end the match; the others leave the session usable.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Desync(_) | SyncError::ConnectionLost | SyncError::Closed
        )
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Desync(reason) => write!(f, "Peer desynchronized: {reason}"),
            SyncError::ConnectionLost => write!(f, "Connection to peer lost"),
            SyncError::IllegalMove(e) => write!(f, "{e}"),
            SyncError::NotLocalTurn => write!(f, "It is the peer's turn"),
            SyncError::NotPeerTurn => write!(f, "It is the local side's turn"),
            SyncError::Closed => write!(f, "Session is closed"),
            SyncError::Io(e) => write!(f, "Network error: {e}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::IllegalMove(e) => Some(e),
            SyncError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IllegalMoveError> for SyncError {
    fn from(e: IllegalMoveError) -> Self {
        SyncError::IllegalMove(e)
    }
}

impl From<io::Error> for SyncError {
    fn from(e: io::Error) -> Self {
        SyncError::Io(e)
    }
}

impl From<DesyncReason> for SyncError {
    fn from(reason: DesyncReason) -> Self {
        SyncError::Desync(reason)
    }
}
