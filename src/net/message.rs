//! Wire format: one JSON object per line.
//!
//! ```text
//! {"kind":"move","from":9,"landings":[13]}
//! {"kind":"disconnect"}
//! ```
//!
//! Squares travel as their public numbers 1-32.

use serde::{Deserialize, Serialize};

use super::error::DesyncReason;
use crate::board::{Move, MovePath, Square};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WireMessage {
    Move(MoveMessage),
    Disconnect,
}

/// A move as the origin and the landing squares of each step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveMessage {
    pub from: u32,
    pub landings: Vec<u32>,
}

impl MoveMessage {
    #[must_use]
    pub fn from_move(mv: &Move) -> Self {
        MoveMessage {
            from: number(mv.from()),
            landings: mv.landings().iter().copied().map(number).collect(),
        }
    }

    /// Map the numbers back to squares. The result still has to be
    /// matched against the legal moves.
    pub fn to_path(&self) -> Result<MovePath, DesyncReason> {
        if self.landings.is_empty() {
            return Err(DesyncReason::Malformed("move without landing squares".into()));
        }
        let from = square(self.from)?;
        let landings = self
            .landings
            .iter()
            .map(|&n| square(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MovePath { from, landings })
    }
}

/// Serialize a message as one line, newline included.
pub fn encode_line(message: &WireMessage) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

/// Parse one received line.
pub fn decode_line(line: &str) -> Result<WireMessage, DesyncReason> {
    serde_json::from_str(line.trim()).map_err(|e| DesyncReason::Malformed(e.to_string()))
}

fn number(sq: Square) -> u32 {
    sq.number() as u32
}

fn square(number: u32) -> Result<Square, DesyncReason> {
    Square::from_number(number as usize).ok_or(DesyncReason::UnknownSquare(number))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(n: usize) -> Square {
        Square::from_number(n).unwrap()
    }

    #[test]
    fn test_move_encoding() {
        let mv = Move::simple(sq(9), sq(13));
        let line = encode_line(&WireMessage::Move(MoveMessage::from_move(&mv))).unwrap();
        assert_eq!(line, "{\"kind\":\"move\",\"from\":9,\"landings\":[13]}\n");
    }

    #[test]
    fn test_disconnect_encoding() {
        let line = encode_line(&WireMessage::Disconnect).unwrap();
        assert_eq!(line, "{\"kind\":\"disconnect\"}\n");
        assert_eq!(decode_line(&line).unwrap(), WireMessage::Disconnect);
    }

    #[test]
    fn test_decode_chain() {
        let msg = decode_line(r#"{"kind":"move","from":1,"landings":[10,19]}"#).unwrap();
        let WireMessage::Move(msg) = msg else {
            panic!("expected a move");
        };
        let path = msg.to_path().unwrap();
        assert_eq!(path.from, sq(1));
        assert_eq!(path.landings, vec![sq(10), sq(19)]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_line("hello"), Err(DesyncReason::Malformed(_))));
        assert!(matches!(
            decode_line(r#"{"kind":"teleport"}"#),
            Err(DesyncReason::Malformed(_))
        ));
        assert!(matches!(
            decode_line(r#"{"kind":"move","from":-3,"landings":[1]}"#),
            Err(DesyncReason::Malformed(_))
        ));
    }

    #[test]
    fn test_unknown_squares() {
        let msg = MoveMessage {
            from: 9,
            landings: vec![33],
        };
        assert_eq!(msg.to_path(), Err(DesyncReason::UnknownSquare(33)));
        let msg = MoveMessage {
            from: 0,
            landings: vec![5],
        };
        assert_eq!(msg.to_path(), Err(DesyncReason::UnknownSquare(0)));
        let msg = MoveMessage {
            from: 9,
            landings: vec![],
        };
        assert!(matches!(msg.to_path(), Err(DesyncReason::Malformed(_))));
    }
}
