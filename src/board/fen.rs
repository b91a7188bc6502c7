//! Checkers FEN text form: `B:W21,22,K30:B1,2,K5`.
//!
//! The first section is the side to move, followed by one section per
//! color listing its squares by number; a `K` prefix marks a king.

use super::error::FenError;
use super::game::{GameConfig, GameState};
use super::{Board, Color, Piece, Square};

impl GameState {
    /// Parse a position from FEN with the default draw rules.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        Self::try_from_fen_with_config(fen, GameConfig::default())
    }

    pub fn try_from_fen_with_config(fen: &str, config: GameConfig) -> Result<Self, FenError> {
        let fen = fen.trim().trim_end_matches('.');
        let sections: Vec<&str> = fen.split(':').collect();
        if sections.len() < 3 {
            return Err(FenError::TooFewSections {
                found: sections.len(),
            });
        }

        let side = match sections[0].trim() {
            s if s.len() == 1 => s.chars().next().and_then(Color::from_char),
            _ => None,
        }
        .ok_or_else(|| FenError::InvalidSideToMove {
            found: sections[0].to_string(),
        })?;

        let mut board = Board::empty();
        for section in &sections[1..] {
            let section = section.trim();
            let mut chars = section.chars();
            let color = chars
                .next()
                .and_then(Color::from_char)
                .ok_or_else(|| FenError::InvalidColor {
                    section: section.to_string(),
                })?;

            let rest = chars.as_str();
            for token in rest.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let (king, number) = match token.strip_prefix('K') {
                    Some(number) => (true, number),
                    None => (false, token),
                };
                let sq = number
                    .parse::<usize>()
                    .ok()
                    .and_then(Square::from_number)
                    .ok_or_else(|| FenError::InvalidSquare {
                        token: token.to_string(),
                    })?;
                if !board.is_empty(sq) {
                    return Err(FenError::DuplicateSquare {
                        square: sq.number(),
                    });
                }
                let piece = if king {
                    Piece::king(color)
                } else {
                    Piece::man(color)
                };
                board.place(sq, piece);
            }
        }

        Ok(GameState::from_board(board, side, config))
    }

    /// Parse a position from FEN.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the position to FEN (White section first, squares ascending).
    #[must_use]
    pub fn to_fen(&self) -> String {
        let board = self.board();
        let section = |color: Color| {
            let squares: Vec<String> = board
                .pieces(color)
                .map(|(sq, piece)| {
                    if piece.is_king() {
                        format!("K{}", sq.number())
                    } else {
                        sq.number().to_string()
                    }
                })
                .collect();
            format!("{}{}", color.to_char(), squares.join(","))
        };
        format!(
            "{}:{}:{}",
            self.side_to_move().to_char(),
            section(Color::White),
            section(Color::Black)
        )
    }
}
