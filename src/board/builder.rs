//! Fluent builder for constructing checkers positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//!
//! # Example
//! ```
//! use checkers_engine::board::{BoardBuilder, Color};
//!
//! let game = BoardBuilder::new()
//!     .man(Color::Black, 14)
//!     .man(Color::White, 18)
//!     .side_to_move(Color::Black)
//!     .build_game();
//! assert_eq!(game.legal_moves().len(), 1);
//! ```

use super::game::{GameConfig, GameState};
use super::{Board, Color, Piece, Square};

/// A fluent builder for constructing `Board` and `GameState` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Square, Piece)>,
    side_to_move: Color,
    config: GameConfig,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder, Black to move.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Color::Black,
            config: GameConfig::default(),
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        builder.pieces = Board::new().iter().collect();
        builder
    }

    /// Place a piece on the board.
    #[must_use]
    pub fn piece(mut self, square: Square, piece: Piece) -> Self {
        // Remove any existing piece on this square
        self.pieces.retain(|(sq, _)| *sq != square);
        self.pieces.push((square, piece));
        self
    }

    /// Place a man on a numbered square (1-32).
    ///
    /// # Panics
    /// Panics if `number` is not a square number.
    #[must_use]
    pub fn man(self, color: Color, number: usize) -> Self {
        self.piece(numbered(number), Piece::man(color))
    }

    /// Place a king on a numbered square (1-32).
    ///
    /// # Panics
    /// Panics if `number` is not a square number.
    #[must_use]
    pub fn king(self, color: Color, number: usize) -> Self {
        self.piece(numbered(number), Piece::king(color))
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Set the draw rules of the built game.
    #[must_use]
    pub const fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the board.
    #[must_use]
    pub fn build(&self) -> Board {
        let mut board = Board::empty();
        for &(square, piece) in &self.pieces {
            board.place(square, piece);
        }
        board
    }

    /// Build a game state from the board, side to move and draw rules.
    #[must_use]
    pub fn build_game(&self) -> GameState {
        GameState::from_board(self.build(), self.side_to_move, self.config)
    }
}

fn numbered(number: usize) -> Square {
    Square::from_number(number).unwrap_or_else(|| panic!("invalid square number {number}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let built = BoardBuilder::starting_position().build();
        assert_eq!(built, Board::new());
    }

    #[test]
    fn test_sparse_board() {
        let board = BoardBuilder::new()
            .king(Color::White, 1)
            .man(Color::Black, 32)
            .build();

        assert_eq!(board.count(Color::White), 1);
        assert_eq!(board.count_kings(Color::White), 1);
        assert_eq!(board.count(Color::Black), 1);
        assert!(board.piece_at(numbered(2)).is_none());
    }

    #[test]
    fn test_side_to_move() {
        let game = BoardBuilder::new()
            .man(Color::Black, 9)
            .man(Color::White, 24)
            .side_to_move(Color::White)
            .build_game();

        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn test_clear_square() {
        let board = BoardBuilder::starting_position()
            .clear(numbered(1))
            .build();

        assert!(board.piece_at(numbered(1)).is_none());
        assert!(board.piece_at(numbered(2)).is_some());
    }

    #[test]
    fn test_later_piece_replaces_earlier() {
        let board = BoardBuilder::new()
            .man(Color::Black, 10)
            .king(Color::White, 10)
            .build();
        assert_eq!(board.piece_at(numbered(10)), Some(Piece::king(Color::White)));
    }
}
