//! Error types for board and game operations.

use std::fmt;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string must have a side and two piece sections
    TooFewSections { found: usize },
    /// Invalid side to move (must be 'B' or 'W')
    InvalidSideToMove { found: String },
    /// A piece section does not start with a color letter
    InvalidColor { section: String },
    /// A square token is not a number 1-32 (optionally prefixed by 'K')
    InvalidSquare { token: String },
    /// Two pieces were placed on the same square
    DuplicateSquare { square: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewSections { found } => {
                write!(f, "FEN must have 3 ':'-separated sections, found {found}")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'B' or 'W'")
            }
            FenError::InvalidColor { section } => {
                write!(f, "Piece section '{section}' must start with 'B' or 'W'")
            }
            FenError::InvalidSquare { token } => {
                write!(f, "Invalid square token '{token}' in FEN")
            }
            FenError::DuplicateSquare { square } => {
                write!(f, "Square {square} is occupied twice in FEN")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move text parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Empty move string
    Empty,
    /// A square in the move is not valid notation
    InvalidSquare { notation: String },
    /// Move names only an origin square
    MissingDestination { notation: String },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::Empty => write!(f, "Empty move string"),
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::MissingDestination { notation } => {
                write!(f, "Move '{notation}' has no destination square")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Row out of bounds (must be 0-7)
    RowOutOfBounds { row: usize },
    /// Column out of bounds (must be 0-7)
    ColumnOutOfBounds { col: usize },
    /// Light square, never used in play
    Unplayable { row: usize, col: usize },
    /// Square number outside 1-32
    NumberOutOfRange { number: usize },
    /// Invalid notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RowOutOfBounds { row } => {
                write!(f, "Row {row} out of bounds (must be 0-7)")
            }
            SquareError::ColumnOutOfBounds { col } => {
                write!(f, "Column {col} out of bounds (must be 0-7)")
            }
            SquareError::Unplayable { row, col } => {
                write!(f, "Square ({row}, {col}) is not a playable square")
            }
            SquareError::NumberOutOfRange { number } => {
                write!(f, "Square number {number} out of range (must be 1-32)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// A move was rejected by the game state. The state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// The game already reached a terminal status
    GameOver,
    /// The move is not among the legal moves of the side to move
    NotLegal { notation: String },
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveError::GameOver => write!(f, "Game is over, no further moves allowed"),
            IllegalMoveError::NotLegal { notation } => {
                write!(f, "Move '{notation}' is not legal in this position")
            }
        }
    }
}

impl std::error::Error for IllegalMoveError {}
