use std::fmt;

use crate::zobrist::piece_key;

use super::{Color, Piece, Rank, Square, SQUARE_COUNT};

/// Number of rows each side fills at the start of a game.
const STARTING_ROWS: usize = 3;

/// Piece placement on the 32 playable squares.
///
/// The board is a plain container: it performs no rule checks. Captures,
/// promotion and turn order are applied by the move generator and the game
/// state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    pub(crate) squares: [Option<Piece>; SQUARE_COUNT],
}

impl Board {
    /// Standard starting layout: Black men on rows 0-2, White men on rows 5-7.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        for sq in Square::all() {
            if sq.row() < STARTING_ROWS {
                board.place(sq, Piece::man(Color::Black));
            } else if sq.row() >= 8 - STARTING_ROWS {
                board.place(sq, Piece::man(Color::White));
            }
        }
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Board {
            squares: [None; SQUARE_COUNT],
        }
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Put a piece on a square, replacing whatever was there
    #[inline]
    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    /// Clear a square, returning the piece that stood on it
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Relocate the piece on `from` to `to`. Captures are not handled here.
    #[inline]
    pub fn move_piece(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.remove(from) {
            self.place(to, piece);
        }
    }

    /// Crown the piece on `sq`. Returns true if a man was promoted.
    pub fn promote(&mut self, sq: Square) -> bool {
        match self.squares[sq.index()] {
            Some(piece) if !piece.is_king() => {
                self.squares[sq.index()] = Some(piece.crowned());
                true
            }
            _ => false,
        }
    }

    /// Iterate (square, piece) for every occupied square in index order
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterate the pieces of one color in index order
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, p)| p.color == color)
    }

    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    #[must_use]
    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces(color).filter(|(_, p)| p.rank == Rank::King).count()
    }

    /// Zobrist hash of the placement (side to move not included)
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.iter().fold(0, |h, (sq, piece)| h ^ piece_key(sq, piece))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    /// Diagram with row 7 on top; `b`/`w` men, `B`/`W` kings, `.` empty
    /// playable squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..8 {
                let c = match Square::new(row, col) {
                    Some(sq) => self.piece_at(sq).map_or('.', Piece::to_char),
                    None => ' ',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}
