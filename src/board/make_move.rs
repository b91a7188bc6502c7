use super::{Board, Move};

/// What executing a move changed on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveEffects {
    /// Number of pieces removed
    pub captures: usize,
    /// The moving man was crowned during the move
    pub promoted: bool,
    /// The moving piece was a man when the move started
    pub man_moved: bool,
}

impl MoveEffects {
    /// Captures and man moves cannot be undone by later play.
    #[inline]
    #[must_use]
    pub fn is_progress(self) -> bool {
        self.captures > 0 || self.man_moved
    }
}

impl Board {
    /// Execute a move hop by hop: relocate the piece, remove each captured
    /// piece and crown a man the moment it lands on its promotion row.
    ///
    /// No legality check is made; callers pass moves produced by the
    /// move generator.
    pub fn make_move(&mut self, mv: &Move) -> MoveEffects {
        let mut effects = MoveEffects {
            man_moved: self.piece_at(mv.from()).is_some_and(|p| !p.is_king()),
            ..MoveEffects::default()
        };

        for ((from, to), over) in mv
            .steps()
            .zip(mv.captured().iter().map(Some).chain(std::iter::repeat(None)))
        {
            self.move_piece(from, to);
            if let Some(&over) = over {
                if self.remove(over).is_some() {
                    effects.captures += 1;
                }
            }
            if let Some(piece) = self.piece_at(to) {
                if to.row() == piece.color.promotion_row() && self.promote(to) {
                    effects.promoted = true;
                }
            }
        }
        effects
    }
}
