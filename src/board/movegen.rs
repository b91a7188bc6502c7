//! Legal move generation.
//!
//! Captures are mandatory: if any piece of the side to move can jump, only
//! capture chains are returned, and every chain is extended until the
//! moving piece has no further jump. Branching chains yield one move per
//! maximal branch.

use super::{Board, Color, Move, Piece, Square, DIRECTIONS};

/// All legal moves for `side`, in a stable order.
///
/// Origins are visited in square index order, directions in the order of
/// [`DIRECTIONS`], and chain branches depth-first. An empty result means
/// the side cannot move.
#[must_use]
pub fn legal_moves(board: &Board, side: Color) -> Vec<Move> {
    board.legal_moves(side)
}

impl Board {
    /// See [`legal_moves`].
    #[must_use]
    pub fn legal_moves(&self, side: Color) -> Vec<Move> {
        let captures = self.capture_moves(side);
        if captures.is_empty() {
            self.simple_moves(side)
        } else {
            captures
        }
    }

    /// Returns true if any piece of `side` has a jump available
    #[must_use]
    pub fn has_capture(&self, side: Color) -> bool {
        self.pieces(side)
            .any(|(sq, piece)| self.jump_targets(sq, piece).next().is_some())
    }

    /// Returns true if the piece standing on `sq` has a jump available
    #[must_use]
    pub fn can_jump_from(&self, sq: Square) -> bool {
        self.piece_at(sq)
            .is_some_and(|piece| self.jump_targets(sq, piece).next().is_some())
    }

    fn simple_moves(&self, side: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, piece) in self.pieces(side) {
            for dir in move_directions(piece) {
                if let Some(to) = from.offset(dir, 1) {
                    if self.is_empty(to) {
                        moves.push(Move::simple(from, to));
                    }
                }
            }
        }
        moves
    }

    fn capture_moves(&self, side: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut landings = Vec::new();
        let mut captured = Vec::new();
        for (from, piece) in self.pieces(side) {
            self.extend_chain(from, from, piece, &mut landings, &mut captured, &mut moves);
        }
        moves
    }

    /// Depth-first expansion of a capture chain. `self` is the position after
    /// the hops recorded so far, with `piece` (its current rank) on `current`.
    fn extend_chain(
        &self,
        origin: Square,
        current: Square,
        piece: Piece,
        landings: &mut Vec<Square>,
        captured: &mut Vec<Square>,
        out: &mut Vec<Move>,
    ) {
        let mut extended = false;
        for (over, land) in self.jump_targets(current, piece) {
            let mut next = *self;
            next.remove(over);
            next.move_piece(current, land);

            // Crowning takes effect before the next hop is considered.
            let mut moved = piece;
            if !piece.is_king() && land.row() == piece.color.promotion_row() {
                next.promote(land);
                moved = piece.crowned();
            }

            landings.push(land);
            captured.push(over);
            next.extend_chain(origin, land, moved, landings, captured, out);
            landings.pop();
            captured.pop();
            extended = true;
        }

        if !extended && !landings.is_empty() {
            out.push(Move::jumps(origin, landings.clone(), captured.clone()));
        }
    }

    /// Jumps available to `piece` standing on `from`: (captured square, landing square)
    fn jump_targets(
        &self,
        from: Square,
        piece: Piece,
    ) -> impl Iterator<Item = (Square, Square)> + '_ {
        move_directions(piece).filter_map(move |dir| {
            let over = from.offset(dir, 1)?;
            let land = from.offset(dir, 2)?;
            let victim = self.piece_at(over)?;
            (victim.color != piece.color && self.is_empty(land)).then_some((over, land))
        })
    }
}

/// Directions a piece may step or jump in: kings all four, men forward only
fn move_directions(piece: Piece) -> impl Iterator<Item = (isize, isize)> {
    let forward = piece.color.forward();
    let king = piece.is_king();
    DIRECTIONS
        .into_iter()
        .filter(move |&(dr, _)| king || dr == forward)
}
