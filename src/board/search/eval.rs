//! Static evaluation.

use crate::board::{Board, Color, Square};

/// Evaluation weights. Scores are in hundredths of a man.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalParams {
    pub man: i32,
    pub king: i32,
    /// Per row a man has advanced from its own back row
    pub advance: i32,
    /// Piece on the central columns of the two middle rows
    pub center: i32,
    /// Piece on the central columns elsewhere
    pub near_center: i32,
    /// Man still guarding its own back row
    pub back_row_guard: i32,
}

impl Default for EvalParams {
    fn default() -> Self {
        EvalParams {
            man: 100,
            king: 160,
            advance: 4,
            center: 10,
            near_center: 5,
            back_row_guard: 8,
        }
    }
}

/// Score `board` from the point of view of `side`.
#[must_use]
pub fn evaluate(board: &Board, side: Color, params: &EvalParams) -> i32 {
    let mut score = 0;
    for (sq, piece) in board.iter() {
        let sign = if piece.color == side { 1 } else { -1 };
        let mut value = positional(sq, params);
        if piece.is_king() {
            value += params.king;
        } else {
            let back = piece.color.back_row();
            value += params.man + params.advance * sq.row().abs_diff(back) as i32;
            if sq.row() == back {
                value += params.back_row_guard;
            }
        }
        score += sign * value;
    }
    score
}

fn positional(sq: Square, params: &EvalParams) -> i32 {
    let central_col = (2..=5).contains(&sq.col());
    match (central_col, sq.row()) {
        (true, 3 | 4) => params.center,
        (true, _) => params.near_center,
        _ => 0,
    }
}
