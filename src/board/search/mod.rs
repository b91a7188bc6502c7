//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Negamax alpha-beta over the legal-move tree
//! - Iterative deepening under an optional time budget
//! - Capture resolution at the horizon (pending jumps are always played out)
//! - Deterministic move ordering: longer capture chains first, then
//!   generation order; ties keep the earlier move
//!
//! At a fixed depth with no time budget the chosen move depends only on the
//! position and the evaluation weights.

mod alphabeta;
mod eval;

use std::time::Duration;

use log::info;

use crate::sync::StopFlag;
use crate::timer::DeadlineTimer;

use super::{Board, Color, GameState, Move};
use alphabeta::SearchContext;
pub use eval::{evaluate, EvalParams};

/// Score of a won position at the root; wins found later score lower.
pub const WIN_SCORE: i32 = 100_000;

/// Default search depth in plies
pub const DEFAULT_DEPTH: u32 = 6;

/// Deepest ply reachable through capture resolution
pub(crate) const MAX_PLY: usize = 64;

const INFINITY: i32 = WIN_SCORE + 1;

/// Budget for one search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum nominal depth in plies (at least 1)
    pub depth: u32,
    /// Optional wall-clock budget; the last completed depth is used when it runs out
    pub movetime: Option<Duration>,
}

impl SearchLimits {
    #[must_use]
    pub const fn depth(depth: u32) -> Self {
        SearchLimits {
            depth,
            movetime: None,
        }
    }

    #[must_use]
    pub const fn with_movetime(mut self, movetime: Duration) -> Self {
        self.movetime = Some(movetime);
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::depth(DEFAULT_DEPTH)
    }
}

/// Result of a search
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found, `None` if the side to move has no move
    pub best_move: Option<Move>,
    /// Score from the mover's point of view
    pub score: i32,
    /// Last fully completed depth
    pub depth: u32,
    pub nodes: u64,
}

/// Pick a move for `side` in `game`.
///
/// Returns `None` when `side` is not the side to move or has no legal move
/// (the game status already reflects the loss).
#[must_use]
pub fn choose_move(game: &GameState, side: Color, limits: &SearchLimits) -> Option<Move> {
    if side != game.side_to_move() {
        return None;
    }
    search(game, limits, &EvalParams::default()).best_move
}

/// Run a full search for the side to move of `game`.
#[must_use]
pub fn search(game: &GameState, limits: &SearchLimits, params: &EvalParams) -> SearchResult {
    let root_moves = order(game.legal_moves().to_vec());
    if root_moves.is_empty() {
        return SearchResult::default();
    }

    let stop = StopFlag::new();
    let timer = limits
        .movetime
        .and_then(|movetime| DeadlineTimer::start(movetime, stop.clone()));

    let mut ctx = SearchContext::new(params, &stop);
    let result = ctx.iterative_deepening(game.board(), game.side_to_move(), &root_moves, limits.depth);

    drop(timer);
    info!(
        "search {}: depth {} score {} nodes {}",
        game.side_to_move(),
        result.depth,
        result.score,
        result.nodes
    );
    result
}

/// Legal moves of `side` in search order
pub(crate) fn ordered_moves(board: &Board, side: Color) -> Vec<Move> {
    order(board.legal_moves(side))
}

fn order(mut moves: Vec<Move>) -> Vec<Move> {
    // Stable: equal-length chains keep generation order.
    moves.sort_by(|a, b| b.captured().len().cmp(&a.captured().len()));
    moves
}
