//! Negamax alpha-beta search with iterative deepening.

use std::time::Instant;

use log::debug;

use super::eval::{evaluate, EvalParams};
use super::{ordered_moves, SearchResult, INFINITY, WIN_SCORE};
use crate::board::{Board, Color, Move};
use crate::sync::StopFlag;

/// How often (in nodes) the stop flag is polled
const STOP_POLL_MASK: u64 = 1023;

/// Search context for a single search
pub(super) struct SearchContext<'a> {
    pub params: &'a EvalParams,
    pub stop: &'a StopFlag,
    pub nodes: u64,
    /// The current iteration may be abandoned when the stop flag rises
    abortable: bool,
    aborted: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(params: &'a EvalParams, stop: &'a StopFlag) -> Self {
        SearchContext {
            params,
            stop,
            nodes: 0,
            abortable: false,
            aborted: false,
        }
    }

    /// Deepen from 1 ply to `max_depth`. Depth 1 always completes; a deeper
    /// iteration cut short by the stop flag is discarded.
    pub fn iterative_deepening(
        &mut self,
        board: &Board,
        side: Color,
        root_moves: &[Move],
        max_depth: u32,
    ) -> SearchResult {
        let start = Instant::now();
        let mut result = SearchResult::default();

        for depth in 1..=max_depth.max(1) {
            self.abortable = depth > 1;
            if self.abortable && self.stop.is_stopped() {
                break;
            }

            let Some((mv, score)) = self.search_root(board, side, root_moves, depth) else {
                debug!("search stopped during depth {depth}");
                break;
            };

            result = SearchResult {
                best_move: Some(mv),
                score,
                depth,
                nodes: self.nodes,
            };
            debug!(
                "depth {depth} score {score} nodes {} time {}ms best {}",
                self.nodes,
                start.elapsed().as_millis(),
                result.best_move.as_ref().map_or_else(String::new, ToString::to_string)
            );

            // A forced result will not change with more depth.
            if score.abs() >= WIN_SCORE - super::MAX_PLY as i32 {
                break;
            }
        }
        result.nodes = self.nodes;
        result
    }

    /// Score every root move; the first move with the highest score wins.
    fn search_root(
        &mut self,
        board: &Board,
        side: Color,
        root_moves: &[Move],
        depth: u32,
    ) -> Option<(Move, i32)> {
        let mut best: Option<(&Move, i32)> = None;
        let mut alpha = -INFINITY;

        for mv in root_moves {
            let mut next = *board;
            next.make_move(mv);
            let score = -self.negamax(&next, side.opponent(), depth - 1, 1, -INFINITY, -alpha);
            if self.aborted {
                return None;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
                alpha = score;
            }
        }
        best.map(|(mv, score)| (mv.clone(), score))
    }

    fn negamax(
        &mut self,
        board: &Board,
        side: Color,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if self.should_stop() {
            return 0;
        }

        let moves = ordered_moves(board, side);
        if moves.is_empty() {
            // Side to move is blocked or out of pieces: a loss, sooner is worse.
            return -WIN_SCORE + ply as i32;
        }

        // Pending captures are always resolved before evaluating.
        if depth == 0 && (!moves[0].is_capture() || ply as usize >= super::MAX_PLY) {
            return evaluate(board, side, self.params);
        }

        let mut best = -INFINITY;
        for mv in &moves {
            let mut next = *board;
            next.make_move(mv);
            let score = -self.negamax(
                &next,
                side.opponent(),
                depth.saturating_sub(1),
                ply + 1,
                -beta,
                -alpha,
            );
            if self.aborted {
                return 0;
            }
            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    fn should_stop(&mut self) -> bool {
        if !self.aborted
            && self.abortable
            && self.nodes & STOP_POLL_MASK == 0
            && self.stop.is_stopped()
        {
            self.aborted = true;
        }
        self.aborted
    }
}
