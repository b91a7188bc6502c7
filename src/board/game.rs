//! Turn-based game state.
//!
//! `GameState` owns a board, the side to move and the status, and is the
//! only way a move reaches the board during play: every move is checked
//! against the generated legal moves first, so a rejected move leaves the
//! state untouched.

use std::collections::HashMap;
use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::events::{GameEvent, GameEvents};
use crate::zobrist::side_key;

use super::error::{IllegalMoveError, MoveParseError};
use super::{Board, Color, Move, MovePath};

/// Plies without a capture or man move before the game is drawn (40 moves each).
pub const DEFAULT_DRAW_PLIES: u32 = 80;

/// Occurrences of one position (same side to move) that draw the game.
pub const DEFAULT_REPETITION_LIMIT: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    BlackWins,
    WhiteWins,
    Draw,
}

impl GameStatus {
    #[inline]
    #[must_use]
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::Black => GameStatus::BlackWins,
            Color::White => GameStatus::WhiteWins,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    #[must_use]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::BlackWins => Some(Color::Black),
            GameStatus::WhiteWins => Some(Color::White),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::BlackWins => write!(f, "Black wins"),
            GameStatus::WhiteWins => write!(f, "White wins"),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

/// Draw rules. `None` disables a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Plies in a row with no capture and no man move
    pub draw_after_plies: Option<u32>,
    /// Occurrences of the same position with the same side to move
    pub repetition_limit: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            draw_after_plies: Some(DEFAULT_DRAW_PLIES),
            repetition_limit: Some(DEFAULT_REPETITION_LIMIT),
        }
    }
}

/// A game in progress with its rules configuration.
///
/// Cloning copies the position and history but not the attached
/// notification queue; a clone starts detached.
#[derive(Debug)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    status: GameStatus,
    config: GameConfig,
    legal: Vec<Move>,
    quiet_plies: u32,
    repetitions: HashMap<u64, u32>,
    history: Vec<Move>,
    events: Option<GameEvents>,
}

impl Clone for GameState {
    fn clone(&self) -> Self {
        GameState {
            board: self.board,
            side_to_move: self.side_to_move,
            status: self.status,
            config: self.config,
            legal: self.legal.clone(),
            quiet_plies: self.quiet_plies,
            repetitions: self.repetitions.clone(),
            history: self.history.clone(),
            events: None,
        }
    }
}

impl GameState {
    /// Standard opening position, Black to move.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        Self::from_board(Board::new(), Color::Black, config)
    }

    /// Start from an arbitrary placement. A side to move without legal
    /// moves has already lost.
    #[must_use]
    pub fn from_board(board: Board, side_to_move: Color, config: GameConfig) -> Self {
        let legal = board.legal_moves(side_to_move);
        let status = if legal.is_empty() {
            GameStatus::win_for(side_to_move.opponent())
        } else {
            GameStatus::InProgress
        };
        let mut state = GameState {
            board,
            side_to_move,
            status,
            config,
            legal,
            quiet_plies: 0,
            repetitions: HashMap::new(),
            history: Vec::new(),
            events: None,
        };
        state.repetitions.insert(state.position_hash(), 1);
        state
    }

    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Legal moves for the side to move; empty once the game is over.
    #[inline]
    #[must_use]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    /// Number of moves applied since this state was created
    #[must_use]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn plies_without_progress(&self) -> u32 {
        self.quiet_plies
    }

    /// Moves applied so far, oldest first
    #[must_use]
    pub fn move_history(&self) -> &[Move] {
        &self.history
    }

    /// Hash of placement and side to move
    #[must_use]
    pub fn position_hash(&self) -> u64 {
        self.board.hash() ^ side_key(self.side_to_move)
    }

    /// Route move and status notifications into `events`
    pub fn attach_events(&mut self, events: GameEvents) {
        self.events = Some(events);
    }

    pub fn detach_events(&mut self) -> Option<GameEvents> {
        self.events.take()
    }

    /// Find the legal move following `path` exactly
    #[must_use]
    pub fn resolve_path(&self, path: &MovePath) -> Option<&Move> {
        self.legal.iter().find(|mv| mv.matches_path(path))
    }

    /// Parse move text (`9-13`, `9x18x27`) against the current legal moves.
    ///
    /// A capture chain may be abbreviated to origin and final square when
    /// that identifies a single legal move.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        let path: MovePath = text.parse()?;
        if let Some(mv) = self.resolve_path(&path) {
            return Ok(mv.clone());
        }

        let illegal = || MoveParseError::IllegalMove {
            notation: text.trim().to_string(),
        };
        let [to] = path.landings[..] else {
            return Err(illegal());
        };
        let mut candidates = self
            .legal
            .iter()
            .filter(|mv| mv.from() == path.from && mv.to() == to);
        match (candidates.next(), candidates.next()) {
            (Some(mv), None) => Ok(mv.clone()),
            _ => Err(illegal()),
        }
    }

    /// Apply a move for the side to move.
    ///
    /// On success returns the status after the move. A move that is not
    /// among [`legal_moves`](Self::legal_moves), or any move once the game
    /// is over, is rejected and the state is unchanged.
    pub fn apply_move(&mut self, mv: &Move) -> Result<GameStatus, IllegalMoveError> {
        if self.status.is_terminal() {
            return Err(IllegalMoveError::GameOver);
        }
        let Some(idx) = self.legal.iter().position(|legal| legal == mv) else {
            debug!("rejected {} for {}", mv, self.side_to_move);
            return Err(IllegalMoveError::NotLegal {
                notation: mv.to_string(),
            });
        };
        let mv = self.legal.swap_remove(idx);
        let mover = self.side_to_move;

        let effects = self.board.make_move(&mv);
        if effects.is_progress() {
            self.quiet_plies = 0;
            // Positions before an irreversible move can never recur.
            self.repetitions.clear();
        } else {
            self.quiet_plies += 1;
        }

        self.side_to_move = mover.opponent();
        self.legal = self.board.legal_moves(self.side_to_move);
        let seen = {
            let count = self.repetitions.entry(self.position_hash()).or_insert(0);
            *count += 1;
            *count
        };

        debug!(
            "{mover} played {mv} (captures {}, promoted {})",
            effects.captures, effects.promoted
        );
        self.history.push(mv.clone());
        self.emit(GameEvent::MoveApplied { side: mover, mv });

        let status = if self.legal.is_empty() {
            GameStatus::win_for(mover)
        } else if self
            .config
            .draw_after_plies
            .is_some_and(|limit| self.quiet_plies >= limit)
            || self
                .config
                .repetition_limit
                .is_some_and(|limit| seen >= limit)
        {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };

        if status.is_terminal() {
            info!("game over after {} plies: {status}", self.history.len());
            self.legal.clear();
            self.status = status;
            self.emit(GameEvent::StatusChanged(status));
        }
        Ok(status)
    }

    fn emit(&self, event: GameEvent) {
        if let Some(events) = &self.events {
            events.push(event);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move, {}", self.side_to_move, self.status)
    }
}
