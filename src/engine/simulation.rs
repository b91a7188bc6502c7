//! Self-play: single games between two players and batches of games.

use std::fmt;

use log::{debug, info, warn};

use super::player::Player;
use crate::board::{Color, GameConfig, GameState, GameStatus, Move};

/// Games longer than this many plies are scored as draws
pub const DEFAULT_MAX_PLIES: usize = 400;

/// Outcome of one finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub status: GameStatus,
    pub moves: Vec<Move>,
    pub final_fen: String,
}

impl GameRecord {
    #[must_use]
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Play one game from the opening position.
///
/// A player that returns no move, or an illegal one, while moves exist
/// forfeits. Reaching `max_plies` ends the game as a draw.
pub fn play_game(
    black: &mut dyn Player,
    white: &mut dyn Player,
    config: GameConfig,
    max_plies: usize,
) -> GameRecord {
    let mut game = GameState::with_config(config);
    let mut status = game.status();

    while !status.is_terminal() {
        if game.ply() >= max_plies {
            status = GameStatus::Draw;
            break;
        }
        let side = game.side_to_move();
        let player: &mut dyn Player = match side {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };

        let Some(mv) = player.choose(&game) else {
            warn!("{} ({side}) returned no move", player.name());
            status = GameStatus::win_for(side.opponent());
            break;
        };
        status = match game.apply_move(&mv) {
            Ok(status) => status,
            Err(e) => {
                warn!("{} ({side}) forfeits: {e}", player.name());
                GameStatus::win_for(side.opponent())
            }
        };
    }

    debug!("game finished after {} plies: {status}", game.ply());
    GameRecord {
        status,
        moves: game.move_history().to_vec(),
        final_fen: game.to_fen(),
    }
}

/// Tally of a batch of games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub total_plies: usize,
}

impl SimulationSummary {
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_plies += game.plies();
        match game.status {
            GameStatus::BlackWins => self.black_wins += 1,
            GameStatus::WhiteWins => self.white_wins += 1,
            GameStatus::Draw | GameStatus::InProgress => self.draws += 1,
        }
    }

    #[must_use]
    pub fn average_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.games as f64
        }
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "games {} black {} white {} draws {} avgplies {:.1}",
            self.games,
            self.black_wins,
            self.white_wins,
            self.draws,
            self.average_plies()
        )
    }
}

/// Play `games` games. The factories receive the game index so seeded
/// players can vary per game.
pub fn simulate<B, W>(
    games: usize,
    mut make_black: impl FnMut(usize) -> B,
    mut make_white: impl FnMut(usize) -> W,
    config: GameConfig,
) -> SimulationSummary
where
    B: Player,
    W: Player,
{
    let mut summary = SimulationSummary::default();
    for index in 0..games {
        let mut black = make_black(index);
        let mut white = make_white(index);
        let record = play_game(&mut black, &mut white, config, DEFAULT_MAX_PLIES);
        summary.record(&record);
    }
    info!("simulation: {summary}");
    summary
}
