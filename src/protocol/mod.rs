//! Line-oriented text protocol spoken by the `checkers` binary.
//!
//! Replies go to the writer handed to [`Driver`] (stdout for the binary);
//! diagnostics go through `log`.

use std::fmt;
use std::io::{self, BufRead, Write};

use log::{error, warn};

use crate::board::search::search;
use crate::board::{FenError, GameState, IllegalMoveError, Move, MoveParseError};
use crate::engine::{simulate, RandomPlayer};
use crate::net::{resolve_peer, NetConfig, NetworkSession, SyncError};

pub mod command;
pub mod options;

use command::{parse_command, Command};
use options::{parse_setoption, DriverOptions};

/// Error type for protocol command handling
#[derive(Debug)]
pub enum ProtocolError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Invalid move text
    InvalidMove { move_str: String, error: MoveParseError },
    /// Move rejected by the game state
    Illegal(IllegalMoveError),
    /// Missing required parts in the command
    MissingParts,
    /// Option value that does not parse
    InvalidValue { name: String, value: String },
    UnknownOption { name: String },
    /// Command needs a network session, or must not run during one
    Session(&'static str),
    Network(SyncError),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            ProtocolError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            ProtocolError::Illegal(e) => write!(f, "{e}"),
            ProtocolError::MissingParts => write!(f, "Missing required parts in command"),
            ProtocolError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{value}' for {name}")
            }
            ProtocolError::UnknownOption { name } => write!(f, "Unknown option '{name}'"),
            ProtocolError::Session(detail) => write!(f, "{detail}"),
            ProtocolError::Network(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<FenError> for ProtocolError {
    fn from(e: FenError) -> Self {
        ProtocolError::InvalidFen(e)
    }
}

impl From<IllegalMoveError> for ProtocolError {
    fn from(e: IllegalMoveError) -> Self {
        ProtocolError::Illegal(e)
    }
}

impl From<SyncError> for ProtocolError {
    fn from(e: SyncError) -> Self {
        ProtocolError::Network(e)
    }
}

/// Set up `game` from a `position` command.
///
/// Supports `position startpos` and `position fen <fen>`, optionally
/// followed by `moves <move1> <move2> ...`.
pub fn try_parse_position_command(
    game: &mut GameState,
    parts: &[&str],
    options: &DriverOptions,
) -> Result<(), ProtocolError> {
    let mut i = 1;

    let mut next = match parts.get(i) {
        Some(&"startpos") => {
            i += 1;
            GameState::with_config(options.game)
        }
        Some(&"fen") => {
            let fen = parts.get(i + 1).ok_or(ProtocolError::MissingParts)?;
            i += 2;
            GameState::try_from_fen_with_config(fen, options.game)?
        }
        _ => return Err(ProtocolError::MissingParts),
    };

    if parts.get(i) == Some(&"moves") {
        for text in &parts[i + 1..] {
            let mv = next.parse_move(text).map_err(|error| ProtocolError::InvalidMove {
                move_str: (*text).to_string(),
                error,
            })?;
            next.apply_move(&mv)?;
        }
    }

    *game = next;
    Ok(())
}

/// Whether the loop keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Command interpreter holding the local game, options and an optional
/// network session.
pub struct Driver<W: Write> {
    game: GameState,
    session: Option<NetworkSession>,
    options: DriverOptions,
    net: NetConfig,
    out: W,
}

impl<W: Write> Driver<W> {
    pub fn new(out: W) -> Self {
        Driver {
            game: GameState::new(),
            session: None,
            options: DriverOptions::default(),
            net: NetConfig::default(),
            out,
        }
    }

    #[must_use]
    pub fn output(&self) -> &W {
        &self.out
    }

    /// The game commands act on: the session replica when connected.
    #[must_use]
    pub fn game(&self) -> &GameState {
        self.session.as_ref().map_or(&self.game, NetworkSession::game)
    }

    /// Handle one input line. Command failures are reported to the output;
    /// only a failing writer is an error.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let Some(cmd) = parse_command(line) else {
            return Ok(Flow::Continue);
        };
        if cmd == Command::Quit {
            self.leave();
            return Ok(Flow::Quit);
        }
        if let Err(e) = self.execute(cmd) {
            warn!("{e}");
            writeln!(self.out, "info string error {e}")?;
            if let ProtocolError::Network(err) = &e {
                if err.is_fatal() {
                    self.leave();
                    writeln!(self.out, "info string disconnected")?;
                }
            }
        }
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    fn execute(&mut self, cmd: Command) -> Result<(), ProtocolError> {
        match cmd {
            Command::NewGame => {
                self.require_offline()?;
                self.game = GameState::with_config(self.options.game);
            }
            Command::Position(parts) => {
                self.require_offline()?;
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                try_parse_position_command(&mut self.game, &parts, &self.options)?;
            }
            Command::Display => {
                let game = self.game();
                let text = format!("{}\nFen: {}", game, game.to_fen());
                writeln!(self.out, "{text}").map_err(io_error)?;
            }
            Command::Moves => {
                let moves: Vec<String> =
                    self.game().legal_moves().iter().map(ToString::to_string).collect();
                let text = if moves.is_empty() {
                    "(none)".to_string()
                } else {
                    moves.join(" ")
                };
                writeln!(self.out, "moves {text}").map_err(io_error)?;
            }
            Command::Status => {
                let game = self.game();
                let text = format!("status {} {} to move", game.status(), game.side_to_move());
                writeln!(self.out, "{text}").map_err(io_error)?;
            }
            Command::Play(text) => {
                let text = text.ok_or(ProtocolError::MissingParts)?;
                let mv = self
                    .game()
                    .parse_move(&text)
                    .map_err(|error| ProtocolError::InvalidMove {
                        move_str: text.clone(),
                        error,
                    })?;
                self.play(&mv)?;
            }
            Command::Go(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                let limits = self.options.search_limits(&parts)?;
                if self.session.as_ref().is_some_and(|s| !s.is_local_turn()) {
                    return Err(SyncError::NotLocalTurn.into());
                }
                let result = search(self.game(), &limits, &Default::default());
                writeln!(
                    self.out,
                    "info depth {} score {} nodes {}",
                    result.depth, result.score, result.nodes
                )
                .map_err(io_error)?;
                match result.best_move {
                    Some(mv) => {
                        writeln!(self.out, "bestmove {mv}").map_err(io_error)?;
                        self.play(&mv)?;
                    }
                    None => writeln!(self.out, "bestmove (none)").map_err(io_error)?,
                }
            }
            Command::SetOption(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                let (name, value) = parse_setoption(&parts).ok_or(ProtocolError::MissingParts)?;
                self.options.apply_setoption(&name, value.as_deref())?;
            }
            Command::Sim(parts) => {
                let games: usize = parts
                    .get(1)
                    .and_then(|v| v.parse().ok())
                    .ok_or(ProtocolError::MissingParts)?;
                // Without a seed every game gets fresh entropy.
                let seed: Option<u64> = match parts.get(2) {
                    Some(v) => Some(v.parse().map_err(|_| ProtocolError::InvalidValue {
                        name: "seed".into(),
                        value: v.clone(),
                    })?),
                    None => None,
                };
                let player = |offset: u64| {
                    move |i: usize| match seed {
                        Some(seed) => RandomPlayer::new(seed.wrapping_add(2 * i as u64 + offset)),
                        None => RandomPlayer::from_entropy(),
                    }
                };
                let summary = simulate(games, player(0), player(1), self.options.game);
                writeln!(self.out, "sim {summary}").map_err(io_error)?;
            }
            Command::Host(port) => {
                self.require_offline()?;
                let mut net = self.net.clone();
                if let Some(port) = port {
                    net.port = port.parse().map_err(|_| ProtocolError::InvalidValue {
                        name: "port".into(),
                        value: port,
                    })?;
                }
                writeln!(self.out, "info string waiting on port {}", net.port).map_err(io_error)?;
                self.out.flush().map_err(io_error)?;
                let session = NetworkSession::host(&net, self.options.game)?;
                self.connected(session)?;
            }
            Command::Join(addr) => {
                self.require_offline()?;
                let addr = addr.ok_or(ProtocolError::MissingParts)?;
                let addr = resolve_peer(&addr, self.net.port).map_err(SyncError::Io)?;
                let session = NetworkSession::join(addr, &self.net, self.options.game)?;
                self.connected(session)?;
            }
            Command::Wait => {
                let session = self
                    .session
                    .as_mut()
                    .ok_or(ProtocolError::Session("not connected"))?;
                let mv = session.receive_move()?;
                writeln!(self.out, "peermove {mv}").map_err(io_error)?;
                self.report_result()?;
            }
            Command::Leave => {
                if self.session.is_none() {
                    return Err(ProtocolError::Session("not connected"));
                }
                self.leave();
                writeln!(self.out, "info string left").map_err(io_error)?;
            }
            Command::Quit => {}
            Command::Unknown(text) => {
                writeln!(self.out, "info string unknown command {text}").map_err(io_error)?;
            }
        }
        Ok(())
    }

    /// Apply a move locally, sending it when connected.
    fn play(&mut self, mv: &Move) -> Result<(), ProtocolError> {
        match &mut self.session {
            Some(session) => {
                session.send_move(mv)?;
            }
            None => {
                self.game.apply_move(mv)?;
            }
        }
        self.report_result()
    }

    fn report_result(&mut self) -> Result<(), ProtocolError> {
        let status = self.game().status();
        if status.is_terminal() {
            writeln!(self.out, "result {status}").map_err(io_error)?;
        }
        Ok(())
    }

    fn connected(&mut self, session: NetworkSession) -> Result<(), ProtocolError> {
        writeln!(
            self.out,
            "info string connected to {} playing {}",
            session.peer_addr(),
            session.local_color()
        )
        .map_err(io_error)?;
        self.session = Some(session);
        Ok(())
    }

    /// End any session, keeping its final position as the local game.
    fn leave(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            self.game = session.game().clone();
        }
    }

    fn require_offline(&self) -> Result<(), ProtocolError> {
        if self.session.is_some() {
            Err(ProtocolError::Session("leave the network game first"))
        } else {
            Ok(())
        }
    }
}

fn io_error(e: io::Error) -> ProtocolError {
    ProtocolError::Network(SyncError::Io(e))
}

/// Read commands from stdin until `quit` or end of input.
pub fn run_loop() {
    let stdin = io::stdin();
    let mut driver = Driver::new(io::stdout().lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("failed to read input: {e}");
                break;
            }
        };
        match driver.handle_line(&line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                error!("failed to write output: {e}");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, GameStatus};

    fn run(lines: &[&str]) -> (Driver<Vec<u8>>, String) {
        let mut driver = Driver::new(Vec::new());
        for line in lines {
            driver.handle_line(line).unwrap();
        }
        let text = String::from_utf8(driver.output().clone()).unwrap();
        (driver, text)
    }

    #[test]
    fn test_position_with_moves() {
        let (driver, _) = run(&["position startpos moves 11-15 24-20 15x24"]);
        assert_eq!(driver.game().ply(), 3);
        assert_eq!(driver.game().side_to_move(), Color::White);
    }

    #[test]
    fn test_position_fen() {
        let (driver, out) = run(&["position fen W:W18:B14", "status"]);
        assert_eq!(driver.game().side_to_move(), Color::White);
        assert!(out.contains("status in progress White to move"), "{out}");
    }

    #[test]
    fn test_bad_position_keeps_game() {
        let (driver, out) = run(&["play 11-15", "position startpos moves 9-14"]);
        assert_eq!(driver.game().ply(), 1);
        assert!(out.contains("info string error Invalid move '9-14'"), "{out}");
    }

    #[test]
    fn test_moves_and_play() {
        let (driver, out) = run(&["moves", "play 9-13", "play 9-13"]);
        assert!(out.starts_with("moves 9-13 10-14 10-13 11-15 11-14 12-16 12-15\n"), "{out}");
        assert!(out.contains("info string error"), "{out}");
        assert_eq!(driver.game().ply(), 1);
    }

    #[test]
    fn test_go_plays_a_legal_move() {
        let (driver, out) = run(&["go depth 3"]);
        let best = out
            .lines()
            .find_map(|l| l.strip_prefix("bestmove "))
            .expect("bestmove line");
        assert!(GameState::new().parse_move(best).is_ok(), "{best}");
        assert_eq!(driver.game().ply(), 1);
    }

    #[test]
    fn test_go_reports_result() {
        let (driver, out) = run(&["position fen B:W18:B14", "go depth 2"]);
        assert!(out.contains("bestmove 14x21"), "{out}");
        assert!(out.contains("result Black wins"), "{out}");
        assert_eq!(driver.game().status(), GameStatus::BlackWins);
    }

    #[test]
    fn test_setoption_and_sim() {
        let (driver, out) = run(&[
            "setoption name DrawPlies value 20",
            "newgame",
            "sim 3 42",
        ]);
        assert_eq!(driver.game().config().draw_after_plies, Some(20));
        assert!(out.contains("sim games 3 "), "{out}");
    }

    #[test]
    fn test_sim_seed_is_optional_and_reproducible() {
        let (_, first) = run(&["sim 2 7"]);
        let (_, again) = run(&["sim 2 7"]);
        assert_eq!(first, again);

        let (_, unseeded) = run(&["sim 2"]);
        assert!(unseeded.contains("sim games 2 "), "{unseeded}");

        let (_, bad) = run(&["sim 2 x"]);
        assert!(bad.contains("info string error"), "{bad}");
        assert!(!bad.contains("sim games"), "{bad}");
    }

    #[test]
    fn test_unknown_and_offline_session_commands() {
        let (_, out) = run(&["fly", "wait", "leave"]);
        assert!(out.contains("info string unknown command fly"));
        assert_eq!(out.matches("not connected").count(), 2);
    }

    #[test]
    fn test_quit_stops() {
        let mut driver = Driver::new(Vec::new());
        assert_eq!(driver.handle_line("quit").unwrap(), Flow::Quit);
    }
}
