//! Network session keeping two game replicas in lockstep.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use super::error::{DesyncReason, SyncError};
use super::message::{decode_line, encode_line, MoveMessage, WireMessage};
use crate::board::{Color, GameConfig, GameState, GameStatus, IllegalMoveError, Move};
use crate::events::{DisconnectReason, GameEvent, GameEvents};

/// Port the host listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 22222;

/// Default limit for establishing a connection as the guest
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest accepted wire line, newline included. A move message for the
/// longest possible chain fits several times over.
pub const MAX_LINE_BYTES: usize = 1024;

/// Connection settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub port: u16,
    pub connect_timeout: Duration,
}

impl Default for NetConfig {
    fn default() -> Self {
        NetConfig {
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Which end of the connection this peer is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Accepted the connection; plays Black and moves first
    Host,
    /// Initiated the connection; plays White
    Guest,
}

impl Role {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Role::Host => Color::Black,
            Role::Guest => Color::White,
        }
    }
}

/// Forwarded from the reader thread to the session owner
#[derive(Debug)]
enum Inbound {
    Line(String),
    /// Bytes that can never form a message; the reader stops after this
    Invalid(DesyncReason),
    Eof,
    Failed(String),
}

/// One peer of a network match.
///
/// The session owns the local replica. Local moves go through
/// [`send_move`](Self::send_move); peer moves are validated against the
/// replica's legal moves before they are applied. Any invalid peer input or
/// transport failure closes the session.
pub struct NetworkSession {
    game: GameState,
    role: Role,
    peer: String,
    stream: TcpStream,
    inbound: Receiver<Inbound>,
    reader: Option<JoinHandle<()>>,
    closed: bool,
    events: Option<GameEvents>,
}

impl NetworkSession {
    /// Bind the configured port on all interfaces and wait for one guest.
    pub fn host(net: &NetConfig, config: GameConfig) -> Result<Self, SyncError> {
        let listener = TcpListener::bind(("0.0.0.0", net.port))?;
        info!("waiting for a peer on port {}", net.port);
        Self::accept(&listener, config)
    }

    /// Accept one guest from `listener` and start a game as the host.
    pub fn accept(listener: &TcpListener, config: GameConfig) -> Result<Self, SyncError> {
        let (stream, _) = listener.accept()?;
        Self::from_stream(stream, Role::Host, config)
    }

    /// Connect to a host and start a game as the guest.
    pub fn join(addr: SocketAddr, net: &NetConfig, config: GameConfig) -> Result<Self, SyncError> {
        let stream = TcpStream::connect_timeout(&addr, net.connect_timeout)?;
        Self::from_stream(stream, Role::Guest, config)
    }

    /// Wrap an established connection.
    pub fn from_stream(stream: TcpStream, role: Role, config: GameConfig) -> Result<Self, SyncError> {
        stream.set_nodelay(true)?;
        let peer = stream
            .peer_addr()
            .map_or_else(|_| "unknown".to_string(), |addr| addr.to_string());
        let read_half = stream.try_clone()?;

        let (tx, rx) = mpsc::channel();
        let reader = thread::Builder::new()
            .name("checkers-net-reader".into())
            .spawn(move || read_lines(read_half, &tx))?;

        info!("connected to {peer} as {:?} playing {}", role, role.color());
        Ok(NetworkSession {
            game: GameState::with_config(config),
            role,
            peer,
            stream,
            inbound: rx,
            reader: Some(reader),
            closed: false,
            events: None,
        })
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn local_color(&self) -> Color {
        self.role.color()
    }

    #[must_use]
    pub fn peer_addr(&self) -> &str {
        &self.peer
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The game is running and the local side is to move
    #[must_use]
    pub fn is_local_turn(&self) -> bool {
        !self.game.status().is_terminal() && self.game.side_to_move() == self.local_color()
    }

    /// Route game and connection notifications to `events`. Pushes
    /// [`GameEvent::Connected`] right away.
    pub fn attach_events(&mut self, events: GameEvents) {
        self.game.attach_events(events.clone());
        events.push(GameEvent::Connected {
            local: self.local_color(),
            peer: self.peer.clone(),
        });
        self.events = Some(events);
    }

    /// Apply a local move and transmit it.
    ///
    /// An illegal move is reported as [`SyncError::IllegalMove`] and nothing
    /// is sent.
    pub fn send_move(&mut self, mv: &Move) -> Result<GameStatus, SyncError> {
        self.ensure_open()?;
        if self.game.side_to_move() != self.local_color() {
            return Err(SyncError::NotLocalTurn);
        }
        // Anything already queued arrived while the peer was not to move.
        match self.inbound.try_recv() {
            Ok(inbound) => return Err(self.out_of_turn(inbound)),
            Err(TryRecvError::Disconnected) => {
                return Err(self.connection_lost(DisconnectReason::PeerClosed))
            }
            Err(TryRecvError::Empty) => {}
        }

        let status = self.game.apply_move(mv)?;
        let line = encode_line(&WireMessage::Move(MoveMessage::from_move(mv)))
            .map_err(io::Error::from)?;
        if let Err(e) = self.stream.write_all(line.as_bytes()) {
            return Err(self.connection_lost(DisconnectReason::Io(e.to_string())));
        }
        debug!("sent {mv}");
        Ok(status)
    }

    /// Block until the peer's move arrives, then validate and apply it.
    pub fn receive_move(&mut self) -> Result<Move, SyncError> {
        self.ensure_peer_turn()?;
        let inbound = self.inbound.recv().unwrap_or(Inbound::Eof);
        self.handle(inbound)
    }

    /// Like [`receive_move`](Self::receive_move) but returns `Ok(None)` when
    /// nothing has arrived yet.
    pub fn try_receive_move(&mut self) -> Result<Option<Move>, SyncError> {
        self.ensure_peer_turn()?;
        let inbound = match self.inbound.try_recv() {
            Ok(inbound) => inbound,
            Err(TryRecvError::Empty) => return Ok(None),
            Err(TryRecvError::Disconnected) => Inbound::Eof,
        };
        self.handle(inbound).map(Some)
    }

    /// Say goodbye and tear the connection down. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if let Ok(line) = encode_line(&WireMessage::Disconnect) {
            let _ = self.stream.write_all(line.as_bytes());
        }
        info!("closing session with {}", self.peer);
        self.shut_down(DisconnectReason::Local);
    }

    fn ensure_open(&self) -> Result<(), SyncError> {
        if self.closed {
            Err(SyncError::Closed)
        } else {
            Ok(())
        }
    }

    fn ensure_peer_turn(&self) -> Result<(), SyncError> {
        self.ensure_open()?;
        if self.game.status().is_terminal() {
            return Err(IllegalMoveError::GameOver.into());
        }
        if self.game.side_to_move() == self.local_color() {
            return Err(SyncError::NotPeerTurn);
        }
        Ok(())
    }

    fn handle(&mut self, inbound: Inbound) -> Result<Move, SyncError> {
        match inbound {
            Inbound::Line(line) => match decode_line(&line) {
                Ok(WireMessage::Move(msg)) => self.apply_peer_move(&msg),
                Ok(WireMessage::Disconnect) => {
                    Err(self.connection_lost(DisconnectReason::PeerClosed))
                }
                Err(reason) => Err(self.desync(reason)),
            },
            Inbound::Invalid(reason) => Err(self.desync(reason)),
            Inbound::Eof => Err(self.connection_lost(DisconnectReason::PeerClosed)),
            Inbound::Failed(detail) => Err(self.connection_lost(DisconnectReason::Io(detail))),
        }
    }

    fn apply_peer_move(&mut self, msg: &MoveMessage) -> Result<Move, SyncError> {
        let path = match msg.to_path() {
            Ok(path) => path,
            Err(reason) => return Err(self.desync(reason)),
        };
        let Some(mv) = self.game.resolve_path(&path).cloned() else {
            return Err(self.desync(DesyncReason::IllegalMove(path.to_string())));
        };
        if let Err(e) = self.game.apply_move(&mv) {
            return Err(self.desync(DesyncReason::IllegalMove(e.to_string())));
        }
        debug!("received {mv}");
        self.emit(GameEvent::PeerMoveReceived(mv.clone()));
        Ok(mv)
    }

    fn out_of_turn(&mut self, inbound: Inbound) -> SyncError {
        match inbound {
            Inbound::Line(line) => match decode_line(&line) {
                Ok(WireMessage::Move(msg)) => {
                    let text = msg
                        .to_path()
                        .map_or_else(|_| line.trim().to_string(), |path| path.to_string());
                    self.desync(DesyncReason::IllegalMove(format!("{text} (out of turn)")))
                }
                Ok(WireMessage::Disconnect) => self.connection_lost(DisconnectReason::PeerClosed),
                Err(reason) => self.desync(reason),
            },
            Inbound::Invalid(reason) => self.desync(reason),
            Inbound::Eof => self.connection_lost(DisconnectReason::PeerClosed),
            Inbound::Failed(detail) => self.connection_lost(DisconnectReason::Io(detail)),
        }
    }

    fn desync(&mut self, reason: DesyncReason) -> SyncError {
        warn!("desync with {}: {reason}", self.peer);
        self.shut_down(DisconnectReason::Desync(reason.to_string()));
        SyncError::Desync(reason)
    }

    fn connection_lost(&mut self, reason: DisconnectReason) -> SyncError {
        info!("connection with {} ended: {reason}", self.peer);
        self.shut_down(reason);
        SyncError::ConnectionLost
    }

    fn shut_down(&mut self, reason: DisconnectReason) {
        self.closed = true;
        let _ = self.stream.shutdown(Shutdown::Both);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
        self.emit(GameEvent::Disconnected { reason });
    }

    fn emit(&self, event: GameEvent) {
        if let Some(events) = &self.events {
            events.push(event);
        }
    }
}

impl Drop for NetworkSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Resolve `host` or `host:port`; a bare host gets `default_port`.
pub fn resolve_peer(text: &str, default_port: u16) -> io::Result<SocketAddr> {
    let text = text.trim();
    let mut addrs = match text.to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(_) => (text, default_port).to_socket_addrs()?,
    };
    addrs
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no address for '{text}'")))
}

/// Reader thread body: forward non-empty lines until EOF, an error or a
/// line that cannot be a message.
fn read_lines(stream: TcpStream, tx: &Sender<Inbound>) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::with_capacity(128);
    loop {
        buf.clear();
        let inbound = match next_line(&mut reader, &mut buf) {
            Ok(None) => break,
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => Inbound::Line(line),
            Err(inbound) => {
                let _ = tx.send(inbound);
                return;
            }
        };
        if tx.send(inbound).is_err() {
            return;
        }
    }
    let _ = tx.send(Inbound::Eof);
}

/// Read one line of at most [`MAX_LINE_BYTES`]. `Ok(None)` at EOF.
fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>, Inbound> {
    let limit = MAX_LINE_BYTES as u64;
    let read = reader
        .take(limit)
        .read_until(b'\n', buf)
        .map_err(|e| Inbound::Failed(e.to_string()))?;
    if read == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&b'\n') && read as u64 == limit {
        return Err(Inbound::Invalid(DesyncReason::Malformed(format!(
            "line longer than {MAX_LINE_BYTES} bytes"
        ))));
    }
    match String::from_utf8(std::mem::take(buf)) {
        Ok(line) => Ok(Some(line)),
        Err(e) => Err(Inbound::Invalid(DesyncReason::Malformed(format!(
            "invalid utf-8 at byte {}",
            e.utf8_error().valid_up_to()
        )))),
    }
}
