//! Network play over loopback TCP.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use checkers_engine::board::{Color, GameConfig, GameStatus, Move, Square};
use checkers_engine::engine::{Player, RandomPlayer};
use checkers_engine::events::{DisconnectReason, GameEvent};
use checkers_engine::net::{
    DesyncReason, NetConfig, NetworkSession, Role, SyncError, MAX_LINE_BYTES,
};
use checkers_engine::sync::EventQueue;

fn sq(n: usize) -> Square {
    Square::from_number(n).unwrap()
}

fn pair() -> (NetworkSession, NetworkSession) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let guest = thread::spawn(move || {
        NetworkSession::join(addr, &NetConfig::default(), GameConfig::default()).unwrap()
    });
    let host = NetworkSession::accept(&listener, GameConfig::default()).unwrap();
    (host, guest.join().unwrap())
}

/// A host session whose peer is a bare socket under the test's control
fn host_with_raw_peer() -> (NetworkSession, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
    let host = NetworkSession::accept(&listener, GameConfig::default()).unwrap();
    (host, client)
}

fn send_raw(peer: &mut TcpStream, line: &str) {
    peer.write_all(line.as_bytes()).unwrap();
    peer.write_all(b"\n").unwrap();
}

fn play(session: &mut NetworkSession, text: &str) {
    let mv = session.game().parse_move(text).unwrap();
    session.send_move(&mv).unwrap();
}

#[test]
fn roles_and_turns() {
    let (mut host, mut guest) = pair();
    assert_eq!(host.role(), Role::Host);
    assert_eq!(host.local_color(), Color::Black);
    assert_eq!(guest.local_color(), Color::White);
    assert!(host.is_local_turn());
    assert!(!guest.is_local_turn());

    let mv = guest.game().legal_moves()[0].clone();
    assert!(matches!(guest.send_move(&mv), Err(SyncError::NotLocalTurn)));
    assert!(matches!(host.receive_move(), Err(SyncError::NotPeerTurn)));
}

#[test]
fn moves_flow_both_ways() {
    let (mut host, mut guest) = pair();
    play(&mut host, "11-15");
    assert_eq!(guest.receive_move().unwrap().to_string(), "11-15");

    play(&mut guest, "24-20");
    assert_eq!(host.receive_move().unwrap().to_string(), "24-20");

    // Black must now take on 20.
    play(&mut host, "15x24");
    assert_eq!(guest.receive_move().unwrap().to_string(), "15x24");
    assert_eq!(host.game().to_fen(), guest.game().to_fen());
    assert_eq!(guest.game().board().count(Color::White), 11);
}

#[test]
fn illegal_local_move_is_not_sent() {
    let (mut host, mut guest) = pair();
    let err = host.send_move(&Move::simple(sq(9), sq(14))).unwrap_err();
    assert!(matches!(err, SyncError::IllegalMove(_)));
    assert!(!err.is_fatal());
    assert!(host.is_local_turn());

    thread::sleep(Duration::from_millis(100));
    assert!(guest.try_receive_move().unwrap().is_none());
    play(&mut host, "9-13");
    thread::sleep(Duration::from_millis(100));
    let received = guest.try_receive_move().unwrap();
    assert_eq!(received.map(|mv| mv.to_string()), Some("9-13".to_string()));
}

#[test]
fn illegal_peer_move_is_a_desync() {
    let (mut host, mut peer) = host_with_raw_peer();
    let events = EventQueue::new();
    host.attach_events(events.clone());
    play(&mut host, "11-15");

    let mut reader = BufReader::new(peer.try_clone().unwrap());
    let mut line = String::new();
    reader.read_line(&mut line).unwrap();
    assert_eq!(line, "{\"kind\":\"move\",\"from\":11,\"landings\":[15]}\n");

    let before = host.game().to_fen();
    // White may not move a black man.
    send_raw(&mut peer, r#"{"kind":"move","from":9,"landings":[13]}"#);
    let err = host.receive_move().unwrap_err();
    assert!(matches!(err, SyncError::Desync(DesyncReason::IllegalMove(_))), "{err}");
    assert_eq!(host.game().to_fen(), before);
    assert_eq!(host.game().side_to_move(), Color::White);
    assert!(host.is_closed());
    assert!(matches!(host.receive_move(), Err(SyncError::Closed)));

    let drained = events.drain();
    assert!(matches!(drained.first(), Some(GameEvent::Connected { local: Color::Black, .. })));
    assert!(matches!(
        drained.last(),
        Some(GameEvent::Disconnected {
            reason: DisconnectReason::Desync(_)
        })
    ));

    // The connection has been shut down.
    line.clear();
    assert_eq!(reader.read_line(&mut line).unwrap(), 0);
}

#[test]
fn malformed_and_unknown_input_are_desyncs() {
    let (mut host, mut peer) = host_with_raw_peer();
    play(&mut host, "11-15");
    send_raw(&mut peer, "not json");
    assert!(matches!(
        host.receive_move(),
        Err(SyncError::Desync(DesyncReason::Malformed(_)))
    ));

    let (mut host, mut peer) = host_with_raw_peer();
    play(&mut host, "11-15");
    send_raw(&mut peer, r#"{"kind":"move","from":40,"landings":[36]}"#);
    assert!(matches!(
        host.receive_move(),
        Err(SyncError::Desync(DesyncReason::UnknownSquare(40)))
    ));
}

#[test]
fn invalid_utf8_is_a_desync() {
    let (mut host, mut peer) = host_with_raw_peer();
    let events = EventQueue::new();
    host.attach_events(events.clone());
    play(&mut host, "11-15");
    let before = host.game().to_fen();

    peer.write_all(b"{\"kind\":\"move\",\"from\":22,\xff\xfe}\n").unwrap();
    let err = host.receive_move().unwrap_err();
    assert!(matches!(err, SyncError::Desync(DesyncReason::Malformed(_))), "{err}");
    assert_eq!(host.game().to_fen(), before);
    assert!(events.drain().iter().any(|e| matches!(
        e,
        GameEvent::Disconnected {
            reason: DisconnectReason::Desync(_)
        }
    )));
}

#[test]
fn endless_line_is_a_desync() {
    let (mut host, mut peer) = host_with_raw_peer();
    play(&mut host, "11-15");
    peer.write_all(&vec![b' '; MAX_LINE_BYTES + 512]).unwrap();
    assert!(matches!(
        host.receive_move(),
        Err(SyncError::Desync(DesyncReason::Malformed(_)))
    ));
    assert!(host.is_closed());
}

#[test]
fn move_sent_out_of_turn_is_a_desync() {
    let (mut host, mut peer) = host_with_raw_peer();
    send_raw(&mut peer, r#"{"kind":"move","from":22,"landings":[18]}"#);
    thread::sleep(Duration::from_millis(200));
    let mv = host.game().parse_move("11-15").unwrap();
    assert!(matches!(host.send_move(&mv), Err(SyncError::Desync(_))));
    assert_eq!(host.game().ply(), 0);
}

#[test]
fn peer_leaving_ends_the_match() {
    let (mut host, mut guest) = pair();
    play(&mut host, "11-15");
    guest.close();
    assert!(guest.is_closed());
    assert!(matches!(host.receive_move(), Err(SyncError::ConnectionLost)));
    assert!(host.is_closed());
}

#[test]
fn dropped_socket_is_a_lost_connection() {
    let (mut host, peer) = host_with_raw_peer();
    let events = EventQueue::new();
    host.attach_events(events.clone());
    play(&mut host, "11-15");
    drop(peer);
    let err = host.receive_move().unwrap_err();
    assert!(matches!(err, SyncError::ConnectionLost));
    assert!(err.is_fatal());
    assert!(events.drain().iter().any(|e| matches!(
        e,
        GameEvent::Disconnected {
            reason: DisconnectReason::PeerClosed | DisconnectReason::Io(_)
        }
    )));
}

#[test]
fn replicas_agree_through_a_whole_game() {
    let (mut host, mut guest) = pair();
    let mut black = RandomPlayer::new(5);
    let mut white = RandomPlayer::new(6);

    for _ in 0..300 {
        if host.game().status().is_terminal() {
            break;
        }
        if host.is_local_turn() {
            let mv = black.choose(host.game()).unwrap();
            host.send_move(&mv).unwrap();
            assert_eq!(guest.receive_move().unwrap(), mv);
        } else {
            let mv = white.choose(guest.game()).unwrap();
            guest.send_move(&mv).unwrap();
            assert_eq!(host.receive_move().unwrap(), mv);
        }
        assert_eq!(host.game().to_fen(), guest.game().to_fen());
    }
    assert_eq!(host.game().status(), guest.game().status());
    if host.game().status() != GameStatus::InProgress {
        assert!(matches!(
            host.receive_move(),
            Err(SyncError::IllegalMove(_))
        ));
    }
}
