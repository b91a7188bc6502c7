//! FEN parsing and formatting tests.

use super::sq;
use crate::board::{Color, FenError, GameState, GameStatus, Piece};

const START_FEN: &str =
    "B:W21,22,23,24,25,26,27,28,29,30,31,32:B1,2,3,4,5,6,7,8,9,10,11,12";

#[test]
fn test_start_position_fen() {
    assert_eq!(GameState::new().to_fen(), START_FEN);
}

#[test]
fn test_parse_start_position() {
    let game = GameState::from_fen(START_FEN);
    assert_eq!(game.board(), GameState::new().board());
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn test_kings_and_side_to_move() {
    let game = GameState::from_fen("W:WK14,20:B1,K30");
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.board().piece_at(sq(14)), Some(Piece::king(Color::White)));
    assert_eq!(game.board().piece_at(sq(20)), Some(Piece::man(Color::White)));
    assert_eq!(game.board().piece_at(sq(30)), Some(Piece::king(Color::Black)));
    assert_eq!(game.to_fen(), "W:WK14,20:B1,K30");
}

#[test]
fn test_sections_in_either_order_and_trailing_period() {
    let game = GameState::from_fen("B:B1,2:W31,32.");
    assert_eq!(game.board().count(Color::Black), 2);
    assert_eq!(game.board().count(Color::White), 2);
    assert_eq!(game.to_fen(), "B:W31,32:B1,2");
}

#[test]
fn test_side_without_pieces_has_lost() {
    let game = GameState::from_fen("W:W:B1");
    assert_eq!(game.status(), GameStatus::BlackWins);
}

#[test]
fn test_fen_errors() {
    assert_eq!(
        GameState::try_from_fen("B:W21").unwrap_err(),
        FenError::TooFewSections { found: 2 }
    );
    assert!(matches!(
        GameState::try_from_fen("X:W21:B1"),
        Err(FenError::InvalidSideToMove { .. })
    ));
    assert!(matches!(
        GameState::try_from_fen("B:Q21:B1"),
        Err(FenError::InvalidColor { .. })
    ));
    assert!(matches!(
        GameState::try_from_fen("B:W33:B1"),
        Err(FenError::InvalidSquare { .. })
    ));
    assert!(matches!(
        GameState::try_from_fen("B:Wx:B1"),
        Err(FenError::InvalidSquare { .. })
    ));
    assert_eq!(
        GameState::try_from_fen("B:W5:B5").unwrap_err(),
        FenError::DuplicateSquare { square: 5 }
    );
}

#[test]
#[should_panic(expected = "Invalid FEN string")]
fn test_from_fen_panics_on_garbage() {
    let _ = GameState::from_fen("not a fen");
}
