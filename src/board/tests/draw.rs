//! Draw detection tests.

use super::play;
use crate::board::{BoardBuilder, Color, GameConfig, GameState, GameStatus};

fn kings_only(config: GameConfig) -> GameState {
    BoardBuilder::new()
        .king(Color::Black, 1)
        .king(Color::White, 32)
        .config(config)
        .build_game()
}

fn shuffle(game: &mut GameState) {
    for text in ["1-5", "32-28", "5-1", "28-32"] {
        play(game, text);
    }
}

#[test]
fn test_no_progress_draw() {
    let mut game = kings_only(GameConfig {
        draw_after_plies: Some(4),
        repetition_limit: None,
    });
    play(&mut game, "1-5");
    play(&mut game, "32-28");
    play(&mut game, "5-1");
    assert_eq!(game.plies_without_progress(), 3);
    assert_eq!(game.status(), GameStatus::InProgress);

    play(&mut game, "28-32");
    assert_eq!(game.status(), GameStatus::Draw);
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_man_move_resets_no_progress_count() {
    let mut game = BoardBuilder::new()
        .king(Color::Black, 1)
        .man(Color::Black, 12)
        .king(Color::White, 32)
        .config(GameConfig {
            draw_after_plies: Some(4),
            repetition_limit: None,
        })
        .build_game();
    play(&mut game, "1-5");
    play(&mut game, "32-28");
    play(&mut game, "12-16");
    assert_eq!(game.plies_without_progress(), 0);

    play(&mut game, "28-32");
    play(&mut game, "5-1");
    play(&mut game, "32-28");
    assert_eq!(game.plies_without_progress(), 3);
    assert_eq!(game.status(), GameStatus::InProgress);

    play(&mut game, "1-5");
    assert_eq!(game.status(), GameStatus::Draw);
}

#[test]
fn test_threefold_repetition() {
    let mut game = kings_only(GameConfig::default());
    shuffle(&mut game);
    assert_eq!(game.status(), GameStatus::InProgress);

    for text in ["1-5", "32-28", "5-1"] {
        play(&mut game, text);
    }
    assert_eq!(game.status(), GameStatus::InProgress);
    play(&mut game, "28-32");
    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.ply(), 8);
}

#[test]
fn test_draw_rules_can_be_disabled() {
    let mut game = kings_only(GameConfig {
        draw_after_plies: None,
        repetition_limit: None,
    });
    for _ in 0..25 {
        shuffle(&mut game);
    }
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.plies_without_progress(), 100);
}

#[test]
fn test_default_no_progress_limit() {
    let game = GameState::new();
    assert_eq!(game.config().draw_after_plies, Some(80));
    assert_eq!(game.config().repetition_limit, Some(3));
}
