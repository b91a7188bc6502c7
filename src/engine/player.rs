//! Move choosers that can sit on either side of a game.

use rand::prelude::*;

use crate::board::search::search;
use crate::board::{EvalParams, GameState, Move, SearchLimits};

/// Something that picks moves for the side to move.
pub trait Player {
    fn name(&self) -> &str;

    /// Pick one of `game.legal_moves()`, or `None` when there is none.
    fn choose(&mut self, game: &GameState) -> Option<Move>;
}

/// Uniformly random legal moves. Reproducible for a given seed.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        RandomPlayer {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, game: &GameState) -> Option<Move> {
        game.legal_moves().choose(&mut self.rng).cloned()
    }
}

/// Alpha-beta search under fixed limits.
pub struct SearchPlayer {
    limits: SearchLimits,
    params: EvalParams,
}

impl SearchPlayer {
    #[must_use]
    pub fn new(limits: SearchLimits) -> Self {
        Self::with_params(limits, EvalParams::default())
    }

    #[must_use]
    pub fn with_params(limits: SearchLimits, params: EvalParams) -> Self {
        SearchPlayer { limits, params }
    }

    #[must_use]
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }
}

impl Player for SearchPlayer {
    fn name(&self) -> &str {
        "search"
    }

    fn choose(&mut self, game: &GameState) -> Option<Move> {
        search(game, &self.limits, &self.params).best_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBuilder;
    use crate::board::Color;

    #[test]
    fn test_random_player_is_reproducible() {
        let game = GameState::new();
        let picks = |seed| {
            let mut player = RandomPlayer::new(seed);
            (0..10).map(|_| player.choose(&game)).collect::<Vec<_>>()
        };
        assert_eq!(picks(7), picks(7));
        assert!(picks(7).iter().all(|mv| mv.as_ref().is_some_and(|mv| game.legal_moves().contains(mv))));
    }

    #[test]
    fn test_players_pass_without_moves() {
        let game = BoardBuilder::new()
            .man(Color::Black, 4)
            .man(Color::White, 7)
            .man(Color::White, 8)
            .man(Color::White, 11)
            .build_game();
        assert!(RandomPlayer::new(1).choose(&game).is_none());
        assert!(SearchPlayer::new(SearchLimits::depth(2)).choose(&game).is_none());
    }

    #[test]
    fn test_search_player_takes_the_capture() {
        let game = BoardBuilder::new()
            .man(Color::Black, 14)
            .man(Color::White, 18)
            .man(Color::White, 32)
            .build_game();
        let mut player = SearchPlayer::new(SearchLimits::depth(3));
        assert_eq!(player.choose(&game).unwrap().to_string(), "14x21");
    }
}
