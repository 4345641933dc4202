use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both heroes died together, or the turn limit was reached.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winner, `None` for a draw.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Check whether either hero has died.
///
/// Returns `None` while both heroes are alive.
#[must_use]
pub fn check_game_over(players: &[Player; 2]) -> Option<GameResult> {
    match (players[0].hero.is_dead(), players[1].hero.is_dead()) {
        (false, false) => None,
        (true, true) => Some(GameResult::Draw),
        (true, false) => Some(GameResult::Winner(players[1].id)),
        (false, true) => Some(GameResult::Winner(players[0].id)),
    }
}
