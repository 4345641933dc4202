//! Player identification and the per-player game aggregate.
//!
//! ## PlayerId
//!
//! Identifier of one of the two seats, `0` or `1`. Any other value is
//! rejected when an id is deserialized, so a decoded frame always names a
//! real seat.
//!
//! ## Player
//!
//! Everything a player owns: hero, mana, deck, hand and field. The agent
//! owns both `Player` values for the whole game and lends them to tasks by
//! mutable reference; nothing else ever mutates them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::GameConfig;
use super::entity::{Entity, Hero};
use super::field::Field;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct PlayerId(pub u8);

/// A seat number other than `0` or `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no seat {0} in a two-player game")]
pub struct InvalidPlayerId(pub u8);

impl TryFrom<u8> for PlayerId {
    type Error = InvalidPlayerId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if id < 2 {
            Ok(Self(id))
        } else {
            Err(InvalidPlayerId(id))
        }
    }
}

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat in a two-player game.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - (self.0 & 1))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Mutable per-player state.
#[derive(Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hero: Hero,

    /// Mana crystals owned.
    pub total_mana: u8,

    /// Mana still available this turn.
    pub exist_mana: u8,

    /// Undrawn cards; the next card drawn is the last element.
    pub deck: Vec<Entity>,

    pub hand: Vec<Entity>,
    pub field: Field,

    /// Fatigue damage dealt by the last draw from an empty deck.
    pub fatigue: i32,

    /// Hand limit.
    pub max_hand: usize,

    /// Mana crystal limit.
    pub max_mana: u8,
}

impl Player {
    /// Create a player with the limits from `config`.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, hero: Hero, deck: Vec<Entity>, config: &GameConfig) -> Self {
        Self {
            id,
            name: name.into(),
            hero,
            total_mana: 0,
            exist_mana: 0,
            deck,
            hand: Vec::new(),
            field: Field::new(config.max_field),
            fatigue: 0,
            max_hand: config.max_hand,
            max_mana: config.max_mana,
        }
    }

    #[must_use]
    pub fn is_hand_full(&self) -> bool {
        self.hand.len() >= self.max_hand
    }

    /// Entity addressed by a field position (`0..len`), or `None` for the
    /// hero when `position` is `None`.
    pub fn target_mut(&mut self, position: Option<usize>) -> Option<&mut Entity> {
        match position {
            None => Some(&mut self.hero.entity),
            Some(pos) => self.field.get_mut(pos),
        }
    }

    /// Un-exhaust every minion on the field.
    pub fn refresh_minions(&mut self) {
        for minion in self.field.minions_mut() {
            minion.exhausted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId};
    use std::sync::Arc;

    fn player() -> Player {
        let hero = Hero::new(Arc::new(CardDefinition::hero(CardId::new(0), "Hero", 30)));
        Player::new(PlayerId::new(0), "Player 1", hero, Vec::new(), &GameConfig::default())
    }

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p0.opponent(), p1);
        assert_eq!(p1.opponent(), p0);
        assert_eq!(format!("{}", p1), "Player 1");
    }

    #[test]
    fn test_player_id_rejects_third_seat() {
        assert_eq!(PlayerId::try_from(1), Ok(PlayerId::new(1)));
        assert_eq!(PlayerId::try_from(2), Err(InvalidPlayerId(2)));

        assert_eq!(serde_json::from_str::<PlayerId>("0").unwrap(), PlayerId::new(0));
        assert!(serde_json::from_str::<PlayerId>("7").is_err());
    }

    #[test]
    fn test_new_player() {
        let player = player();

        assert_eq!(player.exist_mana, 0);
        assert!(player.hand.is_empty());
        assert_eq!(player.field.capacity(), 7);
        assert!(!player.is_hand_full());
    }

    #[test]
    fn test_target_mut() {
        let mut player = player();
        let yeti = Arc::new(CardDefinition::minion(CardId::new(1), "Yeti", 4, 4, 5));
        player.field.insert(0, Entity::new(yeti)).unwrap();

        assert_eq!(player.target_mut(None).unwrap().name(), "Hero");
        assert_eq!(player.target_mut(Some(0)).unwrap().name(), "Yeti");
        assert!(player.target_mut(Some(1)).is_none());
    }

    #[test]
    fn test_refresh_minions() {
        let mut player = player();
        let yeti = Arc::new(CardDefinition::minion(CardId::new(1), "Yeti", 4, 4, 5));
        let mut entity = Entity::new(yeti);
        entity.exhausted = true;
        player.field.insert(0, entity).unwrap();

        player.refresh_minions();

        assert!(!player.field.get(0).unwrap().exhausted);
    }
}
