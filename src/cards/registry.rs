//! Card registry for definition lookup.
//!
//! The `CardRegistry` is built once at startup and handed to whatever
//! needs lookups (deck construction, tests). There is no global instance.
//! Definitions are stored behind `Arc` so entities can hold a handle to
//! their definition without copying it.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::tasks::{Battlecry, Power};
use crate::triggers::{TriggerSpec, TriggerType};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_hearth::cards::{CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::minion(CardId::new(1), "Chillwind Yeti", 4, 4, 5));
///
/// let yeti = registry.find_by_name("Chillwind Yeti").unwrap();
/// assert_eq!(yeti.id, CardId::new(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
    names: FxHashMap<String, CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in basic set.
    #[must_use]
    pub fn basic() -> Self {
        let mut registry = Self::new();
        let cards = [
            CardDefinition::hero(CardId::new(0), "Garrosh Hellscream", 30),
            CardDefinition::hero(CardId::new(1), "Jaina Proudmoore", 30),
            CardDefinition::minion(CardId::new(10), "River Crocolisk", 2, 2, 3),
            CardDefinition::minion(CardId::new(11), "Acidic Swamp Ooze", 2, 3, 2)
                .with_battlecry(Battlecry::DestroyOpponentWeapon),
            CardDefinition::minion(CardId::new(12), "Chillwind Yeti", 4, 4, 5),
            // Enrage stacks: every hit adds the bonus again.
            CardDefinition::minion(CardId::new(13), "Amani Berserker", 2, 2, 3).with_trigger(
                TriggerSpec::Buff {
                    on: TriggerType::TakeDamage,
                    attack: 3,
                    health: 0,
                },
            ),
            CardDefinition::spell(CardId::new(20), "Moonfire", 0).with_power(Power::Damage(1)),
            CardDefinition::spell(CardId::new(21), "Arcane Shot", 1).with_power(Power::Damage(2)),
            CardDefinition::spell(CardId::new(22), "Holy Light", 2).with_power(Power::Heal(6)),
            CardDefinition::spell(CardId::new(23), "Ancestral Healing", 0)
                .with_power(Power::RestoreToFull),
            CardDefinition::spell(CardId::new(24), "Blessing of Kings", 4)
                .with_power(Power::Buff { attack: 4, health: 4 }),
            CardDefinition::weapon(CardId::new(30), "Fiery War Axe", 2, 3, 2),
        ];
        for card in cards {
            registry.register(card);
        }
        registry
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID or name already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        if self.names.contains_key(&card.name) {
            panic!("Card named {:?} already registered", card.name);
        }
        self.names.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, Arc::new(card));
    }

    /// Look a card up by ID.
    #[must_use]
    pub fn find_by_id(&self, id: CardId) -> Option<Arc<CardDefinition>> {
        self.cards.get(&id).cloned()
    }

    /// Look a card up by its exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Arc<CardDefinition>> {
        self.names.get(name).and_then(|id| self.find_by_id(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    #[test]
    fn test_register_and_find() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::spell(CardId::new(1), "Test Spell", 1));

        let found = registry.find_by_id(CardId::new(1));
        assert_eq!(found.unwrap().name, "Test Spell");
        assert!(registry.find_by_id(CardId::new(99)).is_none());
        assert!(registry.find_by_name("Test Spell").is_some());
        assert!(registry.find_by_name("Missing").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::spell(CardId::new(1), "A", 1));
        registry.register(CardDefinition::spell(CardId::new(1), "B", 1));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_name_panics() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::spell(CardId::new(1), "A", 1));
        registry.register(CardDefinition::spell(CardId::new(2), "A", 1));
    }

    #[test]
    fn test_basic_set() {
        let registry = CardRegistry::basic();

        for hero in ["Garrosh Hellscream", "Jaina Proudmoore"] {
            assert_eq!(registry.find_by_name(hero).unwrap().card_type, CardType::Hero);
        }
        let ooze = registry.find_by_name("Acidic Swamp Ooze").unwrap();
        assert_eq!(ooze.battlecries, vec![Battlecry::DestroyOpponentWeapon]);
        let axe = registry.find_by_name("Fiery War Axe").unwrap();
        assert_eq!(axe.card_type, CardType::Weapon);
        let berserker = registry.find_by_name("Amani Berserker").unwrap();
        assert_eq!(berserker.triggers.len(), 1);
    }

    #[test]
    fn test_shared_handles() {
        let registry = CardRegistry::basic();
        let a = registry.find_by_name("Moonfire").unwrap();
        let b = registry.find_by_name("Moonfire").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
