//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its type,
//! cost, base stats, the powers a spell applies to its target and the
//! triggers a minion carries onto the field.
//!
//! Runtime state (damage taken, exhaustion, attached enchants) lives on
//! `core::Entity`, which keeps a shared handle to its definition.

use serde::{Deserialize, Serialize};

use crate::tasks::{Battlecry, Power};
use crate::triggers::TriggerSpec;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Closed set of card types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[default]
    Invalid,
    Hero,
    Minion,
    Spell,
    Weapon,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Invalid => "INVALID",
            CardType::Hero => "HERO",
            CardType::Minion => "MINION",
            CardType::Spell => "SPELL",
            CardType::Weapon => "WEAPON",
        };
        f.write_str(name)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_hearth::cards::{CardDefinition, CardId, CardType};
/// use rust_hearth::tasks::Power;
///
/// let moonfire = CardDefinition::spell(CardId::new(1), "Moonfire", 0)
///     .with_power(Power::Damage(1));
///
/// assert_eq!(moonfire.card_type, CardType::Spell);
/// assert_eq!(moonfire.powers.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (lookup key and display).
    pub name: String,

    pub card_type: CardType,

    /// Mana cost.
    pub cost: u8,

    /// Base attack. Zero for spells.
    pub attack: i32,

    /// Base health (durability for weapons). Zero for spells.
    pub health: i32,

    /// Effects applied, in order, to the target when the card is played.
    pub powers: Vec<Power>,

    /// Board effects a minion applies, in order, as it is played.
    pub battlecries: Vec<Battlecry>,

    /// Triggers attached to the entity when it is created.
    pub triggers: Vec<TriggerSpec>,
}

impl CardDefinition {
    /// Create a definition with no stats, powers or triggers.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType, cost: u8) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            cost,
            attack: 0,
            health: 0,
            powers: Vec::new(),
            battlecries: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Create a minion definition.
    #[must_use]
    pub fn minion(id: CardId, name: impl Into<String>, cost: u8, attack: i32, health: i32) -> Self {
        Self::new(id, name, CardType::Minion, cost).with_stats(attack, health)
    }

    /// Create a spell definition.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: u8) -> Self {
        Self::new(id, name, CardType::Spell, cost)
    }

    /// Create a weapon definition.
    #[must_use]
    pub fn weapon(id: CardId, name: impl Into<String>, cost: u8, attack: i32, durability: i32) -> Self {
        Self::new(id, name, CardType::Weapon, cost).with_stats(attack, durability)
    }

    /// Create a hero definition.
    #[must_use]
    pub fn hero(id: CardId, name: impl Into<String>, health: i32) -> Self {
        Self::new(id, name, CardType::Hero, 0).with_stats(0, health)
    }

    /// Set base attack and health (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, attack: i32, health: i32) -> Self {
        self.attack = attack;
        self.health = health;
        self
    }

    /// Add a power (builder pattern).
    #[must_use]
    pub fn with_power(mut self, power: Power) -> Self {
        self.powers.push(power);
        self
    }

    /// Add a battlecry (builder pattern).
    #[must_use]
    pub fn with_battlecry(mut self, battlecry: Battlecry) -> Self {
        self.battlecries.push(battlecry);
        self
    }

    /// Add a trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerSpec) -> Self {
        self.triggers.push(trigger);
        self
    }
}
