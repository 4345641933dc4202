//! Card sub-effects.

use serde::{Deserialize, Serialize};

use crate::core::{Entity, Player};

/// One effect step a card applies to its resolved target.
///
/// A card's powers run in definition order, each mutating the target
/// immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Power {
    Damage(i32),
    Heal(i32),
    /// Heal to maximum health.
    RestoreToFull,
    Buff { attack: i32, health: i32 },
}

impl Power {
    pub fn apply(&self, target: &mut Entity) {
        match *self {
            Power::Damage(amount) => {
                target.take_damage(amount);
            }
            Power::Heal(amount) => {
                target.heal(amount);
            }
            Power::RestoreToFull => {
                let missing = target.max_health - target.health;
                target.heal(missing);
            }
            Power::Buff { attack, health } => target.buff(attack, health),
        }
    }
}

/// Effect a minion applies to the board as it is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Battlecry {
    /// Destroy the opposing hero's weapon, if one is equipped.
    DestroyOpponentWeapon,
}

impl Battlecry {
    pub fn apply(&self, _player: &mut Player, opponent: &mut Player) {
        match *self {
            Battlecry::DestroyOpponentWeapon => {
                if let Some(weapon) = opponent.hero.weapon.take() {
                    tracing::debug!(player = %opponent.id, weapon = weapon.name(), "weapon destroyed");
                }
            }
        }
    }
}
