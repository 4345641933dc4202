//! Trigger contract and the built-in triggers.
//!
//! A trigger is bound to exactly one `TriggerType`. Whether it fires is
//! decided by whoever raises the event (`Entity::notify`); the trigger only
//! decides what happens to its owner when it does.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Entity;

/// Event categories a trigger can listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerType {
    /// The owning card was just played.
    AfterPlay,
    /// The owner took a non-zero amount of damage, fatal or not.
    TakeDamage,
    /// The owner was healed by a non-zero amount.
    Heal,
    /// Start of the controller's turn.
    TurnStart,
    /// End of the controller's turn.
    TurnEnd,
}

/// An event-activated hook attached to an entity.
///
/// A trigger holds no state beyond its type and parameters; everything it
/// changes lives on the owner. The default `activate` does nothing, so a
/// trigger that only names its type is legal and inert.
pub trait Trigger: fmt::Debug + Send {
    /// The event category this trigger is bound to.
    fn trigger_type(&self) -> TriggerType;

    /// Apply the trigger's effect to its owner.
    fn activate(&self, owner: &mut Entity) {
        let _ = owner;
    }
}

/// A trigger with no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InertTrigger {
    trigger_type: TriggerType,
}

impl InertTrigger {
    #[must_use]
    pub fn new(trigger_type: TriggerType) -> Self {
        Self { trigger_type }
    }
}

impl Trigger for InertTrigger {
    fn trigger_type(&self) -> TriggerType {
        self.trigger_type
    }
}

/// Adds attack and health to its owner each time it activates.
///
/// Bound to `TakeDamage` this is a stacking enrage: every damaging hit
/// adds the bonus again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuffTrigger {
    trigger_type: TriggerType,
    attack: i32,
    health: i32,
}

impl BuffTrigger {
    #[must_use]
    pub fn new(trigger_type: TriggerType, attack: i32, health: i32) -> Self {
        Self {
            trigger_type,
            attack,
            health,
        }
    }
}

impl Trigger for BuffTrigger {
    fn trigger_type(&self) -> TriggerType {
        self.trigger_type
    }

    fn activate(&self, owner: &mut Entity) {
        owner.buff(self.attack, self.health);
    }
}

/// Restores health to its owner each time it activates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealTrigger {
    trigger_type: TriggerType,
    amount: i32,
}

impl HealTrigger {
    #[must_use]
    pub fn new(trigger_type: TriggerType, amount: i32) -> Self {
        Self { trigger_type, amount }
    }
}

impl Trigger for HealTrigger {
    fn trigger_type(&self) -> TriggerType {
        self.trigger_type
    }

    fn activate(&self, owner: &mut Entity) {
        // Restores directly; going through `Entity::heal` would re-raise `Heal`.
        owner.restore_health(self.amount);
    }
}

/// Serializable description of a trigger, stored on card definitions.
///
/// Each entity created from a definition builds its own trigger objects
/// from these specs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerSpec {
    Inert { on: TriggerType },
    Buff { on: TriggerType, attack: i32, health: i32 },
    Heal { on: TriggerType, amount: i32 },
}

impl TriggerSpec {
    /// Build a fresh trigger object.
    #[must_use]
    pub fn build(&self) -> Box<dyn Trigger> {
        match *self {
            TriggerSpec::Inert { on } => Box::new(InertTrigger::new(on)),
            TriggerSpec::Buff { on, attack, health } => Box::new(BuffTrigger::new(on, attack, health)),
            TriggerSpec::Heal { on, amount } => Box::new(HealTrigger::new(on, amount)),
        }
    }
}
