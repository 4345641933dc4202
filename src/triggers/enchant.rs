//! Enchants: the owners of triggers.
//!
//! An enchant groups the triggers one card ability or aura attaches to an
//! entity. The entity holds its enchants; detaching an enchant drops its
//! triggers, so a removed trigger can never be activated again.

use serde::{Deserialize, Serialize};

use crate::core::Entity;

use super::trigger::{Trigger, TriggerType};

/// Identifier of an enchant attached to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnchantId(pub u32);

/// A set of triggers attached together and removed together.
#[derive(Debug)]
pub struct Enchant {
    id: EnchantId,
    name: String,
    triggers: Vec<Box<dyn Trigger>>,
}

impl Enchant {
    /// Create an enchant with no triggers. The id is assigned on attach.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EnchantId(0),
            name: name.into(),
            triggers: Vec::new(),
        }
    }

    /// Add a trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: Box<dyn Trigger>) -> Self {
        self.triggers.push(trigger);
        self
    }

    #[must_use]
    pub fn id(&self) -> EnchantId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EnchantId) {
        self.id = id;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Activate every trigger bound to `event`, in attach order.
    ///
    /// Returns how many triggers activated.
    pub fn activate(&self, event: TriggerType, owner: &mut Entity) -> usize {
        let mut fired = 0;
        for trigger in self.triggers.iter().filter(|t| t.trigger_type() == event) {
            trigger.activate(owner);
            fired += 1;
        }
        fired
    }
}
