//! Trigger system for event-activated abilities.
//!
//! Triggers decouple "a thing happened to this entity" from "what that
//! does". The entity that suffers the event raises it with
//! `Entity::notify`; every attached trigger bound to that event type is
//! activated with the entity as its owner.
//!
//! ## Key Components
//!
//! - [`TriggerType`]: Event categories
//! - [`Trigger`]: The hook contract (inert by default)
//! - [`TriggerSpec`]: Serializable trigger description stored on cards
//! - [`Enchant`]: Owner of a group of triggers, attached to an entity
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use rust_hearth::cards::{CardDefinition, CardId};
//! use rust_hearth::core::Entity;
//! use rust_hearth::triggers::{BuffTrigger, Enchant, TriggerType};
//!
//! let card = CardDefinition::minion(CardId::new(1), "Raging Worgen", 3, 3, 3);
//! let mut worgen = Entity::new(Arc::new(card));
//!
//! let enrage = Enchant::new("Enrage")
//!     .with_trigger(Box::new(BuffTrigger::new(TriggerType::TakeDamage, 1, 0)));
//! worgen.attach(enrage);
//!
//! worgen.take_damage(1);
//! assert_eq!(worgen.attack, 4);
//! assert_eq!(worgen.health, 2);
//! ```

mod enchant;
mod trigger;

pub use enchant::{Enchant, EnchantId};
pub use trigger::{BuffTrigger, HealTrigger, InertTrigger, Trigger, TriggerSpec, TriggerType};
