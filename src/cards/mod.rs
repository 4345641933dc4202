//! Card system: definitions and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardType`: Hero, Minion, Spell, Weapon (or Invalid)
//! - `CardDefinition`: Static card data, powers and triggers
//! - `CardRegistry`: Explicit lookup object passed to whoever needs it

pub mod definition;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardType};
pub use registry::CardRegistry;
