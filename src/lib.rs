//! # rust-hearth
//!
//! A two-player collectible card game rule engine that runs as two
//! threads joined by a framed request/response channel.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: The agent thread owns both players. The interface only
//!    ever sees value snapshots sent in frames.
//!
//! 2. **Rejections Are Values**: Every rule outcome is a `MetaData` code.
//!    `Result::Err` is reserved for transport failures that end the game.
//!
//! 3. **Configuration Over Constants**: Hand size, field size, mana cap,
//!    turn limit, buffer capacity and seed all come from `GameConfig`.
//!
//! ## Architecture
//!
//! - **Strict Alternation**: At most one frame is in flight. A query frame
//!   is answered exactly once; an unanswered query reads as null.
//!
//! - **Tagged Responses**: A response carries its query kind and decodes
//!   only as that kind. Anything else is the null response.
//!
//! - **Deterministic Games**: Shuffles and the first-player flip use a
//!   seeded ChaCha stream, so a seed and an input script replay a game.
//!
//! ## Modules
//!
//! - `core`: Players, entities, field, RNG, configuration
//! - `cards`: Card definitions and the registry
//! - `triggers`: Event-activated abilities attached to entities
//! - `tasks`: State transitions and their result codes
//! - `rules`: Game-over detection
//! - `sync`: Frames, queries, responses and the channel
//! - `agent`: The rules thread
//! - `interface`: The console interaction thread

pub mod agent;
pub mod cards;
pub mod core;
pub mod error;
pub mod interface;
pub mod rules;
pub mod sync;
pub mod tasks;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{Entity, Field, GameConfig, GameRng, Hero, Player, PlayerId};

pub use crate::cards::{CardDefinition, CardId, CardRegistry, CardType};

pub use crate::triggers::{Enchant, Trigger, TriggerType};

pub use crate::tasks::{Battlecry, MetaData, Power, Task, TaskId};

pub use crate::rules::GameResult;

pub use crate::sync::{Message, QueryKind, Requirement, Step, TaskMeta};

pub use crate::agent::GameAgent;

pub use crate::interface::GameInterface;

pub use crate::error::{DecodeError, SyncError};
