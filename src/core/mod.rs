//! Core engine types: players, entities, field, RNG, configuration.

pub mod config;
pub mod entity;
pub mod field;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use entity::{Entity, Hero};
pub use field::Field;
pub use player::{InvalidPlayerId, Player, PlayerId};
pub use rng::GameRng;
