//! Game configuration.
//!
//! The agent and interface read every numeric rule and transport limit
//! from a `GameConfig` built at startup. Nothing in the engine hardcodes
//! hand size, field size or the message buffer capacity.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default message buffer capacity in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use rust_hearth::core::GameConfig;
///
/// let config = GameConfig::default()
///     .with_seed(7)
///     .with_max_turns(20);
///
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.max_field, 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Capacity of the shared message buffer. A frame longer than this is
    /// a fatal error for the session.
    pub buffer_capacity: usize,

    /// Cards each player draws before the mulligan.
    pub begin_draw: usize,

    /// Hand limit; cards drawn beyond it are burned.
    pub max_hand: usize,

    /// Number of minion slots on a field.
    pub max_field: usize,

    /// Mana crystal cap.
    pub max_mana: u8,

    /// Total turns (both players counted) before the game ends in a draw.
    pub max_turns: u32,

    /// How long the agent waits for a response before aborting the game.
    /// `None` waits forever.
    pub interact_timeout: Option<Duration>,

    /// Seed for first-player choice and deck shuffling.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            begin_draw: 3,
            max_hand: 10,
            max_field: 7,
            max_mana: 10,
            max_turns: 90,
            interact_timeout: None,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the buffer capacity (builder pattern).
    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Set the turn limit (builder pattern).
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Set the response timeout (builder pattern).
    #[must_use]
    pub fn with_interact_timeout(mut self, timeout: Duration) -> Self {
        self.interact_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.buffer_capacity, DEFAULT_BUFFER_CAPACITY);
        assert_eq!(config.begin_draw, 3);
        assert_eq!(config.max_hand, 10);
        assert_eq!(config.max_mana, 10);
        assert!(config.interact_timeout.is_none());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_seed(99)
            .with_buffer_capacity(128)
            .with_interact_timeout(Duration::from_millis(250));

        assert_eq!(config.seed, 99);
        assert_eq!(config.buffer_capacity, 128);
        assert_eq!(config.interact_timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(3).with_max_turns(12);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
