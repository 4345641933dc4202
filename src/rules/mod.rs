//! Win/loss conditions.
//!
//! The agent checks `check_game_over` after every action; the first
//! `Some` ends the game.

mod result;

pub use result::{check_game_over, GameResult};
