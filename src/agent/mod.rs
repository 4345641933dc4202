//! The rules thread.
//!
//! `GameAgent` owns both players and runs the whole game: setup, mulligan,
//! then alternating turns until a hero dies or the turn limit is reached.
//! Every state change happens through a task; the agent reports what
//! happened to the interface through notice frames.

mod game;

pub use game::GameAgent;
