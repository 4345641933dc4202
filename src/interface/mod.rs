//! The interaction thread.
//!
//! `GameInterface` reads the agent's frames, renders them as text and
//! answers queries from line input. It never touches game state; all it
//! knows arrives in the frames.

mod console;
mod game;

pub use console::Console;
pub use game::{GameInterface, HandleStatus};
