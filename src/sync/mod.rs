//! Agent/interface synchronization protocol.
//!
//! The agent (rules thread) and the interface (interaction thread) share
//! one channel that carries one frame at a time.
//!
//! ## Key Components
//!
//! - [`Step`]: First byte of every agent frame; fixes the payload layout
//! - [`Message`]: Decoded agent frame, one variant per step
//! - [`QueryKind`] / [`Response`]: What a query asks for and the typed answer
//! - [`TaskMeta`]: Opaque response, decoded only as its own kind
//! - [`channel`]: The capacity-1, strictly alternating transport
//! - [`Requirement`]: The blocking query used by tasks
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use rust_hearth::core::PlayerId;
//! use rust_hearth::sync::{
//!     channel, MainMenu, MenuResponse, Message, PlayerStructure, QueryKind, Requirement,
//! };
//!
//! let (agent, mut interface) = channel(256, None);
//!
//! let ui = thread::spawn(move || {
//!     let incoming = interface.read().unwrap();
//!     let reply = incoming.reply.unwrap();
//!     reply.send(&MenuResponse { menu: MainMenu::EndTurn }).unwrap();
//! });
//!
//! let player = PlayerId::new(0);
//! let requirement = Requirement::new(QueryKind::SelectMenu, Arc::new(agent));
//! let query = Message::MainMenu(PlayerStructure { user_id: player });
//! let meta = requirement.interact(player, &query).unwrap();
//!
//! assert_eq!(meta.decode::<MenuResponse>().unwrap().menu, MainMenu::EndTurn);
//! ui.join().unwrap();
//! ```

mod channel;
mod codec;
mod message;
mod query;
mod requirement;
mod step;

pub use channel::{channel, AgentEnd, Incoming, InterfaceEnd, Reply};
pub use message::{
    field_views, slot_views, views, BeginFirstStructure, CardView, DrawStructure,
    ExhaustDeckStructure, ExhaustMinionStructure, FinalGameOverStructure, GameBrief,
    MainCombatStructure, MainUseCardStructure, Message, ModifyHealthStructure,
    ModifyManaStructure, MulliganStructure, PlayerStructure, SelectTargetStructure,
};
pub(crate) use message::wire_count;
pub use query::{
    encode_response, MainMenu, MenuResponse, MulliganResponse, QueryKind, Response,
    SpellTargetResponse, TargetType, TargetingStructure, TaskMeta, UseCardResponse,
};
pub use requirement::{Interactor, ReplayInteractor, Requirement};
pub use step::Step;
