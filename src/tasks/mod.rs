//! Task execution engine.
//!
//! A task is one unit of rule execution: it is built with the parameters
//! of a single action, run once against the acting player and the
//! opponent, and dropped. Every run ends in a [`MetaData`] outcome code;
//! validation failures leave both players untouched.
//!
//! Tasks that need a decision from the interface hold a
//! [`Requirement`](crate::sync::Requirement), and `Requirement::interact`
//! is the only place they block. `Err` is reserved for fatal transport
//! conditions that end the game session.
//!
//! ## Key Components
//!
//! - [`Task`]: The execution contract
//! - [`MetaData`]: Outcome codes, grouped by task family
//! - [`Power`]: Sub-effects a card applies to its resolved target
//!
//! ## Example Usage
//!
//! ```
//! use rust_hearth::cards::CardRegistry;
//! use rust_hearth::core::{GameConfig, Hero, Player, PlayerId};
//! use rust_hearth::tasks::{ManaMode, MetaData, ModifyManaTask, NumMode, Task};
//!
//! let registry = CardRegistry::basic();
//! let config = GameConfig::default();
//! let hero = |name: &str| Hero::new(registry.find_by_name(name).unwrap());
//! let mut p1 = Player::new(PlayerId::new(0), "Player 1", hero("Garrosh Hellscream"), Vec::new(), &config);
//! let mut p2 = Player::new(PlayerId::new(1), "Player 2", hero("Jaina Proudmoore"), Vec::new(), &config);
//!
//! let mut task = ModifyManaTask::new(NumMode::Add, ManaMode::Exist, 4);
//! assert_eq!(task.run(&mut p1, &mut p2).unwrap(), MetaData::ModifyManaSuccess);
//! assert_eq!(p1.exist_mana, 4);
//! ```

mod combat;
mod draw;
mod modify_mana;
mod mulligan;
mod play_card;
mod play_minion;
mod play_spell;
mod play_weapon;
mod power;

pub use combat::{CombatOutcome, CombatTask};
pub use draw::{DrawCardTask, DrawTask};
pub use modify_mana::{ManaMode, ModifyManaTask, NumMode};
pub use mulligan::MulliganTask;
pub use play_card::PlayCardTask;
pub use play_minion::PlayMinionTask;
pub use play_spell::{PlaySpellTask, SpellTarget};
pub use play_weapon::PlayWeaponTask;
pub use power::{Battlecry, Power};

use crate::core::Player;
use crate::error::SyncError;

/// Stable task identifier, used for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskId {
    Draw,
    DrawCard,
    ModifyMana,
    Mulligan,
    PlayCard,
    PlayMinion,
    PlaySpell,
    PlayWeapon,
    Combat,
}

/// Outcome of one task run.
///
/// Each family has a success code and one code per failure reason. The
/// `*NullResponse` codes mean the interface's answer could not be decoded
/// as the expected response type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetaData {
    ModifyManaSuccess,
    ModifyManaFail,

    DrawSuccess,
    /// The deck ran out; the hero took fatigue damage.
    DrawExhaust,
    /// The hand was full; the drawn card was burned.
    DrawOverdraw,

    MulliganSuccess,
    MulliganInvalidIndex,
    MulliganNullResponse,

    PlayCardInvalidIndex,
    PlayCardNotEnoughMana,
    PlayCardInvalidCardType,
    PlayCardNullResponse,

    PlayMinionSuccess,
    PlayMinionPositionOutOfRange,
    PlayMinionFieldFull,
    PlayMinionModifyManaFail,

    PlaySpellSuccess,
    PlaySpellPositionOutOfRange,
    PlaySpellInvalidTarget,
    PlaySpellModifyManaFail,
    PlaySpellNullResponse,

    PlayWeaponSuccess,
    PlayWeaponModifyManaFail,

    CombatSuccess,
    CombatSourceOutOfRange,
    CombatInvalidSource,
    CombatSourceExhausted,
    CombatDestinationOutOfRange,
    CombatInvalidTarget,
    CombatNullResponse,
}

impl MetaData {
    /// Whether the action took place.
    ///
    /// Draws that burned a card or dealt fatigue still happened.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(
            self,
            MetaData::ModifyManaSuccess
                | MetaData::DrawSuccess
                | MetaData::DrawExhaust
                | MetaData::DrawOverdraw
                | MetaData::MulliganSuccess
                | MetaData::PlayMinionSuccess
                | MetaData::PlaySpellSuccess
                | MetaData::PlayWeaponSuccess
                | MetaData::CombatSuccess
        )
    }
}

/// A unit of rule execution.
pub trait Task {
    fn task_id(&self) -> TaskId;

    /// Run the action. `player` is the acting player.
    fn execute(&mut self, player: &mut Player, opponent: &mut Player) -> Result<MetaData, SyncError>;

    /// `execute` with logging. Callers use this rather than `execute`.
    fn run(&mut self, player: &mut Player, opponent: &mut Player) -> Result<MetaData, SyncError> {
        let task = self.task_id();
        let result = self.execute(player, opponent);
        match &result {
            Ok(meta) if meta.is_success() => {
                tracing::debug!(?task, player = %player.id, ?meta, "task");
            }
            Ok(meta) => tracing::warn!(?task, player = %player.id, ?meta, "task rejected"),
            Err(err) => tracing::warn!(?task, player = %player.id, %err, "task aborted"),
        }
        result
    }
}
