use crate::core::Player;
use crate::error::SyncError;

use super::{MetaData, Task, TaskId};

/// How the operand combines with the current value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumMode {
    Add,
    Sub,
    Set,
}

/// Which mana value is modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManaMode {
    /// Mana available this turn.
    Exist,
    /// Mana crystals.
    Total,
}

/// Modify a player's mana.
///
/// `Add` and `Set` clamp to the player's mana cap. `Sub` fails with
/// `ModifyManaFail`, leaving the value unchanged, when it would go below
/// zero.
#[derive(Clone, Copy, Debug)]
pub struct ModifyManaTask {
    num_mode: NumMode,
    mana_mode: ManaMode,
    num: u8,
}

impl ModifyManaTask {
    #[must_use]
    pub fn new(num_mode: NumMode, mana_mode: ManaMode, num: u8) -> Self {
        Self {
            num_mode,
            mana_mode,
            num,
        }
    }
}

impl Task for ModifyManaTask {
    fn task_id(&self) -> TaskId {
        TaskId::ModifyMana
    }

    fn execute(&mut self, player: &mut Player, _opponent: &mut Player) -> Result<MetaData, SyncError> {
        let cap = player.max_mana;
        let mana = match self.mana_mode {
            ManaMode::Exist => &mut player.exist_mana,
            ManaMode::Total => &mut player.total_mana,
        };

        let modified = match self.num_mode {
            NumMode::Add => Some(mana.saturating_add(self.num).min(cap)),
            NumMode::Sub => mana.checked_sub(self.num),
            NumMode::Set => Some(self.num.min(cap)),
        };

        Ok(match modified {
            Some(value) => {
                *mana = value;
                MetaData::ModifyManaSuccess
            }
            None => MetaData::ModifyManaFail,
        })
    }
}
