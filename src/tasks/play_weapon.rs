use crate::cards::CardType;
use crate::core::Player;
use crate::error::SyncError;
use crate::triggers::TriggerType;

use super::{ManaMode, MetaData, ModifyManaTask, NumMode, Task, TaskId};

/// Equip a weapon from the hand, destroying any weapon already equipped.
#[derive(Clone, Copy, Debug)]
pub struct PlayWeaponTask {
    hand_index: usize,
}

impl PlayWeaponTask {
    #[must_use]
    pub fn new(hand_index: usize) -> Self {
        Self { hand_index }
    }
}

impl Task for PlayWeaponTask {
    fn task_id(&self) -> TaskId {
        TaskId::PlayWeapon
    }

    fn execute(&mut self, player: &mut Player, opponent: &mut Player) -> Result<MetaData, SyncError> {
        let Some(card) = player.hand.get(self.hand_index) else {
            return Ok(MetaData::PlayCardInvalidIndex);
        };
        if card.card_type() != CardType::Weapon {
            return Ok(MetaData::PlayCardInvalidCardType);
        }

        let paid = ModifyManaTask::new(NumMode::Sub, ManaMode::Exist, card.cost()).run(player, opponent)?;
        if paid != MetaData::ModifyManaSuccess {
            return Ok(MetaData::PlayWeaponModifyManaFail);
        }

        let weapon = player.hand.remove(self.hand_index);
        if let Some(old) = player.hero.equip(weapon) {
            tracing::debug!(player = %player.id, weapon = old.name(), "weapon destroyed");
        }
        if let Some(weapon) = player.hero.weapon.as_mut() {
            weapon.notify(TriggerType::AfterPlay);
        }

        Ok(MetaData::PlayWeaponSuccess)
    }
}
