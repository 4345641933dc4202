use crate::cards::CardType;
use crate::core::Player;
use crate::error::SyncError;
use crate::triggers::TriggerType;

use super::{ManaMode, MetaData, ModifyManaTask, NumMode, Task, TaskId};

/// Summon a minion from the hand onto the field.
///
/// `position` uses insertion semantics: `0..=field.len()`, where
/// `field.len()` appends. The minion enters exhausted, its battlecries
/// run in order and then its `AfterPlay` triggers fire.
#[derive(Clone, Copy, Debug)]
pub struct PlayMinionTask {
    hand_index: usize,
    position: usize,
}

impl PlayMinionTask {
    #[must_use]
    pub fn new(hand_index: usize, position: usize) -> Self {
        Self { hand_index, position }
    }
}

impl Task for PlayMinionTask {
    fn task_id(&self) -> TaskId {
        TaskId::PlayMinion
    }

    fn execute(&mut self, player: &mut Player, opponent: &mut Player) -> Result<MetaData, SyncError> {
        let Some(card) = player.hand.get(self.hand_index) else {
            return Ok(MetaData::PlayCardInvalidIndex);
        };
        if card.card_type() != CardType::Minion {
            return Ok(MetaData::PlayCardInvalidCardType);
        }
        if player.field.is_full() {
            return Ok(MetaData::PlayMinionFieldFull);
        }
        if self.position > player.field.len() {
            return Ok(MetaData::PlayMinionPositionOutOfRange);
        }

        let cost = card.cost();
        let paid = ModifyManaTask::new(NumMode::Sub, ManaMode::Exist, cost).run(player, opponent)?;
        if paid != MetaData::ModifyManaSuccess {
            return Ok(MetaData::PlayMinionModifyManaFail);
        }

        let mut minion = player.hand.remove(self.hand_index);
        minion.exhausted = true;
        let battlecries = minion.card().battlecries.clone();
        let inserted = player.field.insert(self.position, minion);
        debug_assert!(inserted.is_ok(), "room and position checked before payment");

        for battlecry in &battlecries {
            battlecry.apply(player, opponent);
        }
        if let Some(minion) = player.field.get_mut(self.position) {
            minion.notify(TriggerType::AfterPlay);
        }

        Ok(MetaData::PlayMinionSuccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;
    use crate::tasks::testing::{card, minion, players};

    #[test]
    fn test_summon_appends() {
        let (mut p1, mut p2) = players();
        p1.exist_mana = 10;
        p1.field.insert(0, minion("Old", 1, 1, 1)).unwrap();
        p1.hand.push(minion("Yeti", 4, 4, 5));

        let meta = PlayMinionTask::new(0, 1).run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::PlayMinionSuccess);
        assert_eq!(p1.exist_mana, 6);
        assert!(p1.hand.is_empty());
        let yeti = p1.field.get(1).unwrap();
        assert_eq!(yeti.name(), "Yeti");
        assert!(yeti.exhausted);
    }

    #[test]
    fn test_position_past_end_unchanged() {
        let (mut p1, mut p2) = players();
        p1.exist_mana = 10;
        p1.hand.push(minion("Yeti", 4, 4, 5));

        let meta = PlayMinionTask::new(0, 2).run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::PlayMinionPositionOutOfRange);
        assert_eq!(p1.exist_mana, 10);
        assert_eq!(p1.hand.len(), 1);
        assert!(p1.field.is_empty());
    }

    #[test]
    fn test_field_full() {
        let (mut p1, mut p2) = players();
        p1.exist_mana = 10;
        for i in 0..p1.field.capacity() {
            p1.field.insert(i, minion("Filler", 1, 1, 1)).unwrap();
        }
        p1.hand.push(minion("Yeti", 4, 4, 5));

        let meta = PlayMinionTask::new(0, 0).run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::PlayMinionFieldFull);
        assert_eq!(p1.hand.len(), 1);
        assert_eq!(p1.exist_mana, 10);
    }

    #[test]
    fn test_not_enough_mana() {
        let (mut p1, mut p2) = players();
        p1.exist_mana = 3;
        p1.hand.push(minion("Yeti", 4, 4, 5));

        let meta = PlayMinionTask::new(0, 0).run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::PlayMinionModifyManaFail);
        assert_eq!(p1.exist_mana, 3);
        assert!(p1.field.is_empty());
    }

    #[test]
    fn test_battlecry_destroys_opponent_weapon() {
        let registry = CardRegistry::basic();
        let (mut p1, mut p2) = players();
        p1.exist_mana = 2;
        p1.hand.push(card(&registry, "Acidic Swamp Ooze"));
        p2.hero.equip(card(&registry, "Fiery War Axe"));

        let meta = PlayMinionTask::new(0, 0).run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::PlayMinionSuccess);
        assert!(p2.hero.weapon.is_none());
        assert_eq!(p1.field.get(0).unwrap().name(), "Acidic Swamp Ooze");
    }

    #[test]
    fn test_failed_play_keeps_opponent_weapon() {
        let registry = CardRegistry::basic();
        let (mut p1, mut p2) = players();
        p1.exist_mana = 1;
        p1.hand.push(card(&registry, "Acidic Swamp Ooze"));
        p2.hero.equip(card(&registry, "Fiery War Axe"));

        let meta = PlayMinionTask::new(0, 0).run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::PlayMinionModifyManaFail);
        assert!(p2.hero.weapon.is_some());
        assert_eq!(p1.hand.len(), 1);
    }
}
