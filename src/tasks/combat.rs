use std::sync::Arc;

use crate::core::Player;
use crate::error::SyncError;
use crate::sync::{CardView, Interactor, MainCombatStructure, Message, QueryKind, Requirement, TargetingStructure};

use super::{MetaData, Task, TaskId};

/// Both combatants after the exchange, as they stood before any removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatOutcome {
    /// Belongs to the acting player.
    pub attacker: CardView,
    /// Belongs to the opponent.
    pub defender: CardView,
}

/// One attack by a friendly minion.
///
/// `source` addresses an occupied friendly slot that has not attacked this
/// turn. `destination` is 0 for the opposing hero, or `n` for opposing
/// slot `n - 1`. Attacker and defender damage each other (a hero deals no
/// damage back), the attacker is exhausted, and dead minions leave their
/// slot empty.
#[derive(Debug)]
pub struct CombatTask {
    requirement: Requirement,
    preselected: Option<TargetingStructure>,
    outcome: Option<CombatOutcome>,
}

impl CombatTask {
    #[must_use]
    pub fn new(interactor: Arc<dyn Interactor>) -> Self {
        Self {
            requirement: Requirement::new(QueryKind::Combat, interactor),
            preselected: None,
            outcome: None,
        }
    }

    /// Attack with these positions instead of asking.
    #[must_use]
    pub fn with_targeting(mut self, source: u8, destination: u8) -> Self {
        self.preselected = Some(TargetingStructure { source, destination });
        self
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&CombatOutcome> {
        self.outcome.as_ref()
    }

    fn choose(&self, player: &Player, opponent: &Player) -> Result<Option<TargetingStructure>, SyncError> {
        if let Some(targeting) = self.preselected {
            return Ok(Some(targeting));
        }
        let query = Message::MainCombat(MainCombatStructure::new(player, opponent)?);
        let meta = self.requirement.interact(player.id, &query)?;
        Ok(meta.decode::<TargetingStructure>())
    }
}

impl Task for CombatTask {
    fn task_id(&self) -> TaskId {
        TaskId::Combat
    }

    fn execute(&mut self, player: &mut Player, opponent: &mut Player) -> Result<MetaData, SyncError> {
        let Some(targeting) = self.choose(player, opponent)? else {
            return Ok(MetaData::CombatNullResponse);
        };
        let source = usize::from(targeting.source);
        let destination = usize::from(targeting.destination);

        if source >= player.field.len() {
            return Ok(MetaData::CombatSourceOutOfRange);
        }
        let Some(attacker) = player.field.get_mut(source) else {
            return Ok(MetaData::CombatInvalidSource);
        };
        if attacker.exhausted {
            return Ok(MetaData::CombatSourceExhausted);
        }
        if destination > opponent.field.len() {
            return Ok(MetaData::CombatDestinationOutOfRange);
        }
        let Some(defender) = opponent.target_mut(destination.checked_sub(1)) else {
            return Ok(MetaData::CombatInvalidTarget);
        };

        let attack = attacker.attack;
        let counter = if destination == 0 { 0 } else { defender.attack };
        defender.take_damage(attack);
        attacker.take_damage(counter);
        attacker.exhausted = true;

        self.outcome = Some(CombatOutcome {
            attacker: CardView::from(&*attacker),
            defender: CardView::from(&*defender),
        });

        if attacker.is_dead() {
            player.field.vacate(source);
        }
        if destination > 0 && defender.is_dead() {
            opponent.field.vacate(destination - 1);
        }

        Ok(MetaData::CombatSuccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{ReplayInteractor, TaskMeta};
    use crate::tasks::testing::{minion, players};

    fn ready(name: &str, attack: i32, health: i32) -> crate::core::Entity {
        minion(name, 1, attack, health)
    }

    #[test]
    fn test_attack_hero() {
        let (mut p1, mut p2) = players();
        p1.field.insert(0, ready("Yeti", 4, 5)).unwrap();

        let mut task = CombatTask::new(Arc::new(ReplayInteractor::new())).with_targeting(0, 0);
        let meta = task.run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::CombatSuccess);
        assert_eq!(p2.hero.health(), 26);
        let yeti = p1.field.get(0).unwrap();
        assert_eq!(yeti.health, 5);
        assert!(yeti.exhausted);
        assert_eq!(task.outcome().unwrap().defender.health, 26);
    }

    #[test]
    fn test_trade_vacates_dead() {
        let (mut p1, mut p2) = players();
        p1.field.insert(0, ready("Croc", 2, 3)).unwrap();
        p2.field.insert(0, ready("Ooze", 3, 2)).unwrap();

        let meta = CombatTask::new(Arc::new(ReplayInteractor::new()))
            .with_targeting(0, 1)
            .run(&mut p1, &mut p2)
            .unwrap();

        assert_eq!(meta, MetaData::CombatSuccess);
        assert!(p1.field.get(0).is_none());
        assert!(p2.field.get(0).is_none());
        assert_eq!(p1.field.len(), 1);
        assert_eq!(p1.field.compact().len(), 0);
    }

    #[test]
    fn test_exhausted_source_rejected() {
        let (mut p1, mut p2) = players();
        let mut yeti = ready("Yeti", 4, 5);
        yeti.exhausted = true;
        p1.field.insert(0, yeti).unwrap();

        let meta = CombatTask::new(Arc::new(ReplayInteractor::new()))
            .with_targeting(0, 0)
            .run(&mut p1, &mut p2)
            .unwrap();

        assert_eq!(meta, MetaData::CombatSourceExhausted);
        assert_eq!(p2.hero.health(), 30);
    }

    #[test]
    fn test_out_of_range() {
        let (mut p1, mut p2) = players();
        p1.field.insert(0, ready("Yeti", 4, 5)).unwrap();
        let replay = Arc::new(ReplayInteractor::new());

        let meta = CombatTask::new(replay.clone()).with_targeting(1, 0).run(&mut p1, &mut p2).unwrap();
        assert_eq!(meta, MetaData::CombatSourceOutOfRange);

        let meta = CombatTask::new(replay).with_targeting(0, 2).run(&mut p1, &mut p2).unwrap();
        assert_eq!(meta, MetaData::CombatDestinationOutOfRange);
        assert!(!p1.field.get(0).unwrap().exhausted);
    }

    #[test]
    fn test_asks_for_targeting() {
        let (mut p1, mut p2) = players();
        p1.field.insert(0, ready("Yeti", 4, 5)).unwrap();
        let replay = Arc::new(ReplayInteractor::new());
        replay.push(&TargetingStructure { source: 0, destination: 0 }).unwrap();
        replay.push_meta(TaskMeta::null());

        let meta = CombatTask::new(replay.clone()).run(&mut p1, &mut p2).unwrap();
        assert_eq!(meta, MetaData::CombatSuccess);

        let meta = CombatTask::new(replay.clone()).run(&mut p1, &mut p2).unwrap();
        assert_eq!(meta, MetaData::CombatNullResponse);

        match &replay.queries()[1] {
            Message::MainCombat(data) => assert_eq!(data.attacked, vec![0]),
            other => panic!("unexpected query {other:?}"),
        }
    }
}
