//! Drawing cards.
//!
//! The deck is drawn from its end. Drawing from an empty deck increments
//! the player's fatigue and deals that much damage to the hero; drawing
//! into a full hand burns the card.

use std::sync::Arc;

use crate::cards::CardDefinition;
use crate::core::{Entity, Player};
use crate::error::SyncError;

use super::{MetaData, Task, TaskId};

/// Draw `num` cards from the deck.
///
/// The outcome is the last non-success code seen over all draws. After
/// the run, `drawn()`, `burned()` and `fatigue()` describe what happened.
#[derive(Debug)]
pub struct DrawTask {
    num: usize,
    drawn: usize,
    burned: Vec<Entity>,
    fatigue: Vec<i32>,
}

impl DrawTask {
    #[must_use]
    pub fn new(num: usize) -> Self {
        Self {
            num,
            drawn: 0,
            burned: Vec::new(),
            fatigue: Vec::new(),
        }
    }

    /// Cards that went into the hand; they are the last `drawn()` cards of it.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Cards drawn into a full hand.
    #[must_use]
    pub fn burned(&self) -> &[Entity] {
        &self.burned
    }

    /// Fatigue damage dealt, one entry per draw from an empty deck.
    #[must_use]
    pub fn fatigue(&self) -> &[i32] {
        &self.fatigue
    }
}

impl Task for DrawTask {
    fn task_id(&self) -> TaskId {
        TaskId::Draw
    }

    fn execute(&mut self, player: &mut Player, _opponent: &mut Player) -> Result<MetaData, SyncError> {
        let mut result = MetaData::DrawSuccess;

        for _ in 0..self.num {
            let Some(card) = player.deck.pop() else {
                player.fatigue += 1;
                player.hero.entity.take_damage(player.fatigue);
                self.fatigue.push(player.fatigue);
                result = MetaData::DrawExhaust;
                continue;
            };

            if player.is_hand_full() {
                tracing::debug!(player = %player.id, card = card.name(), "burned");
                self.burned.push(card);
                result = MetaData::DrawOverdraw;
            } else {
                player.hand.push(card);
                self.drawn += 1;
            }
        }

        Ok(result)
    }
}

/// Put a specific card into the hand, bypassing the deck.
#[derive(Debug)]
pub struct DrawCardTask {
    card: Arc<CardDefinition>,
}

impl DrawCardTask {
    #[must_use]
    pub fn new(card: Arc<CardDefinition>) -> Self {
        Self { card }
    }
}

impl Task for DrawCardTask {
    fn task_id(&self) -> TaskId {
        TaskId::DrawCard
    }

    fn execute(&mut self, player: &mut Player, _opponent: &mut Player) -> Result<MetaData, SyncError> {
        if player.is_hand_full() {
            return Ok(MetaData::DrawOverdraw);
        }
        player.hand.push(Entity::new(Arc::clone(&self.card)));
        Ok(MetaData::DrawSuccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;
    use crate::tasks::testing::{minion, players};

    #[test]
    fn test_draw_from_end() {
        let (mut p1, mut p2) = players();
        p1.deck = vec![minion("A", 1, 1, 1), minion("B", 1, 1, 1), minion("C", 1, 1, 1)];

        let mut task = DrawTask::new(2);
        let meta = task.run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::DrawSuccess);
        assert_eq!(task.drawn(), 2);
        let names: Vec<_> = p1.hand.iter().map(Entity::name).collect();
        assert_eq!(names, vec!["C", "B"]);
        assert_eq!(p1.deck.len(), 1);
    }

    #[test]
    fn test_fatigue_accumulates() {
        let (mut p1, mut p2) = players();

        let mut task = DrawTask::new(3);
        let meta = task.run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::DrawExhaust);
        assert_eq!(task.fatigue(), &[1, 2, 3]);
        assert_eq!(p1.hero.health(), 30 - 6);
    }

    #[test]
    fn test_overdraw_burns() {
        let (mut p1, mut p2) = players();
        for _ in 0..p1.max_hand {
            p1.hand.push(minion("Filler", 1, 1, 1));
        }
        p1.deck.push(minion("Burned", 1, 1, 1));

        let mut task = DrawTask::new(1);
        let meta = task.run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::DrawOverdraw);
        assert_eq!(task.burned()[0].name(), "Burned");
        assert_eq!(p1.hand.len(), p1.max_hand);
        assert!(p1.deck.is_empty());
    }

    #[test]
    fn test_last_failure_wins() {
        let (mut p1, mut p2) = players();
        for _ in 0..p1.max_hand {
            p1.hand.push(minion("Filler", 1, 1, 1));
        }
        p1.deck.push(minion("Burned", 1, 1, 1));

        // Burns the last card, then hits the empty deck.
        let meta = DrawTask::new(2).run(&mut p1, &mut p2).unwrap();
        assert_eq!(meta, MetaData::DrawExhaust);
    }

    #[test]
    fn test_draw_card() {
        let registry = CardRegistry::basic();
        let (mut p1, mut p2) = players();
        let axe = registry.find_by_name("Fiery War Axe").unwrap();

        let meta = DrawCardTask::new(axe).run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::DrawSuccess);
        assert_eq!(p1.hand.len(), 1);
        assert_eq!(p1.hand[0].name(), "Fiery War Axe");
    }
}
