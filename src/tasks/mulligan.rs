use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::core::{GameRng, Player};
use crate::error::SyncError;
use crate::sync::{views, Interactor, Message, MulliganResponse, MulliganStructure, QueryKind, Requirement};

use super::{MetaData, Task, TaskId};

/// Ask the player which opening cards to replace, shuffle them back into
/// the deck and draw as many.
///
/// Replacements are appended to the hand. An index outside the hand or a
/// repeated index rejects the whole response.
#[derive(Debug)]
pub struct MulliganTask {
    requirement: Requirement,
    rng: GameRng,
}

impl MulliganTask {
    #[must_use]
    pub fn new(interactor: Arc<dyn Interactor>, rng: GameRng) -> Self {
        Self {
            requirement: Requirement::new(QueryKind::Mulligan, interactor),
            rng,
        }
    }
}

impl Task for MulliganTask {
    fn task_id(&self) -> TaskId {
        TaskId::Mulligan
    }

    fn execute(&mut self, player: &mut Player, _opponent: &mut Player) -> Result<MetaData, SyncError> {
        let query = Message::BeginMulligan(MulliganStructure {
            user_id: player.id,
            hand: views(&player.hand),
        });
        let meta = self.requirement.interact(player.id, &query)?;
        let Some(response) = meta.decode::<MulliganResponse>() else {
            return Ok(MetaData::MulliganNullResponse);
        };

        let mut seen = FxHashSet::default();
        let valid = response
            .indices
            .iter()
            .all(|&index| usize::from(index) < player.hand.len() && seen.insert(index));
        if !valid {
            return Ok(MetaData::MulliganInvalidIndex);
        }

        let mut indices = response.indices;
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for &index in &indices {
            let card = player.hand.remove(usize::from(index));
            player.deck.push(card);
        }
        self.rng.shuffle(&mut player.deck);

        for _ in 0..indices.len() {
            if let Some(card) = player.deck.pop() {
                player.hand.push(card);
            }
        }

        Ok(MetaData::MulliganSuccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Entity;
    use crate::sync::{ReplayInteractor, TaskMeta};
    use crate::tasks::testing::{minion, players};

    fn names(cards: &[Entity]) -> Vec<String> {
        cards.iter().map(|e| e.name().to_string()).collect()
    }

    fn setup() -> (Player, Player) {
        let (mut p1, p2) = players();
        p1.hand = vec![minion("A", 1, 1, 1), minion("B", 1, 1, 1), minion("C", 1, 1, 1)];
        p1.deck = vec![minion("D", 1, 1, 1), minion("E", 1, 1, 1)];
        (p1, p2)
    }

    #[test]
    fn test_keep_all() {
        let (mut p1, mut p2) = setup();
        let replay = Arc::new(ReplayInteractor::new());
        replay.push(&MulliganResponse::default()).unwrap();

        let meta = MulliganTask::new(replay.clone(), GameRng::new(1)).run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::MulliganSuccess);
        assert_eq!(names(&p1.hand), vec!["A", "B", "C"]);
        assert_eq!(replay.queries().len(), 1);
    }

    #[test]
    fn test_replace_keeps_counts() {
        let (mut p1, mut p2) = setup();
        let replay = Arc::new(ReplayInteractor::new());
        replay.push(&MulliganResponse { indices: vec![0, 2] }).unwrap();

        let meta = MulliganTask::new(replay, GameRng::new(1)).run(&mut p1, &mut p2).unwrap();

        assert_eq!(meta, MetaData::MulliganSuccess);
        assert_eq!(p1.hand.len(), 3);
        assert_eq!(p1.deck.len(), 2);
        assert_eq!(p1.hand[0].name(), "B");
    }

    #[test]
    fn test_invalid_indices_unchanged() {
        for indices in [vec![3], vec![1, 1]] {
            let (mut p1, mut p2) = setup();
            let replay = Arc::new(ReplayInteractor::new());
            replay.push(&MulliganResponse { indices }).unwrap();

            let meta = MulliganTask::new(replay, GameRng::new(1)).run(&mut p1, &mut p2).unwrap();

            assert_eq!(meta, MetaData::MulliganInvalidIndex);
            assert_eq!(names(&p1.hand), vec!["A", "B", "C"]);
            assert_eq!(names(&p1.deck), vec!["D", "E"]);
        }
    }

    #[test]
    fn test_null_response() {
        let (mut p1, mut p2) = setup();
        let replay = Arc::new(ReplayInteractor::new());
        replay.push_meta(TaskMeta::null());

        let meta = MulliganTask::new(replay, GameRng::new(1)).run(&mut p1, &mut p2).unwrap();
        assert_eq!(meta, MetaData::MulliganNullResponse);
    }
}
