use std::sync::Arc;

use crate::cards::CardType;
use crate::core::Player;
use crate::error::SyncError;
use crate::sync::{Interactor, MainUseCardStructure, Message, QueryKind, Requirement, SpellTargetResponse, UseCardResponse};

use super::{MetaData, PlayMinionTask, PlaySpellTask, PlayWeaponTask, SpellTarget, Task, TaskId};

/// Play a card from the hand.
///
/// Asks which card (`SelectCard`) unless one was given up front, checks
/// the index and the cost against the available mana, then hands off to
/// the task for the card's type. A minion without a position is appended
/// to the field.
#[derive(Debug)]
pub struct PlayCardTask {
    interactor: Arc<dyn Interactor>,
    requirement: Requirement,
    choice: Option<UseCardResponse>,
    spell_target: Option<SpellTargetResponse>,
    resolved: Option<SpellTarget>,
}

impl PlayCardTask {
    #[must_use]
    pub fn new(interactor: Arc<dyn Interactor>) -> Self {
        Self {
            requirement: Requirement::new(QueryKind::SelectCard, Arc::clone(&interactor)),
            interactor,
            choice: None,
            spell_target: None,
            resolved: None,
        }
    }

    /// Play this card instead of asking which one.
    #[must_use]
    pub fn with_choice(mut self, card_index: u8, position: Option<u8>) -> Self {
        self.choice = Some(UseCardResponse { card_index, position });
        self
    }

    /// Cast a spell on this target instead of asking for one.
    #[must_use]
    pub fn with_spell_target(mut self, target: SpellTargetResponse) -> Self {
        self.spell_target = Some(target);
        self
    }

    /// Where a spell played by this task landed.
    #[must_use]
    pub fn spell_target(&self) -> Option<SpellTarget> {
        self.resolved
    }

    fn choose(&self, player: &Player) -> Result<Option<UseCardResponse>, SyncError> {
        if let Some(choice) = self.choice {
            return Ok(Some(choice));
        }
        let query = Message::MainUseCard(MainUseCardStructure::new(player)?);
        let meta = self.requirement.interact(player.id, &query)?;
        Ok(meta.decode::<UseCardResponse>())
    }
}

impl Task for PlayCardTask {
    fn task_id(&self) -> TaskId {
        TaskId::PlayCard
    }

    fn execute(&mut self, player: &mut Player, opponent: &mut Player) -> Result<MetaData, SyncError> {
        let Some(choice) = self.choose(player)? else {
            return Ok(MetaData::PlayCardNullResponse);
        };

        let index = usize::from(choice.card_index);
        let Some(card) = player.hand.get(index) else {
            return Ok(MetaData::PlayCardInvalidIndex);
        };
        if card.cost() > player.exist_mana {
            return Ok(MetaData::PlayCardNotEnoughMana);
        }

        match card.card_type() {
            CardType::Minion => {
                let position = choice.position.map_or(player.field.len(), usize::from);
                PlayMinionTask::new(index, position).run(player, opponent)
            }
            CardType::Spell => {
                let mut task = PlaySpellTask::new(Arc::clone(&self.interactor), index);
                if let Some(target) = self.spell_target {
                    task = task.with_target(target);
                }
                let meta = task.run(player, opponent)?;
                self.resolved = task.resolved();
                Ok(meta)
            }
            CardType::Weapon => PlayWeaponTask::new(index).run(player, opponent),
            CardType::Hero | CardType::Invalid => Ok(MetaData::PlayCardInvalidCardType),
        }
    }
}
