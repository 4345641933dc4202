use std::sync::Arc;

use crate::cards::CardType;
use crate::core::{Entity, Player, PlayerId};
use crate::error::SyncError;
use crate::sync::{
    slot_views, CardView, Interactor, Message, QueryKind, Requirement, SelectTargetStructure,
    SpellTargetResponse, TargetType,
};

use super::{ManaMode, MetaData, ModifyManaTask, NumMode, Task, TaskId};

/// A validated spell target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellTarget {
    /// Untargeted; powers have nothing to apply to.
    None,
    Hero { owner: PlayerId },
    Minion { owner: PlayerId, position: usize },
}

/// Cast a spell from the hand.
///
/// The target is asked for (`SelectTarget`) unless given up front. Field
/// targets use addressing semantics: the position must name an existing
/// slot, `0..field.len()`, and that slot must be occupied. Hero targets
/// ignore the position. `TargetType::None` is only accepted for a spell
/// without powers.
///
/// Mana is paid through `ModifyManaTask` after the target is validated.
/// If payment fails nothing else happens and the failure is reported.
/// Otherwise the spell leaves the hand and each of its powers is applied
/// to the target in order.
#[derive(Debug)]
pub struct PlaySpellTask {
    requirement: Requirement,
    hand_index: usize,
    preselected: Option<SpellTargetResponse>,
    resolved: Option<SpellTarget>,
}

impl PlaySpellTask {
    #[must_use]
    pub fn new(interactor: Arc<dyn Interactor>, hand_index: usize) -> Self {
        Self {
            requirement: Requirement::new(QueryKind::SelectTarget, interactor),
            hand_index,
            preselected: None,
            resolved: None,
        }
    }

    /// Use this target instead of asking for one.
    #[must_use]
    pub fn with_target(mut self, target: SpellTargetResponse) -> Self {
        self.preselected = Some(target);
        self
    }

    /// The target the spell was cast on, once it has been cast.
    #[must_use]
    pub fn resolved(&self) -> Option<SpellTarget> {
        self.resolved
    }

    fn choose_target(&self, player: &Player, opponent: &Player) -> Result<Option<SpellTargetResponse>, SyncError> {
        if let Some(target) = self.preselected {
            return Ok(Some(target));
        }
        let Some(spell) = player.hand.get(self.hand_index) else {
            return Ok(None);
        };
        let query = Message::MainSelectTarget(SelectTargetStructure {
            user_id: player.id,
            spell: CardView::from(spell),
            needs_target: !spell.card().powers.is_empty(),
            my_field: slot_views(&player.field),
            opposite_field: slot_views(&opponent.field),
        });
        let meta = self.requirement.interact(player.id, &query)?;
        Ok(meta.decode::<SpellTargetResponse>())
    }
}

/// Validate a response against the current fields. A spell with powers
/// must name a target.
fn resolve(
    response: SpellTargetResponse,
    needs_target: bool,
    player: &Player,
    opponent: &Player,
) -> Result<SpellTarget, MetaData> {
    let position = usize::from(response.position);
    let owner = match response.target_type {
        TargetType::None if needs_target => return Err(MetaData::PlaySpellInvalidTarget),
        TargetType::None => return Ok(SpellTarget::None),
        TargetType::MyHero => return Ok(SpellTarget::Hero { owner: player.id }),
        TargetType::OpponentHero => return Ok(SpellTarget::Hero { owner: opponent.id }),
        TargetType::MyField => player,
        TargetType::OpponentField => opponent,
    };

    if position >= owner.field.len() {
        return Err(MetaData::PlaySpellPositionOutOfRange);
    }
    if owner.field.get(position).is_none() {
        return Err(MetaData::PlaySpellInvalidTarget);
    }
    Ok(SpellTarget::Minion {
        owner: owner.id,
        position,
    })
}

fn target_mut<'a>(target: SpellTarget, player: &'a mut Player, opponent: &'a mut Player) -> Option<&'a mut Entity> {
    let (owner, position) = match target {
        SpellTarget::None => return None,
        SpellTarget::Hero { owner } => (owner, None),
        SpellTarget::Minion { owner, position } => (owner, Some(position)),
    };
    if owner == player.id {
        player.target_mut(position)
    } else {
        opponent.target_mut(position)
    }
}

impl Task for PlaySpellTask {
    fn task_id(&self) -> TaskId {
        TaskId::PlaySpell
    }

    fn execute(&mut self, player: &mut Player, opponent: &mut Player) -> Result<MetaData, SyncError> {
        let Some(spell) = player.hand.get(self.hand_index) else {
            return Ok(MetaData::PlayCardInvalidIndex);
        };
        if spell.card_type() != CardType::Spell {
            return Ok(MetaData::PlayCardInvalidCardType);
        }
        let cost = spell.cost();
        let needs_target = !spell.card().powers.is_empty();

        let Some(response) = self.choose_target(player, opponent)? else {
            return Ok(MetaData::PlaySpellNullResponse);
        };
        let target = match resolve(response, needs_target, player, opponent) {
            Ok(target) => target,
            Err(meta) => return Ok(meta),
        };

        let paid = ModifyManaTask::new(NumMode::Sub, ManaMode::Exist, cost).run(player, opponent)?;
        if paid != MetaData::ModifyManaSuccess {
            return Ok(MetaData::PlaySpellModifyManaFail);
        }

        let spell = player.hand.remove(self.hand_index);
        if let Some(entity) = target_mut(target, player, opponent) {
            for power in &spell.card().powers {
                power.apply(entity);
            }
        }
        self.resolved = Some(target);

        Ok(MetaData::PlaySpellSuccess)
    }
}
