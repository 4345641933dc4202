//! Frames written by the agent.
//!
//! A frame is `[Step as u8] ++ payload`; the payload layout is fixed by the
//! step. Game state crosses the wire by value only (`CardView`), never as a
//! reference into the agent's players.

use serde::{Deserialize, Serialize};

use crate::cards::CardType;
use crate::core::{Entity, Field, Player, PlayerId};
use crate::error::{DecodeError, SyncError};

use super::codec;
use super::step::Step;

/// Snapshot of one card as shown to the interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub name: String,
    pub card_type: CardType,
    pub cost: u8,
    pub attack: i32,
    pub health: i32,
}

impl From<&Entity> for CardView {
    fn from(entity: &Entity) -> Self {
        Self {
            name: entity.name().to_string(),
            card_type: entity.card_type(),
            cost: entity.cost(),
            attack: entity.attack,
            health: entity.health,
        }
    }
}

/// Views of a list of entities.
pub fn views<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Vec<CardView> {
    entities.into_iter().map(CardView::from).collect()
}

/// Views of the occupied slots of a field, in order.
pub fn field_views(field: &Field) -> Vec<CardView> {
    views(field.minions().map(|(_, e)| e))
}

/// A count or position as it goes on the wire.
pub(crate) fn wire_count(what: &'static str, len: usize) -> Result<u8, SyncError> {
    u8::try_from(len).map_err(|_| SyncError::CountOverflow { what, len })
}

/// Views of every field slot, empty slots included.
pub fn slot_views(field: &Field) -> Vec<Option<CardView>> {
    field.slots().map(|slot| slot.map(CardView::from)).collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeginFirstStructure {
    pub first: PlayerId,
    pub first_name: String,
    pub last: PlayerId,
    pub last_name: String,
}

/// Payload of steps that only name a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStructure {
    pub user_id: PlayerId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStructure {
    pub user_id: PlayerId,
    pub cards: Vec<CardView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulliganStructure {
    pub user_id: PlayerId,
    pub hand: Vec<CardView>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustDeckStructure {
    pub user_id: PlayerId,
    /// Fatigue damage taken.
    pub fatigue: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyManaStructure {
    pub user_id: PlayerId,
    pub mana: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyHealthStructure {
    pub user_id: PlayerId,
    pub card: CardView,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustMinionStructure {
    pub user_id: PlayerId,
    pub card: CardView,
}

/// Both sides of the board from the current player's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBrief {
    pub current_user: PlayerId,
    pub opposite_user: PlayerId,
    pub current_hero: CardView,
    pub opposite_hero: CardView,
    pub current_mana: u8,
    pub opposite_mana: u8,
    pub current_hand: Vec<CardView>,
    pub num_opposite_hand: u8,
    pub current_field: Vec<CardView>,
    pub opposite_field: Vec<CardView>,
}

impl GameBrief {
    pub fn new(current: &Player, opposite: &Player) -> Result<Self, SyncError> {
        Ok(Self {
            current_user: current.id,
            opposite_user: opposite.id,
            current_hero: CardView::from(&current.hero.entity),
            opposite_hero: CardView::from(&opposite.hero.entity),
            current_mana: current.exist_mana,
            opposite_mana: opposite.exist_mana,
            current_hand: views(&current.hand),
            num_opposite_hand: wire_count("opposite hand", opposite.hand.len())?,
            current_field: field_views(&current.field),
            opposite_field: field_views(&opposite.field),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainUseCardStructure {
    pub user_id: PlayerId,
    pub hand: Vec<CardView>,
    pub exist_mana: u8,
    /// Current field length; minion insertion positions are `0..=num_fields`.
    pub num_fields: u8,
}

impl MainUseCardStructure {
    pub fn new(player: &Player) -> Result<Self, SyncError> {
        Ok(Self {
            user_id: player.id,
            hand: views(&player.hand),
            exist_mana: player.exist_mana,
            num_fields: wire_count("field", player.field.len())?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectTargetStructure {
    pub user_id: PlayerId,
    pub spell: CardView,
    /// The spell has effects, so "no target" is not a valid answer.
    pub needs_target: bool,
    pub my_field: Vec<Option<CardView>>,
    pub opposite_field: Vec<Option<CardView>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainCombatStructure {
    pub user_id: PlayerId,
    pub current_field: Vec<CardView>,
    pub opposite_field: Vec<CardView>,
    /// Positions in `current_field` that cannot attack this turn.
    pub attacked: Vec<u8>,
}

impl MainCombatStructure {
    pub fn new(player: &Player, opponent: &Player) -> Result<Self, SyncError> {
        Ok(Self {
            user_id: player.id,
            current_field: field_views(&player.field),
            opposite_field: field_views(&opponent.field),
            attacked: player
                .field
                .minions()
                .filter(|(_, e)| e.exhausted)
                .map(|(i, _)| wire_count("field position", i))
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalGameOverStructure {
    /// `None` for a draw.
    pub winner: Option<PlayerId>,
}

/// A decoded agent frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    BeginFirst(BeginFirstStructure),
    BeginShuffle(PlayerStructure),
    BeginDraw(DrawStructure),
    BeginMulligan(MulliganStructure),
    MulliganResult(DrawStructure),
    MainReady(PlayerStructure),
    MainDraw(DrawStructure),
    MainMenu(PlayerStructure),
    MainUseCard(MainUseCardStructure),
    MainSelectTarget(SelectTargetStructure),
    MainCombat(MainCombatStructure),
    MainEnd(PlayerStructure),
    Brief(GameBrief),
    OverDraw(DrawStructure),
    ExhaustDeck(ExhaustDeckStructure),
    ModifyMana(ModifyManaStructure),
    ModifyHealth(ModifyHealthStructure),
    ExhaustMinion(ExhaustMinionStructure),
    FinalGameOver(FinalGameOverStructure),
}

impl Message {
    #[must_use]
    pub fn step(&self) -> Step {
        match self {
            Message::BeginFirst(_) => Step::BeginFirst,
            Message::BeginShuffle(_) => Step::BeginShuffle,
            Message::BeginDraw(_) => Step::BeginDraw,
            Message::BeginMulligan(_) => Step::BeginMulligan,
            Message::MulliganResult(_) => Step::MulliganResult,
            Message::MainReady(_) => Step::MainReady,
            Message::MainDraw(_) => Step::MainDraw,
            Message::MainMenu(_) => Step::MainMenu,
            Message::MainUseCard(_) => Step::MainUseCard,
            Message::MainSelectTarget(_) => Step::MainSelectTarget,
            Message::MainCombat(_) => Step::MainCombat,
            Message::MainEnd(_) => Step::MainEnd,
            Message::Brief(_) => Step::Brief,
            Message::OverDraw(_) => Step::OverDraw,
            Message::ExhaustDeck(_) => Step::ExhaustDeck,
            Message::ModifyMana(_) => Step::ModifyMana,
            Message::ModifyHealth(_) => Step::ModifyHealth,
            Message::ExhaustMinion(_) => Step::ExhaustMinion,
            Message::FinalGameOver(_) => Step::FinalGameOver,
        }
    }

    /// The player the frame is about, if it names one.
    #[must_use]
    pub fn user_id(&self) -> Option<PlayerId> {
        match self {
            Message::BeginFirst(data) => Some(data.first),
            Message::BeginShuffle(data)
            | Message::MainReady(data)
            | Message::MainMenu(data)
            | Message::MainEnd(data) => Some(data.user_id),
            Message::BeginDraw(data)
            | Message::MulliganResult(data)
            | Message::MainDraw(data)
            | Message::OverDraw(data) => Some(data.user_id),
            Message::BeginMulligan(data) => Some(data.user_id),
            Message::MainUseCard(data) => Some(data.user_id),
            Message::MainSelectTarget(data) => Some(data.user_id),
            Message::MainCombat(data) => Some(data.user_id),
            Message::Brief(data) => Some(data.current_user),
            Message::ExhaustDeck(data) => Some(data.user_id),
            Message::ModifyMana(data) => Some(data.user_id),
            Message::ModifyHealth(data) => Some(data.user_id),
            Message::ExhaustMinion(data) => Some(data.user_id),
            Message::FinalGameOver(data) => data.winner,
        }
    }

    /// Encode as a frame.
    pub fn encode(&self) -> Result<Vec<u8>, SyncError> {
        let mut out = vec![self.step() as u8];
        match self {
            Message::BeginFirst(data) => codec::serialize_into(&mut out, data)?,
            Message::BeginShuffle(data)
            | Message::MainReady(data)
            | Message::MainMenu(data)
            | Message::MainEnd(data) => codec::serialize_into(&mut out, data)?,
            Message::BeginDraw(data)
            | Message::MulliganResult(data)
            | Message::MainDraw(data)
            | Message::OverDraw(data) => codec::serialize_into(&mut out, data)?,
            Message::BeginMulligan(data) => codec::serialize_into(&mut out, data)?,
            Message::MainUseCard(data) => codec::serialize_into(&mut out, data)?,
            Message::MainSelectTarget(data) => codec::serialize_into(&mut out, data)?,
            Message::MainCombat(data) => codec::serialize_into(&mut out, data)?,
            Message::Brief(data) => codec::serialize_into(&mut out, data)?,
            Message::ExhaustDeck(data) => codec::serialize_into(&mut out, data)?,
            Message::ModifyMana(data) => codec::serialize_into(&mut out, data)?,
            Message::ModifyHealth(data) => codec::serialize_into(&mut out, data)?,
            Message::ExhaustMinion(data) => codec::serialize_into(&mut out, data)?,
            Message::FinalGameOver(data) => codec::serialize_into(&mut out, data)?,
        }
        Ok(out)
    }

    /// Decode a frame. The first byte selects the payload layout.
    pub fn decode(frame: &[u8]) -> Result<Self, DecodeError> {
        let (&tag, payload) = frame.split_first().ok_or(DecodeError::Empty)?;
        let message = match Step::try_from(tag)? {
            Step::BeginFirst => Message::BeginFirst(codec::deserialize(payload)?),
            Step::BeginShuffle => Message::BeginShuffle(codec::deserialize(payload)?),
            Step::BeginDraw => Message::BeginDraw(codec::deserialize(payload)?),
            Step::BeginMulligan => Message::BeginMulligan(codec::deserialize(payload)?),
            Step::MulliganResult => Message::MulliganResult(codec::deserialize(payload)?),
            Step::MainReady => Message::MainReady(codec::deserialize(payload)?),
            Step::MainDraw => Message::MainDraw(codec::deserialize(payload)?),
            Step::MainMenu => Message::MainMenu(codec::deserialize(payload)?),
            Step::MainUseCard => Message::MainUseCard(codec::deserialize(payload)?),
            Step::MainSelectTarget => Message::MainSelectTarget(codec::deserialize(payload)?),
            Step::MainCombat => Message::MainCombat(codec::deserialize(payload)?),
            Step::MainEnd => Message::MainEnd(codec::deserialize(payload)?),
            Step::Brief => Message::Brief(codec::deserialize(payload)?),
            Step::OverDraw => Message::OverDraw(codec::deserialize(payload)?),
            Step::ExhaustDeck => Message::ExhaustDeck(codec::deserialize(payload)?),
            Step::ModifyMana => Message::ModifyMana(codec::deserialize(payload)?),
            Step::ModifyHealth => Message::ModifyHealth(codec::deserialize(payload)?),
            Step::ExhaustMinion => Message::ExhaustMinion(codec::deserialize(payload)?),
            Step::FinalGameOver => Message::FinalGameOver(codec::deserialize(payload)?),
        };
        Ok(message)
    }
}
