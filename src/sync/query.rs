//! Query kinds, typed responses and the opaque `TaskMeta` envelope.
//!
//! A response frame is `[QueryKind as u8] ++ payload`. The tag is checked
//! at the decode boundary: a `TaskMeta` produced for one kind never decodes
//! as the response type of another kind, it decodes as "null".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, SyncError};

use super::codec;
use super::step::Step;

/// What a blocking query asks the interface for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum QueryKind {
    Mulligan = 1,
    SelectMenu = 2,
    SelectCard = 3,
    SelectTarget = 4,
    Combat = 5,
}

impl QueryKind {
    /// The step whose frame carries this query.
    #[must_use]
    pub const fn step(self) -> Step {
        match self {
            QueryKind::Mulligan => Step::BeginMulligan,
            QueryKind::SelectMenu => Step::MainMenu,
            QueryKind::SelectCard => Step::MainUseCard,
            QueryKind::SelectTarget => Step::MainSelectTarget,
            QueryKind::Combat => Step::MainCombat,
        }
    }
}

impl TryFrom<u8> for QueryKind {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(QueryKind::Mulligan),
            2 => Ok(QueryKind::SelectMenu),
            3 => Ok(QueryKind::SelectCard),
            4 => Ok(QueryKind::SelectTarget),
            5 => Ok(QueryKind::Combat),
            other => Err(DecodeError::UnknownQuery(other)),
        }
    }
}

/// A typed response to one query kind.
pub trait Response: Serialize + DeserializeOwned {
    const KIND: QueryKind;
}

/// Hand positions to return to the deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulliganResponse {
    pub indices: Vec<u8>,
}

impl Response for MulliganResponse {
    const KIND: QueryKind = QueryKind::Mulligan;
}

/// Main phase menu entries, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainMenu {
    UseCard,
    Combat,
    EndTurn,
}

impl MainMenu {
    pub const ALL: [MainMenu; 3] = [MainMenu::UseCard, MainMenu::Combat, MainMenu::EndTurn];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MainMenu::UseCard => "Use Card",
            MainMenu::Combat => "Combat",
            MainMenu::EndTurn => "End Turn",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuResponse {
    pub menu: MainMenu,
}

impl Response for MenuResponse {
    const KIND: QueryKind = QueryKind::SelectMenu;
}

/// Card chosen from hand, plus the insertion position for a minion.
///
/// `position` is `None` for spells and weapons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCardResponse {
    pub card_index: u8,
    pub position: Option<u8>,
}

impl Response for UseCardResponse {
    const KIND: QueryKind = QueryKind::SelectCard;
}

/// Where a spell is aimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// Untargeted spell.
    None,
    MyField,
    MyHero,
    OpponentField,
    OpponentHero,
}

impl TargetType {
    pub const ALL: [TargetType; 5] = [
        TargetType::None,
        TargetType::MyField,
        TargetType::MyHero,
        TargetType::OpponentField,
        TargetType::OpponentHero,
    ];

    /// Whether `position` in the response addresses a field slot.
    #[must_use]
    pub const fn uses_position(self) -> bool {
        matches!(self, TargetType::MyField | TargetType::OpponentField)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellTargetResponse {
    pub target_type: TargetType,
    pub position: u8,
}

impl Response for SpellTargetResponse {
    const KIND: QueryKind = QueryKind::SelectTarget;
}

/// Attack selection: `source` is a friendly field slot, `destination` is
/// 0 for the opposing hero or `n` for opposing minion `n` (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetingStructure {
    pub source: u8,
    pub destination: u8,
}

impl Response for TargetingStructure {
    const KIND: QueryKind = QueryKind::Combat;
}

/// Encode a response frame.
pub fn encode_response<R: Response>(response: &R) -> Result<Vec<u8>, SyncError> {
    let mut frame = vec![R::KIND as u8];
    codec::serialize_into(&mut frame, response)?;
    Ok(frame)
}

/// Opaque response payload returned by one interaction.
///
/// Wraps the raw response frame. An empty buffer is the null response the
/// interface sends when it could not (or would not) answer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskMeta {
    buffer: Vec<u8>,
}

impl TaskMeta {
    #[must_use]
    pub fn new(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    /// The null response.
    #[must_use]
    pub fn null() -> Self {
        Self::default()
    }

    /// Build the meta a well-behaved interface would return for `response`.
    pub fn from_response<R: Response>(response: &R) -> Result<Self, SyncError> {
        encode_response(response).map(Self::new)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The query kind the response was tagged with.
    pub fn kind(&self) -> Result<QueryKind, DecodeError> {
        let tag = *self.buffer.first().ok_or(DecodeError::Empty)?;
        QueryKind::try_from(tag)
    }

    /// Decode as `R`, reporting why decoding failed.
    pub fn try_decode<R: Response>(&self) -> Result<R, DecodeError> {
        let got = self.kind()?;
        if got != R::KIND {
            return Err(DecodeError::KindMismatch {
                expected: R::KIND,
                got,
            });
        }
        codec::deserialize(&self.buffer[1..])
    }

    /// Decode as `R`. `None` is the null/invalid marker: the buffer was
    /// empty, tagged for another kind, or malformed.
    #[must_use]
    pub fn decode<R: Response>(&self) -> Option<R> {
        match self.try_decode() {
            Ok(response) => Some(response),
            Err(err) => {
                tracing::warn!(expected = ?R::KIND, %err, "undecodable response");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_kind_discriminators() {
        for kind in [
            QueryKind::Mulligan,
            QueryKind::SelectMenu,
            QueryKind::SelectCard,
            QueryKind::SelectTarget,
            QueryKind::Combat,
        ] {
            assert_eq!(QueryKind::try_from(kind as u8).unwrap(), kind);
            assert_eq!(kind.step().query_kind(), Some(kind));
        }
        assert!(matches!(QueryKind::try_from(0), Err(DecodeError::UnknownQuery(0))));
    }

    #[test]
    fn test_decode_matching_kind() {
        let response = TargetingStructure {
            source: 2,
            destination: 0,
        };
        let meta = TaskMeta::from_response(&response).unwrap();

        assert_eq!(meta.kind().unwrap(), QueryKind::Combat);
        assert_eq!(meta.decode::<TargetingStructure>(), Some(response));
    }

    #[test]
    fn test_decode_other_kind_is_null() {
        let meta = TaskMeta::from_response(&UseCardResponse {
            card_index: 1,
            position: Some(0),
        })
        .unwrap();

        assert!(meta.decode::<SpellTargetResponse>().is_none());
        assert!(matches!(
            meta.try_decode::<SpellTargetResponse>(),
            Err(DecodeError::KindMismatch {
                expected: QueryKind::SelectTarget,
                got: QueryKind::SelectCard,
            })
        ));
    }

    #[test]
    fn test_null_meta() {
        let meta = TaskMeta::null();
        assert!(meta.is_null());
        assert!(meta.decode::<MenuResponse>().is_none());
        assert!(matches!(meta.kind(), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_truncated_payload_is_null() {
        let mut bytes = encode_response(&SpellTargetResponse {
            target_type: TargetType::MyField,
            position: 3,
        })
        .unwrap();
        bytes.pop();

        assert!(TaskMeta::new(bytes).decode::<SpellTargetResponse>().is_none());
    }

    #[test]
    fn test_trailing_bytes_are_null() {
        let mut bytes = encode_response(&MenuResponse {
            menu: MainMenu::Combat,
        })
        .unwrap();
        bytes.push(0);

        assert!(TaskMeta::new(bytes).decode::<MenuResponse>().is_none());
    }
}
