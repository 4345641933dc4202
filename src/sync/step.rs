//! Protocol phases.
//!
//! `Step` is the first byte of every frame the agent writes. It fixes the
//! payload layout of the rest of the frame and tells the interface whether
//! exactly one reply is expected.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

use super::query::QueryKind;

/// Closed set of protocol phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Step {
    BeginFirst = 0,
    BeginShuffle = 1,
    BeginDraw = 2,
    BeginMulligan = 3,
    MulliganResult = 4,
    MainReady = 5,
    MainDraw = 6,
    MainMenu = 7,
    MainUseCard = 8,
    MainSelectTarget = 9,
    MainCombat = 10,
    MainEnd = 11,
    Brief = 12,
    OverDraw = 13,
    ExhaustDeck = 14,
    ModifyMana = 15,
    ModifyHealth = 16,
    ExhaustMinion = 17,
    FinalGameOver = 18,
}

impl Step {
    /// Every step, in discriminator order.
    pub const ALL: [Step; 19] = [
        Step::BeginFirst,
        Step::BeginShuffle,
        Step::BeginDraw,
        Step::BeginMulligan,
        Step::MulliganResult,
        Step::MainReady,
        Step::MainDraw,
        Step::MainMenu,
        Step::MainUseCard,
        Step::MainSelectTarget,
        Step::MainCombat,
        Step::MainEnd,
        Step::Brief,
        Step::OverDraw,
        Step::ExhaustDeck,
        Step::ModifyMana,
        Step::ModifyHealth,
        Step::ExhaustMinion,
        Step::FinalGameOver,
    ];

    /// `FinalGameOver` is the only terminal step.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Step::FinalGameOver)
    }

    /// The query this step carries, if the agent waits for a reply to it.
    #[must_use]
    pub const fn query_kind(self) -> Option<QueryKind> {
        match self {
            Step::BeginMulligan => Some(QueryKind::Mulligan),
            Step::MainMenu => Some(QueryKind::SelectMenu),
            Step::MainUseCard => Some(QueryKind::SelectCard),
            Step::MainSelectTarget => Some(QueryKind::SelectTarget),
            Step::MainCombat => Some(QueryKind::Combat),
            _ => None,
        }
    }

    #[must_use]
    pub const fn expects_reply(self) -> bool {
        self.query_kind().is_some()
    }
}

impl TryFrom<u8> for Step {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Step::ALL
            .get(value as usize)
            .copied()
            .ok_or(DecodeError::UnknownStep(value))
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminators_match_table() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(*step as u8 as usize, i);
            assert_eq!(Step::try_from(i as u8).unwrap(), *step);
        }
    }

    #[test]
    fn test_unknown_discriminator() {
        assert!(matches!(Step::try_from(19), Err(DecodeError::UnknownStep(19))));
        assert!(matches!(Step::try_from(255), Err(DecodeError::UnknownStep(255))));
    }

    #[test]
    fn test_single_terminal_step() {
        let terminal: Vec<_> = Step::ALL.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![&Step::FinalGameOver]);
    }

    #[test]
    fn test_reply_steps() {
        let replying: Vec<_> = Step::ALL.iter().filter(|s| s.expects_reply()).copied().collect();
        assert_eq!(
            replying,
            vec![
                Step::BeginMulligan,
                Step::MainMenu,
                Step::MainUseCard,
                Step::MainSelectTarget,
                Step::MainCombat,
            ]
        );
        for step in replying {
            assert_eq!(step.query_kind().unwrap().step(), step);
        }
    }
}
