//! Quest records stored on the account.
//!
//! A [`QuestBoard`] owns the quests of a single period together with the marker
//! recording when the board was generated. Progress rules live here so that the
//! store-side mutation and the pure quest helpers share one implementation.

use arrayvec::ArrayVec;
use chrono::{DateTime, Utc};

use crate::config::EconomyConfig;

/// Closed set of objectives quests can track.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuestKind {
    Hunt,
    Feed,
    Play,
    /// Winning a dice roll or a wheel spin.
    Gamble,
    /// Winning a battle.
    Battle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuestPeriod {
    Daily,
    Weekly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Difficulty assigned to each daily slot, in order.
    pub const BY_SLOT: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestReward {
    pub currency: u64,
    pub xp: u64,
}

/// Quest identifier, unique across periods (`daily:hunt:2026-10-16`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestId(pub String);

impl QuestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for QuestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a quest cannot be claimed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClaimError {
    #[error("quest {0} is not completed yet")]
    NotCompleted(QuestId),

    #[error("quest {0} was already claimed")]
    AlreadyClaimed(QuestId),

    #[error("quest {0} not found")]
    NotFound(QuestId),
}

impl crate::error::EconomyError for ClaimError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        match self {
            Self::NotCompleted(_) => crate::error::ErrorSeverity::Recoverable,
            Self::AlreadyClaimed(_) | Self::NotFound(_) => crate::error::ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotCompleted(_) => "QUEST_NOT_COMPLETED",
            Self::AlreadyClaimed(_) => "QUEST_ALREADY_CLAIMED",
            Self::NotFound(_) => "QUEST_NOT_FOUND",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quest {
    pub id: QuestId,
    pub kind: QuestKind,
    pub period: QuestPeriod,
    /// Daily quests carry a tier; weekly quests are fixed.
    pub difficulty: Option<Difficulty>,
    pub target: u32,
    pub progress: u32,
    pub reward: QuestReward,
    pub completed: bool,
    pub claimed: bool,
}

impl Quest {
    pub fn new(
        id: QuestId,
        kind: QuestKind,
        period: QuestPeriod,
        difficulty: Option<Difficulty>,
        target: u32,
        reward: QuestReward,
    ) -> Self {
        Self {
            id,
            kind,
            period,
            difficulty,
            target: target.max(1),
            progress: 0,
            reward,
            completed: false,
            claimed: false,
        }
    }

    /// Adds capped progress. Returns true if this call completed the quest.
    pub fn advance(&mut self, amount: u32) -> bool {
        if self.completed || self.claimed || amount == 0 {
            return false;
        }
        self.progress = self.progress.saturating_add(amount).min(self.target);
        self.completed = self.progress >= self.target;
        self.completed
    }

    pub fn check_claimable(&self) -> Result<(), ClaimError> {
        if self.claimed {
            return Err(ClaimError::AlreadyClaimed(self.id.clone()));
        }
        if !self.completed {
            return Err(ClaimError::NotCompleted(self.id.clone()));
        }
        Ok(())
    }

    /// Invariants every stored quest must satisfy.
    pub fn is_consistent(&self) -> bool {
        self.target > 0
            && self.progress <= self.target
            && self.completed == (self.progress >= self.target)
            && (!self.claimed || self.completed)
    }
}

/// Quests of one period plus the marker recording when they were generated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestBoard<const N: usize> {
    pub quests: ArrayVec<Quest, N>,
    pub reset_at: Option<DateTime<Utc>>,
}

pub type DailyBoard = QuestBoard<{ EconomyConfig::DAILY_QUEST_SLOTS }>;
pub type WeeklyBoard = QuestBoard<{ EconomyConfig::WEEKLY_QUEST_SLOTS }>;

impl<const N: usize> QuestBoard<N> {
    pub fn empty() -> Self {
        Self {
            quests: ArrayVec::new(),
            reset_at: None,
        }
    }

    pub fn new(quests: ArrayVec<Quest, N>, reset_at: DateTime<Utc>) -> Self {
        Self {
            quests,
            reset_at: Some(reset_at),
        }
    }

    pub fn find(&self, id: &QuestId) -> Option<&Quest> {
        self.quests.iter().find(|quest| &quest.id == id)
    }

    pub fn find_mut(&mut self, id: &QuestId) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|quest| &quest.id == id)
    }

    /// Advances every open quest of `kind`. Returns the number of quests completed.
    pub fn advance(&mut self, kind: QuestKind, amount: u32) -> usize {
        self.quests
            .iter_mut()
            .filter(|quest| quest.kind == kind)
            .map(|quest| quest.advance(amount))
            .filter(|completed| *completed)
            .count()
    }

    pub fn is_consistent(&self) -> bool {
        self.quests.iter().all(Quest::is_consistent)
    }
}

impl<const N: usize> Default for QuestBoard<N> {
    fn default() -> Self {
        Self::empty()
    }
}
