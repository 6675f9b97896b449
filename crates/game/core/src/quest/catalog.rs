//! Quest templates and board generation.

use arrayvec::ArrayVec;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::state::{Difficulty, Quest, QuestBoard, QuestId, QuestKind, QuestPeriod, QuestReward};

use super::period::period_key;

/// Target/reward multipliers per difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyScale {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyScale {
    pub const STANDARD: Self = Self {
        easy: 1,
        medium: 2,
        hard: 3,
    };

    pub fn multiplier(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for DifficultyScale {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Catalog entry from which quests are instantiated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestTemplate {
    /// Short identifier used in quest ids (`hunt`, `pet_caretaker`).
    pub key: String,
    pub kind: QuestKind,
    pub base_target: u32,
    pub base_reward: QuestReward,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: DifficultyScale,
}

impl QuestTemplate {
    /// Instantiates the template for a period, scaling by `difficulty` when given.
    pub fn instantiate(
        &self,
        period: QuestPeriod,
        difficulty: Option<Difficulty>,
        now: DateTime<Utc>,
    ) -> Quest {
        let multiplier = difficulty.map_or(1, |tier| self.scale.multiplier(tier));
        let period_name: &'static str = period.into();
        let id = QuestId::new(format!(
            "{}:{}:{}",
            period_name,
            self.key,
            period_key(period, now)
        ));
        Quest::new(
            id,
            self.kind,
            period,
            difficulty,
            self.base_target.saturating_mul(multiplier),
            QuestReward {
                currency: self.base_reward.currency.saturating_mul(u64::from(multiplier)),
                xp: self.base_reward.xp.saturating_mul(u64::from(multiplier)),
            },
        )
    }
}

/// Builds a fresh board of up to `N` distinct templates.
///
/// Daily boards assign difficulty by slot (easy, medium, hard) after shuffling, so
/// every template can land on every tier. Weekly boards are unscaled.
pub fn generate_board<const N: usize, R: Rng + ?Sized>(
    period: QuestPeriod,
    templates: &[QuestTemplate],
    now: DateTime<Utc>,
    rng: &mut R,
) -> QuestBoard<N> {
    let mut picks: Vec<&QuestTemplate> = templates.iter().collect();
    picks.shuffle(rng);

    let quests: ArrayVec<Quest, N> = picks
        .into_iter()
        .take(N)
        .enumerate()
        .map(|(slot, template)| {
            let difficulty = match period {
                QuestPeriod::Daily => Some(Difficulty::BY_SLOT[slot.min(2)]),
                QuestPeriod::Weekly => None,
            };
            template.instantiate(period, difficulty, now)
        })
        .collect();

    QuestBoard::new(quests, now)
}
