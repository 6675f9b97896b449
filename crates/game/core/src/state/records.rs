//! Small per-account bookkeeping records updated alongside actions.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::EconomyConfig;

/// Mood of the account's creature collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PetCare {
    pub happiness: u8,
    pub last_cared_at: Option<DateTime<Utc>>,
}

impl PetCare {
    pub fn new() -> Self {
        Self {
            happiness: EconomyConfig::MAX_HAPPINESS,
            last_cared_at: None,
        }
    }

    /// Happiness after linear decay since the last feed or play session.
    pub fn decayed(&self, now: DateTime<Utc>, decay_per_hour: f64) -> u8 {
        let Some(last) = self.last_cared_at else {
            return self.happiness;
        };
        let hours = (now - last).num_seconds().max(0) as f64 / 3600.0;
        let lost = (hours * decay_per_hour).floor();
        (f64::from(self.happiness) - lost).max(0.0) as u8
    }
}

impl Default for PetCare {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecord {
    pub wins: u32,
    pub losses: u32,
    pub streak: u32,
}

impl BattleRecord {
    pub fn record(&mut self, won: bool) {
        if won {
            self.wins = self.wins.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
        } else {
            self.losses = self.losses.saturating_add(1);
            self.streak = 0;
        }
    }
}

/// Gifts sent during the current calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GiftLedger {
    pub day: Option<NaiveDate>,
    pub sent_today: u32,
}

impl GiftLedger {
    /// Gifts already sent on `day`; a ledger from another day counts as zero.
    pub fn sent_on(&self, day: NaiveDate) -> u32 {
        if self.day == Some(day) {
            self.sent_today
        } else {
            0
        }
    }

    pub fn record(&mut self, day: NaiveDate) {
        self.sent_today = self.sent_on(day).saturating_add(1);
        self.day = Some(day);
    }
}
