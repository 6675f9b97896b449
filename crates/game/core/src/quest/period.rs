//! Period keys for daily and weekly quest boards.

use core::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::state::QuestPeriod;

/// Identity of a quest period. Two timestamps belong to the same period iff
/// their keys are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    Day(NaiveDate),
    Week { year: i32, week: u32 },
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Week { year, week } => write!(f, "{year}-W{week:02}"),
        }
    }
}

/// Calendar-date key (UTC).
pub fn day_key(at: DateTime<Utc>) -> PeriodKey {
    PeriodKey::Day(at.date_naive())
}

/// Year and week number.
///
/// `week = ceil((day_of_year0 + weekday(jan 1) + 1) / 7)` with Sunday = 0, so weeks
/// roll over on Sunday and the first partial week of a year is week 1. The formula
/// only depends on the UTC date, never on locale settings.
pub fn week_key(at: DateTime<Utc>) -> PeriodKey {
    let date = at.date_naive();
    let year = date.year();
    let jan_first_weekday = NaiveDate::from_yo_opt(year, 1)
        .map_or(0, |jan_first| jan_first.weekday().num_days_from_sunday());
    let week = (date.ordinal0() + jan_first_weekday + 1).div_ceil(7);
    PeriodKey::Week { year, week }
}

pub fn period_key(period: QuestPeriod, at: DateTime<Utc>) -> PeriodKey {
    match period {
        QuestPeriod::Daily => day_key(at),
        QuestPeriod::Weekly => week_key(at),
    }
}
