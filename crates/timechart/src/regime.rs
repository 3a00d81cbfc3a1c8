// File: crates/timechart/src/regime.rs
// Summary: Span-regime classification with per-regime step, emission, and label rules.

use chrono::{DateTime, Datelike, FixedOffset};

use crate::bucket::FINE_SPAN;

/// Range length (seconds) below which the walk advances hourly instead of daily.
const HOURLY_STEP_SPAN: i64 = 87_000;
/// Range length (seconds) below which labels carry wall-clock time, not dates.
const CLOCK_LABEL_SPAN: i64 = 90_000;

const TEN_DAYS: i64 = 864_000;
const NINETY_DAYS: i64 = 7_776_000;
const ONE_EIGHTY_DAYS: i64 = 15_552_000;
const EIGHTEEN_MONTHS: i64 = 47_347_200;

/// How the tick walk advances between candidate positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    TenMinutes,
    Hourly,
    /// A date increment, not a fixed 86,400-second jump.
    CalendarDay,
}

/// Classification of a time range's length. Picks tick density and label
/// formatting once per walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanRegime {
    /// Under 15,000 seconds.
    Intraday,
    /// Under 10 days.
    UpToTenDays,
    /// 10 to 90 days.
    TenToNinetyDays,
    /// 90 to 180 days.
    NinetyToOneEightyDays,
    /// 180 days to roughly 18 months.
    SixToEighteenMonths,
    /// Beyond roughly 18 months.
    BeyondEighteenMonths,
}

impl SpanRegime {
    pub fn classify(delta: i64) -> Self {
        if delta < FINE_SPAN {
            SpanRegime::Intraday
        } else if delta < TEN_DAYS {
            SpanRegime::UpToTenDays
        } else if delta < NINETY_DAYS {
            SpanRegime::TenToNinetyDays
        } else if delta < ONE_EIGHTY_DAYS {
            SpanRegime::NinetyToOneEightyDays
        } else if delta < EIGHTEEN_MONTHS {
            SpanRegime::SixToEighteenMonths
        } else {
            SpanRegime::BeyondEighteenMonths
        }
    }

    /// Walk step for a range of length `delta` seconds.
    pub fn step(self, delta: i64) -> Step {
        match self {
            SpanRegime::Intraday => Step::TenMinutes,
            SpanRegime::UpToTenDays => {
                if delta < HOURLY_STEP_SPAN {
                    Step::Hourly
                } else {
                    Step::CalendarDay
                }
            }
            _ => Step::CalendarDay,
        }
    }

    /// Whether the candidate at `at` produces a tick at all. Sparse regimes
    /// thin the marks themselves, not just the labels.
    pub fn emits(self, at: &DateTime<FixedOffset>) -> bool {
        match self {
            SpanRegime::Intraday | SpanRegime::UpToTenDays | SpanRegime::TenToNinetyDays => true,
            SpanRegime::NinetyToOneEightyDays => at.day() == 1 || at.day() % 5 == 0,
            SpanRegime::SixToEighteenMonths => at.day() == 1 || at.day() == 15,
            SpanRegime::BeyondEighteenMonths => at.day() == 1,
        }
    }

    /// Label for the `index`-th emitted tick at `at`, or `None` for a minor
    /// tick. `index` counts emitted ticks only, starting at zero.
    pub fn label(self, delta: i64, index: usize, at: &DateTime<FixedOffset>) -> Option<String> {
        match self {
            SpanRegime::Intraday => Some(at.format("%H:%M").to_string()),
            SpanRegime::UpToTenDays => {
                let fmt = if delta < CLOCK_LABEL_SPAN { "%H:%M" } else { "%m/%d" };
                Some(at.format(fmt).to_string())
            }
            SpanRegime::TenToNinetyDays => {
                (index % 5 == 0).then(|| at.format("%m/%d").to_string())
            }
            SpanRegime::NinetyToOneEightyDays => {
                (at.day() == 1 || at.day() == 15).then(|| at.format("%m/%d").to_string())
            }
            SpanRegime::SixToEighteenMonths => {
                (at.day() == 1).then(|| at.format("%Y/%m").to_string())
            }
            SpanRegime::BeyondEighteenMonths => {
                (at.day() == 1 && at.month() == 1).then(|| at.format("%Y/%m").to_string())
            }
        }
    }
}
