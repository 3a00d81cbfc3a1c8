// File: crates/timechart/src/ticks.rs
// Summary: Adaptive time-axis tick generation over a fixed-offset zone.

use chrono::{DateTime, Days, Duration, FixedOffset, Offset, Utc};
use thiserror::Error;

use crate::bucket::bucket;
use crate::regime::{SpanRegime, Step};

#[derive(Debug, Error)]
pub enum TickError {
    #[error("invalid time range: [{start}, {end}] has non-positive span")]
    InvalidRange { start: i64, end: i64 },
    #[error("timestamp {0} is outside the representable date range")]
    OutOfRange(i64),
}

/// A mark on the time axis. `label` is `Some` for major ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    pub position: i64,
    pub label: Option<String>,
}

/// Generates axis ticks for a `[start, end]` range of Unix timestamps.
///
/// The zone offset shifts bucket boundaries and label text. It is explicit
/// per-ticker configuration, never process-global state.
#[derive(Clone, Copy, Debug)]
pub struct TimeTicker {
    zone: FixedOffset,
}

impl Default for TimeTicker {
    fn default() -> Self {
        Self { zone: Utc.fix() }
    }
}

impl TimeTicker {
    pub fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }

    /// Ticker for a whole-hour UTC offset, e.g. `9` for UTC+9.
    pub fn from_utc_offset_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours.checked_mul(3_600)?).map(Self::new)
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Walk from the bucketed `start` to the bucketed `end`, emitting ticks
    /// per the span regime's density rules.
    ///
    /// Positions are strictly increasing. The first position is at or before
    /// `start`; the walk stops once a candidate lands past the bucketed end,
    /// so the final tick sits at or after `end`. Ranges with non-positive
    /// span are rejected rather than walked.
    pub fn ticks(&self, start: i64, end: i64) -> Result<Vec<Tick>, TickError> {
        let delta = end.saturating_sub(start);
        if delta <= 0 {
            return Err(TickError::InvalidRange { start, end });
        }
        let regime = SpanRegime::classify(delta);
        let step = regime.step(delta);
        let limit = bucket(end, delta, self.zone);

        let mut cur = self.at(bucket(start, delta, self.zone))?;
        let mut ticks = Vec::new();
        let mut emitted = 0usize;
        loop {
            let position = cur.timestamp();
            if regime.emits(&cur) {
                ticks.push(Tick {
                    position,
                    label: regime.label(delta, emitted, &cur),
                });
                emitted += 1;
            }
            if position > limit {
                break;
            }
            cur = advance(cur, step).ok_or(TickError::OutOfRange(position))?;
        }
        Ok(ticks)
    }

    fn at(&self, t: i64) -> Result<DateTime<FixedOffset>, TickError> {
        DateTime::from_timestamp(t, 0)
            .map(|dt| dt.with_timezone(&self.zone))
            .ok_or(TickError::OutOfRange(t))
    }
}

fn advance(cur: DateTime<FixedOffset>, step: Step) -> Option<DateTime<FixedOffset>> {
    match step {
        Step::TenMinutes => cur.checked_add_signed(Duration::minutes(10)),
        Step::Hourly => cur.checked_add_signed(Duration::hours(1)),
        Step::CalendarDay => cur.checked_add_days(Days::new(1)),
    }
}
