// File: crates/timechart/src/bucket.rs
// Summary: Timestamp bucketing: snap timestamps down to 10-minute/hour/day boundaries.

use chrono::FixedOffset;

/// Range length (seconds) below which buckets are 10-minute blocks.
pub const FINE_SPAN: i64 = 15_000;
/// Range length (seconds) below which buckets are whole hours.
pub const HOURLY_SPAN: i64 = 90_000;

const TEN_MINUTES: i64 = 600;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;

/// Bucket width (seconds) used for a range of length `span`.
pub fn granularity(span: i64) -> i64 {
    if span < FINE_SPAN {
        TEN_MINUTES
    } else if span < HOURLY_SPAN {
        HOUR
    } else {
        DAY
    }
}

/// Snap `t` down to the start of its bucket in the given fixed-offset zone.
/// Boundaries are aligned to local wall-clock time, so day buckets begin at
/// local midnight. Idempotent: `bucket(bucket(t, s, z), s, z) == bucket(t, s, z)`.
pub fn bucket(t: i64, span: i64, zone: FixedOffset) -> i64 {
    let local = t + i64::from(zone.local_minus_utc());
    t - local.rem_euclid(granularity(span))
}
