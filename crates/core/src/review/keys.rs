//! Inverted-time row key generation.
//!
//! Review row keys are the zero-padded 19-digit decimal of
//! `MAX_TICKS - ticks(now)`, so ascending lexicographic row-key order equals
//! newest-first chronological order. A tick is 100 nanoseconds counted from
//! 0001-01-01T00:00:00Z; `MAX_TICKS` is the tick count of
//! 9999-12-31T23:59:59.9999999. Pure functions, no side effects.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Tick count of the largest representable instant (9999-12-31T23:59:59.9999999).
pub const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

fn tick_origin() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .expect("0001-01-01 is a valid date")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
}

/// 100-nanosecond intervals since 0001-01-01T00:00:00Z.
pub fn ticks(at: DateTime<Utc>) -> i64 {
    let since_origin = at.signed_duration_since(tick_origin());
    let secs = since_origin.num_seconds();
    let subsec_nanos = (since_origin - Duration::seconds(secs))
        .num_nanoseconds()
        .unwrap_or(0);

    secs * 10_000_000 + subsec_nanos / 100
}

/// Row key for a review created at `at`: later instants sort first.
pub fn inverted_time_key(at: DateTime<Utc>) -> String {
    format!("{:019}", MAX_TICKS - ticks(at))
}
