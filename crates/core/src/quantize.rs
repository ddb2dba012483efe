//! Time quantization helpers.
//!
//! All bookable time is quantized into 30-minute units starting on the hour
//! or half hour. The store only ever holds 30-minute slots; longer lessons
//! are satisfied by merging consecutive units at booking time.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

/// Length of the atomic bookable unit.
pub const SLOT_MINUTES: i64 = 30;

const SLOT_SECS: i64 = SLOT_MINUTES * 60;

/// Next slot boundary strictly after `now`.
///
/// 14:10 rounds to 14:30, 14:35 rounds to 15:00, and an exact boundary
/// advances to the next one (14:30:00 rounds to 15:00), so the scan never
/// offers the slot currently underway.
pub fn next_slot_boundary(now: DateTime<Utc>) -> DateTime<Utc> {
    let subsec = Duration::nanoseconds(i64::from(now.timestamp_subsec_nanos()));
    let into_slot = now.timestamp().rem_euclid(SLOT_SECS);
    now - subsec + Duration::seconds(SLOT_SECS - into_slot)
}

/// Midnight at the start of `date`.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// 23:59 on `date`, the upper bound of a day's slot scan.
pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    day_start(date) + Duration::minutes(23 * 60 + 59)
}

/// Whether `start` is a valid slot start, i.e. minute 0 or 30.
pub fn is_slot_aligned(start: DateTime<Utc>) -> bool {
    let minute = start.minute();
    minute == 0 || minute == 30
}

/// "HH:MM" label for a time of day.
pub fn time_label(t: DateTime<Utc>) -> String {
    t.format("%H:%M").to_string()
}
