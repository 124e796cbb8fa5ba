//! Civil-day helpers for recurrence stepping and day keys.
//!
//! ## Summary
//! All day arithmetic operates on the club's local civil calendar. Instants
//! are stored in UTC and projected into the configured timezone before any
//! day boundary is taken.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Number of days in the given month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// Build a date from year/month and a preferred day-of-month, clamping the
/// day to the last valid day of that month.
#[must_use]
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
}

/// Advance by whole months, landing on `anchor_day` again as soon as the
/// target month is long enough (31st -> Feb 28th -> Mar 31st).
#[must_use]
pub fn add_months(date: NaiveDate, anchor_day: u32, months: u32) -> Option<NaiveDate> {
    let total = date.year() * 12 + i32::try_from(date.month0()).ok()? + i32::try_from(months).ok()?;
    clamped_date(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, anchor_day)
}

/// Civil day of a UTC instant in the given timezone.
#[must_use]
pub fn civil_day(instant: DateTime<Utc>, timezone: Tz) -> NaiveDate {
    instant.with_timezone(&timezone).date_naive()
}

/// Last civil day (inclusive) of a rolling window of `days` days anchored at
/// `now`'s civil day.
#[must_use]
pub fn window_end(now: DateTime<Utc>, timezone: Tz, days: u32) -> NaiveDate {
    civil_day(now, timezone)
        .checked_add_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MAX)
}

/// Resolve a local civil date and time to a UTC instant.
///
/// An ambiguous local time resolves to the earlier of the two instants; a
/// time inside a spring-forward gap yields `None`.
#[must_use]
pub fn local_instant(day: NaiveDate, time: NaiveTime, timezone: Tz) -> Option<DateTime<Utc>> {
    timezone
        .from_local_datetime(&day.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Canonical ISO representation of a civil day, as used in day keys and
/// virtual occurrence ids.
#[must_use]
pub fn iso_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
