//! Timestamp parsing for export header lines
//!
//! Dates are always read as month/day/year. Exports from day/month/year
//! locales are mis-read rather than rejected; there is no locale detection.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use std::sync::LazyLock;

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?\s*([AP]M)?").unwrap()
});

/// Parse the date and time fields of a header line.
///
/// Returns `None` when the date does not have exactly three numeric fields
/// or the result is not representable; callers fall back to the current
/// time. Out-of-range components roll over into the next unit (month 13 is
/// January of the following year, hour 25 is 01:00 the next day). A time
/// field that does not parse is treated as midnight.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let parts: Vec<&str> = date.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let month: i64 = parts[0].trim().parse().ok()?;
    let day: i64 = parts[1].trim().parse().ok()?;
    let mut year: i64 = parts[2].trim().parse().ok()?;

    if year < 100 {
        year += if year > 50 { 1900 } else { 2000 };
    }

    let (hours, minutes, seconds) = parse_time(time);

    let month_index = month - 1;
    let year = i32::try_from(year + month_index.div_euclid(12)).ok()?;
    let month = u32::try_from(month_index.rem_euclid(12) + 1).ok()?;

    let offset = TimeDelta::try_days(day - 1)?
        .checked_add(&TimeDelta::try_hours(hours)?)?
        .checked_add(&TimeDelta::try_minutes(minutes)?)?
        .checked_add(&TimeDelta::try_seconds(seconds)?)?;

    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(offset)
}

/// `H:MM[:SS][ AM/PM]` to 24-hour components
fn parse_time(time: &str) -> (i64, i64, i64) {
    let Some(caps) = TIME_PATTERN.captures(time) else {
        return (0, 0, 0);
    };

    let number = |idx: usize| {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(0)
    };

    let mut hours = number(1);
    let minutes = number(2);
    let seconds = number(3);

    if let Some(meridiem) = caps.get(4) {
        let is_pm = meridiem.as_str().eq_ignore_ascii_case("PM");
        if is_pm && hours != 12 {
            hours += 12;
        } else if !is_pm && hours == 12 {
            hours = 0;
        }
    }

    (hours, minutes, seconds)
}
