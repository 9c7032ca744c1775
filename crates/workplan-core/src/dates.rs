//! Calendar date helpers.
//!
//! Plans store their dates as ISO `YYYY-MM-DD` strings that may be empty or
//! hand-edited, so every consumer goes through [`parse_date`] and treats a
//! `None` as "unset". Formatting uses a single fixed locale (Spanish month
//! abbreviations) to match the rest of the rendered output.

use jiff::{Zoned, civil::Date};

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Output patterns understood by [`format_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `05 mar`
    DayMonth,
    /// `05 mar 2024`
    DayMonthYear,
    /// `2024-03-05`
    Iso,
}

/// Parses an ISO calendar date, returning `None` for empty or malformed input.
pub fn parse_date(value: &str) -> Option<Date> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Date>().ok()
}

/// Formats a date with the given pattern.
pub fn format_date(date: Date, pattern: DatePattern) -> String {
    let month = MONTHS_ES[(date.month() - 1) as usize];
    match pattern {
        DatePattern::DayMonth => format!("{:02} {month}", date.day()),
        DatePattern::DayMonthYear => format!("{:02} {month} {}", date.day(), date.year()),
        DatePattern::Iso => date.to_string(),
    }
}

/// Formats a stored date string for display.
///
/// Empty values render as `-`; values that do not parse are shown verbatim.
pub fn display_date(value: &str, pattern: DatePattern) -> String {
    if value.trim().is_empty() {
        return "-".to_string();
    }
    match parse_date(value) {
        Some(date) => format_date(date, pattern),
        None => value.to_string(),
    }
}

/// Signed number of whole days from `b` to `a` (`a - b`).
pub fn day_difference(a: Date, b: Date) -> i64 {
    b.until(a)
        .map(|span| i64::from(span.get_days()))
        .unwrap_or(0)
}

/// Inclusive day count between two stored dates.
///
/// Returns 0 when either date is missing or unparseable, and clamps inverted
/// ranges to 0.
pub fn task_duration(start: &str, end: &str) -> u32 {
    let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
        return 0;
    };
    let days = day_difference(end, start) + 1;
    u32::try_from(days.max(0)).unwrap_or(0)
}

/// Today's date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// `date` shifted forward by `days`, saturating at the calendar bounds.
pub fn add_days(date: Date, days: i64) -> Date {
    date.checked_add(jiff::Span::new().days(days))
        .unwrap_or(date)
}
