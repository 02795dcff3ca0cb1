//! Timestamp and date rendering.
//!
//! Both functions are total: input they cannot make sense of is returned
//! as given.

use chrono::{NaiveDate, NaiveDateTime};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Abbreviated month name for `1..=12`; anything else is returned raw.
pub fn month_abbrev(month: &str) -> String {
    match month.parse::<usize>() {
        Ok(m @ 1..=12) => MONTHS[m - 1].to_string(),
        _ => month.to_string(),
    }
}

/// Render `YYYY-MM-DDTHH:MM...` as `DD Mon YYYY, HH:MM`.
///
/// ```
/// use caninewatch::format::format_timestamp;
///
/// assert_eq!(format_timestamp("2025-10-21T18:30:15.123456"), "21 Oct 2025, 18:30");
/// assert_eq!(format_timestamp("not-a-date"), "not-a-date");
/// ```
pub fn format_timestamp(timestamp: &str) -> String {
    reformat(timestamp).unwrap_or_else(|| timestamp.to_string())
}

fn reformat(timestamp: &str) -> Option<String> {
    let (date, rest) = timestamp.split_once('T')?;

    let time: String = rest.chars().take(5).collect();
    if time.chars().count() < 5 {
        return None;
    }

    let mut parts = date.split('-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;

    Some(format!("{} {} {}, {}", day, month_abbrev(month), year, time))
}

/// Render an ISO date or datetime as `DD Mon YYYY`.
///
/// Missing or blank input becomes `"N/A"`; unparseable input is returned
/// unchanged.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim).filter(|s| !s.is_empty()) else {
        return "N/A".to_string();
    };

    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match parsed {
        Ok(day) => day.format("%d %b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
