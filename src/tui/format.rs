//! Text helpers for article cards: relative times and width-aware truncation.

use std::fmt;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

pub const INVALID_TIMESTAMP: &str = "invalid timestamp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    NotANumber(String),
    OutOfRange(i64),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::NotANumber(raw) => write!(f, "'{raw}' is not a unix timestamp"),
            TimestampError::OutOfRange(ts) => write!(f, "timestamp {ts} is out of range"),
        }
    }
}

impl std::error::Error for TimestampError {}

/// "3 days ago" style age of a unix-seconds string, relative to `now`.
///
/// Uses the largest whole unit: years (365d), months (30d), weeks, days,
/// hours, then minutes. Future timestamps read as "0 minutes ago".
pub fn relative_time(timestamp: &str, now: i64) -> Result<String, TimestampError> {
    let trimmed = timestamp.trim();
    let ts: i64 = trimmed
        .parse()
        .map_err(|_| TimestampError::NotANumber(trimmed.to_string()))?;
    if chrono::DateTime::from_timestamp(ts, 0).is_none() {
        return Err(TimestampError::OutOfRange(ts));
    }

    let elapsed = now.saturating_sub(ts).max(0);
    let (count, unit) = [
        (YEAR, "year"),
        (MONTH, "month"),
        (WEEK, "week"),
        (DAY, "day"),
        (HOUR, "hour"),
    ]
    .into_iter()
    .map(|(secs, unit)| (elapsed / secs, unit))
    .find(|(count, _)| *count > 0)
    .unwrap_or((elapsed / MINUTE, "minute"));

    let plural = if count == 1 { "" } else { "s" };
    Ok(format!("{count} {unit}{plural} ago"))
}

/// Like [`relative_time`], with errors shown as [`INVALID_TIMESTAMP`].
pub fn relative_time_or_marker(timestamp: &str, now: i64) -> String {
    relative_time(timestamp, now).unwrap_or_else(|e| {
        log::debug!("Unreadable published_at: {}", e);
        INVALID_TIMESTAMP.to_string()
    })
}

/// Cut `s` to at most `max_width` display columns, ending in "..." when cut.
pub fn truncate_end(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = take_width(s.chars(), max_width - 3);
    out.push_str("...");
    out
}

/// Keep both ends of `s` around a "..." so the result is at most
/// `max_width` columns. Used for npubs, whose prefix and tail both matter.
pub fn truncate_middle(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let left = budget / 2;
    let right = budget - left;
    let head = take_width(s.chars(), left);
    let tail: String = take_width(s.chars().rev(), right).chars().rev().collect();
    format!("{head}...{tail}")
}

fn take_width(chars: impl Iterator<Item = char>, max_width: usize) -> String {
    let mut used = 0;
    chars
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= max_width
        })
        .collect()
}
