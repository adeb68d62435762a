//! Free-text schedule parsing
//!
//! Schedules look like `"Mon/Wed 9:00-10:30 AM"`: a slash-joined list of
//! three-letter day abbreviations followed by a time range. Anything that does
//! not fit that shape is rejected with `None` so callers can skip the course.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Leading `H:MM` with an optional am/pm suffix directly after it
static START_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+):(\d+)\s*([ap]m)?").expect("start time pattern is valid")
});

/// Day of the week, ordered Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// All days, Monday through Sunday
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Map a three-letter abbreviation (`"Mon"`, `"Tue"`, ...) to a day
    #[must_use]
    pub fn from_abbrev(token: &str) -> Option<Self> {
        match token {
            "Mon" => Some(Self::Monday),
            "Tue" => Some(Self::Tuesday),
            "Wed" => Some(Self::Wednesday),
            "Thu" => Some(Self::Thursday),
            "Fri" => Some(Self::Friday),
            "Sat" => Some(Self::Saturday),
            "Sun" => Some(Self::Sunday),
            _ => None,
        }
    }

    /// Full day name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed schedule string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingPattern {
    /// Recognized meeting days in the order they appeared
    pub days: Vec<Weekday>,
    /// Everything after the day list (e.g., `"9:00-10:30 AM"`)
    pub time: String,
}

/// Parse a schedule string into its days and time part.
///
/// Returns `None` when the first token is not a `/`-joined day list or when
/// none of its tokens is a known day abbreviation. Unknown tokens inside an
/// otherwise valid list are dropped.
#[must_use]
pub fn parse_schedule(schedule: &str) -> Option<MeetingPattern> {
    let mut parts = schedule.split_whitespace();
    let day_list = parts.next()?;
    if !day_list.contains('/') {
        return None;
    }

    let mut days = Vec::new();
    for token in day_list.split('/').map(str::trim) {
        if let Some(day) = Weekday::from_abbrev(token) {
            if !days.contains(&day) {
                days.push(day);
            }
        }
    }
    if days.is_empty() {
        return None;
    }

    let time = parts.collect::<Vec<_>>().join(" ");
    Some(MeetingPattern { days, time })
}

/// Minute of day at which a time string starts.
///
/// Reads the first `H:MM` token and an am/pm suffix that directly follows it
/// (case-insensitive). `12 am` is 0 and `12 pm` is 720. Strings with no
/// readable time start at minute 0.
#[must_use]
pub fn start_minute(time: &str) -> u32 {
    let Some(caps) = START_TIME.captures(time) else {
        return 0;
    };
    let (Some(hours), Some(minutes)) = (
        caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()),
        caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok()),
    ) else {
        return 0;
    };

    let meridiem = caps.get(3).map(|m| m.as_str().to_ascii_lowercase());
    let hours = match meridiem.as_deref() {
        Some("pm") if hours < 12 => hours + 12,
        Some("am") if hours == 12 => 0,
        _ => hours,
    };

    hours.saturating_mul(60).saturating_add(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_day_schedule() {
        let pattern = parse_schedule("Mon/Wed 9:00-10:30 AM").unwrap();
        assert_eq!(pattern.days, vec![Weekday::Monday, Weekday::Wednesday]);
        assert_eq!(pattern.time, "9:00-10:30 AM");
    }

    #[test]
    fn test_parse_rejects_single_day() {
        // Only slash-joined day lists are recognized
        assert!(parse_schedule("Fri 9:00-12:00 PM").is_none());
    }

    #[test]
    fn test_parse_rejects_empty_and_unknown() {
        assert!(parse_schedule("").is_none());
        assert!(parse_schedule("TBA").is_none());
        assert!(parse_schedule("Foo/Bar 9:00").is_none());
    }

    #[test]
    fn test_parse_drops_unknown_tokens() {
        let pattern = parse_schedule("Mon/Xyz/Fri 8:00 AM").unwrap();
        assert_eq!(pattern.days, vec![Weekday::Monday, Weekday::Friday]);
    }

    #[test]
    fn test_parse_collapses_repeated_days() {
        let pattern = parse_schedule("Tue/Tue 1:00 PM").unwrap();
        assert_eq!(pattern.days, vec![Weekday::Tuesday]);
    }

    #[test]
    fn test_start_minute_plain() {
        assert_eq!(start_minute("9:00-10:30 AM"), 540);
        assert_eq!(start_minute("10:00-11:30 AM"), 600);
    }

    #[test]
    fn test_start_minute_meridiem() {
        assert_eq!(start_minute("2:15pm"), 14 * 60 + 15);
        assert_eq!(start_minute("2:15 PM"), 14 * 60 + 15);
        assert_eq!(start_minute("12:00 am"), 0);
        assert_eq!(start_minute("12:30 AM"), 30);
        assert_eq!(start_minute("12:00 pm"), 720);
    }

    #[test]
    fn test_start_minute_suffix_must_follow_start() {
        // The trailing PM belongs to the end of the range, not the start
        assert_eq!(start_minute("2:00-3:30 PM"), 120);
    }

    #[test]
    fn test_start_minute_unparseable() {
        assert_eq!(start_minute(""), 0);
        assert_eq!(start_minute("TBA"), 0);
    }

    #[test]
    fn test_weekday_order() {
        assert!(Weekday::Monday < Weekday::Sunday);
        assert_eq!(Weekday::from_abbrev("Thu"), Some(Weekday::Thursday));
        assert_eq!(Weekday::Saturday.to_string(), "Saturday");
    }
}
