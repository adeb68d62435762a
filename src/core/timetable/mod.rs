//! Weekly timetable derived from a student's enrolled courses
//!
//! The timetable is a projection: it is rebuilt from the enrolled course list
//! whenever enrollment changes and is never edited on its own.
//!
//! 1. Each course's schedule is parsed into meeting days and a time part
//! 2. One entry is added per (course, day), at most once per course per day
//! 3. Each day's entries are sorted by start minute (stable for ties)

pub mod schedule;

pub use schedule::{parse_schedule, start_minute, MeetingPattern, Weekday};

use crate::core::models::Course;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One class meeting on a given day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Course code
    pub course_code: String,
    /// Course name
    pub course_name: String,
    /// Time part of the schedule (e.g., "9:00-10:30 AM")
    pub time: String,
    /// Room
    pub room: String,
    /// Instructor
    pub instructor: String,
    /// Credit hours of the course
    pub credits: u32,
}

impl TimetableEntry {
    fn from_course(course: &Course, time: &str) -> Self {
        Self {
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            time: time.to_string(),
            room: course.room.clone(),
            instructor: course.instructor.clone(),
            credits: course.credits,
        }
    }

    /// Minute of day this class starts at
    #[must_use]
    pub fn start_minute(&self) -> u32 {
        start_minute(&self.time)
    }
}

/// Day-indexed classes, each day ordered by start time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    days: BTreeMap<Weekday, Vec<TimetableEntry>>,
}

impl Timetable {
    /// Entries for `day`, empty when the student has no class that day
    #[must_use]
    pub fn day(&self, day: Weekday) -> &[TimetableEntry] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that have at least one class, Monday first
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[TimetableEntry])> {
        self.days.iter().map(|(day, entries)| (*day, entries.as_slice()))
    }

    /// Whether there are no classes at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of entries across all days
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Whether any day holds an entry for `code`
    #[must_use]
    pub fn contains_course(&self, code: &str) -> bool {
        self.days
            .values()
            .any(|entries| entries.iter().any(|e| e.course_code == code))
    }
}

impl fmt::Display for Timetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days.is_empty() {
            return writeln!(f, "No classes scheduled");
        }
        for (day, entries) in &self.days {
            writeln!(f, "{day}")?;
            for entry in entries {
                writeln!(
                    f,
                    "  {:<16} {:<8} {} ({}, {})",
                    entry.time, entry.course_code, entry.course_name, entry.room, entry.instructor
                )?;
            }
        }
        Ok(())
    }
}

/// Build the weekly timetable for a list of enrolled courses.
///
/// Courses with schedules that cannot be parsed are left out and logged.
#[must_use]
pub fn derive_timetable<'a, I>(courses: I) -> Timetable
where
    I: IntoIterator<Item = &'a Course>,
{
    let mut days: BTreeMap<Weekday, Vec<TimetableEntry>> = BTreeMap::new();

    for course in courses {
        let Some(pattern) = parse_schedule(&course.schedule) else {
            crate::debug!(
                "Skipping {} in timetable: unparseable schedule '{}'",
                course.code,
                course.schedule
            );
            continue;
        };

        for day in pattern.days {
            let entries = days.entry(day).or_default();
            if entries.iter().any(|e| e.course_code == course.code) {
                continue;
            }
            entries.push(TimetableEntry::from_course(course, &pattern.time));
        }
    }

    for entries in days.values_mut() {
        entries.sort_by_key(TimetableEntry::start_minute);
    }

    Timetable { days }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, schedule: &str) -> Course {
        Course::new(code.to_string(), format!("{code} name"), 3, schedule.to_string())
    }

    #[test]
    fn test_two_courses_share_days() {
        let courses = vec![
            course("MATH101", "Mon/Wed 10:00-11:30 AM"),
            course("CS101", "Mon/Wed 9:00-10:30 AM"),
        ];
        let timetable = derive_timetable(&courses);

        let monday: Vec<&str> = timetable
            .day(Weekday::Monday)
            .iter()
            .map(|e| e.course_code.as_str())
            .collect();
        assert_eq!(monday, vec!["CS101", "MATH101"]);
        assert_eq!(timetable.day(Weekday::Wednesday).len(), 2);
        assert!(timetable.day(Weekday::Tuesday).is_empty());
        assert_eq!(timetable.day(Weekday::Monday)[0].time, "9:00-10:30 AM");
    }

    #[test]
    fn test_unparseable_schedule_is_skipped() {
        let courses = vec![course("CS101", "Mon/Wed 9:00 AM"), course("IND400", "TBA")];
        let timetable = derive_timetable(&courses);

        assert!(timetable.contains_course("CS101"));
        assert!(!timetable.contains_course("IND400"));
        assert_eq!(timetable.entry_count(), 2);
    }

    #[test]
    fn test_duplicate_course_added_once_per_day() {
        let courses = vec![
            course("CS101", "Mon/Wed 9:00 AM"),
            course("CS101", "Mon/Fri 1:00 PM"),
        ];
        let timetable = derive_timetable(&courses);

        assert_eq!(timetable.day(Weekday::Monday).len(), 1);
        assert_eq!(timetable.day(Weekday::Friday).len(), 1);
    }

    #[test]
    fn test_unreadable_time_sorts_first() {
        let courses = vec![
            course("CS101", "Tue/Thu 9:00 AM"),
            course("LAB1", "Tue/Thu whenever"),
        ];
        let timetable = derive_timetable(&courses);
        assert_eq!(timetable.day(Weekday::Tuesday)[0].course_code, "LAB1");
    }

    #[test]
    fn test_days_iterate_monday_first() {
        let courses = vec![
            course("A", "Sun/Fri 9:00 AM"),
            course("B", "Tue/Mon 9:00 AM"),
        ];
        let timetable = derive_timetable(&courses);
        let days: Vec<Weekday> = timetable.days().map(|(d, _)| d).collect();
        assert_eq!(
            days,
            vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Friday,
                Weekday::Sunday
            ]
        );
    }

    #[test]
    fn test_empty_display() {
        let timetable = derive_timetable(&Vec::<Course>::new());
        assert!(timetable.is_empty());
        assert_eq!(timetable.to_string(), "No classes scheduled\n");
    }

    #[test]
    fn test_json_keys_are_day_names() {
        let courses = vec![course("CS101", "Mon/Wed 9:00 AM")];
        let json = serde_json::to_value(derive_timetable(&courses)).unwrap();
        assert!(json.get("Monday").is_some());
        assert!(json.get("Wednesday").is_some());
    }
}
