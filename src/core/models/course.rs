//! Course model

use serde::{Deserialize, Deserializer, Serialize};

/// Represents a course offered in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, unique within the catalog (e.g., "CS101")
    pub code: String,

    /// Course name (e.g., "Introduction to Programming")
    #[serde(default)]
    pub name: String,

    /// Credit hours; missing or non-numeric values read back as 0
    #[serde(default, deserialize_with = "lenient_credits")]
    pub credits: u32,

    /// Instructor name
    #[serde(default)]
    pub instructor: String,

    /// Free-text meeting pattern (e.g., "Mon/Wed 9:00-10:30 AM")
    #[serde(default)]
    pub schedule: String,

    /// Room identifier (e.g., "CS-101")
    #[serde(default)]
    pub room: String,

    /// Maximum number of students
    #[serde(default)]
    pub capacity: u32,

    /// Short description shown in listings
    #[serde(default)]
    pub description: String,

    /// Programme semester the course is normally taken in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
}

impl Course {
    /// Create a new course with empty descriptive fields
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `name` - Full course name
    /// * `credits` - Credit hours
    /// * `schedule` - Meeting pattern string
    #[must_use]
    pub const fn new(code: String, name: String, credits: u32, schedule: String) -> Self {
        Self {
            code,
            name,
            credits,
            instructor: String::new(),
            schedule,
            room: String::new(),
            capacity: 0,
            description: String::new(),
            semester: None,
        }
    }

    /// Set the instructor
    #[must_use]
    pub fn with_instructor(mut self, instructor: &str) -> Self {
        self.instructor = instructor.to_string();
        self
    }

    /// Set the room
    #[must_use]
    pub fn with_room(mut self, room: &str) -> Self {
        self.room = room.to_string();
        self
    }
}

/// Accepts an integer, a numeric string, or anything else (read as 0).
fn lenient_credits<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let credits = match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
            .and_then(|c| u32::try_from(c).ok())
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    };
    Ok(credits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new(
            "CS101".to_string(),
            "Introduction to Programming".to_string(),
            3,
            "Mon/Wed 9:00-10:30 AM".to_string(),
        )
        .with_instructor("Dr. Ali Khan")
        .with_room("CS-101");

        assert_eq!(course.code, "CS101");
        assert_eq!(course.credits, 3);
        assert_eq!(course.instructor, "Dr. Ali Khan");
        assert_eq!(course.room, "CS-101");
        assert!(course.semester.is_none());
    }

    #[test]
    fn test_missing_credits_read_as_zero() {
        let course: Course = serde_json::from_str(r#"{"code": "CS101"}"#).unwrap();
        assert_eq!(course.credits, 0);
    }

    #[test]
    fn test_non_numeric_credits_read_as_zero() {
        let course: Course =
            serde_json::from_str(r#"{"code": "CS101", "credits": "three"}"#).unwrap();
        assert_eq!(course.credits, 0);

        let course: Course =
            serde_json::from_str(r#"{"code": "CS101", "credits": null}"#).unwrap();
        assert_eq!(course.credits, 0);
    }

    #[test]
    fn test_numeric_string_credits() {
        let course: Course =
            serde_json::from_str(r#"{"code": "CS101", "credits": "4"}"#).unwrap();
        assert_eq!(course.credits, 4);
    }
}
