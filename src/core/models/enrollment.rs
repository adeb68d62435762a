//! Enrollment record model

use super::Course;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an enrollment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// The student currently holds the course
    #[default]
    Enrolled,
}

/// A course a student is enrolled in, with the catalog entry snapshotted at enroll time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    /// Course fields as they were when the student enrolled
    #[serde(flatten)]
    pub course: Course,

    /// When the enrollment was written
    pub enrolled_date: DateTime<Utc>,

    /// Record status
    #[serde(default)]
    pub status: RecordStatus,
}

impl EnrollmentRecord {
    /// Snapshot a catalog course into a new record dated `enrolled_date`
    #[must_use]
    pub fn new(course: &Course, enrolled_date: DateTime<Utc>) -> Self {
        Self {
            course: course.clone(),
            enrolled_date,
            status: RecordStatus::Enrolled,
        }
    }

    /// Course code this record is keyed by
    #[must_use]
    pub fn code(&self) -> &str {
        &self.course.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_snapshots_course() {
        let course = Course::new(
            "MATH101".to_string(),
            "Calculus I".to_string(),
            4,
            "Mon/Wed 10:00-11:30 AM".to_string(),
        );
        let record = EnrollmentRecord::new(&course, Utc::now());

        assert_eq!(record.code(), "MATH101");
        assert_eq!(record.course, course);
        assert_eq!(record.status, RecordStatus::Enrolled);
    }

    #[test]
    fn test_record_json_is_flat() {
        let course = Course::new(
            "CS101".to_string(),
            "Introduction to Programming".to_string(),
            3,
            "Mon/Wed 9:00-10:30 AM".to_string(),
        );
        let record = EnrollmentRecord::new(&course, Utc::now());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["code"], "CS101");
        assert_eq!(json["credits"], 3);
        assert_eq!(json["status"], "enrolled");
        assert!(json.get("enrolled_date").is_some());
    }
}
