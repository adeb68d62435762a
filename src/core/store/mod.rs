//! Enrollment persistence
//!
//! The reconciler talks to storage only through [`EnrollmentStore`]. Writes are
//! single-record operations with no multi-key transaction: each enroll or drop
//! lands or fails on its own.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::core::error::EnrollmentError;
use crate::core::models::EnrollmentRecord;
use crate::core::timetable::Timetable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Everything stored for one student
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Opaque student identifier
    pub student_id: String,
    /// Enrolled courses keyed by course code
    #[serde(default)]
    pub enrolled_courses: BTreeMap<String, EnrollmentRecord>,
    /// Last timetable derived from `enrolled_courses`
    #[serde(default)]
    pub timetable: Timetable,
}

impl StudentRecord {
    /// Create an empty record for `student_id`
    #[must_use]
    pub fn new(student_id: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            ..Self::default()
        }
    }
}

/// Per-student enrollment storage
pub trait EnrollmentStore: Send + Sync {
    /// Create an empty record for a new student
    ///
    /// # Errors
    /// `StudentExists` if the student already has a record
    fn register_student(&self, student_id: &str) -> Result<(), EnrollmentError>;

    /// All enrollment records of a student, ordered by course code
    ///
    /// # Errors
    /// `StudentNotFound` if the student has no record
    fn enrolled_records(&self, student_id: &str) -> Result<Vec<EnrollmentRecord>, EnrollmentError>;

    /// Codes of the courses a student is enrolled in
    ///
    /// # Errors
    /// `StudentNotFound` if the student has no record
    fn get_enrolled(&self, student_id: &str) -> Result<BTreeSet<String>, EnrollmentError> {
        Ok(self
            .enrolled_records(student_id)?
            .into_iter()
            .map(|record| record.course.code)
            .collect())
    }

    /// Write (or overwrite) the record for `code`
    ///
    /// # Errors
    /// `StudentNotFound` or `Storage` on write failure
    fn put_enrollment(
        &self,
        student_id: &str,
        code: &str,
        record: &EnrollmentRecord,
    ) -> Result<(), EnrollmentError>;

    /// Remove the record for `code`; removing an absent record is not an error
    ///
    /// # Errors
    /// `StudentNotFound` or `Storage` on write failure
    fn delete_enrollment(&self, student_id: &str, code: &str) -> Result<(), EnrollmentError>;

    /// Replace the stored timetable projection
    ///
    /// # Errors
    /// `StudentNotFound` or `Storage` on write failure
    fn put_timetable(&self, student_id: &str, timetable: &Timetable) -> Result<(), EnrollmentError>;

    /// The last stored timetable projection
    ///
    /// # Errors
    /// `StudentNotFound` if the student has no record
    fn stored_timetable(&self, student_id: &str) -> Result<Timetable, EnrollmentError>;

    /// Run `f` with exclusive access to the student's data.
    ///
    /// Callers that read a student's courses and then write based on what
    /// they read wrap the whole sequence in this. Stores private to one
    /// process have nothing extra to lock; stores shared between processes
    /// override it.
    ///
    /// # Errors
    /// Whatever `f` returns, or `Storage` if the lock cannot be taken
    fn exclusive<T>(
        &self,
        _student_id: &str,
        f: impl FnOnce() -> Result<T, EnrollmentError>,
    ) -> Result<T, EnrollmentError>
    where
        Self: Sized,
    {
        f()
    }
}
