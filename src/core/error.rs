//! Error types for catalog, store and enrollment operations.

use thiserror::Error;

/// Errors that can occur while reading the catalog or changing a student's enrollment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// The student has no record in the enrollment store
    #[error("Student not found: {student_id}")]
    StudentNotFound { student_id: String },

    /// The course code is not part of the catalog
    #[error("Course not found: {code}")]
    CourseNotFound { code: String },

    /// Enrolling would push the student's total past the credit ceiling
    #[error("Credit limit exceeded! Maximum: {limit}, You will have: {proposed}")]
    CreditLimitExceeded { limit: u32, proposed: u32 },

    /// The student already holds this course
    #[error("Already enrolled in {code}")]
    AlreadyEnrolled { code: String },

    /// The course is not in the student's enrolled set
    #[error("Course {code} not found in enrolled courses")]
    NotEnrolled { code: String },

    /// A student ID the store refuses to use as a key
    #[error("Invalid student id: '{student_id}'")]
    InvalidStudentId { student_id: String },

    /// A student record already exists for this ID
    #[error("Student already registered: {student_id}")]
    StudentExists { student_id: String },

    /// The store failed to read or write a record
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// The catalog source could not be loaded
    #[error("Catalog error: {message}")]
    Catalog { message: String },
}

impl EnrollmentError {
    /// Returns true if this error aborts a whole reconciliation rather than a single item.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::StudentNotFound { .. } | Self::InvalidStudentId { .. }
        )
    }

    /// Short reason used in per-item failure listings.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::CourseNotFound { .. } => "course not found".to_string(),
            Self::CreditLimitExceeded { .. } => "credit limit exceeded".to_string(),
            Self::AlreadyEnrolled { .. } => "already enrolled".to_string(),
            Self::NotEnrolled { .. } => "not enrolled".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for EnrollmentError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EnrollmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for EnrollmentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Catalog {
            message: err.to_string(),
        }
    }
}
