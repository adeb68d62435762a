//! Data models for `coursereg`

pub mod course;
pub mod enrollment;
pub mod selection;

pub use course::Course;
pub use enrollment::{EnrollmentRecord, RecordStatus};
pub use selection::{SelectionSet, SelectionStatus};
