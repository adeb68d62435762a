//! Course enrollment reconciliation library for `coursereg`.
//!
//! Keeps a student's enrolled courses in line with the set they select,
//! under a credit-hour ceiling, and derives their weekly timetable from the
//! catalog's free-text schedules.

pub mod core;
pub mod logger;

pub use crate::core::catalog::Catalog;
pub use crate::core::config;
pub use crate::core::credits::{
    total_credits, CreditCheck, DEFAULT_CREDIT_CEILING, MAX_COURSE_CREDITS,
};
pub use crate::core::error::EnrollmentError;
pub use crate::core::get_version;
pub use crate::core::models::{Course, EnrollmentRecord, SelectionSet, SelectionStatus};
pub use crate::core::reconcile::{ReconcileOutcome, ReconcileReport, Reconciler};
pub use crate::core::store::{EnrollmentStore, FileStore, MemoryStore};
pub use crate::core::timetable::{derive_timetable, Timetable, TimetableEntry, Weekday};
