//! Enrollment reconciliation
//!
//! Turns a student's desired [`SelectionSet`] into enroll and drop writes
//! against an [`EnrollmentStore`]:
//!
//! 1. Diff the selection against the currently enrolled codes
//! 2. Drop every deselected course
//! 3. Enroll each newly selected course that exists in the catalog and fits
//!    under the credit ceiling, checked against a running total that already
//!    excludes the drops
//! 4. Rebuild the stored timetable after every successful write
//!
//! Per-course problems are collected in the [`ReconcileReport`]; only failing
//! to find the student aborts the call. Writes that already landed are not
//! rolled back when a later one fails.
//!
//! Every call that reads and then writes a student's courses holds that
//! student's in-process lock and the store's [`EnrollmentStore::exclusive`]
//! section for its whole duration.

pub mod locks;

pub use locks::StudentLocks;

use crate::core::catalog::Catalog;
use crate::core::credits::{total_credits, CreditCheck, DEFAULT_CREDIT_CEILING};
use crate::core::error::EnrollmentError;
use crate::core::models::{EnrollmentRecord, SelectionSet};
use crate::core::store::EnrollmentStore;
use crate::core::timetable::{derive_timetable, Timetable};
use crate::{debug, info, warn};
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Codes to enroll and drop to move from one set to another
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDiff {
    /// Selected but not yet enrolled
    pub to_enroll: BTreeSet<String>,
    /// Enrolled but no longer selected
    pub to_drop: BTreeSet<String>,
}

impl SelectionDiff {
    /// Compute `selected − current` and `current − selected`
    #[must_use]
    pub fn between(current: &BTreeSet<String>, selected: &BTreeSet<String>) -> Self {
        Self {
            to_enroll: selected.difference(current).cloned().collect(),
            to_drop: current.difference(selected).cloned().collect(),
        }
    }

    /// Whether the two sets were already equal
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_enroll.is_empty() && self.to_drop.is_empty()
    }

    /// Number of writes the diff calls for
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_enroll.len() + self.to_drop.len()
    }
}

/// Kind of write attempted for a course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Add the course
    Enroll,
    /// Remove the course
    Drop,
}

/// A single course that could not be enrolled or dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Course code
    pub code: String,
    /// What was being attempted
    pub operation: Operation,
    /// Why it failed
    pub error: EnrollmentError,
}

impl ItemFailure {
    /// Short reason (e.g., "credit limit exceeded")
    #[must_use]
    pub fn reason(&self) -> String {
        self.error.reason()
    }
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            Operation::Enroll => write!(f, "{}: {}", self.code, self.reason()),
            Operation::Drop => write!(f, "Failed to drop {}: {}", self.code, self.reason()),
        }
    }
}

/// Overall result of a reconciliation as the student sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Every attempted write succeeded (or nothing needed doing)
    Succeeded,
    /// Some writes succeeded and some failed
    PartiallySucceeded,
    /// Nothing succeeded
    Failed,
}

/// What a reconciliation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Student the report is for
    pub student_id: String,
    /// Codes enrolled, in processing order
    pub enrolled: Vec<String>,
    /// Codes dropped, in processing order
    pub dropped: Vec<String>,
    /// Per-course failures, in processing order
    pub failures: Vec<ItemFailure>,
    /// Credits held after the call
    pub total_credits: u32,
}

impl ReconcileReport {
    fn new(student_id: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            enrolled: Vec::new(),
            dropped: Vec::new(),
            failures: Vec::new(),
            total_credits: 0,
        }
    }

    /// Number of successful enroll writes
    #[must_use]
    pub fn enrolled_count(&self) -> usize {
        self.enrolled.len()
    }

    /// Number of successful drop writes
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Successful writes of either kind
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.enrolled.len() + self.dropped.len()
    }

    /// All operations attempted, successful or not
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.succeeded() + self.failures.len()
    }

    /// Classify the report by comparing successes with attempts
    #[must_use]
    pub fn outcome(&self) -> ReconcileOutcome {
        if self.succeeded() == self.attempted() {
            ReconcileOutcome::Succeeded
        } else if self.succeeded() == 0 {
            ReconcileOutcome::Failed
        } else {
            ReconcileOutcome::PartiallySucceeded
        }
    }
}

/// A student's enrollment with its credit total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourses {
    /// Records ordered by course code
    pub records: Vec<EnrollmentRecord>,
    /// Sum of the records' credits
    pub total_credits: u32,
}

/// Applies enrollment changes for students against a store
pub struct Reconciler<S> {
    catalog: Arc<Catalog>,
    store: S,
    credit_ceiling: u32,
    locks: StudentLocks,
}

impl<S: EnrollmentStore> Reconciler<S> {
    /// Create a reconciler with the default 20-credit ceiling
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, store: S) -> Self {
        Self {
            catalog,
            store,
            credit_ceiling: DEFAULT_CREDIT_CEILING,
            locks: StudentLocks::new(),
        }
    }

    /// Replace the credit ceiling
    #[must_use]
    pub fn with_credit_ceiling(mut self, credit_ceiling: u32) -> Self {
        self.credit_ceiling = credit_ceiling;
        self
    }

    /// The catalog courses are looked up in
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Maximum credits a student may hold
    #[must_use]
    pub const fn credit_ceiling(&self) -> u32 {
        self.credit_ceiling
    }

    fn serialized<T>(
        &self,
        student_id: &str,
        f: impl FnOnce() -> Result<T, EnrollmentError>,
    ) -> Result<T, EnrollmentError> {
        self.locks
            .with_student(student_id, || self.store.exclusive(student_id, f))
    }

    /// Reconcile a student's stored enrollment to `selection`.
    ///
    /// # Errors
    /// `StudentNotFound` if the store has no record for the student. Problems
    /// with individual courses are reported in the returned report instead.
    pub fn reconcile(
        &self,
        student_id: &str,
        selection: &SelectionSet,
    ) -> Result<ReconcileReport, EnrollmentError> {
        self.serialized(student_id, || {
            let held: BTreeMap<String, u32> = self
                .store
                .enrolled_records(student_id)?
                .into_iter()
                .map(|r| (r.course.code, r.course.credits))
                .collect();
            Ok(self.apply(student_id, &held, selection))
        })
    }

    /// Reconcile from a caller-supplied set of currently enrolled codes.
    ///
    /// Credits of the current courses come from the catalog; codes the catalog
    /// does not know count as 0.
    ///
    /// # Errors
    /// `StudentNotFound` if the store has no record for the student
    pub fn reconcile_against(
        &self,
        student_id: &str,
        current: &BTreeSet<String>,
        selection: &SelectionSet,
    ) -> Result<ReconcileReport, EnrollmentError> {
        self.serialized(student_id, || {
            self.store.get_enrolled(student_id)?;
            let held: BTreeMap<String, u32> = current
                .iter()
                .map(|code| {
                    let credits = self.catalog.get(code).map_or(0, |c| c.credits);
                    (code.clone(), credits)
                })
                .collect();
            Ok(self.apply(student_id, &held, selection))
        })
    }

    fn apply(
        &self,
        student_id: &str,
        held: &BTreeMap<String, u32>,
        selection: &SelectionSet,
    ) -> ReconcileReport {
        let current: BTreeSet<String> = held.keys().cloned().collect();
        let diff = SelectionDiff::between(&current, selection.codes());
        let mut report = ReconcileReport::new(student_id);

        let mut running: u32 = held
            .iter()
            .filter(|(code, _)| !diff.to_drop.contains(*code))
            .fold(0, |total, (_, credits)| total.saturating_add(*credits));

        if diff.is_empty() {
            debug!("Reconcile for {student_id}: selection matches enrollment, nothing to do");
            report.total_credits = running;
            return report;
        }

        info!(
            "Reconciling {student_id}: {} to enroll, {} to drop",
            diff.to_enroll.len(),
            diff.to_drop.len()
        );

        // Drops first: a drop that fails keeps its credits counted
        for code in &diff.to_drop {
            match self.store.delete_enrollment(student_id, code) {
                Ok(()) => {
                    debug!("Dropped {code} for {student_id}");
                    report.dropped.push(code.clone());
                    self.refresh_timetable(student_id);
                }
                Err(error) => {
                    warn!("Failed to drop {code} for {student_id}: {error}");
                    running = running.saturating_add(held.get(code).copied().unwrap_or(0));
                    report.failures.push(ItemFailure {
                        code: code.clone(),
                        operation: Operation::Drop,
                        error,
                    });
                }
            }
        }

        for code in &diff.to_enroll {
            match self.try_enroll(student_id, code, running) {
                Ok(credits) => {
                    debug!("Enrolled {student_id} in {code}");
                    running = running.saturating_add(credits);
                    report.enrolled.push(code.clone());
                    self.refresh_timetable(student_id);
                }
                Err(error) => {
                    warn!("Could not enroll {student_id} in {code}: {error}");
                    report.failures.push(ItemFailure {
                        code: code.clone(),
                        operation: Operation::Enroll,
                        error,
                    });
                }
            }
        }

        report.total_credits = running;
        info!(
            "Reconciled {student_id}: {} enrolled, {} dropped, {} failed, {} credits",
            report.enrolled_count(),
            report.dropped_count(),
            report.failures.len(),
            report.total_credits
        );
        report
    }

    /// Check and write one enrollment; returns the credits added
    fn try_enroll(&self, student_id: &str, code: &str, running: u32) -> Result<u32, EnrollmentError> {
        let course = self.catalog.course_by_code(code)?;
        let proposed = running.saturating_add(course.credits);
        if proposed > self.credit_ceiling {
            return Err(EnrollmentError::CreditLimitExceeded {
                limit: self.credit_ceiling,
                proposed,
            });
        }
        let record = EnrollmentRecord::new(course, Utc::now());
        self.store.put_enrollment(student_id, code, &record)?;
        Ok(course.credits)
    }

    /// Rebuild and store the timetable; failures are logged, not returned
    fn refresh_timetable(&self, student_id: &str) {
        let result = self.store.enrolled_records(student_id).and_then(|records| {
            let timetable = derive_timetable(records.iter().map(|r| &r.course));
            self.store.put_timetable(student_id, &timetable)
        });
        if let Err(e) = result {
            warn!("Failed to update timetable for {student_id}: {e}");
        }
    }

    /// Enroll a student in a single course.
    ///
    /// # Errors
    /// `StudentNotFound`, `CourseNotFound`, `AlreadyEnrolled`,
    /// `CreditLimitExceeded`, or `Storage` if the write fails
    pub fn enroll(&self, student_id: &str, code: &str) -> Result<EnrollmentRecord, EnrollmentError> {
        self.serialized(student_id, || {
            let records = self.store.enrolled_records(student_id)?;
            let course = self.catalog.course_by_code(code)?;
            if records.iter().any(|r| r.code() == code) {
                return Err(EnrollmentError::AlreadyEnrolled {
                    code: code.to_string(),
                });
            }

            let proposed =
                total_credits(records.iter().map(|r| &r.course)).saturating_add(course.credits);
            if proposed > self.credit_ceiling {
                return Err(EnrollmentError::CreditLimitExceeded {
                    limit: self.credit_ceiling,
                    proposed,
                });
            }

            let record = EnrollmentRecord::new(course, Utc::now());
            self.store.put_enrollment(student_id, code, &record)?;
            self.refresh_timetable(student_id);
            info!("Enrolled {student_id} in {code} ({proposed} credits)");
            Ok(record)
        })
    }

    /// Drop a single course; returns the student's new credit total.
    ///
    /// # Errors
    /// `StudentNotFound`, `NotEnrolled`, or `Storage` if the write fails
    pub fn drop_course(&self, student_id: &str, code: &str) -> Result<u32, EnrollmentError> {
        self.serialized(student_id, || {
            let records = self.store.enrolled_records(student_id)?;
            if !records.iter().any(|r| r.code() == code) {
                return Err(EnrollmentError::NotEnrolled {
                    code: code.to_string(),
                });
            }

            self.store.delete_enrollment(student_id, code)?;
            self.refresh_timetable(student_id);

            let remaining = total_credits(
                records
                    .iter()
                    .filter(|r| r.code() != code)
                    .map(|r| &r.course),
            );
            info!("Dropped {code} for {student_id} ({remaining} credits)");
            Ok(remaining)
        })
    }

    /// A student's records and credit total
    ///
    /// # Errors
    /// `StudentNotFound` if the student has no record
    pub fn enrolled_courses(&self, student_id: &str) -> Result<EnrolledCourses, EnrollmentError> {
        let records = self.store.enrolled_records(student_id)?;
        let total = total_credits(records.iter().map(|r| &r.course));
        Ok(EnrolledCourses {
            records,
            total_credits: total,
        })
    }

    /// Whether the student holds `code`
    ///
    /// # Errors
    /// `StudentNotFound` if the student has no record
    pub fn is_enrolled(&self, student_id: &str, code: &str) -> Result<bool, EnrollmentError> {
        Ok(self.store.get_enrolled(student_id)?.contains(code))
    }

    /// Check whether `additional` credits would fit under the ceiling
    ///
    /// # Errors
    /// `StudentNotFound` if the student has no record
    pub fn credit_check(&self, student_id: &str, additional: u32) -> Result<CreditCheck, EnrollmentError> {
        let current = self.enrolled_courses(student_id)?.total_credits;
        Ok(CreditCheck::new(current, additional, self.credit_ceiling))
    }

    /// The timetable derived from the student's current records
    ///
    /// # Errors
    /// `StudentNotFound` if the student has no record
    pub fn timetable(&self, student_id: &str) -> Result<Timetable, EnrollmentError> {
        let records = self.store.enrolled_records(student_id)?;
        Ok(derive_timetable(records.iter().map(|r| &r.course)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;

    fn codes(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|c| (*c).to_string()).collect()
    }

    fn reconciler() -> Reconciler<MemoryStore> {
        Reconciler::new(Arc::new(Catalog::builtin()), MemoryStore::with_students(&["s1"]))
    }

    #[test]
    fn test_diff_between() {
        let diff = SelectionDiff::between(&codes(&["CS101", "CS102"]), &codes(&["CS102", "CS201"]));
        assert_eq!(diff.to_enroll, codes(&["CS201"]));
        assert_eq!(diff.to_drop, codes(&["CS101"]));
        assert_eq!(diff.len(), 2);
    }

    #[test]
    fn test_diff_identical_sets_is_empty() {
        let set = codes(&["CS101", "MATH101"]);
        assert!(SelectionDiff::between(&set, &set).is_empty());
    }

    #[test]
    fn test_unknown_student_is_fatal() {
        let reconciler = reconciler();
        let err = reconciler
            .reconcile("ghost", &SelectionSet::from_codes(["CS101"]))
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_unknown_course_is_per_item() {
        let reconciler = reconciler();
        let report = reconciler
            .reconcile("s1", &SelectionSet::from_codes(["CS101", "BIO999"]))
            .unwrap();

        assert_eq!(report.enrolled, vec!["CS101".to_string()]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].to_string(), "BIO999: course not found");
        assert_eq!(report.outcome(), ReconcileOutcome::PartiallySucceeded);
    }

    #[test]
    fn test_drop_frees_headroom_in_same_batch() {
        let reconciler = reconciler().with_credit_ceiling(8);
        reconciler
            .reconcile("s1", &SelectionSet::from_codes(["CS201", "CS301"]))
            .unwrap();

        // Swapping CS301 for CS302 fits because CS301's credits are released first
        let report = reconciler
            .reconcile("s1", &SelectionSet::from_codes(["CS201", "CS302"]))
            .unwrap();
        assert_eq!(report.outcome(), ReconcileOutcome::Succeeded);
        assert_eq!(report.total_credits, 8);
    }

    #[test]
    fn test_outcome_for_empty_report() {
        let report = ReconcileReport::new("s1");
        assert_eq!(report.attempted(), 0);
        assert_eq!(report.outcome(), ReconcileOutcome::Succeeded);
    }

    #[test]
    fn test_single_enroll_errors() {
        let reconciler = reconciler();
        reconciler.enroll("s1", "CS101").unwrap();

        assert_eq!(
            reconciler.enroll("s1", "CS101"),
            Err(EnrollmentError::AlreadyEnrolled {
                code: "CS101".to_string()
            })
        );
        assert!(matches!(
            reconciler.enroll("s1", "NOPE1"),
            Err(EnrollmentError::CourseNotFound { .. })
        ));
        assert!(matches!(
            reconciler.drop_course("s1", "CS102"),
            Err(EnrollmentError::NotEnrolled { .. })
        ));
    }

    #[test]
    fn test_single_enroll_respects_ceiling() {
        let reconciler = reconciler().with_credit_ceiling(6);
        reconciler.enroll("s1", "CS101").unwrap();
        assert_eq!(
            reconciler.enroll("s1", "CS201"),
            Err(EnrollmentError::CreditLimitExceeded {
                limit: 6,
                proposed: 7
            })
        );
        assert_eq!(reconciler.drop_course("s1", "CS101"), Ok(0));
    }
}
