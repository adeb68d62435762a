//! Selection set model
//!
//! A `SelectionSet` is the set of course codes a student wants to hold after
//! saving. It is never mutated in place: toggling a code yields a new set.

use crate::core::catalog::Catalog;
use crate::core::credits::total_credits;
use crate::core::error::EnrollmentError;
use std::collections::BTreeSet;
use std::fmt;

/// Display label for a course relative to the current enrollment and selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    /// Enrolled now and still selected
    CurrentlyEnrolled,
    /// Enrolled now but deselected
    WillBeDropped,
    /// Not enrolled yet but selected
    SelectedForEnrollment,
    /// Neither enrolled nor selected
    Available,
}

impl fmt::Display for SelectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CurrentlyEnrolled => "Currently Enrolled",
            Self::WillBeDropped => "Will be Dropped",
            Self::SelectedForEnrollment => "Selected for Enrollment",
            Self::Available => "Available",
        };
        write!(f, "{label}")
    }
}

/// Immutable set of selected course codes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    codes: BTreeSet<String>,
}

impl SelectionSet {
    /// Create an empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            codes: BTreeSet::new(),
        }
    }

    /// Build a selection from any collection of codes (duplicates collapse)
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Selected codes in ascending order
    #[must_use]
    pub const fn codes(&self) -> &BTreeSet<String> {
        &self.codes
    }

    /// Whether `code` is selected
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Number of selected codes
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Total credits of the selected courses known to `catalog`
    #[must_use]
    pub fn total_credits(&self, catalog: &Catalog) -> u32 {
        total_credits(self.codes.iter().filter_map(|code| catalog.get(code)))
    }

    /// Return a new selection with `code` flipped.
    ///
    /// Removing always succeeds. Adding checks that the course exists and that
    /// the selection's total stays within `credit_ceiling`.
    ///
    /// # Errors
    /// `CourseNotFound` for unknown codes, `CreditLimitExceeded` when adding
    /// would push the selection past the ceiling.
    pub fn toggled(
        &self,
        code: &str,
        catalog: &Catalog,
        credit_ceiling: u32,
    ) -> Result<Self, EnrollmentError> {
        let mut codes = self.codes.clone();
        if codes.remove(code) {
            return Ok(Self { codes });
        }

        let course = catalog.course_by_code(code)?;
        let proposed = self.total_credits(catalog).saturating_add(course.credits);
        if proposed > credit_ceiling {
            return Err(EnrollmentError::CreditLimitExceeded {
                limit: credit_ceiling,
                proposed,
            });
        }

        codes.insert(code.to_string());
        Ok(Self { codes })
    }

    /// Label `code` relative to the student's currently enrolled codes
    #[must_use]
    pub fn status_of(&self, code: &str, enrolled: &BTreeSet<String>) -> SelectionStatus {
        match (enrolled.contains(code), self.contains(code)) {
            (true, true) => SelectionStatus::CurrentlyEnrolled,
            (true, false) => SelectionStatus::WillBeDropped,
            (false, true) => SelectionStatus::SelectedForEnrollment,
            (false, false) => SelectionStatus::Available,
        }
    }
}

impl From<BTreeSet<String>> for SelectionSet {
    fn from(codes: BTreeSet<String>) -> Self {
        Self { codes }
    }
}
