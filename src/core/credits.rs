//! Credit accumulation and credit-ceiling checks

use crate::core::models::Course;
use std::fmt;

/// Default maximum credit hours a student may carry at once
pub const DEFAULT_CREDIT_CEILING: u32 = 20;

/// Largest credit value a single catalog course may carry
pub const MAX_COURSE_CREDITS: u32 = 12;

/// Sum the credit hours of a set of courses.
///
/// Courses whose credits were missing or non-numeric in their source carry 0
/// and so contribute nothing. The sum saturates at `u32::MAX`.
#[must_use]
pub fn total_credits<'a, I>(courses: I) -> u32
where
    I: IntoIterator<Item = &'a Course>,
{
    courses
        .into_iter()
        .fold(0, |total: u32, c| total.saturating_add(c.credits))
}

/// Result of checking whether extra credits fit under the ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditCheck {
    /// Credits currently held
    pub current: u32,
    /// Credits held after adding the requested amount
    pub proposed: u32,
    /// Ceiling the check was made against
    pub ceiling: u32,
}

impl CreditCheck {
    /// Check `additional` credits on top of `current` against `ceiling`
    #[must_use]
    pub const fn new(current: u32, additional: u32, ceiling: u32) -> Self {
        Self {
            current,
            proposed: current.saturating_add(additional),
            ceiling,
        }
    }

    /// Whether the proposed total is within the ceiling
    #[must_use]
    pub const fn can_enroll(&self) -> bool {
        self.proposed <= self.ceiling
    }
}

impl fmt::Display for CreditCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.can_enroll() {
            write!(f, "You can enroll ({}/{} credits)", self.proposed, self.ceiling)
        } else {
            write!(
                f,
                "Credit limit exceeded! ({}/{} credits)",
                self.proposed, self.ceiling
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, credits: u32) -> Course {
        Course::new(code.to_string(), code.to_string(), credits, String::new())
    }

    #[test]
    fn test_total_credits() {
        let courses = vec![course("CS101", 3), course("MATH101", 4)];
        assert_eq!(total_credits(&courses), 7);
    }

    #[test]
    fn test_total_credits_empty() {
        let courses: Vec<Course> = Vec::new();
        assert_eq!(total_credits(&courses), 0);
    }

    #[test]
    fn test_zero_credit_courses_add_nothing() {
        let courses = vec![course("CS101", 3), course("SEM100", 0)];
        assert_eq!(total_credits(&courses), 3);
    }

    #[test]
    fn test_total_credits_saturates() {
        let courses = vec![course("CS101", 3), course("HUGE1", u32::MAX)];
        assert_eq!(total_credits(&courses), u32::MAX);
        assert!(!CreditCheck::new(u32::MAX, 1, DEFAULT_CREDIT_CEILING).can_enroll());
    }

    #[test]
    fn test_credit_check_messages() {
        let ok = CreditCheck::new(16, 4, DEFAULT_CREDIT_CEILING);
        assert!(ok.can_enroll());
        assert_eq!(ok.to_string(), "You can enroll (20/20 credits)");

        let over = CreditCheck::new(19, 3, DEFAULT_CREDIT_CEILING);
        assert!(!over.can_enroll());
        assert_eq!(over.to_string(), "Credit limit exceeded! (22/20 credits)");
    }
}
