//! Course catalog
//!
//! Read-only lookup of the courses a student may enroll in. The catalog is
//! loaded once at startup, either from the compiled-in table or from a TOML
//! file with the same shape:
//!
//! ```toml
//! [[courses]]
//! code = "CS101"
//! name = "Introduction to Programming"
//! credits = 3
//! schedule = "Mon/Wed 9:00-10:30 AM"
//! ```

use crate::core::credits::MAX_COURSE_CREDITS;
use crate::core::error::EnrollmentError;
use crate::core::models::Course;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Compiled-in course table
const DEFAULT_CATALOG: &str = include_str!("../assets/DefaultCatalog.toml");

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    courses: Vec<Course>,
}

/// Course lookup keyed by course code
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: BTreeMap<String, Course>,
}

impl Catalog {
    /// Build a catalog from a list of courses
    ///
    /// # Errors
    /// Returns `Catalog` if a code is empty or repeated, or a course has zero
    /// credits or more than [`MAX_COURSE_CREDITS`]
    pub fn from_courses(courses: Vec<Course>) -> Result<Self, EnrollmentError> {
        let mut by_code = BTreeMap::new();
        for course in courses {
            if course.code.trim().is_empty() {
                return Err(EnrollmentError::Catalog {
                    message: format!("Course '{}' has an empty code", course.name),
                });
            }
            if course.credits == 0 {
                return Err(EnrollmentError::Catalog {
                    message: format!("Course {} must carry at least one credit", course.code),
                });
            }
            if course.credits > MAX_COURSE_CREDITS {
                return Err(EnrollmentError::Catalog {
                    message: format!(
                        "Course {} carries {} credits (maximum {MAX_COURSE_CREDITS})",
                        course.code, course.credits
                    ),
                });
            }
            let code = course.code.clone();
            if by_code.insert(code.clone(), course).is_some() {
                return Err(EnrollmentError::Catalog {
                    message: format!("Duplicate course code: {code}"),
                });
            }
        }
        Ok(Self { courses: by_code })
    }

    /// Parse a catalog from a TOML string
    ///
    /// # Errors
    /// Returns `Catalog` if the TOML is malformed or fails validation
    pub fn from_toml(toml_str: &str) -> Result<Self, EnrollmentError> {
        let file: CatalogFile = toml::from_str(toml_str)?;
        Self::from_courses(file.courses)
    }

    /// Load a catalog from a TOML file
    ///
    /// # Errors
    /// Returns `Catalog` if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, EnrollmentError> {
        let content = fs::read_to_string(path).map_err(|e| EnrollmentError::Catalog {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml(&content)
    }

    /// The compiled-in catalog
    ///
    /// # Panics
    /// Panics if the embedded catalog is invalid, which is a build defect
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(DEFAULT_CATALOG).expect("Failed to parse compiled-in course catalog")
    }

    /// All courses, ordered by code
    #[must_use]
    pub fn all_courses(&self) -> Vec<&Course> {
        self.courses.values().collect()
    }

    /// Look up a course by code
    ///
    /// # Errors
    /// Returns `CourseNotFound` when the code is not in the catalog
    pub fn course_by_code(&self, code: &str) -> Result<&Course, EnrollmentError> {
        self.get(code).ok_or_else(|| EnrollmentError::CourseNotFound {
            code: code.to_string(),
        })
    }

    /// Look up a course by code, returning `None` when absent
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 8);

        let cs101 = catalog.course_by_code("CS101").unwrap();
        assert_eq!(cs101.name, "Introduction to Programming");
        assert_eq!(cs101.credits, 3);
        assert_eq!(cs101.schedule, "Mon/Wed 9:00-10:30 AM");
        assert_eq!(cs101.capacity, 50);
        assert_eq!(cs101.semester, Some(1));
    }

    #[test]
    fn test_all_courses_sorted_by_code() {
        let catalog = Catalog::builtin();
        let codes: Vec<&str> = catalog
            .all_courses()
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_unknown_code() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.course_by_code("CS999"),
            Err(EnrollmentError::CourseNotFound {
                code: "CS999".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let toml_str = r#"
[[courses]]
code = "CS101"
credits = 3

[[courses]]
code = "CS101"
credits = 4
"#;
        let err = Catalog::from_toml(toml_str).unwrap_err();
        assert!(err.to_string().contains("Duplicate course code"));
    }

    #[test]
    fn test_zero_credit_course_rejected() {
        let toml_str = r#"
[[courses]]
code = "SEM100"
name = "Seminar"
"#;
        assert!(Catalog::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_oversized_credit_course_rejected() {
        let toml_str = r#"
[[courses]]
code = "CS101"
credits = 3

[[courses]]
code = "HUGE1"
credits = 4294967295
"#;
        let err = Catalog::from_toml(toml_str).unwrap_err();
        assert!(matches!(err, EnrollmentError::Catalog { .. }));
        assert!(err.to_string().contains("HUGE1"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Catalog::from_toml("[[courses]\ncode = ").unwrap_err();
        assert!(matches!(err, EnrollmentError::Catalog { .. }));
    }
}
