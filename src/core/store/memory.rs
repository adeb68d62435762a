//! In-memory enrollment store

use super::{EnrollmentStore, StudentRecord};
use crate::core::error::EnrollmentError;
use crate::core::models::EnrollmentRecord;
use crate::core::timetable::Timetable;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Process-local store backed by a mutex-guarded map
#[derive(Debug, Default)]
pub struct MemoryStore {
    students: Mutex<HashMap<String, StudentRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the given students already registered
    #[must_use]
    pub fn with_students(student_ids: &[&str]) -> Self {
        let students = student_ids
            .iter()
            .map(|id| ((*id).to_string(), StudentRecord::new(id)))
            .collect();
        Self {
            students: Mutex::new(students),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, StudentRecord>>, EnrollmentError> {
        self.students.lock().map_err(|_| EnrollmentError::Storage {
            message: "memory store lock poisoned".to_string(),
        })
    }

    fn with_student<T>(
        &self,
        student_id: &str,
        f: impl FnOnce(&mut StudentRecord) -> T,
    ) -> Result<T, EnrollmentError> {
        let mut students = self.lock()?;
        let record = students
            .get_mut(student_id)
            .ok_or_else(|| EnrollmentError::StudentNotFound {
                student_id: student_id.to_string(),
            })?;
        Ok(f(record))
    }
}

impl EnrollmentStore for MemoryStore {
    fn register_student(&self, student_id: &str) -> Result<(), EnrollmentError> {
        let mut students = self.lock()?;
        if students.contains_key(student_id) {
            return Err(EnrollmentError::StudentExists {
                student_id: student_id.to_string(),
            });
        }
        students.insert(student_id.to_string(), StudentRecord::new(student_id));
        Ok(())
    }

    fn enrolled_records(&self, student_id: &str) -> Result<Vec<EnrollmentRecord>, EnrollmentError> {
        self.with_student(student_id, |s| {
            s.enrolled_courses.values().cloned().collect()
        })
    }

    fn put_enrollment(
        &self,
        student_id: &str,
        code: &str,
        record: &EnrollmentRecord,
    ) -> Result<(), EnrollmentError> {
        self.with_student(student_id, |s| {
            s.enrolled_courses.insert(code.to_string(), record.clone());
        })
    }

    fn delete_enrollment(&self, student_id: &str, code: &str) -> Result<(), EnrollmentError> {
        self.with_student(student_id, |s| {
            s.enrolled_courses.remove(code);
        })
    }

    fn put_timetable(&self, student_id: &str, timetable: &Timetable) -> Result<(), EnrollmentError> {
        self.with_student(student_id, |s| s.timetable = timetable.clone())
    }

    fn stored_timetable(&self, student_id: &str) -> Result<Timetable, EnrollmentError> {
        self.with_student(student_id, |s| s.timetable.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;
    use chrono::Utc;

    fn record(code: &str) -> EnrollmentRecord {
        let course = Course::new(code.to_string(), code.to_string(), 3, String::new());
        EnrollmentRecord::new(&course, Utc::now())
    }

    #[test]
    fn test_unknown_student() {
        let store = MemoryStore::new();
        assert_eq!(
            store.get_enrolled("nobody"),
            Err(EnrollmentError::StudentNotFound {
                student_id: "nobody".to_string()
            })
        );
    }

    #[test]
    fn test_register_twice() {
        let store = MemoryStore::new();
        store.register_student("s1").unwrap();
        assert!(matches!(
            store.register_student("s1"),
            Err(EnrollmentError::StudentExists { .. })
        ));
    }

    #[test]
    fn test_put_and_delete() {
        let store = MemoryStore::with_students(&["s1"]);
        store.put_enrollment("s1", "CS101", &record("CS101")).unwrap();
        store.put_enrollment("s1", "CS102", &record("CS102")).unwrap();

        let enrolled = store.get_enrolled("s1").unwrap();
        assert_eq!(enrolled.len(), 2);

        store.delete_enrollment("s1", "CS101").unwrap();
        // Deleting again is a no-op
        store.delete_enrollment("s1", "CS101").unwrap();
        let enrolled = store.get_enrolled("s1").unwrap();
        assert!(enrolled.contains("CS102"));
        assert!(!enrolled.contains("CS101"));
    }
}
