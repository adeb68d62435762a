//! JSON file-backed enrollment store
//!
//! Layout under the data directory:
//!
//! ```text
//! <data_dir>/students/<student_id>.json
//! <data_dir>/students/<student_id>.lock
//! ```
//!
//! Each `.json` file holds one [`StudentRecord`]. Writes go to a sibling temp
//! file that is renamed over the original, so a reader never sees a torn
//! document. The `.lock` file carries an advisory lock taken by
//! [`EnrollmentStore::exclusive`], which keeps two processes sharing a data
//! directory from interleaving their updates to the same student.

use super::{EnrollmentStore, StudentRecord};
use crate::core::error::EnrollmentError;
use crate::core::models::EnrollmentRecord;
use crate::core::timetable::Timetable;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Store that keeps one JSON document per student
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (or create) a store rooted at `data_dir`
    ///
    /// # Errors
    /// Returns `Storage` if the students directory cannot be created
    pub fn open(data_dir: &Path) -> Result<Self, EnrollmentError> {
        let root = data_dir.to_path_buf();
        fs::create_dir_all(root.join("students"))?;
        Ok(Self { root })
    }

    /// Directory the store writes to
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// IDs of all registered students, sorted
    ///
    /// # Errors
    /// Returns `Storage` if the students directory cannot be listed
    pub fn student_ids(&self) -> Result<Vec<String>, EnrollmentError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(self.root.join("students"))? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn student_path(&self, student_id: &str) -> Result<PathBuf, EnrollmentError> {
        validate_student_id(student_id)?;
        Ok(self
            .root
            .join("students")
            .join(format!("{student_id}.json")))
    }

    fn read(&self, student_id: &str) -> Result<StudentRecord, EnrollmentError> {
        let path = self.student_path(student_id)?;
        if !path.exists() {
            return Err(EnrollmentError::StudentNotFound {
                student_id: student_id.to_string(),
            });
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, record: &StudentRecord) -> Result<(), EnrollmentError> {
        let path = self.student_path(&record.student_id)?;
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn update(
        &self,
        student_id: &str,
        f: impl FnOnce(&mut StudentRecord),
    ) -> Result<(), EnrollmentError> {
        let mut record = self.read(student_id)?;
        f(&mut record);
        self.write(&record)
    }
}

/// Student IDs become file names, so only a conservative character set is allowed.
fn validate_student_id(student_id: &str) -> Result<(), EnrollmentError> {
    let valid = !student_id.is_empty()
        && !student_id.starts_with('.')
        && student_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(EnrollmentError::InvalidStudentId {
            student_id: student_id.to_string(),
        })
    }
}

impl EnrollmentStore for FileStore {
    fn register_student(&self, student_id: &str) -> Result<(), EnrollmentError> {
        if self.student_path(student_id)?.exists() {
            return Err(EnrollmentError::StudentExists {
                student_id: student_id.to_string(),
            });
        }
        self.write(&StudentRecord::new(student_id))
    }

    fn enrolled_records(&self, student_id: &str) -> Result<Vec<EnrollmentRecord>, EnrollmentError> {
        Ok(self
            .read(student_id)?
            .enrolled_courses
            .into_values()
            .collect())
    }

    fn put_enrollment(
        &self,
        student_id: &str,
        code: &str,
        record: &EnrollmentRecord,
    ) -> Result<(), EnrollmentError> {
        self.update(student_id, |s| {
            s.enrolled_courses.insert(code.to_string(), record.clone());
        })
    }

    fn delete_enrollment(&self, student_id: &str, code: &str) -> Result<(), EnrollmentError> {
        self.update(student_id, |s| {
            s.enrolled_courses.remove(code);
        })
    }

    fn put_timetable(&self, student_id: &str, timetable: &Timetable) -> Result<(), EnrollmentError> {
        self.update(student_id, |s| s.timetable = timetable.clone())
    }

    fn stored_timetable(&self, student_id: &str) -> Result<Timetable, EnrollmentError> {
        Ok(self.read(student_id)?.timetable)
    }

    fn exclusive<T>(
        &self,
        student_id: &str,
        f: impl FnOnce() -> Result<T, EnrollmentError>,
    ) -> Result<T, EnrollmentError> {
        let path = self.student_path(student_id)?;
        if !path.exists() {
            // Nothing to guard; `f` reports the missing student
            return f();
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path.with_extension("lock"))?;
        lock_file.lock()?;
        let result = f();
        drop(lock_file);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_student_id() {
        assert!(validate_student_id("sap-70012345").is_ok());
        assert!(validate_student_id("jane.doe_2").is_ok());
        assert!(validate_student_id("").is_err());
        assert!(validate_student_id("../etc/passwd").is_err());
        assert!(validate_student_id(".hidden").is_err());
        assert!(validate_student_id("a/b").is_err());
    }

    #[test]
    fn test_exclusive_locks_registered_students_only() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        let students = temp_dir.path().join("students");

        assert_eq!(store.exclusive("ghost", || Ok(1)), Ok(1));
        assert!(!students.join("ghost.lock").exists());

        store.register_student("s1").unwrap();
        let codes = store.exclusive("s1", || store.get_enrolled("s1")).unwrap();
        assert!(codes.is_empty());
        assert!(students.join("s1.lock").exists());
        assert_eq!(store.student_ids().unwrap(), vec!["s1".to_string()]);
    }
}
