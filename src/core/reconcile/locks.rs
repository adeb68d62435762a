//! Per-student serialization

use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of one mutex per student.
///
/// Work for the same student runs one call at a time; different students
/// never contend. A student's entry lives only while some call holds or
/// waits for it.
#[derive(Debug, Default)]
pub struct StudentLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl StudentLocks {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding `student_id`'s lock
    pub fn with_student<T>(&self, student_id: &str, f: impl FnOnce() -> T) -> T {
        // Clone the Arc out so the map shard is released before blocking
        let lock = Arc::clone(self.locks.entry(student_id.to_string()).or_default().value());
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        drop(lock);

        // Only the map's own reference left: nobody else holds or waits
        self.locks
            .remove_if(student_id, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    /// Number of students currently locked or waited on
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no student is currently locked or waited on
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_same_student_is_serialized() {
        let locks = Arc::new(StudentLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    locks.with_student("s1", || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(5));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_entry_held_only_while_in_use() {
        let locks = StudentLocks::new();
        let seen_inside = locks.with_student("s1", || locks.len());
        assert_eq!(seen_inside, 1);
        assert!(locks.is_empty());

        for id in ["a", "b", "c"] {
            locks.with_student(id, || ());
        }
        assert_eq!(locks.len(), 0);
    }

    #[test]
    fn test_returns_closure_value() {
        let locks = StudentLocks::new();
        assert!(locks.is_empty());
        assert_eq!(locks.with_student("s1", || 42), 42);
    }
}
