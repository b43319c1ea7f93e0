//! Mock page store for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::storage::{PageStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock page store for testing.
///
/// Stores pages in memory. Use the builder methods to configure the mock with
/// test data.
///
/// # Example
///
/// ```ignore
/// use lw_storage::{MockStorage, PageStore};
///
/// let store = MockStorage::new().with_page("alpha", "hello");
///
/// assert_eq!(store.load("alpha").unwrap(), b"hello");
/// assert_eq!(store.list().unwrap(), vec!["alpha"]);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    pages: RwLock<BTreeMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MockStorage {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given title and body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(title.into(), body.into());
        self
    }

    /// Make every subsequent [`save`](PageStore::save) fail.
    #[must_use]
    pub fn with_failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Number of stored pages.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.read().unwrap().len()
    }

    /// Whether the store holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PageStore for MockStorage {
    fn load(&self, title: &str) -> Result<Vec<u8>, StorageError> {
        self.pages
            .read()
            .unwrap()
            .get(title)
            .cloned()
            .ok_or_else(|| StorageError::new(BACKEND, StorageErrorKind::NotFound).for_title(title))
    }

    fn save(&self, title: &str, body: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new(BACKEND, StorageErrorKind::Unavailable).for_title(title));
        }
        self.pages
            .write()
            .unwrap()
            .insert(title.to_owned(), body.to_vec());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.pages.read().unwrap().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mock_load_missing() {
        let store = MockStorage::new();

        let err = store.load("alpha").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.backend, "Mock");
        assert_eq!(err.title.as_deref(), Some("alpha"));
    }

    #[test]
    fn test_mock_save_then_load() {
        let store = MockStorage::new();

        store.save("alpha", b"hello").unwrap();

        assert_eq!(store.load("alpha").unwrap(), b"hello".to_vec());
        assert!(store.exists("alpha"));
    }

    #[test]
    fn test_mock_save_overwrites() {
        let store = MockStorage::new().with_page("alpha", "old");

        store.save("alpha", b"new").unwrap();

        assert_eq!(store.load("alpha").unwrap(), b"new".to_vec());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_mock_list_sorted() {
        let store = MockStorage::new()
            .with_page("zeta", "")
            .with_page("alpha", "")
            .with_page("index", "");

        assert_eq!(store.list().unwrap(), vec!["alpha", "index", "zeta"]);
    }

    #[test]
    fn test_mock_failing_writes_keep_previous_body() {
        let store = MockStorage::new()
            .with_page("alpha", "kept")
            .with_failing_writes();

        let err = store.save("alpha", b"lost").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::Unavailable);
        assert_eq!(store.load("alpha").unwrap(), b"kept".to_vec());
    }
}
