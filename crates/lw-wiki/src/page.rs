//! Wiki page model.

use std::borrow::Cow;

use lw_storage::{PageStore, StorageError};

/// A titled body of pre-formatted markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Page title (URL segment and storage key).
    pub title: String,
    /// Raw page body.
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Create a page with an empty body.
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Load a page from the store.
    ///
    /// # Errors
    ///
    /// Returns the store's error, including `NotFound` for unknown titles.
    pub fn load(store: &dyn PageStore, title: &str) -> Result<Self, StorageError> {
        tracing::debug!(title, "Loading page");
        let body = store.load(title)?;
        Ok(Self::new(title, body))
    }

    /// Persist this page, replacing any previous body.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails.
    pub fn save(&self, store: &dyn PageStore) -> Result<(), StorageError> {
        tracing::debug!(title = %self.title, bytes = self.body.len(), "Saving page");
        store.save(&self.title, &self.body)
    }
}
