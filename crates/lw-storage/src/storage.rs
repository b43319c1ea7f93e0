//! Page store trait and error types.
//!
//! Provides the core [`PageStore`] trait for loading, saving and listing pages,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Title Convention
//!
//! All title parameters are page titles as they appear in URLs (`"alpha"`,
//! `"index"`, `"lotto"`), never file paths. Backends map titles to their own
//! storage keys and reject titles they cannot represent with
//! [`StorageErrorKind::InvalidTitle`].

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// No page is stored under the title.
    NotFound,
    /// The backend refused access.
    PermissionDenied,
    /// The title can't be represented by this backend.
    InvalidTitle,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Operation timed out.
    Timeout,
    /// Anything else.
    Other,
}

impl StorageErrorKind {
    fn describe(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::InvalidTitle => "invalid title",
            Self::Unavailable => "unavailable",
            Self::Timeout => "timed out",
            Self::Other => "failed",
        }
    }
}

impl From<io::ErrorKind> for StorageErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::TimedOut => Self::Timeout,
            io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => Self::Unavailable,
            _ => Self::Other,
        }
    }
}

/// Storage failure reported by a [`PageStore`] backend.
///
/// Carries the semantic kind plus whatever context the backend has: the page
/// title, the backend's own location for it, and the underlying error.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: &'static str,
    /// Page title the operation was for.
    pub title: Option<String>,
    /// Backend location (file or directory) involved.
    pub path: Option<PathBuf>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create an error of `kind` raised by `backend`.
    #[must_use]
    pub fn new(backend: &'static str, kind: StorageErrorKind) -> Self {
        Self {
            kind,
            backend,
            title: None,
            path: None,
            source: None,
        }
    }

    /// Create an error from an I/O failure, classifying it by its kind.
    #[must_use]
    pub fn from_io(backend: &'static str, err: io::Error) -> Self {
        Self::new(backend, err.kind().into()).caused_by(err)
    }

    /// Attach the page title.
    #[must_use]
    pub fn for_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach the backend location.
    #[must_use]
    pub fn at(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the underlying error.
    #[must_use]
    pub fn caused_by(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether this error means the page simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // [Fs] not found: page "alpha" at data/alpha.txt: <source>
        write!(f, "[{}] {}", self.backend, self.kind.describe())?;
        if let Some(title) = &self.title {
            write!(f, ": page {title:?}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " at {}", path.display())?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

/// Page persistence abstraction.
///
/// Implementations must give read-after-write consistency for a single title and
/// replace a page's body atomically on [`save`](PageStore::save).
pub trait PageStore: Send + Sync {
    /// Load the body of a page.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with kind [`StorageErrorKind::NotFound`] if no page
    /// exists under `title`, or another kind if the page can't be read.
    fn load(&self, title: &str) -> Result<Vec<u8>, StorageError>;

    /// Persist a page body, overwriting any previous body for `title`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails. A failed save leaves the
    /// previous body (if any) untouched.
    fn save(&self, title: &str, body: &[u8]) -> Result<(), StorageError>;

    /// List the titles of all stored pages, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend can't be enumerated.
    fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Check if a page exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, title: &str) -> bool {
        self.load(title).is_ok()
    }
}
