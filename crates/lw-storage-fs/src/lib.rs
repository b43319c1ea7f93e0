//! Filesystem page store for LW.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`PageStore`](lw_storage::PageStore) trait. Each page is one file,
//! `<data_dir>/<title>.txt`, holding the raw page body.
//!
//! Writes go to a temporary file inside the data directory which is then renamed
//! over the target, so readers see either the old body or the new one, never a
//! partial write. Temporary files are created owner-only (`0600` on Unix).
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use lw_storage::PageStore;
//! use lw_storage_fs::FsStorage;
//!
//! let store = FsStorage::new(PathBuf::from("data"));
//! store.save("alpha", b"hello")?;
//! for title in store.list()? {
//!     println!("{title}");
//! }
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use lw_storage::{PageStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File extension of page files.
const EXTENSION: &str = "txt";

/// Filesystem page store.
///
/// Maps every title to `<data_dir>/<title>.txt`. The data directory is created on
/// first save; a missing directory reads as an empty store.
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Directory holding page files.
    data_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem store rooted at `data_dir`.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory holding page files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Reject titles that would escape the data directory or name a hidden file.
    fn validate_title(title: &str) -> Result<(), StorageError> {
        let invalid = title.is_empty()
            || title.starts_with('.')
            || title.contains(['/', '\\', '\0'])
            || title.contains("..");
        if invalid {
            return Err(StorageError::new(BACKEND, StorageErrorKind::InvalidTitle).for_title(title));
        }
        Ok(())
    }

    /// File path for a page title.
    fn page_path(&self, title: &str) -> PathBuf {
        self.data_dir.join(format!("{title}.{EXTENSION}"))
    }

    /// Write `body` to a temporary file and rename it over `target`.
    fn write_atomic(&self, target: &Path, body: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(target).map_err(|e| e.error)?;
        Ok(())
    }
}

impl PageStore for FsStorage {
    fn load(&self, title: &str) -> Result<Vec<u8>, StorageError> {
        Self::validate_title(title)?;
        let path = self.page_path(title);
        tracing::debug!(title, path = %path.display(), "Loading page");
        fs::read(&path).map_err(|e| StorageError::from_io(BACKEND, e).for_title(title).at(path))
    }

    fn save(&self, title: &str, body: &[u8]) -> Result<(), StorageError> {
        Self::validate_title(title)?;
        let path = self.page_path(title);
        tracing::debug!(title, path = %path.display(), bytes = body.len(), "Saving page");
        self.write_atomic(&path, body)
            .map_err(|e| StorageError::from_io(BACKEND, e).for_title(title).at(path))
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        if !self.data_dir.is_dir() {
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/*.{EXTENSION}",
            glob::Pattern::escape(&self.data_dir.to_string_lossy())
        );
        let entries = glob::glob(&pattern).map_err(|e| {
            StorageError::new(BACKEND, StorageErrorKind::Other)
                .at(&self.data_dir)
                .caused_by(e)
        })?;

        let mut titles: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .filter_map(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .filter(|title| !title.starts_with('.'))
            .collect();
        titles.sort();
        Ok(titles)
    }
}
