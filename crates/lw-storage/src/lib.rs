//! Page store abstraction for LW.
//!
//! This crate provides a [`PageStore`] trait for abstracting page persistence from the
//! underlying backend. Pages are opaque byte blobs addressed by title; the store
//! guarantees one record per title and whole-record overwrite on save.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`PageStore`] trait with `load()`, `save()`, and `list()` methods
//! - [`StorageError`] with a semantic [`StorageErrorKind`] shared by all backends
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in `lw-storage-fs`.
//!
//! # Example
//!
//! ```ignore
//! use lw_storage::PageStore;
//! use lw_storage_fs::FsStorage;
//!
//! let store = FsStorage::new("data".into());
//! store.save("alpha", b"hello")?;
//! assert_eq!(store.load("alpha")?, b"hello");
//! ```

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{PageStore, StorageError, StorageErrorKind};
