//! Static asset lookup for LW.
//!
//! Assets are served under `/static/` and come from one of two places:
//!
//! - **`embed` feature on**: the repository's `static/` directory, compiled
//!   into the binary via `rust-embed`
//! - **`embed` feature off**: the configured static directory, read at runtime
//!
//! Asset paths are relative and slash-separated. Paths that could escape the
//! asset root are never resolved.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Embedded static assets (only available with `embed` feature).
#[cfg(feature = "embed")]
#[derive(rust_embed::RustEmbed)]
#[folder = "../../static"]
#[prefix = ""]
struct Assets;

/// Source of static assets.
#[derive(Debug, Clone)]
pub struct AssetSource {
    dir: PathBuf,
}

impl AssetSource {
    /// Create an asset source rooted at `dir`.
    ///
    /// With the `embed` feature, `dir` is ignored and embedded assets are used.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Asset root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get an asset by relative path.
    ///
    /// Returns `None` if the asset doesn't exist or the path is not a plain
    /// relative path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        if !is_safe_path(path) {
            tracing::debug!(path, "Rejected asset path");
            return None;
        }
        self.load(path)
    }

    #[cfg(feature = "embed")]
    fn load(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        Assets::get(path).map(|f| f.data)
    }

    #[cfg(not(feature = "embed"))]
    fn load(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        let full_path = self.dir.join(path);
        if !full_path.is_file() {
            return None;
        }
        std::fs::read(&full_path).ok().map(Cow::Owned)
    }
}

/// Return the MIME type for the given file path.
#[must_use]
pub fn mime_for(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// Whether every segment of `path` is a normal file or directory name.
fn is_safe_path(path: &str) -> bool {
    !path.is_empty()
        && !path.contains('\\')
        && !path.contains('\0')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_known_types() {
        assert_eq!(mime_for("style.css"), "text/css");
        assert_eq!(mime_for("app.js"), "text/javascript");
        assert_eq!(mime_for("image.png"), "image/png");
    }

    #[test]
    fn test_mime_for_unknown_type() {
        assert_eq!(mime_for("file.unknown_ext_xyz"), "application/octet-stream");
    }

    #[test]
    fn test_is_safe_path() {
        assert!(is_safe_path("style.css"));
        assert!(is_safe_path("img/logo.png"));
        assert!(!is_safe_path(""));
        assert!(!is_safe_path("../secret.txt"));
        assert!(!is_safe_path("img/../../secret.txt"));
        assert!(!is_safe_path("/etc/passwd"));
        assert!(!is_safe_path("img//logo.png"));
        assert!(!is_safe_path("..\\secret.txt"));
    }

    #[test]
    fn test_get_rejects_traversal() {
        let source = AssetSource::new("static");

        assert!(source.get("../Cargo.toml").is_none());
    }

    #[cfg(not(feature = "embed"))]
    #[test]
    fn test_get_reads_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();
        std::fs::write(dir.path().join("style.css"), "body {}").unwrap();
        std::fs::write(dir.path().join("img/dot.png"), [0x89, b'P']).unwrap();
        let source = AssetSource::new(dir.path());

        assert_eq!(source.get("style.css").unwrap().as_ref(), b"body {}");
        assert_eq!(source.get("img/dot.png").unwrap().as_ref(), &[0x89, b'P']);
    }

    #[cfg(not(feature = "embed"))]
    #[test]
    fn test_get_missing_or_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();
        let source = AssetSource::new(dir.path());

        assert!(source.get("missing.css").is_none());
        assert!(source.get("img").is_none());
    }

    #[cfg(feature = "embed")]
    #[test]
    fn test_get_embedded_stylesheet() {
        let source = AssetSource::new("ignored");

        assert!(source.get("style.css").is_some());
    }
}
