//! Storage trait and error types.
//!
//! [`PostStore`] abstracts post enumeration and retrieval so the site layer
//! can be tested without touching the filesystem. [`StoreError`] carries a
//! semantic kind plus path and backend context for build diagnostics.

use std::path::PathBuf;

/// One entry of the source directory.
///
/// The slug is the file name minus its trailing 4 characters (the `.mdx`
/// extension) and is used both as the URL path segment and as the lookup
/// key back to the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostFile {
    /// URL path segment derived from the file name.
    pub slug: String,
    /// File name as reported by the directory listing.
    pub file_name: String,
}

/// Semantic error categories for storage failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Directory or file does not exist.
    NotFound,
    /// Permission denied by the operating system.
    PermissionDenied,
    /// Slug or file name does not form a valid path.
    InvalidPath,
    /// Any other backend failure.
    Other,
}

impl StoreErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::InvalidPath => "invalid path",
            Self::Other => "storage error",
        }
    }
}

/// Storage error with semantic kind and backend-specific source.
///
/// Every storage failure is fatal to the build; the kind exists for
/// diagnostics, not for retry decisions.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Path context, if applicable.
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g. "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not-found error with path context.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StoreErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StoreErrorKind::PermissionDenied,
            _ => StoreErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        f.write_str(self.kind.as_str())?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction over a directory of post documents.
///
/// All operations are one-shot: there is no caching, no retry, and no
/// partial-read semantics. A failed enumeration or read aborts the build.
pub trait PostStore: Send + Sync {
    /// Enumerate all posts in directory-listing order.
    ///
    /// Returns every directory entry with its derived slug. No filtering
    /// and no recursion.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the source directory is missing or
    /// unreadable.
    fn list(&self) -> Result<Vec<PostFile>, StoreError>;

    /// Read the full UTF-8 content of the post with the given slug.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file does not exist or cannot be read.
    fn read(&self, slug: &str) -> Result<String, StoreError>;

    /// Whether a post with the given slug exists.
    ///
    /// Returns `false` on errors. Used by tooling and tests only; routing
    /// never falls back on this.
    fn exists(&self, slug: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_store_error_new() {
        let err = StoreError::new(StoreErrorKind::NotFound);

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_store_error_builders() {
        let err = StoreError::new(StoreErrorKind::Other)
            .with_path("/posts")
            .with_backend("Fs");

        assert_eq!(err.path.as_deref(), Some(Path::new("/posts")));
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_store_error_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StoreError::io(io_err, Some(PathBuf::from("/posts/a.mdx")));

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("/posts/a.mdx")));
    }

    #[test]
    fn test_store_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::io(io_err, None);

        assert_eq!(err.kind, StoreErrorKind::PermissionDenied);
    }

    #[test]
    fn test_store_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StoreError::io(io_err, Some(PathBuf::from("/posts/a.mdx"))).with_backend("Fs");

        assert_eq!(
            err.to_string(),
            "[Fs] not found: no such file (path: /posts/a.mdx)"
        );
    }

    #[test]
    fn test_store_error_display_bare() {
        let err = StoreError::new(StoreErrorKind::InvalidPath);

        assert_eq!(err.to_string(), "invalid path");
    }

    #[test]
    fn test_store_error_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StoreError::io(io_err, None);

        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_store_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
