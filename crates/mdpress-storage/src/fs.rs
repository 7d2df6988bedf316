//! Filesystem storage implementation.
//!
//! [`FsStore`] reads posts from a single flat source directory. Enumeration
//! mirrors the raw directory listing; reads are one-shot UTF-8 loads.

use std::fs;
use std::path::PathBuf;

use crate::slug::slug_from_file_name;
use crate::store::{PostFile, PostStore, StoreError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File extension appended to a slug to locate its document.
const EXTENSION: &str = "mdx";

/// Filesystem storage backend.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use mdpress_storage::{FsStore, PostStore};
///
/// let store = FsStore::new(PathBuf::from("posts"));
/// let posts = store.list()?;
/// # Ok::<(), mdpress_storage::StoreError>(())
/// ```
#[derive(Debug)]
pub struct FsStore {
    /// Directory containing the post documents.
    source_dir: PathBuf,
}

impl FsStore {
    /// Create a filesystem store rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// The directory this store reads from.
    #[must_use]
    pub fn source_dir(&self) -> &std::path::Path {
        &self.source_dir
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.source_dir.join(format!("{slug}.{EXTENSION}"))
    }
}

impl PostStore for FsStore {
    fn list(&self) -> Result<Vec<PostFile>, StoreError> {
        let entries = fs::read_dir(&self.source_dir)
            .map_err(|e| StoreError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND))?;

        let mut posts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                StoreError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
            })?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            posts.push(PostFile {
                slug: slug_from_file_name(&file_name),
                file_name,
            });
        }

        tracing::debug!(dir = %self.source_dir.display(), count = posts.len(), "listed posts");
        Ok(posts)
    }

    fn read(&self, slug: &str) -> Result<String, StoreError> {
        let path = self.post_path(slug);
        fs::read_to_string(&path).map_err(|e| StoreError::io(e, Some(path)).with_backend(BACKEND))
    }

    fn exists(&self, slug: &str) -> bool {
        self.post_path(slug).is_file()
    }
}
