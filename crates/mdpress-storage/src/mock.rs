//! Mock storage implementation for testing.
//!
//! Provides [`MockStore`] for unit testing the site layer without
//! filesystem access.

use std::collections::HashMap;

use crate::slug::slug_from_file_name;
use crate::store::{PostFile, PostStore, StoreError};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory store for tests.
///
/// Posts are returned in insertion order, matching the directory-listing
/// contract of the filesystem backend.
///
/// # Example
///
/// ```
/// use mdpress_storage::{MockStore, PostStore};
///
/// let store = MockStore::new().with_post("hello-world.mdx", "# Hi");
/// assert_eq!(store.read("hello-world").unwrap(), "# Hi");
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    posts: Vec<PostFile>,
    contents: HashMap<String, String>,
}

impl MockStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post with the given file name and content.
    ///
    /// The slug is derived from the file name exactly as the filesystem
    /// backend derives it.
    #[must_use]
    pub fn with_post(mut self, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let slug = slug_from_file_name(&file_name);
        self.contents.insert(slug.clone(), content.into());
        self.posts.push(PostFile { slug, file_name });
        self
    }
}

impl PostStore for MockStore {
    fn list(&self) -> Result<Vec<PostFile>, StoreError> {
        Ok(self.posts.clone())
    }

    fn read(&self, slug: &str) -> Result<String, StoreError> {
        self.contents
            .get(slug)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("{slug}.mdx")).with_backend(BACKEND))
    }

    fn exists(&self, slug: &str) -> bool {
        self.contents.contains_key(slug)
    }
}
