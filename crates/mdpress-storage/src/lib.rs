//! Post storage for the mdpress blog generator.
//!
//! This crate provides:
//! - [`PostStore`]: the storage abstraction over a directory of post documents
//! - [`FsStore`]: the filesystem backend used by the build pipeline
//! - [`MockStore`]: an in-memory backend for tests (behind the `mock` feature)
//!
//! A post is a single `<slug>.mdx` file; the slug doubles as the URL path
//! segment and as the lookup key back to the file. Enumeration returns posts
//! in directory-listing order, applies no filtering, and does not recurse.

mod fs;
mod slug;
mod store;

#[cfg(feature = "mock")]
mod mock;

pub use fs::FsStore;
pub use slug::slug_from_file_name;
pub use store::{PostFile, PostStore, StoreError, StoreErrorKind};

#[cfg(feature = "mock")]
pub use mock::MockStore;
