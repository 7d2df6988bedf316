//! Site structure and page generation for mdpress.
//!
//! [`Site`] is the one composition point of the build pipeline: it
//! enumerates routes from a [`PostStore`](mdpress_storage::PostStore) and
//! runs the per-slug pipeline (load, serialize, render, page shell).
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use mdpress_site::{Site, SiteOptions};
//! use mdpress_storage::FsStore;
//!
//! let store = Arc::new(FsStore::new(PathBuf::from("posts")));
//! let site = Site::new(store, SiteOptions::default());
//!
//! let paths = site.static_paths()?;
//! for route in &paths.routes {
//!     let page = site.render_page(&route.slug)?;
//!     println!("{}: {} bytes", page.route, page.html.len());
//! }
//! # Ok(())
//! # }
//! ```

mod page;
mod site;

pub use site::{Fallback, RenderedPage, Route, Site, SiteError, SiteOptions, StaticPaths};
