//! Route enumeration and the per-slug build pipeline.

use std::sync::Arc;

use mdpress_renderer::{
    ComponentRegistry, RenderError, SerializeError, SerializeOptions, render, serialize,
};
use mdpress_storage::{PostStore, StoreError};

use crate::page;

/// Fixed page-level options.
#[derive(Clone, Debug)]
pub struct SiteOptions {
    /// Document title shared by every generated page.
    pub title: String,
    /// Destination of the navigation link in the page shell.
    pub home_link: String,
    /// Route prefix under which posts are published.
    pub route_prefix: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            title: "DIY Firestore".to_owned(),
            home_link: "/".to_owned(),
            route_prefix: "/posts".to_owned(),
        }
    }
}

/// Fallback policy for paths outside the enumerated route set.
///
/// Always disabled: requests for routes that were not generated are not
/// served, and no fallback page exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Unmatched paths are rejected upstream by the routing layer.
    #[default]
    Disabled,
}

/// One enumerated route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Slug the route was derived from.
    pub slug: String,
    /// URL path of the generated page.
    pub path: String,
}

/// The complete route surface of the site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticPaths {
    /// Routes in directory-listing order, one per source document.
    pub routes: Vec<Route>,
    /// Fallback policy for everything else.
    pub fallback: Fallback,
}

/// One generated page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Slug the page was derived from.
    pub slug: String,
    /// URL path of the page.
    pub route: String,
    /// Full HTML document.
    pub html: String,
}

/// Error raised anywhere in the per-slug pipeline.
///
/// Every variant is fatal: the build aborts on the first failed page.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Site structure and page generation.
///
/// Holds the post store, the fixed serializer configuration, and the
/// component registry. Each page is generated independently; the site keeps
/// no mutable state between pages.
pub struct Site {
    store: Arc<dyn PostStore>,
    options: SiteOptions,
    serialize_options: SerializeOptions,
    registry: ComponentRegistry,
}

impl Site {
    /// Create a site over the given store with default serializer
    /// configuration and the built-in component registry.
    #[must_use]
    pub fn new(store: Arc<dyn PostStore>, options: SiteOptions) -> Self {
        Self {
            store,
            options,
            serialize_options: SerializeOptions::default(),
            registry: ComponentRegistry::builtin(),
        }
    }

    /// Replace the serializer configuration.
    #[must_use]
    pub fn with_serialize_options(mut self, serialize_options: SerializeOptions) -> Self {
        self.serialize_options = serialize_options;
        self
    }

    /// Replace the component registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Enumerate the route surface.
    ///
    /// One route per source document, in directory-listing order, with the
    /// fallback disabled.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Store`] if the source directory cannot be
    /// enumerated.
    pub fn static_paths(&self) -> Result<StaticPaths, SiteError> {
        let routes = self
            .store
            .list()?
            .into_iter()
            .map(|post| Route {
                path: format!("{}/{}", self.options.route_prefix, post.slug),
                slug: post.slug,
            })
            .collect();

        Ok(StaticPaths {
            routes,
            fallback: Fallback::Disabled,
        })
    }

    /// Generate the page for one slug: load, serialize, render, shell.
    ///
    /// Pure function of the document content; invoking it twice for the
    /// same content yields byte-identical HTML.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the document is missing or unreadable, the
    /// markup fails to serialize, or a referenced component is unknown.
    pub fn render_page(&self, slug: &str) -> Result<RenderedPage, SiteError> {
        let source = self.store.read(slug)?;
        let doc = serialize(&source, &self.serialize_options)?;
        let body = render(&doc, &self.registry)?;
        let html = page::shell(&self.options.title, &self.options.home_link, &body);

        tracing::debug!(slug, bytes = html.len(), "rendered page");

        Ok(RenderedPage {
            route: format!("{}/{}", self.options.route_prefix, slug),
            slug: slug.to_owned(),
            html,
        })
    }
}
