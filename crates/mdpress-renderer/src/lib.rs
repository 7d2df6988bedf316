//! Markup serialization and page rendering for mdpress.
//!
//! The pipeline has two narrow entry points:
//!
//! - [`serialize`]: parse raw post markup into a [`SerializedDocument`],
//!   which carries body HTML plus extracted component references and the
//!   resolved highlighting theme. Fenced code blocks carrying annotation
//!   directives are claimed by the built-in [`AnnotationProcessor`] and
//!   replaced with stable placeholders.
//! - [`render`]: walk a serialized document and instantiate embeddable
//!   components from a string-keyed [`ComponentRegistry`], producing the
//!   final body HTML.
//!
//! Both steps are deterministic and side-effect-free: serializing and
//! rendering the same input twice yields byte-identical output.
//!
//! # Example
//!
//! ```
//! use mdpress_renderer::{ComponentRegistry, SerializeOptions, render, serialize};
//!
//! let doc = serialize("# Hi", &SerializeOptions::default())?;
//! let html = render(&doc, &ComponentRegistry::default())?;
//! assert_eq!(html, "<h1>Hi</h1>");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod annotations;
mod code_block;
mod component;
mod error;
mod escape;
mod render;
mod serialize;
mod theme;
mod writer;

pub use annotations::{AnnotatedBlock, AnnotationProcessor, ComponentRef};
pub use code_block::{CodeBlockProcessor, ProcessResult, parse_fence_info};
pub use component::{ANNOTATED_CODE, AnnotatedCodeWidget, Component, ComponentRegistry};
pub use error::{RenderError, SerializeError};
pub use escape::escape_html;
pub use render::render;
pub use serialize::{SerializeOptions, SerializedDocument, parser_options, serialize};
pub use theme::Theme;
pub use writer::HtmlWriter;
