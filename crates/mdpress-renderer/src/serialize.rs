//! Markup serialization.
//!
//! [`serialize`] turns raw post markup into a [`SerializedDocument`]: body
//! HTML with stable component placeholders, the component references
//! extracted by the annotation transform, and the resolved theme. The
//! configuration is fixed at build time; there is no per-request variation.

use pulldown_cmark::{Options, Parser};
use serde::{Deserialize, Serialize};

use crate::annotations::{AnnotationProcessor, ComponentRef};
use crate::error::SerializeError;
use crate::theme::Theme;
use crate::writer::HtmlWriter;

/// Fixed serializer configuration.
#[derive(Clone, Debug)]
pub struct SerializeOptions {
    /// Syntax-highlighting theme embedded into annotated pages.
    pub theme: Theme,
    /// Resolve components at render time via the registry (the default),
    /// or inline the built-in widget during serialization.
    pub defer_components: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            defer_components: true,
        }
    }
}

/// Serialized intermediate representation of one document.
///
/// Pure function of the source text and options: serializing the same input
/// twice yields an identical value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedDocument {
    /// Body HTML, with one placeholder per deferred component reference.
    pub html: String,
    /// Component references to resolve at render time.
    pub components: Vec<ComponentRef>,
    /// Whether any code block was claimed by the annotation transform.
    pub annotated: bool,
    /// Theme carried into the rendered page.
    pub theme: Theme,
}

/// Parser options for post markup.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
}

/// Serialize raw post markup.
///
/// # Errors
///
/// Returns [`SerializeError`] when the annotation transform rejects a code
/// block; the caller treats this as fatal for the page.
pub fn serialize(
    source: &str,
    options: &SerializeOptions,
) -> Result<SerializedDocument, SerializeError> {
    let parser = Parser::new_ext(source, parser_options());
    let mut writer = HtmlWriter::new().with_processor(
        AnnotationProcessor::new(options.theme.clone()).deferred(options.defer_components),
    );
    writer.write_events(parser)?;
    let (html, components, annotated) = writer.finish();

    Ok(SerializedDocument {
        html,
        components,
        annotated,
        theme: options.theme.clone(),
    })
}
