//! Render-time component resolution.
//!
//! [`render`] walks a [`SerializedDocument`], substituting every component
//! placeholder with the output of the registry component it names, and
//! embeds the opaque theme data once on pages that contain the widget.

use std::fmt::Write;

use crate::component::{ComponentRegistry, component_placeholder};
use crate::error::RenderError;
use crate::escape::escape_html;
use crate::serialize::SerializedDocument;

/// Produce the final body HTML for a serialized document.
///
/// Deterministic and side-effect-free: rendering the same document against
/// the same registry twice yields byte-identical output.
///
/// # Errors
///
/// Returns [`RenderError::UnknownComponent`] when the document references an
/// identifier the registry does not know.
pub fn render(
    doc: &SerializedDocument,
    registry: &ComponentRegistry,
) -> Result<String, RenderError> {
    let mut html = doc.html.clone();

    for reference in &doc.components {
        let component = registry
            .get(&reference.component)
            .ok_or_else(|| RenderError::UnknownComponent(reference.component.clone()))?;
        let placeholder = component_placeholder(&reference.component, reference.index);
        html = html.replace(&placeholder, &component.render(&reference.block, &doc.theme));
    }

    if doc.annotated {
        write!(
            html,
            r#"<script type="application/json" data-code-theme="{}">{}</script>"#,
            escape_html(doc.theme.name()),
            doc.theme.data_json()
        )
        .unwrap();
    }

    Ok(html)
}
