//! Embeddable components and their registry.
//!
//! A component is a render function over an [`AnnotatedBlock`]; the registry
//! maps string identifiers to components so that documents can reference
//! widgets by name and resolution happens at render time.

use std::collections::HashMap;
use std::fmt::Write;

use crate::annotations::AnnotatedBlock;
use crate::escape::escape_html;
use crate::theme::Theme;

/// Identifier of the built-in code-annotation widget.
pub const ANNOTATED_CODE: &str = "annotated-code";

/// Placeholder text emitted for a deferred component reference.
///
/// The placeholder must survive the markup-to-HTML transformation untouched,
/// so it uses characters the writer never escapes.
pub(crate) fn component_placeholder(component: &str, index: usize) -> String {
    format!("{{{{component:{component}:{index}}}}}")
}

/// An embeddable widget instantiated wherever a document references it.
pub trait Component: Send + Sync {
    /// Render the widget for one annotated block.
    fn render(&self, block: &AnnotatedBlock, theme: &Theme) -> String;
}

/// String-keyed component registry.
///
/// The default registry contains exactly one entry: the code-annotation
/// widget under [`ANNOTATED_CODE`].
pub struct ComponentRegistry {
    components: HashMap<String, Box<dyn Component>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Register a component under the given identifier.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, component: impl Component + 'static) -> Self {
        self.components.insert(name.into(), Box::new(component));
        self
    }

    /// The registry with the built-in widget installed.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new().with(ANNOTATED_CODE, AnnotatedCodeWidget::new())
    }

    /// Look up a component by identifier.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Component> {
        self.components.get(name).map(Box::as_ref)
    }

    /// Whether an identifier is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The interactive code-annotation widget.
///
/// Emits a `<figure>` of per-line `<span>`s carrying `line-focus` and
/// `line-mark` classes, labelled with the active theme name. The theme data
/// itself is embedded separately, once per page.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnnotatedCodeWidget;

impl AnnotatedCodeWidget {
    /// Create the widget.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Component for AnnotatedCodeWidget {
    fn render(&self, block: &AnnotatedBlock, theme: &Theme) -> String {
        let mut out = String::with_capacity(256);

        let focus_class = if block.focus.is_empty() { "" } else { " has-focus" };
        write!(
            out,
            r#"<figure class="annotated-code{focus_class}" data-theme="{}">"#,
            escape_html(theme.name())
        )
        .unwrap();

        out.push_str("<pre><code");
        if let Some(language) = &block.language {
            write!(out, r#" class="language-{}""#, escape_html(language)).unwrap();
        }
        out.push('>');

        for (i, line) in block.lines.iter().enumerate() {
            let number = i + 1;
            let mut classes = String::from("line");
            if block.focus.contains(&number) {
                classes.push_str(" line-focus");
            }
            if block.marks.contains(&number) {
                classes.push_str(" line-mark");
            }
            write!(
                out,
                r#"<span class="{classes}" data-line="{number}">{}</span>"#,
                escape_html(line)
            )
            .unwrap();
            out.push('\n');
        }

        out.push_str("</code></pre></figure>");
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn block(lines: &[&str], focus: &[usize], marks: &[usize]) -> AnnotatedBlock {
        AnnotatedBlock {
            language: Some("rust".to_owned()),
            lines: lines.iter().map(|l| (*l).to_owned()).collect(),
            focus: focus.iter().copied().collect::<BTreeSet<_>>(),
            marks: marks.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn test_placeholder_format() {
        assert_eq!(
            component_placeholder(ANNOTATED_CODE, 3),
            "{{component:annotated-code:3}}"
        );
    }

    #[test]
    fn test_builtin_registry_contains_widget() {
        let registry = ComponentRegistry::builtin();

        assert!(registry.contains(ANNOTATED_CODE));
        assert!(registry.get(ANNOTATED_CODE).is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_widget_renders_lines_with_classes() {
        let widget = AnnotatedCodeWidget::new();
        let html = widget.render(&block(&["let x = 1;", "let y = 2;"], &[1], &[2]), &Theme::default());

        assert!(html.contains(r#"<figure class="annotated-code has-focus" data-theme="dracula-soft">"#));
        assert!(html.contains(r#"class="language-rust""#));
        assert!(html.contains(r#"<span class="line line-focus" data-line="1">let x = 1;</span>"#));
        assert!(html.contains(r#"<span class="line line-mark" data-line="2">let y = 2;</span>"#));
    }

    #[test]
    fn test_widget_escapes_source() {
        let widget = AnnotatedCodeWidget::new();
        let html = widget.render(&block(&["if a < b && c > d {}"], &[], &[]), &Theme::default());

        assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d {}"));
    }

    #[test]
    fn test_widget_without_focus_has_no_focus_class() {
        let widget = AnnotatedCodeWidget::new();
        let html = widget.render(&block(&["a"], &[], &[]), &Theme::default());

        assert!(html.contains(r#"<figure class="annotated-code" data-theme"#));
        assert!(!html.contains("has-focus"));
    }

    #[test]
    fn test_widget_without_language() {
        let widget = AnnotatedCodeWidget::new();
        let mut b = block(&["a"], &[], &[]);
        b.language = None;
        let html = widget.render(&b, &Theme::default());

        assert!(html.contains("<pre><code>"));
    }

    #[test]
    fn test_registry_with_custom_component() {
        struct Stub;
        impl Component for Stub {
            fn render(&self, _block: &AnnotatedBlock, _theme: &Theme) -> String {
                "<div>stub</div>".to_owned()
            }
        }

        let registry = ComponentRegistry::new().with("stub", Stub);
        let html = registry
            .get("stub")
            .unwrap()
            .render(&block(&[], &[], &[]), &Theme::default());

        assert_eq!(html, "<div>stub</div>");
    }
}
