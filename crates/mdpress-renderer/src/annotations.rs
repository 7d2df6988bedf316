//! The code-annotation transform.
//!
//! Recognizes fenced code blocks that carry annotation directives and turns
//! them into references to the `annotated-code` embeddable component.
//!
//! Two directive forms are supported:
//!
//! - fence attributes: ```` ```rust focus=1:3 mark=5 ````, with 1-based,
//!   comma-separated line numbers and `a:b` spans;
//! - in-block comments: a trailing `// focus` (or `// mark`, `# focus`,
//!   `# mark`) annotates its own line and is stripped from the output; a
//!   standalone directive comment line annotates the following line and is
//!   removed entirely.
//!
//! Blocks with no directives and no `annotate` flag pass through untouched,
//! so ordinary code fences produce no component artifacts.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::code_block::{CodeBlockProcessor, ProcessResult};
use crate::component::{ANNOTATED_CODE, AnnotatedCodeWidget, Component, component_placeholder};
use crate::error::SerializeError;
use crate::theme::Theme;

/// Directive names recognized both as fence attributes and comments.
const DIRECTIVES: [&str; 2] = ["focus", "mark"];

/// Comment markers that may introduce a line directive.
const COMMENT_MARKERS: [&str; 2] = ["//", "#"];

/// Fence flag that forces recognition without any line directives.
const ANNOTATE_FLAG: &str = "annotate";

/// One recognized code-block construct, ready for component rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedBlock {
    /// Language tag from the fence info string.
    pub language: Option<String>,
    /// Source lines with directive comments stripped.
    pub lines: Vec<String>,
    /// 1-based numbers of focused lines.
    pub focus: BTreeSet<usize>,
    /// 1-based numbers of marked lines.
    pub marks: BTreeSet<usize>,
}

impl AnnotatedBlock {
    /// Recognize an annotated block, or return `None` for plain code.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BadLineRange`] when a `focus=`/`mark=`
    /// attribute does not parse as a line range list.
    pub fn recognize(
        language: Option<&str>,
        attrs: &HashMap<String, String>,
        source: &str,
    ) -> Result<Option<Self>, SerializeError> {
        let mut focus = attr_line_set(attrs, "focus")?;
        let mut marks = attr_line_set(attrs, "mark")?;
        let from_attrs = attrs.contains_key("focus")
            || attrs.contains_key("mark")
            || attrs.contains_key(ANNOTATE_FLAG);

        let mut lines = Vec::new();
        let mut pending: Vec<&'static str> = Vec::new();
        let mut from_comments = false;

        for raw in source.lines() {
            if let Some(directive) = standalone_directive(raw) {
                pending.push(directive);
                from_comments = true;
                continue;
            }

            let (text, trailing) = strip_trailing_directive(raw);
            let line_no = lines.len() + 1;
            if let Some(directive) = trailing {
                from_comments = true;
                apply_directive(directive, line_no, &mut focus, &mut marks);
            }
            for directive in pending.drain(..) {
                apply_directive(directive, line_no, &mut focus, &mut marks);
            }
            lines.push(text);
        }

        if !from_attrs && !from_comments {
            return Ok(None);
        }

        Ok(Some(Self {
            language: language.map(str::to_owned),
            lines,
            focus,
            marks,
        }))
    }
}

/// A reference from a serialized document to an embeddable component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    /// Registry identifier of the component to instantiate.
    pub component: String,
    /// Zero-based code block index; pairs the reference with its placeholder.
    pub index: usize,
    /// The annotated block the component renders.
    pub block: AnnotatedBlock,
}

fn apply_directive(
    directive: &str,
    line_no: usize,
    focus: &mut BTreeSet<usize>,
    marks: &mut BTreeSet<usize>,
) {
    if directive == "focus" {
        focus.insert(line_no);
    } else {
        marks.insert(line_no);
    }
}

/// Parse a `focus=`/`mark=` attribute into a line set.
fn attr_line_set(
    attrs: &HashMap<String, String>,
    directive: &'static str,
) -> Result<BTreeSet<usize>, SerializeError> {
    match attrs.get(directive) {
        Some(value) => parse_line_set(directive, value),
        None => Ok(BTreeSet::new()),
    }
}

/// Parse `1,3:5,8` into `{1, 3, 4, 5, 8}`.
fn parse_line_set(directive: &str, value: &str) -> Result<BTreeSet<usize>, SerializeError> {
    let bad = || SerializeError::BadLineRange {
        directive: directive.to_owned(),
        value: value.to_owned(),
    };

    let mut set = BTreeSet::new();
    for part in value.split(',') {
        let part = part.trim();
        let (start, end) = match part.split_once(':') {
            Some((a, b)) => (
                a.trim().parse::<usize>().map_err(|_| bad())?,
                b.trim().parse::<usize>().map_err(|_| bad())?,
            ),
            None => {
                let n = part.parse::<usize>().map_err(|_| bad())?;
                (n, n)
            }
        };
        if start == 0 || end < start {
            return Err(bad());
        }
        set.extend(start..=end);
    }
    Ok(set)
}

/// A line that is nothing but a directive comment (`// focus`).
fn standalone_directive(line: &str) -> Option<&'static str> {
    let trimmed = line.trim();
    for marker in COMMENT_MARKERS {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            let rest = rest.trim();
            for directive in DIRECTIVES {
                if rest == directive {
                    return Some(directive);
                }
            }
        }
    }
    None
}

/// Split a trailing directive comment off a code line.
///
/// `let x = 1; // focus` becomes (`let x = 1;`, `Some("focus")`). Lines
/// without a trailing directive are returned unchanged.
fn strip_trailing_directive(line: &str) -> (String, Option<&'static str>) {
    let trimmed = line.trim_end();
    for directive in DIRECTIVES {
        let Some(before) = trimmed.strip_suffix(directive) else {
            continue;
        };
        for marker in COMMENT_MARKERS {
            if let Some(code) = before.trim_end().strip_suffix(marker) {
                if !code.is_empty() {
                    return (code.trim_end().to_owned(), Some(directive));
                }
            }
        }
    }
    (line.to_owned(), None)
}

/// The built-in code-annotation transform.
///
/// In deferred mode (the default) recognized blocks become placeholders and
/// are resolved against the component registry at render time. In immediate
/// mode the built-in widget is instantiated during serialization, producing
/// a self-contained body.
pub struct AnnotationProcessor {
    theme: Theme,
    defer: bool,
    widget: AnnotatedCodeWidget,
    extracted: Vec<ComponentRef>,
}

impl AnnotationProcessor {
    /// Create a deferred-mode processor using the given theme.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            defer: true,
            widget: AnnotatedCodeWidget::new(),
            extracted: Vec::new(),
        }
    }

    /// Switch between deferred and immediate component resolution.
    #[must_use]
    pub fn deferred(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }
}

impl CodeBlockProcessor for AnnotationProcessor {
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
        index: usize,
    ) -> Result<ProcessResult, SerializeError> {
        let Some(block) = AnnotatedBlock::recognize(Some(language), attrs, source)? else {
            return Ok(ProcessResult::PassThrough);
        };

        if self.defer {
            let placeholder = component_placeholder(ANNOTATED_CODE, index);
            self.extracted.push(ComponentRef {
                component: ANNOTATED_CODE.to_owned(),
                index,
                block,
            });
            Ok(ProcessResult::Placeholder(placeholder))
        } else {
            Ok(ProcessResult::Inline(self.widget.render(&block, &self.theme)))
        }
    }

    fn extracted(&self) -> &[ComponentRef] {
        &self.extracted
    }
}
