//! Event-walking HTML writer.
//!
//! Streams `pulldown-cmark` events into an HTML string, consulting the
//! registered [`CodeBlockProcessor`]s for every fenced code block with a
//! language tag. Everything else is emitted as plain semantic HTML5.

use std::collections::HashMap;
use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

use crate::annotations::ComponentRef;
use crate::code_block::{CodeBlockProcessor, ProcessResult, parse_fence_info};
use crate::error::SerializeError;
use crate::escape::escape_html;

/// In-flight fenced or indented code block.
struct CodeCollector {
    language: Option<String>,
    attrs: HashMap<String, String>,
    content: String,
}

/// In-flight image; events between start and end form the alt text.
struct ImageCollector {
    src: String,
    title: String,
    alt: String,
}

/// Markup-to-HTML writer with a pluggable code block seam.
pub struct HtmlWriter {
    output: String,
    code: Option<CodeCollector>,
    image: Option<ImageCollector>,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    code_block_index: usize,
    handled_blocks: usize,
}

impl HtmlWriter {
    /// Create a writer with no processors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: None,
            image: None,
            processors: Vec::new(),
            code_block_index: 0,
            handled_blocks: 0,
        }
    }

    /// Add a code block processor.
    ///
    /// Processors are consulted in registration order; the first returning a
    /// non-`PassThrough` result claims the block.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Feed a full event stream through the writer.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SerializeError`] raised by a processor.
    pub fn write_events<'a, I>(&mut self, events: I) -> Result<(), SerializeError>
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.event(event)?;
        }
        Ok(())
    }

    /// Consume the writer, returning the HTML, the component references
    /// recorded by processors, and whether any block was claimed.
    #[must_use]
    pub fn finish(self) -> (String, Vec<ComponentRef>, bool) {
        let components = self
            .processors
            .iter()
            .flat_map(|p| p.extracted())
            .cloned()
            .collect();
        (self.output, components, self.handled_blocks > 0)
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), SerializeError> {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag)?,
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.output.push_str("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Not enabled in the parser options.
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.output, "<h{}>", heading_level_to_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let (language, attrs) = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => {
                        let (lang, attrs) = parse_fence_info(info);
                        (if lang.is_empty() { None } else { Some(lang) }, attrs)
                    }
                    _ => (None, HashMap::new()),
                };
                self.code = Some(CodeCollector {
                    language,
                    attrs,
                    content: String::new(),
                });
            }
            Tag::List(Some(1)) => self.output.push_str("<ol>"),
            Tag::List(Some(start)) => {
                write!(self.output, r#"<ol start="{start}">"#).unwrap();
            }
            Tag::List(None) => self.output.push_str("<ul>"),
            Tag::Item => self.output.push_str("<li>"),
            Tag::Emphasis => self.inline("<em>"),
            Tag::Strong => self.inline("<strong>"),
            Tag::Strikethrough => self.inline("<s>"),
            Tag::Superscript => self.inline("<sup>"),
            Tag::Subscript => self.inline("<sub>"),
            Tag::Link { dest_url, .. } => {
                let link = format!(r#"<a href="{}">"#, escape_html(&dest_url));
                self.inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(ImageCollector {
                    src: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                });
            }
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Table(_)
            | Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell => {
                // Not enabled in the parser options.
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) -> Result<(), SerializeError> {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.output, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => self.end_code_block()?,
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Emphasis => self.inline("</em>"),
            TagEnd::Strong => self.inline("</strong>"),
            TagEnd::Strikethrough => self.inline("</s>"),
            TagEnd::Superscript => self.inline("</sup>"),
            TagEnd::Subscript => self.inline("</sub>"),
            TagEnd::Link => self.inline("</a>"),
            TagEnd::Image => {
                if let Some(image) = self.image.take() {
                    let title_attr = if image.title.is_empty() {
                        String::new()
                    } else {
                        format!(r#" title="{}""#, escape_html(&image.title))
                    };
                    write!(
                        self.output,
                        r#"<img src="{}"{title_attr} alt="{}">"#,
                        escape_html(&image.src),
                        escape_html(&image.alt)
                    )
                    .unwrap();
                }
            }
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell => {
                // Not enabled in the parser options.
            }
        }
        Ok(())
    }

    /// Close the current code block, offering it to the processor chain.
    fn end_code_block(&mut self) -> Result<(), SerializeError> {
        let Some(block) = self.code.take() else {
            return Ok(());
        };
        let index = self.code_block_index;
        self.code_block_index += 1;

        if let Some(language) = block.language.as_deref() {
            for processor in &mut self.processors {
                match processor.process(language, &block.attrs, &block.content, index)? {
                    ProcessResult::Placeholder(text) | ProcessResult::Inline(text) => {
                        self.output.push_str(&text);
                        self.handled_blocks += 1;
                        return Ok(());
                    }
                    ProcessResult::PassThrough => {}
                }
            }
        }

        match block.language.as_deref() {
            Some(language) => write!(
                self.output,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(language),
                escape_html(&block.content)
            )
            .unwrap(),
            None => write!(
                self.output,
                "<pre><code>{}</code></pre>",
                escape_html(&block.content)
            )
            .unwrap(),
        }
        Ok(())
    }

    /// Push inline markup, suppressed while collecting image alt text.
    fn inline(&mut self, markup: &str) {
        if self.image.is_none() {
            self.output.push_str(markup);
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = &mut self.code {
            code.content.push_str(text);
        } else if let Some(image) = &mut self.image {
            image.alt.push_str(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(image) = &mut self.image {
            image.alt.push_str(code);
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn soft_break(&mut self) {
        if let Some(code) = &mut self.code {
            code.content.push('\n');
        } else if let Some(image) = &mut self.image {
            image.alt.push(' ');
        } else {
            self.output.push('\n');
        }
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Options, Parser};

    use super::*;

    fn write_html(markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
        let mut writer = HtmlWriter::new();
        writer.write_events(parser).unwrap();
        writer.finish().0
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(write_html("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_headings() {
        assert_eq!(write_html("# Hi"), "<h1>Hi</h1>");
        assert_eq!(write_html("### Deep"), "<h3>Deep</h3>");
    }

    #[test]
    fn test_emphasis_and_strong() {
        let html = write_html("*italic* and **bold**");

        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_strikethrough() {
        assert!(write_html("~~gone~~").contains("<s>gone</s>"));
    }

    #[test]
    fn test_link() {
        assert_eq!(
            write_html("[home](/)"),
            r#"<p><a href="/">home</a></p>"#
        );
    }

    #[test]
    fn test_image_with_alt() {
        assert_eq!(
            write_html("![Alt text](image.png)"),
            r#"<p><img src="image.png" alt="Alt text"></p>"#
        );
    }

    #[test]
    fn test_image_with_title() {
        assert_eq!(
            write_html(r#"![Alt](image.png "The title")"#),
            r#"<p><img src="image.png" title="The title" alt="Alt"></p>"#
        );
    }

    #[test]
    fn test_lists() {
        let html = write_html("- a\n- b");
        assert!(html.contains("<ul><li>a</li><li>b</li></ul>"));

        let html = write_html("1. first\n2. second");
        assert!(html.contains("<ol><li>first</li><li>second</li></ol>"));
    }

    #[test]
    fn test_ordered_list_with_start() {
        assert!(write_html("3. third\n4. fourth").contains(r#"<ol start="3">"#));
    }

    #[test]
    fn test_blockquote() {
        let html = write_html("> quoted");

        assert!(html.contains("<blockquote>"));
        assert!(html.contains("</blockquote>"));
    }

    #[test]
    fn test_inline_code() {
        assert!(write_html("run `cargo`").contains("<code>cargo</code>"));
    }

    #[test]
    fn test_code_block_with_language() {
        let html = write_html("```rust\nfn main() {}\n```");

        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_code_block_without_language() {
        let html = write_html("```\nplain\n```");

        assert!(html.contains("<pre><code>plain"));
    }

    #[test]
    fn test_code_block_content_escaped() {
        let html = write_html("```\na < b\n```");

        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_text_escaped() {
        assert_eq!(write_html("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = write_html("text\n\n<div class=\"x\">raw</div>");

        assert!(html.contains("<div class=\"x\">"));
    }

    #[test]
    fn test_rule() {
        assert!(write_html("a\n\n---\n\nb").contains("<hr>"));
    }

    #[test]
    fn test_hard_break() {
        assert!(write_html("a  \nb").contains("<br>"));
    }

    struct ClaimAll;

    impl CodeBlockProcessor for ClaimAll {
        fn process(
            &mut self,
            _language: &str,
            _attrs: &HashMap<String, String>,
            source: &str,
            index: usize,
        ) -> Result<ProcessResult, SerializeError> {
            Ok(ProcessResult::Inline(format!("<x data-i=\"{index}\">{source}</x>")))
        }
    }

    #[test]
    fn test_processor_claims_block() {
        let parser = Parser::new("```rust\nabc\n```");
        let mut writer = HtmlWriter::new().with_processor(ClaimAll);
        writer.write_events(parser).unwrap();
        let (html, components, annotated) = writer.finish();

        assert_eq!(html, "<x data-i=\"0\">abc\n</x>");
        assert!(components.is_empty());
        assert!(annotated);
    }

    #[test]
    fn test_processor_skips_blocks_without_language() {
        let parser = Parser::new("```\nabc\n```");
        let mut writer = HtmlWriter::new().with_processor(ClaimAll);
        writer.write_events(parser).unwrap();
        let (html, _, annotated) = writer.finish();

        assert!(html.contains("<pre><code>"));
        assert!(!annotated);
    }

    #[test]
    fn test_code_block_indices_are_sequential() {
        let parser = Parser::new("```rust\na\n```\n\n```rust\nb\n```");
        let mut writer = HtmlWriter::new().with_processor(ClaimAll);
        writer.write_events(parser).unwrap();
        let (html, _, _) = writer.finish();

        assert!(html.contains("data-i=\"0\""));
        assert!(html.contains("data-i=\"1\""));
    }
}
