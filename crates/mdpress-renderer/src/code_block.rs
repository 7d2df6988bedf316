//! Code block processing seam.
//!
//! [`CodeBlockProcessor`]s are consulted, in order, for every fenced code
//! block with a language tag. The first processor returning a
//! non-[`ProcessResult::PassThrough`] result claims the block; unclaimed
//! blocks fall back to plain `<pre><code>` emission.

use std::collections::HashMap;

use crate::annotations::ComponentRef;
use crate::error::SerializeError;

/// Outcome of offering a code block to a processor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// The processor claimed the block and emitted a placeholder to be
    /// substituted at render time.
    Placeholder(String),
    /// The processor claimed the block and produced final HTML immediately.
    Inline(String),
    /// The processor does not handle this block.
    PassThrough,
}

/// A transform applied to fenced code blocks during serialization.
///
/// Processors are the pluggable seam of the serializer: the built-in
/// annotation transform is one implementation, and tests install their own.
pub trait CodeBlockProcessor {
    /// Offer a code block to this processor.
    ///
    /// `index` is the zero-based position of the block within the document
    /// and is stable across serialization runs.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`] when the block is malformed in a way the
    /// processor cannot ignore; this aborts serialization of the document.
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
        index: usize,
    ) -> Result<ProcessResult, SerializeError>;

    /// Component references recorded for deferred render-time resolution.
    fn extracted(&self) -> &[ComponentRef] {
        &[]
    }
}

/// Split a fence info string into a language and `key=value` attributes.
///
/// The first whitespace-separated token is the language; remaining tokens
/// are attributes. Tokens without `=` become flag attributes with an empty
/// value (e.g. `annotate`).
#[must_use]
pub fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut tokens = info.split_whitespace();
    let language = tokens.next().unwrap_or_default().to_owned();

    let mut attrs = HashMap::new();
    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) => attrs.insert(key.to_owned(), value.to_owned()),
            None => attrs.insert(token.to_owned(), String::new()),
        };
    }

    (language, attrs)
}
