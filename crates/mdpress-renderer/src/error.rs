//! Serialization and rendering error types.
//!
//! Every error here is fatal to the page being built, and the build tool
//! treats a failed page as a failed build. There is no per-page isolation.

/// Error raised while serializing post markup.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SerializeError {
    /// An annotation directive carried an argument that is not a valid list
    /// of 1-based line ranges (e.g. `focus=1:3,5`).
    #[error("malformed `{directive}` annotation: `{value}`")]
    BadLineRange {
        /// The directive name (`focus` or `mark`).
        directive: String,
        /// The argument as written in the fence info string.
        value: String,
    },
}

/// Error raised while rendering a serialized document.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The document references a component identifier the registry does not
    /// know.
    #[error("no component registered for identifier `{0}`")]
    UnknownComponent(String),
}
