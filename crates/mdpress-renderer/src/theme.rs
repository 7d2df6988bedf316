//! Syntax-highlighting theme asset.
//!
//! The theme is opaque JSON data: it is resolved at build time, embedded
//! verbatim into pages that contain the code-annotation widget, and never
//! interpreted by this crate. Only the `name` field is read, for labelling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Embedded default theme asset.
const DEFAULT_THEME_JSON: &str = include_str!("../themes/dracula-soft.json");

/// Fallback label for theme data without a `name` field.
const UNNAMED: &str = "unnamed";

/// An opaque visual theme for code annotation widgets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    name: String,
    data: Value,
}

impl Theme {
    /// Parse a theme from raw JSON.
    ///
    /// The `name` field, when present, becomes the theme label; the rest of
    /// the document is carried as-is.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if `raw` is not valid JSON.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let data: Value = serde_json::from_str(raw)?;
        let name = data
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNNAMED)
            .to_owned();
        Ok(Self { name, data })
    }

    /// The theme label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw theme document.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The theme document re-serialized as compact JSON.
    #[must_use]
    pub fn data_json(&self) -> String {
        self.data.to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_json_str(DEFAULT_THEME_JSON).expect("embedded theme asset is valid JSON")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_theme_is_named() {
        assert_eq!(Theme::default().name(), "dracula-soft");
    }

    #[test]
    fn test_from_json_str_reads_name() {
        let theme = Theme::from_json_str(r#"{"name":"nord","colors":{}}"#).unwrap();

        assert_eq!(theme.name(), "nord");
    }

    #[test]
    fn test_from_json_str_without_name() {
        let theme = Theme::from_json_str(r#"{"colors":{}}"#).unwrap();

        assert_eq!(theme.name(), "unnamed");
    }

    #[test]
    fn test_from_json_str_rejects_invalid_json() {
        assert!(Theme::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_data_json_round_trips() {
        let theme = Theme::from_json_str(r##"{"name":"t","colors":{"bg":"#000"}}"##).unwrap();
        let reparsed: Value = serde_json::from_str(&theme.data_json()).unwrap();

        assert_eq!(&reparsed, theme.data());
    }
}
