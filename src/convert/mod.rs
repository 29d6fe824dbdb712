//! Converters from the supported input formats to styled text.
//!
//! Every converter implements [`StyleConverter`] and produces a
//! [`StyledDocument`]. A [`ConverterRegistry`] dispatches by format name.
//!
//! # Example
//!
//! ```
//! use labeltext::convert::{ConvertOptions, ConverterRegistry};
//!
//! fn main() -> labeltext::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let options = ConvertOptions::new().with_base_font_size(10.0);
//!
//!     let doc = registry.convert("markdown", "**bold**", &options)?;
//!     assert_eq!(doc.text, "bold");
//!     Ok(())
//! }
//! ```

mod attributes;
mod delta;
mod fonts;
mod legacy;
mod markdown;
mod options;

pub use attributes::{inline_style, rich_attributes, size_keyword};
pub use delta::DeltaConverter;
pub use fonts::FontTable;
pub use legacy::LegacyInlineMarkdownParser;
pub use markdown::MarkdownConverter;
pub use options::{ConvertOptions, DEFAULT_FONT_SIZE};

use crate::error::{Error, Result};
use crate::model::StyledDocument;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait for styled text converters.
///
/// Implement this trait to add support for a new input format.
pub trait StyleConverter: Send + Sync {
    /// Get the format name of this converter (lowercase).
    fn name(&self) -> &str;

    /// Convert input text of this format.
    fn convert(&self, input: &str, options: &ConvertOptions) -> Result<StyledDocument>;
}

/// Registry for styled text converters, keyed by format name.
pub struct ConverterRegistry {
    by_name: HashMap<String, Arc<dyn StyleConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the markdown, legacy and delta converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MarkdownConverter::new()));
        registry.register(Arc::new(LegacyInlineMarkdownParser::new()));
        registry.register(Arc::new(DeltaConverter::new()));
        registry
    }

    /// Register a converter, replacing any converter with the same name.
    pub fn register(&mut self, converter: Arc<dyn StyleConverter>) {
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Arc<dyn StyleConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if a format is supported.
    pub fn supports(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Get all registered format names.
    pub fn formats(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Convert input using the converter registered for `format`.
    pub fn convert(
        &self,
        format: &str,
        input: &str,
        options: &ConvertOptions,
    ) -> Result<StyledDocument> {
        let converter = self
            .get(format)
            .ok_or_else(|| Error::UnknownConverter(format.to_string()))?;

        converter.convert(input, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.supports("markdown"));
        assert!(registry.supports("DELTA"));
        assert!(!registry.supports("rtf"));
        assert_eq!(registry.formats(), vec!["delta", "legacy", "markdown"]);
    }

    #[test]
    fn test_registry_get() {
        let registry = ConverterRegistry::with_defaults();
        let converter = registry.get("Legacy");
        assert!(converter.is_some());
        assert_eq!(converter.unwrap().name(), "legacy");
    }

    #[test]
    fn test_registry_unknown_format() {
        let registry = ConverterRegistry::new();
        let result = registry.convert("markdown", "x", &ConvertOptions::default());
        assert!(matches!(result, Err(Error::UnknownConverter(name)) if name == "markdown"));
    }

    #[test]
    fn test_registry_dispatch() {
        let registry = ConverterRegistry::default();
        let options = ConvertOptions::new().with_base_font_size(10.0);

        let doc = registry.convert("legacy", "- **a**", &options).unwrap();
        assert_eq!(doc.text, "• a");

        let doc = registry
            .convert("delta", r#"{"ops":[{"insert":"x\n"}]}"#, &options)
            .unwrap();
        assert_eq!(doc.text, "x\n");
    }
}
