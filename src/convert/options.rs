//! Conversion options and configuration.

use super::FontTable;

/// Default base font size, matching the editor's default text field.
pub const DEFAULT_FONT_SIZE: f64 = 18.0;

/// Options shared by all converters.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Base font size every produced size is derived from
    pub base_font_size: f64,

    /// Delta font key to family name table
    pub font_table: FontTable,

    /// Font family used for inline code
    pub code_font_family: String,

    /// Background color used for inline code
    pub code_background: String,
}

impl ConvertOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base font size.
    ///
    /// Non-positive sizes are accepted and produce degenerate sizes.
    pub fn with_base_font_size(mut self, size: f64) -> Self {
        self.base_font_size = size;
        self
    }

    /// Set the font table.
    pub fn with_font_table(mut self, table: FontTable) -> Self {
        self.font_table = table;
        self
    }

    /// Set the inline code font family.
    pub fn with_code_font(mut self, family: impl Into<String>) -> Self {
        self.code_font_family = family.into();
        self
    }

    /// Set the inline code background color.
    pub fn with_code_background(mut self, color: impl Into<String>) -> Self {
        self.code_background = color.into();
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            base_font_size: DEFAULT_FONT_SIZE,
            font_table: FontTable::default(),
            code_font_family: "monospace".to_string(),
            code_background: "#f5f5f5".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_base_font_size(24.0)
            .with_code_font("Courier New")
            .with_code_background("#eeeeee");

        assert_eq!(options.base_font_size, 24.0);
        assert_eq!(options.code_font_family, "Courier New");
        assert_eq!(options.code_background, "#eeeeee");
    }

    #[test]
    fn test_convert_options_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.base_font_size, DEFAULT_FONT_SIZE);
        assert_eq!(options.code_font_family, "monospace");
        assert_eq!(options.font_table.to_family("arial-black"), "Arial Black");
    }
}
