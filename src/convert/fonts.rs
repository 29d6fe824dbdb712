//! Font key translation between the rich-text widget and the canvas.

/// Browser-safe fonts offered by the editor, as (delta key, family name).
const EDITOR_FONTS: &[(&str, &str)] = &[
    ("arial", "Arial"),
    ("arial-black", "Arial Black"),
    ("comic-sans-ms", "Comic Sans MS"),
    ("courier-new", "Courier New"),
    ("georgia", "Georgia"),
    ("helvetica", "Helvetica"),
    ("impact", "Impact"),
    ("times-new-roman", "Times New Roman"),
    ("trebuchet-ms", "Trebuchet MS"),
    ("verdana", "Verdana"),
];

/// Bidirectional table of delta font keys and font family names.
///
/// Unknown names pass through unchanged in both directions.
#[derive(Debug, Clone)]
pub struct FontTable {
    entries: Vec<(String, String)>,
}

impl FontTable {
    /// Create an empty table (every name passes through).
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace a mapping.
    pub fn with_font(mut self, key: impl Into<String>, family: impl Into<String>) -> Self {
        let key = key.into();
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, family.into()));
        self
    }

    /// Translate a delta font key to a family name.
    pub fn to_family<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(key, |(_, family)| family.as_str())
    }

    /// Translate a family name back to a delta font key.
    pub fn to_key<'a>(&'a self, family: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(_, f)| f == family)
            .map_or(family, |(key, _)| key.as_str())
    }
}

impl Default for FontTable {
    fn default() -> Self {
        EDITOR_FONTS
            .iter()
            .fold(Self::empty(), |table, (key, family)| {
                table.with_font(*key, *family)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fonts() {
        let table = FontTable::default();
        assert_eq!(table.to_family("arial-black"), "Arial Black");
        assert_eq!(table.to_key("Times New Roman"), "times-new-roman");
    }

    #[test]
    fn test_unknown_fonts_pass_through() {
        let table = FontTable::default();
        assert_eq!(table.to_family("Papyrus"), "Papyrus");
        assert_eq!(table.to_key("serif"), "serif");
    }

    #[test]
    fn test_with_font_replaces() {
        let table = FontTable::empty()
            .with_font("mono", "Menlo")
            .with_font("mono", "Consolas");
        assert_eq!(table.to_family("mono"), "Consolas");
        assert_eq!(table.to_key("Menlo"), "Menlo");
    }
}
