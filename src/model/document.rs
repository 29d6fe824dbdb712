//! Styled document and its builder.

use super::{StyleAttributes, StyleMap};
use serde::{Deserialize, Serialize};

/// Plain text plus a per-character style map.
///
/// This is the value every converter produces. `text` uses `\n` as its only
/// line separator and never contains markup syntax.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledDocument {
    /// Plain text content
    pub text: String,

    /// Styles keyed by line and character
    #[serde(default)]
    pub styles: StyleMap,
}

impl StyledDocument {
    /// Create a document from text and styles.
    pub fn new(text: impl Into<String>, styles: StyleMap) -> Self {
        Self {
            text: text.into(),
            styles,
        }
    }

    /// Create an unstyled document.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleMap::new())
    }

    /// Iterate over the logical lines of the text.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Number of logical lines (an empty text has one empty line).
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Check if the document has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Style at a position, or the default style when none was recorded.
    pub fn style_at(&self, line: usize, ch: usize) -> StyleAttributes {
        self.styles.get(line, ch).cloned().unwrap_or_default()
    }
}

/// Accumulates text and styles with an explicit line/column cursor.
///
/// One builder lives for exactly one conversion call.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    text: String,
    styles: StyleMap,
    line: usize,
    column: usize,
}

impl DocumentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current line index.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of characters already on the current line.
    pub fn current_line_len(&self) -> usize {
        self.column
    }

    /// Append one character with its own copy of `style`.
    pub fn push_styled_char(&mut self, ch: char, style: &StyleAttributes) {
        if ch == '\n' {
            self.newline();
            return;
        }
        self.styles.set(self.line, self.column, style.clone());
        self.text.push(ch);
        self.column += 1;
    }

    /// Append text, styling every character; `\n` starts a new line.
    pub fn push_str(&mut self, text: &str, style: &StyleAttributes) {
        for ch in text.chars() {
            self.push_styled_char(ch, style);
        }
    }

    /// End the current line.
    pub fn newline(&mut self) {
        self.text.push('\n');
        self.line += 1;
        self.column = 0;
    }

    /// Insert `prefix` at the start of the current line, moving existing
    /// entries right. Prefix characters get no entry.
    pub fn prepend_to_line(&mut self, prefix: &str) {
        let width = prefix.chars().count();
        if width == 0 {
            return;
        }
        let line_start = self.text.rfind('\n').map_or(0, |i| i + 1);
        self.text.insert_str(line_start, prefix);
        self.styles.shift_line(self.line, width);
        self.column += width;
    }

    /// Mutable access to the styles recorded so far.
    pub fn styles_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }

    /// Finish without trimming; entries outside the text are dropped.
    pub fn finish(self) -> StyledDocument {
        let mut styles = self.styles;
        styles.prune_to(&self.text);
        StyledDocument::new(self.text, styles)
    }

    /// Finish with trailing whitespace removed from the text.
    pub fn finish_trimmed(self) -> StyledDocument {
        let text = self.text.trim_end().to_string();
        let mut styles = self.styles;
        styles.prune_to(&text);
        StyledDocument::new(text, styles)
    }
}
