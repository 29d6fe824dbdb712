//! Page groups produced by the paginator.

use serde::{Deserialize, Serialize};

use crate::model::{StyleMap, StyledDocument};

/// A run of consecutive wrapped lines that fits one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGroup {
    /// Index of the first wrapped line on this page
    pub start_line: usize,

    /// Wrapped lines on this page
    pub lines: Vec<String>,

    /// Sum of the line heights
    pub height: f64,

    /// Styles keyed by line within this page
    pub styles: StyleMap,
}

impl PageGroup {
    /// Page text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of lines on the page.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Convert into a styled document for the page's text object.
    pub fn to_document(&self) -> StyledDocument {
        StyledDocument::new(self.text(), self.styles.clone())
    }
}

/// Label for page `number` (1-based) of `total`, e.g. `Page (2-5)`.
pub fn page_label(number: usize, total: usize) -> String {
    format!("Page ({}-{})", number, total)
}
