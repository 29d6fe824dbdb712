//! # labeltext
//!
//! Styled text conversion and pagination for canvas text objects.
//!
//! This library turns user-authored rich text into plain text plus a
//! per-character style map, the shape a canvas text object consumes, and
//! splits tall wrapped text into page-sized chunks.
//!
//! ## Quick Start
//!
//! ```
//! use labeltext::markdown_to_styled;
//!
//! let doc = markdown_to_styled("# Title\n\nSome **bold** text", 10.0);
//! assert_eq!(doc.text, "Title\n\nSome bold text");
//! assert!(doc.style_at(0, 0).is_bold());
//! assert_eq!(doc.style_at(0, 0).font_size, Some(12.5));
//! ```
//!
//! ## Features
//!
//! - **Markdown**: paragraphs, headings, nested lists and inline emphasis
//! - **Rich-text deltas**: conversion in both directions with list markers
//! - **Legacy dialect**: dash bullets and `**`/`~~`/`_` toggles
//! - **Pagination**: carries styles from logical text onto wrapped pages

pub mod convert;
pub mod error;
pub mod json;
pub mod model;
pub mod paginate;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConverterRegistry, DeltaConverter, FontTable, LegacyInlineMarkdownParser,
    MarkdownConverter, StyleConverter,
};
pub use error::{Error, Result};
pub use json::{to_json, JsonFormat};
pub use model::{
    Alignment, Delta, InsertOp, RichAttributes, StyleAttributes, StyleMap, StyledDocument,
};
pub use paginate::{page_label, LineHeights, PageGroup, Paginator};

/// Convert markdown to a styled document.
///
/// # Example
///
/// ```
/// use labeltext::markdown_to_styled;
///
/// let doc = markdown_to_styled("- one\n- two", 18.0);
/// assert_eq!(doc.text, "• one\n• two");
/// ```
pub fn markdown_to_styled(markdown: &str, base_font_size: f64) -> StyledDocument {
    let options = ConvertOptions::new().with_base_font_size(base_font_size);
    MarkdownConverter::new().to_styled_document(markdown, &options)
}

/// Convert text in the legacy inline dialect to a styled document.
pub fn legacy_to_styled(text: &str) -> StyledDocument {
    LegacyInlineMarkdownParser::new().to_styled_document(text)
}

/// Convert delta JSON to a styled document.
///
/// # Example
///
/// ```
/// use labeltext::delta_to_styled;
///
/// let doc = delta_to_styled(
///     r#"{"ops":[{"insert":"Hi","attributes":{"bold":true}},{"insert":"\n"}]}"#,
///     18.0,
/// )?;
/// assert_eq!(doc.text, "Hi\n");
/// assert!(doc.style_at(0, 1).is_bold());
/// # Ok::<(), labeltext::Error>(())
/// ```
pub fn delta_to_styled(delta_json: &str, base_font_size: f64) -> Result<StyledDocument> {
    let delta = Delta::from_json(delta_json)?;
    let options = ConvertOptions::new().with_base_font_size(base_font_size);
    Ok(DeltaConverter::new().from_delta(&delta, &options))
}

/// Rebuild a delta from a styled document.
pub fn styled_to_delta(doc: &StyledDocument, base_font_size: f64) -> Delta {
    let options = ConvertOptions::new().with_base_font_size(base_font_size);
    DeltaConverter::new().to_delta(doc, &options)
}

/// Split wrapped lines into page documents.
///
/// `styles` is keyed by position in `original_text`. Each returned document
/// holds one page's text and styles.
///
/// # Example
///
/// ```
/// use labeltext::{paginate, LineHeights, StyleMap};
///
/// let lines = ["a", "b", "c"];
/// let pages = paginate(&lines, &LineHeights::Uniform(10.0), &StyleMap::new(), "a b c", 15.0)?;
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[1].text, "c");
/// # Ok::<(), labeltext::Error>(())
/// ```
pub fn paginate<S: AsRef<str>>(
    wrapped_lines: &[S],
    heights: &LineHeights,
    styles: &StyleMap,
    original_text: &str,
    desired_height: f64,
) -> Result<Vec<StyledDocument>> {
    let paginator = Paginator::new(desired_height);
    let pages = paginator.paginate(wrapped_lines, heights, styles, original_text)?;
    Ok(pages.iter().map(PageGroup::to_document).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_styled_base_size() {
        let doc = markdown_to_styled("plain", 14.0);
        assert_eq!(doc.style_at(0, 0), StyleAttributes::sized(14.0));
    }

    #[test]
    fn test_delta_to_styled_invalid_json() {
        let result = delta_to_styled("not json", 18.0);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_delta_to_styled_invalid_header() {
        let result = delta_to_styled(r#"[{"insert":"x\n","attributes":{"header":7}}]"#, 18.0);
        assert!(matches!(result, Err(Error::InvalidDelta(_))));
    }

    #[test]
    fn test_styled_to_delta_plain() {
        let delta = styled_to_delta(&StyledDocument::plain("a\nb"), 18.0);
        assert_eq!(delta.text(), "a\nb");
    }

    #[test]
    fn test_legacy_to_styled() {
        let doc = legacy_to_styled("- _x_");
        assert_eq!(doc.text, "• x");
        assert!(doc.style_at(0, 2).is_italic());
    }

    #[test]
    fn test_paginate_empty() {
        let lines: [&str; 0] = [];
        let heights = LineHeights::Uniform(10.0);
        let pages = paginate(&lines, &heights, &StyleMap::new(), "", 20.0).unwrap();
        assert!(pages.is_empty());
    }
}
