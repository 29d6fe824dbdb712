//! Parser for the older inline markdown dialect.
//!
//! Lines starting with dashes become bullets (one dash per nesting level).
//! Inside a line, `**` toggles bold, `~~` toggles underline and `_` toggles
//! italic. A marker only opens a style when the same marker appears again
//! later on the line, so stray markers stay in the text.

use std::sync::OnceLock;

use regex::Regex;

use super::{ConvertOptions, StyleConverter};
use crate::error::Result;
use crate::model::{DocumentBuilder, StyleAttributes, StyledDocument};

/// Inline toggle markers, in matching priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bold,
    Underline,
    Italic,
}

impl Marker {
    const ALL: [Marker; 3] = [Marker::Bold, Marker::Underline, Marker::Italic];

    fn token(self) -> &'static [char] {
        match self {
            Marker::Bold => &['*', '*'],
            Marker::Underline => &['~', '~'],
            Marker::Italic => &['_'],
        }
    }

    fn style(self) -> StyleAttributes {
        let style = StyleAttributes::new();
        match self {
            Marker::Bold => style.bold(),
            Marker::Underline => style.underlined(),
            Marker::Italic => style.italic(),
        }
    }
}

/// Parses dash bullets and toggle markers into a styled document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyInlineMarkdownParser;

impl LegacyInlineMarkdownParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse text in the legacy dialect. Styles carry no font size.
    pub fn to_styled_document(&self, text: &str) -> StyledDocument {
        let mut builder = DocumentBuilder::new();

        for line in text.split('\n') {
            let content = push_bullet(&mut builder, line);
            parse_inline(&mut builder, content);
            builder.newline();
        }

        builder.finish_trimmed()
    }
}

impl StyleConverter for LegacyInlineMarkdownParser {
    fn name(&self) -> &str {
        "legacy"
    }

    fn convert(&self, input: &str, _options: &ConvertOptions) -> Result<StyledDocument> {
        Ok(self.to_styled_document(input))
    }
}

/// Emit the bullet for a dash prefix and return the rest of the line.
fn push_bullet<'a>(builder: &mut DocumentBuilder, line: &'a str) -> &'a str {
    static DASHES: OnceLock<Regex> = OnceLock::new();
    let re = DASHES
        .get_or_init(|| Regex::new(r"^(-+)\s*").expect("dash regex should compile"));

    let Some(caps) = re.captures(line) else {
        return line;
    };
    let depth = caps.get(1).map_or(0, |m| m.as_str().len());
    let bullet = if depth == 1 {
        "• ".to_string()
    } else {
        format!("{}◦ ", "    ".repeat(depth - 1))
    };

    let empty = StyleAttributes::new();
    builder.push_str(&bullet, &empty);

    let matched = caps.get(0).map_or(0, |m| m.end());
    &line[matched..]
}

fn parse_inline(builder: &mut DocumentBuilder, line: &str) {
    let chars: Vec<char> = line.chars().collect();
    let mut active: Vec<Marker> = Vec::new();
    let mut i = 0;

    'outer: while i < chars.len() {
        for marker in Marker::ALL {
            let token = marker.token();
            if chars[i..].starts_with(token) && can_toggle(&chars, i, marker, &active) {
                match active.iter().position(|m| *m == marker) {
                    Some(index) => {
                        active.remove(index);
                    }
                    None => active.push(marker),
                }
                i += token.len();
                continue 'outer;
            }
        }

        let style = active
            .iter()
            .fold(StyleAttributes::new(), |style, marker| style.merge(&marker.style()));
        builder.push_styled_char(chars[i], &style);
        i += 1;
    }
}

/// A marker toggles when its style is active, or when it appears again later.
fn can_toggle(chars: &[char], pos: usize, marker: Marker, active: &[Marker]) -> bool {
    if active.contains(&marker) {
        return true;
    }
    let token = marker.token();
    let from = pos + token.len();
    from <= chars.len() && chars[from..].windows(token.len()).any(|w| w == token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> StyledDocument {
        LegacyInlineMarkdownParser::new().to_styled_document(text)
    }

    #[test]
    fn test_bold_toggle() {
        let doc = parse("a **b** c");
        assert_eq!(doc.text, "a b c");
        assert!(doc.style_at(0, 2).is_bold());
        assert!(!doc.style_at(0, 0).is_bold());
        assert!(!doc.style_at(0, 4).is_bold());
    }

    #[test]
    fn test_underline_and_italic() {
        let doc = parse("~~u~~ _i_");
        assert_eq!(doc.text, "u i");
        assert!(doc.style_at(0, 0).underline);
        assert!(doc.style_at(0, 2).is_italic());
        assert_eq!(doc.style_at(0, 2).font_size, None);
    }

    #[test]
    fn test_unclosed_marker_is_literal() {
        let doc = parse("**unclosed");
        assert_eq!(doc.text, "**unclosed");
        assert!(doc.styles.line(0).unwrap().values().all(|s| s.is_default()));
    }

    #[test]
    fn test_nested_toggles_merge() {
        let doc = parse("**_x_**");
        assert_eq!(doc.text, "x");
        let style = doc.style_at(0, 0);
        assert!(style.is_bold());
        assert!(style.is_italic());
    }

    #[test]
    fn test_bullets() {
        let doc = parse("- top\n-- nested\n---deep");
        assert_eq!(doc.text, "• top\n    ◦ nested\n        ◦ deep");
        assert!(doc.styles.get(0, 0).unwrap().is_default());
    }

    #[test]
    fn test_styles_reset_per_line() {
        let doc = parse("_a_\nb");
        assert!(doc.style_at(0, 0).is_italic());
        assert!(!doc.style_at(1, 0).is_italic());
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let doc = parse("text\n\n");
        assert_eq!(doc.text, "text");
        assert_eq!(doc.styles.line_count(), 1);
    }

    #[test]
    fn test_can_toggle() {
        let chars: Vec<char> = "_a".chars().collect();
        assert!(!can_toggle(&chars, 0, Marker::Italic, &[]));
        assert!(can_toggle(&chars, 0, Marker::Italic, &[Marker::Italic]));
    }
}
