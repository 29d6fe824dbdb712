//! Alignment of wrapped lines back to the logical text they came from.

use crate::model::{LogicalPosition, StyleMap, WrappedPosition};

/// Maps every wrapped character to the logical character it displays.
///
/// Built by walking the original text and the wrapped lines in lockstep.
/// Whitespace the renderer consumed at a wrap point is skipped; a wrapped
/// character with no logical counterpart stays unmapped.
#[derive(Debug, Clone, Default)]
pub struct AlignmentMap {
    rows: Vec<Vec<Option<LogicalPosition>>>,
}

impl AlignmentMap {
    /// Align `wrapped` lines against the `\n`-delimited `original` text.
    pub fn build<S: AsRef<str>>(original: &str, wrapped: &[S]) -> Self {
        let logical: Vec<Vec<char>> = original.split('\n').map(|l| l.chars().collect()).collect();
        let mut cursor = LogicalPosition::new(0, 0);
        let mut rows = Vec::with_capacity(wrapped.len());

        for (line, text) in wrapped.iter().enumerate() {
            let mut row = Vec::new();
            for (ch, wanted) in text.as_ref().chars().enumerate() {
                advance_to(&logical, &mut cursor, wanted);

                let found = logical.get(cursor.line).and_then(|l| l.get(cursor.ch));
                if found == Some(&wanted) {
                    row.push(Some(cursor));
                    cursor.ch += 1;
                } else {
                    log::warn!(
                        "Wrapped char {:?} at {}:{} has no match in the original text",
                        wanted,
                        line,
                        ch
                    );
                    row.push(None);
                }
            }
            rows.push(row);
        }

        Self { rows }
    }

    /// Logical position shown at a wrapped position, if any.
    pub fn get(&self, pos: WrappedPosition) -> Option<LogicalPosition> {
        self.rows.get(pos.line)?.get(pos.ch).copied().flatten()
    }

    /// Number of wrapped lines.
    pub fn line_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of wrapped characters with no logical counterpart.
    pub fn unmapped_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|pos| pos.is_none()).count())
            .sum()
    }

    /// Re-key `styles` from logical to wrapped coordinates.
    ///
    /// Positions whose source has no entry get none either.
    pub fn reindex(&self, styles: &StyleMap) -> StyleMap {
        let mut wrapped = StyleMap::new();
        for (line, row) in self.rows.iter().enumerate() {
            for (ch, source) in row.iter().enumerate() {
                let Some(source) = source else { continue };
                if let Some(style) = styles.get(source.line, source.ch) {
                    wrapped.set(line, ch, style.clone());
                }
            }
        }
        wrapped
    }
}

/// Move the cursor past line ends and skipped whitespace until it sits on
/// `wanted` or on a character that cannot be skipped.
fn advance_to(logical: &[Vec<char>], cursor: &mut LogicalPosition, wanted: char) {
    while let Some(current) = logical.get(cursor.line) {
        match current.get(cursor.ch) {
            None => {
                cursor.line += 1;
                cursor.ch = 0;
            }
            Some(&c) if c == wanted => return,
            Some(c) if c.is_whitespace() => cursor.ch += 1,
            Some(_) => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyleAttributes;

    #[test]
    fn test_wrap_consumes_space() {
        let map = AlignmentMap::build("hello world", &["hello", "world"]);
        assert_eq!(
            map.get(WrappedPosition::new(1, 0)),
            Some(LogicalPosition::new(0, 6))
        );
        assert_eq!(map.unmapped_count(), 0);
    }

    #[test]
    fn test_logical_line_breaks() {
        let map = AlignmentMap::build("ab\n\ncd", &["ab", "", "cd"]);
        assert_eq!(
            map.get(WrappedPosition::new(2, 1)),
            Some(LogicalPosition::new(2, 1))
        );
    }

    #[test]
    fn test_inserted_char_unmapped() {
        let map = AlignmentMap::build("abcdef", &["abc-", "def"]);
        assert_eq!(map.get(WrappedPosition::new(0, 3)), None);
        assert_eq!(
            map.get(WrappedPosition::new(1, 0)),
            Some(LogicalPosition::new(0, 3))
        );
        assert_eq!(map.unmapped_count(), 1);
    }

    #[test]
    fn test_exhausted_original() {
        let map = AlignmentMap::build("ab", &["ab", "c"]);
        assert_eq!(map.get(WrappedPosition::new(1, 0)), None);
    }

    #[test]
    fn test_reindex_moves_styles() {
        let mut styles = StyleMap::new();
        styles.set(0, 6, StyleAttributes::new().bold());
        styles.set(0, 0, StyleAttributes::new().italic());

        let map = AlignmentMap::build("hello world", &["hello", "world"]);
        let wrapped = map.reindex(&styles);

        assert!(wrapped.get(1, 0).unwrap().is_bold());
        assert!(wrapped.get(0, 0).unwrap().is_italic());
        assert!(wrapped.get(1, 1).is_none());
        assert_eq!(wrapped.len(), 2);
    }
}
