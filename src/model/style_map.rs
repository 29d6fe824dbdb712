//! Per-line, per-character style maps.

use super::StyleAttributes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

/// Styles for one line, keyed by character index.
pub type LineStyles = BTreeMap<usize, StyleAttributes>;

/// Mapping from line index to the styles of that line's characters.
///
/// Indices are 0-based and count `char`s. Positions without an entry carry
/// default formatting; an empty entry means the same thing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    lines: BTreeMap<usize, LineStyles>,
}

impl StyleMap {
    /// Create an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style of a single character.
    pub fn set(&mut self, line: usize, ch: usize, style: StyleAttributes) {
        self.lines.entry(line).or_default().insert(ch, style);
    }

    /// Get the style of a single character, if one was recorded.
    pub fn get(&self, line: usize, ch: usize) -> Option<&StyleAttributes> {
        self.lines.get(&line).and_then(|styles| styles.get(&ch))
    }

    /// Get all styles recorded for a line.
    pub fn line(&self, line: usize) -> Option<&LineStyles> {
        self.lines.get(&line)
    }

    /// Iterate over lines that have at least one entry, in line order.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &LineStyles)> {
        self.lines.iter().map(|(line, styles)| (*line, styles))
    }

    /// Number of lines with at least one entry.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of character entries.
    pub fn len(&self) -> usize {
        self.lines.values().map(BTreeMap::len).sum()
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.lines.values().all(BTreeMap::is_empty)
    }

    /// Move every entry on `line` right by `by` characters.
    pub fn shift_line(&mut self, line: usize, by: usize) {
        if by == 0 {
            return;
        }
        if let Some(styles) = self.lines.get_mut(&line) {
            let shifted = std::mem::take(styles)
                .into_iter()
                .map(|(ch, style)| (ch + by, style))
                .collect();
            *styles = shifted;
        }
    }

    /// Apply `f` to every entry recorded on `line`.
    pub fn apply_to_line<F>(&mut self, line: usize, mut f: F)
    where
        F: FnMut(&mut StyleAttributes),
    {
        if let Some(styles) = self.lines.get_mut(&line) {
            styles.values_mut().for_each(&mut f);
        }
    }

    /// Drop entries that fall outside `text`, and lines left empty.
    pub fn prune_to(&mut self, text: &str) {
        let lengths: Vec<usize> = text.split('\n').map(|l| l.chars().count()).collect();
        self.lines.retain(|line, styles| match lengths.get(*line) {
            Some(&len) => {
                styles.retain(|ch, _| *ch < len);
                !styles.is_empty()
            }
            None => false,
        });
    }

    /// Copy the lines in `range`, renumbered to start at 0.
    pub fn slice_lines(&self, range: Range<usize>) -> StyleMap {
        let start = range.start;
        let lines = self
            .lines
            .range(range)
            .map(|(line, styles)| (line - start, styles.clone()))
            .collect();
        StyleMap { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut map = StyleMap::new();
        map.set(0, 2, StyleAttributes::new().bold());

        assert!(map.get(0, 2).unwrap().is_bold());
        assert!(map.get(0, 1).is_none());
        assert!(map.get(1, 2).is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_shift_line() {
        let mut map = StyleMap::new();
        map.set(1, 0, StyleAttributes::new().bold());
        map.set(1, 3, StyleAttributes::new().italic());
        map.set(0, 0, StyleAttributes::new());

        map.shift_line(1, 2);

        assert!(map.get(1, 0).is_none());
        assert!(map.get(1, 2).unwrap().is_bold());
        assert!(map.get(1, 5).unwrap().is_italic());
        assert!(map.get(0, 0).is_some());
    }

    #[test]
    fn test_prune_to_text() {
        let mut map = StyleMap::new();
        map.set(0, 0, StyleAttributes::sized(10.0));
        map.set(0, 4, StyleAttributes::sized(10.0));
        map.set(1, 1, StyleAttributes::sized(10.0));
        map.set(3, 0, StyleAttributes::sized(10.0));

        map.prune_to("abc\nd");

        assert!(map.get(0, 0).is_some());
        assert!(map.get(0, 4).is_none());
        assert!(map.line(1).is_none());
        assert!(map.line(3).is_none());
    }

    #[test]
    fn test_slice_lines_rebases() {
        let mut map = StyleMap::new();
        map.set(2, 0, StyleAttributes::new().bold());
        map.set(3, 1, StyleAttributes::new().italic());
        map.set(4, 0, StyleAttributes::new());

        let slice = map.slice_lines(2..4);
        assert!(slice.get(0, 0).unwrap().is_bold());
        assert!(slice.get(1, 1).unwrap().is_italic());
        assert!(slice.line(2).is_none());
    }

    #[test]
    fn test_json_shape() {
        let mut map = StyleMap::new();
        map.set(0, 1, StyleAttributes::new().underlined());

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"0":{"1":{"underline":true}}}"#);

        let back: StyleMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
