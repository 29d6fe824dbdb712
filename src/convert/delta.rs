//! Conversion between rich-text deltas and styled text.
//!
//! Forward conversion flattens a [`Delta`] into text plus a style map,
//! synthesizing visible list markers. The inverse rebuilds a delta from a
//! styled document, recognizing those markers again. Numeric font sizes
//! collapse to size keywords on the way back, so only text and effective
//! formatting survive a round trip.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::{inline_style, rich_attributes, ConvertOptions, StyleConverter};
use crate::error::Result;
use crate::model::{
    Alignment, Delta, DocumentBuilder, InsertOp, LineStyles, ListKind, RichAttributes,
    StyleAttributes, StyledDocument,
};

/// Size multipliers for header levels 1-6.
const HEADER_SCALE: [f64; 6] = [1.865, 1.45, 1.15, 1.0, 0.90, 0.75];

/// Converts between deltas and styled documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaConverter;

impl DeltaConverter {
    /// Create a new delta converter.
    pub fn new() -> Self {
        Self
    }

    /// Flatten a delta into a styled document.
    ///
    /// Every inserted character gets an entry, possibly empty. Synthesized
    /// list markers get none, which is how [`to_delta`](Self::to_delta) tells
    /// them apart from typed text. Newlines are kept in the text, so the text
    /// is the delta's concatenated inserts with list markers added.
    pub fn from_delta(&self, delta: &Delta, options: &ConvertOptions) -> StyledDocument {
        let mut builder = DocumentBuilder::new();
        let mut counters = ListCounters::default();

        for op in &delta.ops {
            let style = inline_style(&op.attributes, options);
            for ch in op.insert.chars() {
                if ch == '\n' {
                    finish_block(&mut builder, &mut counters, &op.attributes, options);
                    builder.newline();
                } else {
                    builder.push_styled_char(ch, &style);
                }
            }
        }

        let doc = builder.finish();
        log::debug!(
            "delta: {} ops flattened into {} lines",
            delta.ops.len(),
            doc.line_count()
        );
        doc
    }

    /// Rebuild a delta from a styled document.
    pub fn to_delta(&self, doc: &StyledDocument, options: &ConvertOptions) -> Delta {
        let mut delta = Delta::new();
        let lines: Vec<&str> = doc.text.split('\n').collect();
        let last = lines.len() - 1;

        for (index, line) in lines.iter().enumerate() {
            let prefix = ListPrefix::detect(line, doc.styles.line(index));
            let content_start = prefix.as_ref().map_or(0, |p| p.width);

            let mut run = String::new();
            let mut run_style: Option<StyleAttributes> = None;
            for (ch_index, ch) in line.chars().enumerate().skip(content_start) {
                let mut style = doc.style_at(index, ch_index);
                style.text_align = None;
                if run_style.as_ref() != Some(&style) {
                    if let Some(previous) = run_style.take() {
                        let attrs = rich_attributes(&previous, options);
                        delta.push(InsertOp::with_attributes(std::mem::take(&mut run), attrs));
                    }
                    run_style = Some(style);
                }
                run.push(ch);
            }
            if let Some(style) = run_style {
                delta.push(InsertOp::with_attributes(run, rich_attributes(&style, options)));
            }

            if index < last {
                let mut block = RichAttributes::default();
                if let Some(prefix) = prefix {
                    block = block.with_list(prefix.kind, prefix.indent);
                }
                block.align = dominant_alignment(doc.styles.line(index))
                    .filter(|align| *align != Alignment::Left);
                delta.push(InsertOp::with_attributes("\n", block));
            }
        }
        delta
    }
}

impl StyleConverter for DeltaConverter {
    fn name(&self) -> &str {
        "delta"
    }

    fn convert(&self, input: &str, options: &ConvertOptions) -> Result<StyledDocument> {
        let delta = Delta::from_json(input)?;
        Ok(self.from_delta(&delta, options))
    }
}

/// Apply a line's block attributes once its `\n` is reached.
fn finish_block(
    builder: &mut DocumentBuilder,
    counters: &mut ListCounters,
    block: &RichAttributes,
    options: &ConvertOptions,
) {
    let line = builder.line();

    match block.list {
        Some(kind) => {
            let indent = block.indent_level();
            let marker = counters.next_marker(kind, indent);
            let prefix = format!("{}{} ", "  ".repeat(usize::from(indent)), marker);
            builder.prepend_to_line(&prefix);
        }
        None => counters.reset(),
    }

    if let Some(align) = block.align {
        builder
            .styles_mut()
            .apply_to_line(line, |style| style.text_align = Some(align));
    }

    if let Some(level) = block.header {
        let scale = HEADER_SCALE
            .get(usize::from(level).saturating_sub(1))
            .copied()
            .unwrap_or(1.0);
        let base = options.base_font_size;
        builder.styles_mut().apply_to_line(line, |style| {
            style.font_size = Some(style.font_size.unwrap_or(base) * scale);
        });
    }
}

/// Ordered list counters keyed by indent level.
#[derive(Debug, Default)]
struct ListCounters {
    counts: BTreeMap<u8, usize>,
}

impl ListCounters {
    fn next_marker(&mut self, kind: ListKind, indent: u8) -> String {
        // a shallower item ends every deeper list
        self.counts.retain(|level, _| *level <= indent);

        match kind {
            ListKind::Ordered => {
                let count = self.counts.entry(indent).or_insert(0);
                *count += 1;
                ordered_marker(*count, indent)
            }
            ListKind::Bullet => {
                self.counts.remove(&indent);
                let bullet = if indent % 2 == 0 { "•" } else { "◦" };
                bullet.to_string()
            }
        }
    }

    fn reset(&mut self) {
        self.counts.clear();
    }
}

fn ordered_marker(n: usize, indent: u8) -> String {
    let label = match indent % 3 {
        0 => n.to_string(),
        1 => alphabetic(n),
        _ => roman(n),
    };
    format!("{}.", label)
}

/// a, b, ..., z, aa, ab, ...
fn alphabetic(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

fn roman(mut n: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];

    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

/// A list marker found at the start of a line.
///
/// Only unstyled characters count as a marker. Typed text that merely looks
/// like `1. ` carries style entries and stays part of the content.
#[derive(Debug, Clone, PartialEq)]
struct ListPrefix {
    kind: ListKind,
    indent: u8,
    /// Prefix length in characters, including indentation and spacing
    width: usize,
}

impl ListPrefix {
    fn detect(line: &str, styles: Option<&LineStyles>) -> Option<ListPrefix> {
        static LIST_PREFIX: OnceLock<Regex> = OnceLock::new();
        let re = LIST_PREFIX.get_or_init(|| {
            Regex::new(
                r"^(?P<indent> *)(?P<marker>(?P<number>\d+)\.|(?P<letters>[a-z]+)\.|[•◦])\s+",
            )
            .expect("list prefix regex should compile")
        });

        let caps = re.captures(line)?;
        let spaces = caps.name("indent").map_or(0, |m| m.as_str().len());
        let indent = u8::try_from(spaces / 2).unwrap_or(u8::MAX);

        let kind = if caps.name("number").is_some() {
            ListKind::Ordered
        } else if let Some(letters) = caps.name("letters") {
            let letters = letters.as_str();
            let matches_level = match indent % 3 {
                1 => true,
                2 => letters.chars().all(|c| "ivxlcdm".contains(c)),
                _ => false,
            };
            if !matches_level {
                return None;
            }
            ListKind::Ordered
        } else {
            ListKind::Bullet
        };

        // marker plus at least one separating space, all unstyled
        let marker_end = spaces + caps.name("marker").map_or(0, |m| m.as_str().chars().count());
        let unstyled = styles
            .and_then(|styles| styles.keys().next().copied())
            .unwrap_or(usize::MAX);
        if unstyled <= marker_end {
            return None;
        }

        let matched = caps.get(0).map_or(0, |m| m.as_str().chars().count());
        Some(ListPrefix {
            kind,
            indent,
            width: matched.min(unstyled),
        })
    }
}

/// Most common alignment on a line; ties go to the first one seen.
fn dominant_alignment(styles: Option<&LineStyles>) -> Option<Alignment> {
    let mut counts: Vec<(Alignment, usize)> = Vec::new();
    for align in styles?.values().filter_map(|style| style.text_align) {
        match counts.iter_mut().find(|(seen, _)| *seen == align) {
            Some((_, count)) => *count += 1,
            None => counts.push((align, 1)),
        }
    }

    let mut best: Option<(Alignment, usize)> = None;
    for (align, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((align, count));
        }
    }
    best.map(|(align, _)| align)
}
