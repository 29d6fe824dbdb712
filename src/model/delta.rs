//! Rich-text delta types used by rich-text input widgets.

use super::Alignment;
use crate::error::{Error, Result};
use crate::json::{to_json, JsonFormat};
use serde::{Deserialize, Serialize};

/// An ordered list of insert operations.
///
/// Serializes as `{"ops": [...]}`; a bare array of ops is accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DeltaRepr")]
pub struct Delta {
    /// Insert operations in document order
    pub ops: Vec<InsertOp>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeltaRepr {
    Wrapped { ops: Vec<InsertOp> },
    Bare(Vec<InsertOp>),
}

impl From<DeltaRepr> for Delta {
    fn from(repr: DeltaRepr) -> Self {
        match repr {
            DeltaRepr::Wrapped { ops } | DeltaRepr::Bare(ops) => Delta { ops },
        }
    }
}

impl Delta {
    /// Create an empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a delta from JSON and validate its attribute values.
    pub fn from_json(json: &str) -> Result<Self> {
        let delta: Delta = serde_json::from_str(json)?;
        delta.validate()?;
        Ok(delta)
    }

    /// Serialize as `{"ops": [...]}`.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }

    /// Check attribute values that JSON typing alone cannot rule out.
    pub fn validate(&self) -> Result<()> {
        for (index, op) in self.ops.iter().enumerate() {
            if let Some(level) = op.attributes.header {
                if !(1..=6).contains(&level) {
                    return Err(Error::InvalidDelta(format!(
                        "header level {} at op {} (expected 1-6)",
                        level, index
                    )));
                }
            }
        }
        Ok(())
    }

    /// Append an op, merging it into the previous op when both carry the
    /// same attributes. Empty inserts are dropped.
    pub fn push(&mut self, op: InsertOp) {
        if op.insert.is_empty() {
            return;
        }
        if let Some(last) = self.ops.last_mut() {
            if last.attributes == op.attributes {
                last.insert.push_str(&op.insert);
                return;
            }
        }
        self.ops.push(op);
    }

    /// Append text with attributes.
    pub fn insert(mut self, text: impl Into<String>, attributes: RichAttributes) -> Self {
        self.push(InsertOp::with_attributes(text, attributes));
        self
    }

    /// Concatenated text of every op.
    pub fn text(&self) -> String {
        self.ops.iter().map(|op| op.insert.as_str()).collect()
    }

    /// Check if the delta has no ops.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// A single insert operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertOp {
    /// Inserted text
    pub insert: String,

    /// Formatting; on an op containing `\n` these describe the finished line
    #[serde(default, skip_serializing_if = "RichAttributes::is_empty")]
    pub attributes: RichAttributes,
}

impl InsertOp {
    /// Create an unformatted insert.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            insert: text.into(),
            attributes: RichAttributes::default(),
        }
    }

    /// Create an insert with attributes.
    pub fn with_attributes(text: impl Into<String>, attributes: RichAttributes) -> Self {
        Self {
            insert: text.into(),
            attributes,
        }
    }
}

/// Formatting attributes in the rich-text widget's vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichAttributes {
    /// Bold text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Italic text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    /// Underlined text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    /// Strikethrough text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike: Option<bool>,

    /// Text color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Background color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Font key (e.g. "arial-black")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Size keyword or absolute size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeValue>,

    /// Header level (1-6), block attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<u8>,

    /// Line alignment, block attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,

    /// List kind, block attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListKind>,

    /// List nesting level (0-based), block attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<u8>,
}

impl RichAttributes {
    /// Check if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == RichAttributes::default()
    }

    /// Set bold.
    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    /// Set italic.
    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    /// Set the size.
    pub fn with_size(mut self, size: SizeValue) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the header level.
    pub fn with_header(mut self, level: u8) -> Self {
        self.header = Some(level);
        self
    }

    /// Set the alignment.
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    /// Set list kind and nesting level.
    pub fn with_list(mut self, kind: ListKind, indent: u8) -> Self {
        self.list = Some(kind);
        self.indent = (indent > 0).then_some(indent);
        self
    }

    /// Nesting level, 0 when unset.
    pub fn indent_level(&self) -> u8 {
        self.indent.unwrap_or(0)
    }
}

/// List kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Numbered list
    Ordered,
    /// Bulleted list
    Bullet,
}

/// Font size as carried in a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    /// Relative size keyword
    Named(NamedSize),
    /// Absolute size in points
    Points(f64),
    /// Any other string (e.g. "18px")
    Raw(String),
}

impl SizeValue {
    /// Resolve to an absolute font size, or `None` to leave the size unchanged.
    pub fn resolve(&self, base_font_size: f64) -> Option<f64> {
        match self {
            SizeValue::Named(named) => Some(base_font_size * named.multiplier()),
            SizeValue::Points(points) => Some(*points),
            SizeValue::Raw(raw) => raw
                .trim()
                .trim_end_matches("px")
                .trim_end_matches("pt")
                .trim()
                .parse()
                .ok(),
        }
    }
}

/// Relative size keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedSize {
    /// 0.75x base
    Small,
    /// 1.5x base
    Large,
    /// 2.5x base
    Huge,
}

impl NamedSize {
    /// Multiplier applied to the base font size.
    pub fn multiplier(self) -> f64 {
        match self {
            NamedSize::Small => 0.75,
            NamedSize::Large => 1.5,
            NamedSize::Huge => 2.5,
        }
    }
}
