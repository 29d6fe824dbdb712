//! Character-level style types.

use serde::{Deserialize, Serialize};

/// Formatting applied to a single character.
///
/// Keys use the canvas library's vocabulary so a serialized style can be
/// handed to a text object unchanged. Unset properties inherit the text
/// object's defaults and are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAttributes {
    /// Font weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,

    /// Font style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,

    /// Underlined text
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,

    /// Strikethrough text
    #[serde(
        default,
        rename = "linethrough",
        alias = "strikethrough",
        skip_serializing_if = "is_false"
    )]
    pub strikethrough: bool,

    /// Text color (e.g. "#FF0000")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,

    /// Font family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Absolute font size, already scaled by the base size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    /// Text alignment of the line this character sits on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<Alignment>,

    /// Background/highlight color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl StyleAttributes {
    /// Create an empty (default) style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a style that only sets the font size.
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    /// Set bold weight.
    pub fn bold(mut self) -> Self {
        self.font_weight = Some(FontWeight::Bold);
        self
    }

    /// Set italic style.
    pub fn italic(mut self) -> Self {
        self.font_style = Some(FontStyle::Italic);
        self
    }

    /// Set underline.
    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Set strikethrough.
    pub fn struck(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set the alignment.
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.text_align = Some(align);
        self
    }

    /// Check if the weight is bold.
    pub fn is_bold(&self) -> bool {
        self.font_weight == Some(FontWeight::Bold)
    }

    /// Check if the style is italic.
    pub fn is_italic(&self) -> bool {
        self.font_style == Some(FontStyle::Italic)
    }

    /// Check if this style carries no formatting beyond the defaults.
    pub fn is_default(&self) -> bool {
        matches!(self.font_weight, None | Some(FontWeight::Normal))
            && matches!(self.font_style, None | Some(FontStyle::Normal))
            && !self.underline
            && !self.strikethrough
            && self.fill.is_none()
            && self.font_family.is_none()
            && self.font_size.is_none()
            && matches!(self.text_align, None | Some(Alignment::Left))
            && self.background_color.is_none()
    }

    /// Overlay `other` on top of this style; properties set in `other` win.
    pub fn merge(&self, other: &StyleAttributes) -> StyleAttributes {
        StyleAttributes {
            font_weight: other.font_weight.or(self.font_weight),
            font_style: other.font_style.or(self.font_style),
            underline: self.underline || other.underline,
            strikethrough: self.strikethrough || other.strikethrough,
            fill: other.fill.clone().or_else(|| self.fill.clone()),
            font_family: other
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            font_size: other.font_size.or(self.font_size),
            text_align: other.text_align.or(self.text_align),
            background_color: other
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight (default)
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// Font style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright (default)
    #[default]
    Normal,
    /// Italic
    Italic,
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}
