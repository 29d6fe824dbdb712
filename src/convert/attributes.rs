//! Translation between delta attributes and character styles.

use super::ConvertOptions;
use crate::model::{FontStyle, FontWeight, NamedSize, RichAttributes, SizeValue, StyleAttributes};

/// Translate the inline part of delta attributes into a character style.
///
/// Block attributes (`header`, `align`, `list`, `indent`) are ignored here.
pub fn inline_style(attrs: &RichAttributes, options: &ConvertOptions) -> StyleAttributes {
    StyleAttributes {
        font_weight: (attrs.bold == Some(true)).then_some(FontWeight::Bold),
        font_style: (attrs.italic == Some(true)).then_some(FontStyle::Italic),
        underline: attrs.underline == Some(true),
        strikethrough: attrs.strike == Some(true),
        fill: attrs.color.clone(),
        font_family: attrs
            .font
            .as_deref()
            .map(|key| options.font_table.to_family(key).to_string()),
        font_size: attrs
            .size
            .as_ref()
            .and_then(|size| size.resolve(options.base_font_size)),
        text_align: None,
        background_color: attrs.background.clone(),
    }
}

/// Translate a character style back into inline delta attributes.
///
/// Sizes collapse to a keyword (or nothing); exact sizes are not recovered.
pub fn rich_attributes(style: &StyleAttributes, options: &ConvertOptions) -> RichAttributes {
    RichAttributes {
        bold: style.is_bold().then_some(true),
        italic: style.is_italic().then_some(true),
        underline: style.underline.then_some(true),
        strike: style.strikethrough.then_some(true),
        color: style.fill.clone(),
        background: style.background_color.clone(),
        font: style
            .font_family
            .as_deref()
            .map(|family| options.font_table.to_key(family).to_string()),
        size: style
            .font_size
            .and_then(|size| size_keyword(size, options.base_font_size))
            .map(SizeValue::Named),
        ..Default::default()
    }
}

/// Size keyword for a font size relative to the base size.
pub fn size_keyword(font_size: f64, base_font_size: f64) -> Option<NamedSize> {
    if base_font_size <= 0.0 {
        return None;
    }
    let ratio = font_size / base_font_size;
    if ratio < 0.8 {
        Some(NamedSize::Small)
    } else if ratio >= 2.0 {
        Some(NamedSize::Huge)
    } else if ratio >= 1.4 {
        Some(NamedSize::Large)
    } else {
        None
    }
}
