//! Markdown to styled text conversion.
//!
//! The input is lexed with `pulldown-cmark` into a small closed token tree,
//! which is then flattened depth-first into a [`StyledDocument`]. Only a
//! subset of markdown gets styling: paragraphs, headings, nested lists,
//! strong, emphasis, strikethrough and inline code. Anything else is
//! rendered as plain text.

use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

use super::{ConvertOptions, StyleConverter};
use crate::error::Result;
use crate::model::{DocumentBuilder, StyleAttributes, StyledDocument};

/// Size multipliers for heading depths 1-6.
const HEADING_SCALE: [f64; 6] = [1.25, 1.15, 1.10, 1.05, 1.025, 1.0];

const BULLET: &str = "• ";
const NESTED_BULLET: &str = "◦ ";

/// Converts markdown into a styled document.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    /// Create a new markdown converter.
    pub fn new() -> Self {
        Self
    }

    /// Convert markdown text. All sizes derive from `options.base_font_size`.
    pub fn to_styled_document(&self, markdown: &str, options: &ConvertOptions) -> StyledDocument {
        let blocks = lex(markdown);
        log::debug!("markdown: lexed {} top-level blocks", blocks.len());

        let mut flattener = Flattener {
            builder: DocumentBuilder::new(),
            options,
        };
        flattener.blocks(&blocks);
        flattener.builder.finish_trimmed()
    }
}

impl StyleConverter for MarkdownConverter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn convert(&self, input: &str, options: &ConvertOptions) -> Result<StyledDocument> {
        Ok(self.to_styled_document(input, options))
    }
}

// ============================================================================
// Token tree
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Paragraph(Vec<Inline>),
    Heading { depth: usize, inlines: Vec<Inline> },
    List { ordered: bool, items: Vec<ListItem> },
    /// Inline content directly inside a block container (tight list items)
    Text(Vec<Inline>),
    /// Blank line(s) between top-level blocks
    Space,
    Code(String),
    Quote(Vec<Block>),
    Rule,
    /// Any other block, kept as its plain text
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
struct ListItem {
    blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Em(Vec<Inline>),
    Del(Vec<Inline>),
    Code(String),
    Break,
    /// Any other inline container; children keep the ancestor style
    Span(Vec<Inline>),
}

fn lex(source: &str) -> Vec<Block> {
    let parser = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH);
    let mut lexer = Lexer {
        source,
        events: parser.into_offset_iter().collect(),
        pos: 0,
        containers: 0,
        keep_indent: false,
    };
    lexer.top_level()
}

struct Lexer<'a> {
    source: &'a str,
    events: Vec<(Event<'a>, Range<usize>)>,
    pos: usize,
    /// Open lists and quotes around the current event
    containers: usize,
    /// Inside a top-level paragraph, where line indentation is content
    keep_indent: bool,
}

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<&Event<'a>> {
        self.events.get(self.pos).map(|(event, _)| event)
    }

    fn next_event(&mut self) -> Option<Event<'a>> {
        let event = self.events.get(self.pos).map(|(event, _)| event.clone());
        if event.is_some() {
            self.pos += 1;
        }
        event
    }

    fn top_level(&mut self) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut previous_end: Option<usize> = None;

        while let Some((_, range)) = self.events.get(self.pos) {
            let range = range.clone();
            if let Some(end) = previous_end {
                if self.blank_line_between(end, range.start) {
                    blocks.push(Block::Space);
                }
            }
            match self.block() {
                Some(block) => blocks.push(block),
                // stray end tag at the top level
                None => self.pos += 1,
            }
            previous_end = Some(range.end);
        }
        blocks
    }

    fn blank_line_between(&self, end: usize, start: usize) -> bool {
        if start <= end {
            return false;
        }
        let content_end = self.source[..end].trim_end().len();
        self.source[content_end..start].matches('\n').count() >= 2
    }

    /// Read one block. Returns `None` without consuming at an end tag.
    fn block(&mut self) -> Option<Block> {
        let event = self.peek()?.clone();
        match event {
            Event::End(_) => None,
            Event::Rule => {
                self.pos += 1;
                Some(Block::Rule)
            }
            Event::Start(Tag::Paragraph) => {
                self.pos += 1;
                self.keep_indent = self.containers == 0;
                let inlines = self.inlines_until_end();
                self.keep_indent = false;
                Some(Block::Paragraph(inlines))
            }
            Event::Start(Tag::Heading { level, .. }) => {
                self.pos += 1;
                Some(Block::Heading {
                    depth: heading_depth(level),
                    inlines: self.inlines_until_end(),
                })
            }
            Event::Start(Tag::List(start)) => {
                self.pos += 1;
                self.containers += 1;
                let items = self.list_items();
                self.containers -= 1;
                Some(Block::List {
                    ordered: start.is_some(),
                    items,
                })
            }
            Event::Start(Tag::BlockQuote(..)) => {
                self.pos += 1;
                self.containers += 1;
                let children = self.blocks_until_end();
                self.containers -= 1;
                Some(Block::Quote(children))
            }
            Event::Start(Tag::CodeBlock(_)) => {
                self.pos += 1;
                let text = self.text_until_end();
                Some(Block::Code(text.trim_end_matches('\n').to_string()))
            }
            Event::Start(ref tag) if !is_inline_tag(tag) => {
                self.pos += 1;
                Some(Block::Raw(self.text_until_end()))
            }
            _ => Some(Block::Text(self.inline_run())),
        }
    }

    fn blocks_until_end(&mut self) -> Vec<Block> {
        let mut blocks = Vec::new();
        while let Some(event) = self.peek() {
            if matches!(event, Event::End(_)) {
                self.pos += 1;
                break;
            }
            if let Some(block) = self.block() {
                blocks.push(block);
            }
        }
        blocks
    }

    fn list_items(&mut self) -> Vec<ListItem> {
        let mut items = Vec::new();
        while let Some(event) = self.peek() {
            match event {
                Event::End(_) => {
                    self.pos += 1;
                    break;
                }
                Event::Start(Tag::Item) => {
                    self.pos += 1;
                    items.push(ListItem {
                        blocks: self.blocks_until_end(),
                    });
                }
                // lists only ever contain items
                _ => self.pos += 1,
            }
        }
        items
    }

    /// Inline elements up to a block boundary, which is left unconsumed.
    fn inline_run(&mut self) -> Vec<Inline> {
        let mut inlines = Vec::new();
        while let Some(event) = self.peek() {
            if !is_inline_event(event) {
                break;
            }
            if let Some(inline) = self.inline() {
                inlines.push(inline);
            }
        }
        inlines
    }

    /// Inline elements up to and including the enclosing end tag.
    fn inlines_until_end(&mut self) -> Vec<Inline> {
        let mut inlines = Vec::new();
        while let Some(event) = self.peek() {
            if matches!(event, Event::End(_)) {
                self.pos += 1;
                break;
            }
            if let Some(indent) = self.line_indent() {
                inlines.push(indent);
            }
            if let Some(inline) = self.inline() {
                inlines.push(inline);
            }
        }
        inlines
    }

    /// Source indentation before the current event, when it opens a line.
    ///
    /// The parser strips it from paragraph text; it is restored only for
    /// top-level paragraphs.
    fn line_indent(&self) -> Option<Inline> {
        if !self.keep_indent {
            return None;
        }
        let (_, range) = self.events.get(self.pos)?;
        let before = &self.source[..range.start];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let lead = &before[line_start..];
        if lead.is_empty() || !lead.chars().all(|c| c == ' ' || c == '\t') {
            return None;
        }
        Some(Inline::Text(lead.to_string()))
    }

    fn inline(&mut self) -> Option<Inline> {
        let inline = match self.next_event()? {
            Event::Text(text) | Event::InlineHtml(text) | Event::Html(text) => {
                Inline::Text(text.to_string())
            }
            Event::Code(code) => Inline::Code(code.to_string()),
            Event::SoftBreak | Event::HardBreak => Inline::Break,
            Event::FootnoteReference(label) => Inline::Text(format!("[^{}]", label)),
            Event::TaskListMarker(checked) => {
                Inline::Text(if checked { "[x] " } else { "[ ] " }.to_string())
            }
            Event::Start(Tag::Strong) => Inline::Strong(self.inlines_until_end()),
            Event::Start(Tag::Emphasis) => Inline::Em(self.inlines_until_end()),
            Event::Start(Tag::Strikethrough) => Inline::Del(self.inlines_until_end()),
            Event::Start(_) => Inline::Span(self.inlines_until_end()),
            Event::End(_) => return None,
            Event::Rule => Inline::Break,
            _ => return None,
        };
        Some(inline)
    }

    /// Plain text of everything up to the matching end tag.
    fn text_until_end(&mut self) -> String {
        let mut text = String::new();
        let mut depth = 1usize;
        while let Some(event) = self.next_event() {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Event::Text(t) | Event::Code(t) | Event::Html(t) | Event::InlineHtml(t) => {
                    text.push_str(&t)
                }
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                _ => {}
            }
        }
        text
    }
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_event(event: &Event<'_>) -> bool {
    match event {
        Event::End(_) | Event::Rule => false,
        Event::Start(tag) => is_inline_tag(tag),
        _ => true,
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

// ============================================================================
// Flattening
// ============================================================================

struct Flattener<'o> {
    builder: DocumentBuilder,
    options: &'o ConvertOptions,
}

impl Flattener<'_> {
    fn base(&self) -> StyleAttributes {
        StyleAttributes::sized(self.options.base_font_size)
    }

    fn heading_style(&self, depth: usize) -> StyleAttributes {
        let scale = HEADING_SCALE
            .get(depth.saturating_sub(1))
            .copied()
            .unwrap_or(1.0);
        StyleAttributes::sized(self.options.base_font_size * scale).bold()
    }

    fn blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            match block {
                Block::Paragraph(inlines) => {
                    let base = self.base();
                    self.inlines(inlines, &base);
                    self.builder.newline();
                }
                Block::Heading { depth, inlines } => {
                    let style = self.heading_style(*depth);
                    self.inlines(inlines, &style);
                    self.builder.newline();
                }
                Block::List { ordered, items } => self.list(*ordered, items, 0),
                Block::Text(inlines) => {
                    let base = self.base();
                    self.inlines(inlines, &base);
                }
                Block::Space => self.builder.newline(),
                Block::Code(text) | Block::Raw(text) => {
                    let base = self.base();
                    self.builder.push_str(text, &base);
                    self.builder.newline();
                }
                Block::Quote(children) => self.blocks(children),
                Block::Rule => {}
            }
        }
    }

    fn list(&mut self, ordered: bool, items: &[ListItem], depth: usize) {
        let base = self.base();
        for (index, item) in items.iter().enumerate() {
            let marker = if ordered {
                format!("{}. ", index + 1)
            } else if depth == 0 {
                BULLET.to_string()
            } else {
                NESTED_BULLET.to_string()
            };
            self.builder
                .push_str(&format!("{}{}", "  ".repeat(depth), marker), &base);

            let mut wrote_content = false;
            for child in &item.blocks {
                if matches!(child, Block::List { .. }) {
                    continue;
                }
                if wrote_content {
                    self.builder.newline();
                }
                self.item_content(child);
                wrote_content = true;
            }
            self.builder.newline();

            for child in &item.blocks {
                if let Block::List { ordered, items } = child {
                    self.list(*ordered, items, depth + 1);
                }
            }
        }
    }

    /// Content of a list item renders with the base style.
    fn item_content(&mut self, block: &Block) {
        let base = self.base();
        match block {
            Block::Paragraph(inlines)
            | Block::Text(inlines)
            | Block::Heading { inlines, .. } => self.inlines(inlines, &base),
            Block::Code(text) | Block::Raw(text) => self.builder.push_str(text, &base),
            Block::Quote(children) => {
                for child in children {
                    self.item_content(child);
                }
            }
            Block::List { .. } | Block::Space | Block::Rule => {}
        }
    }

    fn inlines(&mut self, inlines: &[Inline], style: &StyleAttributes) {
        for inline in inlines {
            match inline {
                Inline::Text(text) => self.builder.push_str(text, style),
                Inline::Strong(children) => self.inlines(children, &style.clone().bold()),
                Inline::Em(children) => self.inlines(children, &style.clone().italic()),
                // strikethrough markup renders as underline
                Inline::Del(children) => self.inlines(children, &style.clone().underlined()),
                Inline::Code(code) => {
                    let code_style = style.merge(
                        &StyleAttributes::new()
                            .with_font_family(self.options.code_font_family.clone())
                            .with_background(self.options.code_background.clone()),
                    );
                    self.builder.push_str(code, &code_style);
                }
                Inline::Break => self.builder.newline(),
                Inline::Span(children) => self.inlines(children, style),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(markdown: &str, size: f64) -> StyledDocument {
        let options = ConvertOptions::new().with_base_font_size(size);
        MarkdownConverter::new().to_styled_document(markdown, &options)
    }

    #[test]
    fn test_lex_paragraph_and_heading() {
        let blocks = lex("# Title\n\nSome **bold** text");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::Heading { depth: 1, .. }));
        assert_eq!(blocks[1], Block::Space);
        match &blocks[2] {
            Block::Paragraph(inlines) => {
                assert!(inlines.iter().any(|i| matches!(i, Inline::Strong(_))));
            }
            other => panic!("Expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_lex_no_space_without_blank_line() {
        let blocks = lex("# Title\nBody");
        assert_eq!(blocks.len(), 2);
        assert!(!blocks.contains(&Block::Space));
    }

    #[test]
    fn test_lex_nested_list() {
        let blocks = lex("- a\n  - b\n- c");
        match &blocks[0] {
            Block::List { ordered, items } => {
                assert!(!ordered);
                assert_eq!(items.len(), 2);
                assert!(items[0]
                    .blocks
                    .iter()
                    .any(|b| matches!(b, Block::List { .. })));
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_basic_bold() {
        let doc = convert("**bold**", 10.0);
        assert_eq!(doc.text, "bold");
        for ch in 0..4 {
            assert_eq!(doc.style_at(0, ch), StyleAttributes::sized(10.0).bold());
        }
    }

    #[test]
    fn test_heading_h1() {
        let doc = convert("# Title", 10.0);
        assert_eq!(doc.text, "Title");
        assert_eq!(doc.style_at(0, 0), StyleAttributes::sized(12.5).bold());
    }

    #[test]
    fn test_heading_depths() {
        let doc = convert("### three\n###### six", 20.0);
        assert_eq!(doc.text, "three\nsix");
        assert_eq!(doc.style_at(0, 0).font_size, Some(20.0 * 1.10));
        assert_eq!(doc.style_at(1, 0).font_size, Some(20.0));
        assert!(doc.style_at(1, 0).is_bold());
    }

    #[test]
    fn test_del_maps_to_underline() {
        let doc = convert("~~gone~~", 10.0);
        assert_eq!(doc.text, "gone");
        let style = doc.style_at(0, 0);
        assert!(style.underline);
        assert!(!style.strikethrough);
    }

    #[test]
    fn test_inline_code() {
        let doc = convert("run `ls`", 10.0);
        assert_eq!(doc.text, "run ls");
        let code = doc.style_at(0, 4);
        assert_eq!(code.font_family.as_deref(), Some("monospace"));
        assert_eq!(code.background_color.as_deref(), Some("#f5f5f5"));
        assert_eq!(code.font_size, Some(10.0));
        assert!(doc.style_at(0, 0).font_family.is_none());
    }

    #[test]
    fn test_nested_emphasis_composes() {
        let doc = convert("# **_x_**", 10.0);
        let style = doc.style_at(0, 0);
        assert!(style.is_bold());
        assert!(style.is_italic());
        assert_eq!(style.font_size, Some(12.5));
    }

    #[test]
    fn test_unordered_list_bullets() {
        let doc = convert("- one\n- two\n  - inner", 10.0);
        assert_eq!(doc.text, "• one\n• two\n  ◦ inner");
        assert_eq!(doc.style_at(0, 0), StyleAttributes::sized(10.0));
    }

    #[test]
    fn test_ordered_list_numbering() {
        let doc = convert("3. a\n4. b", 10.0);
        assert_eq!(doc.text, "1. a\n2. b");
    }

    #[test]
    fn test_empty_input() {
        let doc = convert("", 10.0);
        assert_eq!(doc.text, "");
        assert!(doc.styles.is_empty());
    }

    #[test]
    fn test_soft_break_is_newline() {
        let doc = convert("a\nb", 10.0);
        assert_eq!(doc.text, "a\nb");
        assert_eq!(doc.style_at(1, 0), StyleAttributes::sized(10.0));
    }

    #[test]
    fn test_paragraph_keeps_line_indentation() {
        let doc = convert("  lead\nnext\n   **deep**", 10.0);
        assert_eq!(doc.text, "  lead\nnext\n   deep");
        assert_eq!(doc.style_at(0, 0), StyleAttributes::sized(10.0));
        assert!(doc.style_at(2, 3).is_bold());
        assert!(!doc.style_at(2, 0).is_bold());
    }

    #[test]
    fn test_list_continuation_is_not_indented() {
        let doc = convert("- one\n  more", 10.0);
        assert_eq!(doc.text, "• one\nmore");
    }

    #[test]
    fn test_no_dangling_entries() {
        let doc = convert("text\n\n\n", 10.0);
        assert_eq!(doc.text, "text");
        assert_eq!(doc.styles.line_count(), 1);
        assert_eq!(doc.styles.len(), 4);
    }
}
