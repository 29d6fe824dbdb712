//! Integration tests for pagination.

use labeltext::paginate::AlignmentMap;
use labeltext::{
    markdown_to_styled, page_label, paginate, Error, LineHeights, Paginator, StyleAttributes,
    StyleMap,
};
use pretty_assertions::assert_eq;

#[test]
fn test_pages_by_height_budget() {
    let lines = ["a", "b", "c"];
    let pages = Paginator::new(15.0)
        .paginate(
            &lines,
            &LineHeights::PerLine(vec![10.0, 10.0, 10.0]),
            &StyleMap::new(),
            "a\nb\nc",
        )
        .unwrap();

    let texts: Vec<Vec<String>> = pages.iter().map(|p| p.lines.clone()).collect();
    assert_eq!(texts, vec![vec!["a", "b"], vec!["c"]]);
    assert_eq!(pages[0].height, 20.0);
    assert_eq!(pages[1].start_line, 2);
}

#[test]
fn test_empty_input_has_no_pages() {
    let lines: Vec<String> = Vec::new();
    let pages = Paginator::new(100.0)
        .paginate(&lines, &LineHeights::PerLine(Vec::new()), &StyleMap::new(), "")
        .unwrap();
    assert!(pages.is_empty());
}

#[test]
fn test_mismatched_heights_rejected() {
    let result = paginate(
        &["a", "b", "c"],
        &LineHeights::PerLine(vec![10.0, 10.0]),
        &StyleMap::new(),
        "a b c",
        15.0,
    );
    let err = result.unwrap_err();
    assert!(matches!(err, Error::LineHeightMismatch { lines: 3, heights: 2 }));
}

#[test]
fn test_styles_follow_wrapped_text() {
    let doc = markdown_to_styled("**bold** plain words here", 10.0);
    let wrapped = ["bold plain", "words here"];

    let pages = paginate(&wrapped, &LineHeights::Uniform(10.0), &doc.styles, &doc.text, 10.0)
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].text, "bold plain");
    assert_eq!(pages[1].text, "words here");
    assert!(pages[0].style_at(0, 0).is_bold());
    assert!(!pages[0].style_at(0, 5).is_bold());
    assert_eq!(pages[1].style_at(0, 0), StyleAttributes::sized(10.0));
}

#[test]
fn test_renderer_inserted_char_gets_no_style() {
    let doc = markdown_to_styled("**abcdef**", 10.0);
    let wrapped = ["abc-", "def"];

    let pages = paginate(&wrapped, &LineHeights::Uniform(10.0), &doc.styles, &doc.text, 100.0)
        .unwrap();

    assert_eq!(pages.len(), 1);
    let page = &pages[0];
    assert!(page.style_at(0, 2).is_bold());
    assert!(page.styles.get(0, 3).is_none());
    assert!(page.style_at(1, 0).is_bold());
}

#[test]
fn test_logical_lines_with_wraps() {
    let mut styles = StyleMap::new();
    styles.set(1, 4, StyleAttributes::new().italic());

    let map = AlignmentMap::build("first\nsecond line", &["first", "second", "line"]);
    let wrapped = map.reindex(&styles);

    assert_eq!(map.unmapped_count(), 0);
    assert!(wrapped.get(1, 4).unwrap().is_italic());
}

#[test]
fn test_page_labels() {
    let labels: Vec<String> = (1..=3).map(|n| page_label(n, 3)).collect();
    assert_eq!(labels, vec!["Page (1-3)", "Page (2-3)", "Page (3-3)"]);
}
