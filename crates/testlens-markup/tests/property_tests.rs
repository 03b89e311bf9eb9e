// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for testlens-markup
//!
//! Parsing must be total: any string yields a tree, and the tree depth stays
//! within the nesting cap however the input is shaped.

use std::time::{Duration, Instant};

use proptest::prelude::*;
use testlens_markup::{MAX_DEPTH, Node, parse, parse_document};

// ============================================================================
// Strategies
// ============================================================================

/// Markup-ish fragments that stress every scanner branch
fn markup_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("<".to_string()),
        Just(">".to_string()),
        Just("</".to_string()),
        Just("/>".to_string()),
        Just("<!--".to_string()),
        Just("-->".to_string()),
        Just("<![CDATA[".to_string()),
        Just("]]>".to_string()),
        Just("<?xml version=\"1.0\"?>".to_string()),
        Just("<testcase name=\"t\">".to_string()),
        Just("</testcase>".to_string()),
        Just("<testsuite>".to_string()),
        Just("<script>".to_string()),
        Just("&amp;".to_string()),
        Just("&#xFFFFFFFF;".to_string()),
        Just("=\"".to_string()),
        Just("日本語".to_string()),
        "[a-z ]{0,8}".prop_map(|s| s),
    ]
}

fn markup_document() -> impl Strategy<Value = String> {
    prop::collection::vec(markup_fragment(), 0..40).prop_map(|parts| parts.concat())
}

fn depth(node: &Node) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(node, 0usize)];
    while let Some((current, level)) = stack.pop() {
        deepest = deepest.max(level);
        stack.extend(current.children().iter().map(|child| (child, level + 1)));
    }
    deepest
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_parse_never_panics_on_arbitrary_text(input in ".*") {
        let root = parse(&input);
        prop_assert!(root.is_document());
    }

    #[test]
    fn prop_parse_never_panics_on_markup_soup(input in markup_document()) {
        let parsed = parse_document(&input);
        prop_assert!(parsed.root.is_document());
        prop_assert!(!parsed.grammar.is_empty());
    }

    #[test]
    fn prop_text_is_trimmed(input in markup_document()) {
        let text = parse(&input).text();
        prop_assert_eq!(text.trim(), text.as_str());
    }
}

#[test]
fn test_pathological_nesting_is_bounded() {
    let input = "<a>".repeat(MAX_DEPTH * 4);
    let root = parse(&input);
    assert!(depth(&root) <= MAX_DEPTH + 1);
    assert_eq!(root.descendants().count(), MAX_DEPTH * 4);
}

#[test]
fn test_pathological_nesting_in_xml_flavor_is_bounded() {
    let input = format!("<?xml version=\"1.0\"?>{}", "<testsuite>".repeat(MAX_DEPTH * 2));
    let root = parse(&input);
    assert!(depth(&root) <= MAX_DEPTH + 1);
}

fn assert_parses_quickly(input: &str) -> Node {
    let started = Instant::now();
    let root = parse(input);
    let elapsed = started.elapsed();
    assert!(
        elapsed < Duration::from_secs(2),
        "parsing {} bytes took {elapsed:?}",
        input.len()
    );
    root
}

#[test]
fn test_unterminated_start_tags_parse_in_linear_time() {
    let input = "<a x ".repeat(40_000);
    let root = assert_parses_quickly(&input);
    assert_eq!(root.descendants().count(), 0);
    assert_eq!(root.text(), input.trim());
}

#[test]
fn test_unterminated_end_tags_parse_in_linear_time() {
    let input = format!("<p>keep</p>{}", "</a ".repeat(80_000));
    let root = assert_parses_quickly(&input);
    assert_eq!(root.descendants().count(), 1);
    assert!(root.text().starts_with("keep</a"));
}

#[test]
fn test_unclosed_quotes_parse_in_linear_time() {
    let input = "<t v=\"1>\" ".repeat(20_000);
    assert_parses_quickly(&input);
    let ampersands = format!("<p>{}</p>", "&amp".repeat(50_000));
    let root = assert_parses_quickly(&ampersands);
    assert_eq!(root.descendants().count(), 1);
}
