// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test-record candidate detection
//!
//! Tag evidence comes in two strengths: a known test-record tag
//! (`testcase`, `test-case`, ...) and a tag that merely contains a test-ish
//! token (`test`, `case`, `result`, `unittest`). A node is a candidate when:
//!
//! 1. its tag is a known test-record tag, or
//! 2. its tag contains a test-ish token and it carries an identifying
//!    attribute (`name`, `testName`, `method`, `id`), or
//! 3. it carries both an outcome attribute and a name attribute, whatever
//!    its tag.
//!
//! A bare `<case>` therefore is not a candidate; repeated bare tags are left
//! to the structural fallback tiers.
//!
//! Suite containers and report metadata never count. When candidates nest,
//! the innermost ones win: a candidate that encloses other candidates (a
//! TestNG `<test>` around its `<test-method>`s) is a grouping, not a test.

use testlens_markup::Node;

use crate::vocab::{
    CONTAINER_TAGS, METADATA_SUBTREES, NAME_ATTRS, OUTCOME_ATTRS, OUTCOME_NAME_ATTRS, TEST_TAGS,
    TEST_TAG_TOKENS, contains_tag,
};

/// Whether a tag name looks like a test record holder (evidence 1 or 2)
#[must_use]
pub fn is_test_tag(tag: &str) -> bool {
    if tag.is_empty() {
        return false;
    }
    let tag = tag.to_ascii_lowercase();
    contains_tag(TEST_TAGS, &tag) || TEST_TAG_TOKENS.iter().any(|token| tag.contains(token))
}

/// Whether a tag names a suite-level container rather than a single test
#[must_use]
pub fn is_container_tag(tag: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    contains_tag(CONTAINER_TAGS, &tag) || tag.ends_with("suite") || tag.ends_with("suites")
}

/// The value that identifies a node among its namesakes, or `""`
#[must_use]
pub fn identifying_value(node: &Node) -> &str {
    node.first_attr(NAME_ATTRS).unwrap_or_default()
}

/// Whether a node is likely to represent one test execution
#[must_use]
pub fn is_candidate(node: &Node) -> bool {
    if node.is_document() || is_container_tag(node.tag()) {
        return false;
    }
    let known_tag = contains_tag(TEST_TAGS, node.tag());
    let identified = is_test_tag(node.tag()) && !identifying_value(node).is_empty();
    let outcome_evidence = OUTCOME_ATTRS.iter().any(|name| node.has_attr(name))
        && OUTCOME_NAME_ATTRS.iter().any(|name| node.has_attr(name));

    known_tag || identified || outcome_evidence
}

/// A candidate together with its document position
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// The candidate node
    pub node: &'a Node,
    /// Pre-order position in the tree; distinguishes same-named tests
    pub position: usize,
}

impl Candidate<'_> {
    /// Identity of this candidate: tag, identifying value and position
    #[must_use]
    pub fn identity(&self) -> (&str, &str, usize) {
        (self.node.tag(), identifying_value(self.node), self.position)
    }
}

enum Visit<'a> {
    Enter(&'a Node),
    /// Leaving the subtree of the innermost open candidate
    Leave,
}

/// Find candidate nodes in document order
///
/// Each node is visited exactly once, so identical tag/name pairs at
/// different positions stay distinct. Metadata subtrees are not searched,
/// and a candidate with candidate descendants is replaced by them.
#[must_use]
pub fn find_candidates(root: &Node) -> Vec<Candidate<'_>> {
    // Each entry records whether a candidate was found inside it
    let mut found: Vec<(Candidate<'_>, bool)> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut position = 0;
    let mut stack: Vec<Visit<'_>> = root.children().iter().rev().map(Visit::Enter).collect();

    while let Some(visit) = stack.pop() {
        let node = match visit {
            Visit::Enter(node) => node,
            Visit::Leave => {
                open.pop();
                continue;
            }
        };
        position += 1;
        if contains_tag(METADATA_SUBTREES, node.tag()) {
            continue;
        }
        if is_candidate(node) {
            if let Some(&outer) = open.last() {
                found[outer].1 = true;
            }
            open.push(found.len());
            found.push((Candidate { node, position }, false));
            stack.push(Visit::Leave);
        }
        stack.extend(node.children().iter().rev().map(Visit::Enter));
    }

    found
        .into_iter()
        .filter_map(|(candidate, encloses)| (!encloses).then_some(candidate))
        .collect()
}
