// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Outcome derivation for a single test-like node
//!
//! Rules are evaluated in a fixed precedence order and the first one that
//! applies decides the outcome:
//!
//! 1. an explicit `result`/`outcome`/`status` attribute with a known value
//! 2. an immediate child with a failure tag (`failure`, `error`, ...)
//! 3. a descendant with a failure tag, first in document order
//! 4. a `message`/`reason`/`failure` attribute, even an empty one
//! 5. failure markers in the node's own text (tracebacks, exceptions)
//! 6. otherwise the test passed

use testlens_markup::Node;

use crate::record::Status;
use crate::vocab::{
    FAILURE_TAGS, FAILURE_TEXT_TOKENS, MESSAGE_ATTRS, OUTCOME_ATTRS, TEXT_ATTRS, contains_tag,
};

/// Status plus diagnostics derived from a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Derived status
    pub status: Status,
    /// Short diagnostic
    pub message: String,
    /// Fuller diagnostic text
    pub details: String,
}

impl Outcome {
    fn pass() -> Self {
        Self::bare(Status::Pass)
    }

    fn bare(status: Status) -> Self {
        Self {
            status,
            message: String::new(),
            details: String::new(),
        }
    }

    fn fail(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: message.into().trim().to_string(),
            details: details.into().trim().to_string(),
        }
    }
}

/// Best-effort diagnostic text of a node: a message-like attribute if present,
/// otherwise the node's text
#[must_use]
pub fn best_effort_text(node: &Node) -> String {
    TEXT_ATTRS
        .iter()
        .find_map(|name| node.attr(name))
        .map_or_else(|| node.text(), |value| value.trim().to_string())
}

/// Derive status, message and details from a test-like node
#[must_use]
pub fn extract_outcome(node: &Node) -> Outcome {
    if let Some(outcome) = from_status_attribute(node) {
        return outcome;
    }

    if let Some(child) = node
        .children()
        .iter()
        .find(|child| contains_tag(FAILURE_TAGS, child.tag()))
    {
        return from_failure_node(node, child);
    }

    if let Some(found) = node
        .descendants()
        .find(|descendant| contains_tag(FAILURE_TAGS, descendant.tag()))
    {
        return from_failure_node(node, found);
    }

    if let Some(message) = MESSAGE_ATTRS.iter().find_map(|name| node.attr(name)) {
        return Outcome::fail(message, node.text());
    }

    let text = node.text();
    let lowered = text.to_lowercase();
    if FAILURE_TEXT_TOKENS.iter().any(|token| lowered.contains(token)) {
        let first_line = text.lines().next().unwrap_or_default();
        return Outcome::fail(first_line, text.as_str());
    }

    Outcome::pass()
}

fn from_status_attribute(node: &Node) -> Option<Outcome> {
    OUTCOME_ATTRS
        .iter()
        .filter_map(|name| node.attr(name))
        .find_map(Status::from_vocabulary)
        .map(|status| match status {
            Status::Fail => Outcome::fail(best_effort_text(node), node.text()),
            other => Outcome::bare(other),
        })
}

fn from_failure_node(test: &Node, failure: &Node) -> Outcome {
    let message = non_empty(best_effort_text(failure)).unwrap_or_else(|| best_effort_text(test));
    let details = non_empty(failure.text()).unwrap_or_else(|| test.text());
    Outcome::fail(message, details)
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
