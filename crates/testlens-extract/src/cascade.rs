// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fallback cascade
//!
//! Extraction runs an ordered list of [`Strategy`] tiers and returns the
//! first non-empty result. Later tiers are progressively more aggressive:
//!
//! 1. [`Candidates`]: classifier candidates, outcome derived per node
//! 2. [`SuiteChildren`]: test-looking children of the first `testsuite`
//! 3. [`RepeatedSiblings`]: repeated child tags of the topmost element
//! 4. [`Flatten`]: children, grandchildren, then every element, capped
//!
//! # Example
//!
//! ```
//! use testlens_extract::cascade::extract_records;
//! use testlens_markup::parse;
//!
//! let root = parse("<results><case/><case outcome=\"fail\"/></results>");
//! let records = extract_records(&root);
//! assert_eq!(records.len(), 2);
//! ```

use std::collections::{HashMap, HashSet};

use testlens_markup::Node;
use tracing::{debug, info};

use crate::classify::{find_candidates, is_test_tag};
use crate::outcome::extract_outcome;
use crate::record::{Status, TestRecord};
use crate::vocab::{
    CANONICAL_SUITE_TAG, CLASSNAME_ATTRS, NAME_ATTRS, OUTCOME_ATTRS, SYNTHETIC_FAILURE_TOKENS,
    SYNTHETIC_NAME_SOURCES, TIME_ATTRS,
};

/// Default upper bound on records produced by the flattening tier
pub const DEFAULT_FLATTEN_CAP: usize = 100;

/// Characters of combined text kept as a synthesized record's message
const SYNTHETIC_MESSAGE_CHARS: usize = 300;

/// One tier of the extraction cascade
pub trait Strategy: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Try to extract records. `None` or an empty list both mean "nothing
    /// found, try the next tier".
    fn attempt(&self, root: &Node) -> Option<Vec<TestRecord>>;
}

/// Tier 1: classifier candidates
#[derive(Debug, Clone, Copy, Default)]
pub struct Candidates;

/// Tier 2: test-looking children of the canonical suite container
#[derive(Debug, Clone, Copy, Default)]
pub struct SuiteChildren;

/// Tier 3: repeated sibling tags under the topmost element
#[derive(Debug, Clone, Copy, Default)]
pub struct RepeatedSiblings;

/// Tier 4: progressively wider flattening, bounded by `cap`
#[derive(Debug, Clone, Copy)]
pub struct Flatten {
    cap: usize,
}

impl Flatten {
    /// Create the tier with a record cap (at least 1)
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self { cap: cap.max(1) }
    }

    /// Maximum records this tier produces
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for Flatten {
    fn default() -> Self {
        Self::new(DEFAULT_FLATTEN_CAP)
    }
}

impl Strategy for Candidates {
    fn name(&self) -> &'static str {
        "candidates"
    }

    fn attempt(&self, root: &Node) -> Option<Vec<TestRecord>> {
        non_empty(
            find_candidates(root)
                .into_iter()
                .map(|candidate| record_from_candidate(candidate.node))
                .collect(),
        )
    }
}

impl Strategy for SuiteChildren {
    fn name(&self) -> &'static str {
        "suite-children"
    }

    fn attempt(&self, root: &Node) -> Option<Vec<TestRecord>> {
        let suite = root.find(CANONICAL_SUITE_TAG)?;
        non_empty(
            suite
                .children()
                .iter()
                .filter(|child| is_test_tag(child.tag()))
                .map(record_from_candidate)
                .collect(),
        )
    }
}

impl Strategy for RepeatedSiblings {
    fn name(&self) -> &'static str {
        "repeated-siblings"
    }

    fn attempt(&self, root: &Node) -> Option<Vec<TestRecord>> {
        let children = root.first_element()?.children();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for child in children {
            *counts.entry(child.tag()).or_default() += 1;
        }
        let repeated: HashSet<&str> = counts
            .into_iter()
            .filter(|&(_, count)| count >= 2)
            .map(|(tag, _)| tag)
            .collect();

        let in_group = |child: &Node| {
            if repeated.is_empty() {
                children.len() >= 2
            } else {
                repeated.contains(child.tag())
            }
        };

        non_empty(
            children
                .iter()
                .enumerate()
                .filter(|&(_, child)| in_group(child))
                .map(|(index, child)| synthesize_record(child, index + 1))
                .collect(),
        )
    }
}

impl Strategy for Flatten {
    fn name(&self) -> &'static str {
        "flatten"
    }

    fn attempt(&self, root: &Node) -> Option<Vec<TestRecord>> {
        let top = root.first_element()?;
        let children = top.children();
        if children.len() >= 2 {
            return non_empty(self.synthesize_all(children.iter()));
        }

        let grandchildren: Vec<&Node> = children.iter().flat_map(Node::children).collect();
        if !grandchildren.is_empty() {
            return non_empty(self.synthesize_all(grandchildren.into_iter()));
        }

        non_empty(self.synthesize_all(root.descendants()))
    }
}

impl Flatten {
    fn synthesize_all<'a>(&self, nodes: impl Iterator<Item = &'a Node>) -> Vec<TestRecord> {
        nodes
            .take(self.cap)
            .enumerate()
            .map(|(index, node)| synthesize_record(node, index + 1))
            .collect()
    }
}

/// The ordered tier list driving extraction
pub struct Cascade {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Cascade {
    /// Build a cascade from an explicit tier list
    #[must_use]
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// The default tiers with a custom flattening cap
    #[must_use]
    pub fn with_flatten_cap(cap: usize) -> Self {
        Self::new(vec![
            Box::new(Candidates),
            Box::new(SuiteChildren),
            Box::new(RepeatedSiblings),
            Box::new(Flatten::new(cap)),
        ])
    }

    /// Tier names in evaluation order
    #[must_use]
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the tiers in order and return the first non-empty result, along
    /// with the name of the tier that produced it
    #[must_use]
    pub fn run(&self, root: &Node) -> Extraction {
        for strategy in &self.strategies {
            if let Some(records) = strategy.attempt(root).filter(|r| !r.is_empty()) {
                debug!(
                    tier = strategy.name(),
                    records = records.len(),
                    "extraction tier produced records"
                );
                return Extraction {
                    records,
                    tier: Some(strategy.name()),
                };
            }
            debug!(tier = strategy.name(), "extraction tier found nothing");
        }
        info!("no test records detected by any extraction tier");
        Extraction {
            records: Vec::new(),
            tier: None,
        }
    }

    /// Run the tiers and return only the records
    #[must_use]
    pub fn extract(&self, root: &Node) -> Vec<TestRecord> {
        self.run(root).records
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::with_flatten_cap(DEFAULT_FLATTEN_CAP)
    }
}

/// Records produced by a cascade run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Extracted records, possibly empty
    pub records: Vec<TestRecord>,
    /// Tier that produced them, `None` when every tier came up empty
    pub tier: Option<&'static str>,
}

/// Extract records with the default cascade. Never fails.
#[must_use]
pub fn extract_records(root: &Node) -> Vec<TestRecord> {
    Cascade::default().extract(root)
}

/// Build a record from a node the classifier judged test-like
#[must_use]
pub fn record_from_candidate(node: &Node) -> TestRecord {
    let testcase = node
        .first_attr(NAME_ATTRS)
        .map(str::to_string)
        .or_else(|| {
            node.find("name")
                .map(Node::text)
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_default();
    let outcome = extract_outcome(node);

    TestRecord::new(testcase, outcome.status)
        .with_classname(node.first_attr(CLASSNAME_ATTRS).unwrap_or_default())
        .with_time(node.first_attr(TIME_ATTRS).unwrap_or_default())
        .with_diagnostics(outcome.message, outcome.details)
}

/// Build a record from a node picked structurally rather than by name
///
/// The name comes from the first source in `name`, `id`, `title`,
/// `testName`, `testname` that yields a value. For each source a descendant
/// element of that name is read first, then the attribute. `position` is the
/// node's 1-based position in the list being synthesized and only appears in
/// the fallback name `"<tag>-<position>"`.
#[must_use]
pub fn synthesize_record(node: &Node, position: usize) -> TestRecord {
    let testcase = synthetic_name(node).unwrap_or_else(|| format!("{}-{position}", node.tag()));

    let mut combined = node
        .children()
        .iter()
        .map(Node::text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if combined.is_empty() {
        combined = node.text();
    }

    let lowered = combined.to_lowercase();
    let failed_by_attr = OUTCOME_ATTRS
        .iter()
        .filter_map(|name| node.attr(name))
        .any(|value| Status::from_vocabulary(value) == Some(Status::Fail));
    let failed_by_text = SYNTHETIC_FAILURE_TOKENS
        .iter()
        .any(|token| lowered.contains(token));
    let status = if failed_by_attr || failed_by_text {
        Status::Fail
    } else {
        Status::Pass
    };

    let message: String = combined.chars().take(SYNTHETIC_MESSAGE_CHARS).collect();
    TestRecord::new(testcase, status)
        .with_classname(node.tag())
        .with_time(node.first_attr(TIME_ATTRS).unwrap_or_default())
        .with_diagnostics(message, combined)
}

fn synthetic_name(node: &Node) -> Option<String> {
    SYNTHETIC_NAME_SOURCES.iter().find_map(|source| {
        node.find(source)
            .map(Node::text)
            .filter(|text| !text.is_empty())
            .or_else(|| node.first_attr(&[*source]).map(str::to_string))
    })
}

fn non_empty(records: Vec<TestRecord>) -> Option<Vec<TestRecord>> {
    (!records.is_empty()).then_some(records)
}
