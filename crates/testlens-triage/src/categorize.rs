// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Rule-based failure categorization
//!
//! A rule table is an ordered list of `(label, patterns)`. Text is assigned
//! the label of the first rule owning a pattern that matches anywhere in it,
//! rules in table order and patterns in listed order. Matching ignores case.
//! Text matching nothing is [`OTHER_CATEGORY`].

use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use testlens_extract::TestRecord;
use tracing::{debug, warn};

use crate::error::RulesError;

/// Label for text no rule matches
pub const OTHER_CATEGORY: &str = "Other";

/// One entry of a category rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category assigned when any pattern matches
    pub label: String,
    /// Regular expressions, tried in order
    pub patterns: Vec<String>,
}

impl CategoryRule {
    /// Create a rule from a label and its patterns
    #[must_use]
    pub fn new(label: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            label: label.into(),
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

/// The built-in rule table
#[must_use]
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new("Timeout", &[r"\btimeout\b", r"\btimed out\b", "timeouterror"]),
        CategoryRule::new(
            "Element not found",
            &[
                "elementnotfound",
                "element not found",
                "no such element",
                "noelement",
                "could not find element",
            ],
        ),
        CategoryRule::new(
            "Assertion",
            &["assertionerror", r"\bassert\b", "expected .* but", "assert failed"],
        ),
        CategoryRule::new(
            "Network/Connection",
            &[
                "connectionerror",
                "failed to connect",
                "connection refused",
                "socket.timeout",
                "connection timed out",
            ],
        ),
        CategoryRule::new(
            "Database",
            &[
                r"\bdb\b",
                r"\bdatabase\b",
                "sqlexception",
                "psycopg2",
                "postgres",
                "mysql",
                "sqlite",
            ],
        ),
        CategoryRule::new(
            "Auth/Authorization",
            &["unauthorized", r"\bauth\b", "403", "401", "forbidden"],
        ),
        CategoryRule::new(
            "Timeout/Long Running",
            &["long running", r"\bslow\b", "response time", "timed out after"],
        ),
    ]
}

#[derive(Debug, Clone)]
struct CompiledRule {
    label: String,
    patterns: Vec<Regex>,
}

impl CompiledRule {
    fn compile(rule: &CategoryRule) -> Self {
        let patterns = rule
            .patterns
            .iter()
            .filter_map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|err| {
                        warn!(
                            label = %rule.label,
                            pattern = %pattern,
                            error = %err,
                            "skipping invalid category pattern"
                        );
                    })
                    .ok()
            })
            .collect();
        Self {
            label: rule.label.clone(),
            patterns,
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }
}

/// A compiled rule table
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CompiledRule>,
}

impl Categorizer {
    /// Compile a rule table, skipping patterns that are not valid regular
    /// expressions
    #[must_use]
    pub fn with_rules(rules: &[CategoryRule]) -> Self {
        Self {
            rules: rules.iter().map(CompiledRule::compile).collect(),
        }
    }

    /// Parse and compile a JSON rule table: `[{"label": .., "patterns": [..]}]`
    ///
    /// # Errors
    ///
    /// Returns `RulesError::JsonParse` if the JSON does not describe a rule
    /// list, or `RulesError::EmptyLabel` if a rule has a blank label.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let rules: Vec<CategoryRule> = serde_json::from_str(json)?;
        if let Some(index) = rules.iter().position(|rule| rule.label.trim().is_empty()) {
            return Err(RulesError::EmptyLabel { index });
        }
        debug!(rules = rules.len(), "loaded category rule table");
        Ok(Self::with_rules(&rules))
    }

    /// Read and compile a JSON rule table from disk
    ///
    /// # Errors
    ///
    /// Returns `RulesError::Io` if the file cannot be read, otherwise see
    /// [`Categorizer::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Append a rule after the existing ones. Earlier rules still win.
    pub fn push_rule(&mut self, rule: &CategoryRule) {
        self.rules.push(CompiledRule::compile(rule));
    }

    /// Number of rules in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the table has no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule labels in evaluation order
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.label.as_str()).collect()
    }

    /// Label of the first matching rule, or [`OTHER_CATEGORY`]
    #[must_use]
    pub fn categorize(&self, text: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map_or(OTHER_CATEGORY, |rule| rule.label.as_str())
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::with_rules(&default_rules())
    }
}

static DEFAULT_CATEGORIZER: LazyLock<Categorizer> = LazyLock::new(Categorizer::default);

/// Categorize text with the built-in rule table
#[must_use]
pub fn categorize(text: &str) -> &'static str {
    DEFAULT_CATEGORIZER.categorize(text)
}

/// Failing records only, each tagged with the category of its diagnostics
#[must_use]
pub fn categorize_failures(records: &[TestRecord], categorizer: &Categorizer) -> Vec<TestRecord> {
    records
        .iter()
        .filter(|record| record.failed())
        .map(|record| {
            let category = categorizer.categorize(&record.diagnostic_text()).to_string();
            record.clone().with_category(category)
        })
        .collect()
}
