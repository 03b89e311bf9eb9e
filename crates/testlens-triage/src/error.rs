// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for testlens-triage

use thiserror::Error;

/// Errors that can occur while loading a category rule table
///
/// Individual bad patterns are not errors; they are skipped when the table
/// is compiled.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Error reading a rule file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rule table is not a list of `{label, patterns}` objects
    #[error("Invalid rule table: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A rule has an empty label
    #[error("Rule {index} has an empty label")]
    EmptyLabel {
        /// Position of the rule in the table
        index: usize,
    },
}
