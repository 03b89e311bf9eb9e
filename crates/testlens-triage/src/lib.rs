// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testlens-triage: Failure categorization and run comparison
//!
//! This library crate works on record lists produced by `testlens-extract`.
//! It assigns failure categories from an ordered, replaceable rule table
//! and diffs two runs to find regressions and fixes.
//!
//! # Example
//!
//! ```
//! use testlens_extract::{Status, TestRecord};
//! use testlens_triage::{Change, categorize, compare};
//!
//! assert_eq!(categorize("java.net.ConnectException: Connection refused"), "Network/Connection");
//!
//! let before = vec![TestRecord::new("login", Status::Pass)];
//! let after = vec![TestRecord::new("login", Status::Fail)];
//! assert_eq!(compare(&before, &after)[0].change, Change::NewFailure);
//! ```

pub mod categorize;
pub mod compare;
pub mod error;
pub mod summary;

pub use categorize::{
    CategoryRule, Categorizer, OTHER_CATEGORY, categorize, categorize_failures, default_rules,
};
pub use compare::{Change, ChangeSummary, ComparisonResult, RunStatus, compare};
pub use error::RulesError;
pub use summary::{CategoryCount, summarize_categories};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::categorize::{Categorizer, categorize, categorize_failures};
    pub use crate::compare::{Change, ComparisonResult, compare};
    pub use crate::error::RulesError;
    pub use crate::summary::summarize_categories;
}
