// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testlens-extract: Heuristic test-record extraction
//!
//! This library crate finds test executions in report documents whose schema
//! is unknown, inconsistent or malformed. It classifies test-like nodes,
//! derives a pass/fail/skip outcome for each, and falls back to structural
//! inference when nothing looks like a test.
//!
//! # Example
//!
//! ```no_run
//! use testlens_extract::{parse_report, RunSummary};
//!
//! let records = parse_report("reports/junit.xml").unwrap();
//! let summary = RunSummary::from_records(records);
//! println!("{} failed of {}", summary.failed, summary.total);
//! ```

pub mod cascade;
pub mod classify;
pub mod error;
pub mod loader;
pub mod outcome;
pub mod record;
pub mod vocab;

pub use cascade::{Cascade, DEFAULT_FLATTEN_CAP, Extraction, Strategy, extract_records};
pub use classify::{find_candidates, is_candidate};
pub use error::ExtractError;
pub use loader::{
    extract_text, load_document, load_records, load_run, parse_report, parse_report_with,
};
pub use outcome::{Outcome, extract_outcome};
pub use record::{RunSummary, Status, TestRecord};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cascade::{Cascade, extract_records};
    pub use crate::error::ExtractError;
    pub use crate::loader::{load_run, parse_report};
    pub use crate::record::{RunSummary, Status, TestRecord};
}
