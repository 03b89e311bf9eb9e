// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Subcommand implementations
//!
//! Each command loads its inputs, runs the engines and writes its exports.
//! Printing is left to the binary.

use std::path::{Path, PathBuf};

use testlens_extract::{Cascade, RunSummary, TestRecord, load_run, parse_report_with};
use testlens_triage::{
    CategoryCount, Categorizer, ComparisonResult, categorize_failures, compare,
    summarize_categories,
};
use tracing::{info, warn};

use crate::report::{AnalysisReport, COMPARISON_FILE, ComparisonReport, ReportError};
use crate::report::{write_analysis, write_json};

/// Options for `analyze`
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Report file to read
    pub input: PathBuf,
    /// Replacement rule table
    pub rules: Option<PathBuf>,
    /// Flattening cap for the last extraction tier
    pub flatten_cap: usize,
    /// Export directory
    pub output: PathBuf,
}

/// Result of `analyze`
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Counts and records of the run
    pub summary: RunSummary,
    /// Failing records with categories
    pub failures: Vec<TestRecord>,
    /// Failure counts per category
    pub categories: Vec<CategoryCount>,
    /// Files written; empty when no tests were found
    pub written: Vec<PathBuf>,
}

impl Analysis {
    /// Check if the report held no recognizable tests
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}

/// Extract, categorize and export one report
///
/// Nothing is written when extraction finds no tests.
///
/// # Errors
///
/// Returns an error if the report or rule table cannot be read, or if an
/// export cannot be written.
pub fn analyze(options: &AnalyzeOptions) -> Result<Analysis, ReportError> {
    let categorizer = match &options.rules {
        Some(path) => Categorizer::from_path(path)?,
        None => Categorizer::default(),
    };
    let cascade = Cascade::with_flatten_cap(options.flatten_cap);
    let records = parse_report_with(&options.input, &cascade)?;

    if records.is_empty() {
        warn!(input = %options.input.display(), "no test cases detected");
        return Ok(Analysis {
            summary: RunSummary::from_records(records),
            failures: Vec::new(),
            categories: Vec::new(),
            written: Vec::new(),
        });
    }

    let failures = categorize_failures(&records, &categorizer);
    let categories = summarize_categories(&failures);
    let summary = RunSummary::from_records(records);
    let report = AnalysisReport::new(&options.input, &summary, &categories);
    let written = write_analysis(&options.output, &summary.records, &failures, &report)?;

    info!(
        total = summary.total,
        failed = summary.failed,
        categories = categories.len(),
        output = %options.output.display(),
        "analysis complete"
    );
    Ok(Analysis {
        summary,
        failures,
        categories,
        written,
    })
}

/// Result of `compare`
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Rows and counts
    pub report: ComparisonReport,
    /// File written
    pub written: PathBuf,
}

/// Compare two runs and export the rows
///
/// # Errors
///
/// Returns an error if either run cannot be read or the export cannot be
/// written.
pub fn compare_runs(
    baseline: &Path,
    candidate: &Path,
    output: &Path,
) -> Result<Comparison, ReportError> {
    let results: Vec<ComparisonResult> = compare(&load_run(baseline)?, &load_run(candidate)?);
    let report = ComparisonReport::new(baseline, candidate, results);
    let written = write_json(output, COMPARISON_FILE, &report)?;

    info!(
        rows = report.summary.total,
        new_failures = report.summary.new_failures,
        fixed = report.summary.fixed,
        "comparison complete"
    );
    Ok(Comparison { report, written })
}
