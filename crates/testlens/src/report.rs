// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! JSON exports
//!
//! Every export is a pretty-printed JSON document written into the output
//! directory, which is created on demand.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use testlens_extract::{ExtractError, RunSummary, TestRecord};
use testlens_triage::{CategoryCount, ChangeSummary, ComparisonResult, RulesError};
use thiserror::Error;
use tracing::debug;

/// Every extracted record
pub const ALL_TESTS_FILE: &str = "all_tests.json";
/// Failing records with their categories
pub const FAILURE_DETAILS_FILE: &str = "failure_details.json";
/// Failure counts per category
pub const FAILURE_SUMMARY_FILE: &str = "failure_summary.json";
/// Run totals with generation metadata
pub const REPORT_FILE: &str = "report.json";
/// Comparison rows with per-change counts
pub const COMPARISON_FILE: &str = "comparison.json";

// ============================================================================
// Error Types
// ============================================================================

/// Errors while producing or writing reports
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to load a run
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Failed to load a rule table
    #[error("Rules error: {0}")]
    Rules(#[from] RulesError),

    /// Failed to write an export
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// The file being written
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Report Documents
// ============================================================================

/// Totals for one analyzed run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Report file the run was read from
    pub input: String,
    /// Records extracted
    pub total: usize,
    /// Passing records
    pub passed: usize,
    /// Failing records
    pub failed: usize,
    /// Skipped records
    pub skipped: usize,
    /// Failure counts per category
    pub categories: Vec<CategoryCount>,
}

impl AnalysisReport {
    /// Build the report for a summarized run
    #[must_use]
    pub fn new(input: &Path, summary: &RunSummary, categories: &[CategoryCount]) -> Self {
        Self {
            generated_at: Utc::now(),
            input: input.display().to_string(),
            total: summary.total,
            passed: summary.passed,
            failed: summary.failed,
            skipped: summary.skipped,
            categories: categories.to_vec(),
        }
    }
}

/// A comparison between two runs
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Baseline run
    pub baseline: String,
    /// Candidate run
    pub candidate: String,
    /// Per-change counts
    pub summary: ChangeSummary,
    /// One row per distinct test key
    pub results: Vec<ComparisonResult>,
}

impl ComparisonReport {
    /// Build the report for a comparison
    #[must_use]
    pub fn new(baseline: &Path, candidate: &Path, results: Vec<ComparisonResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            baseline: baseline.display().to_string(),
            candidate: candidate.display().to_string(),
            summary: ChangeSummary::from_results(&results),
            results,
        }
    }
}

// ============================================================================
// Writers
// ============================================================================

/// Serialize `value` as pretty JSON into `dir/name`
///
/// # Errors
///
/// Returns `ReportError::Write` if the directory or file cannot be written,
/// or `ReportError::Json` if serialization fails.
pub fn write_json<T: Serialize + ?Sized>(
    dir: &Path,
    name: &str,
    value: &T,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir).map_err(write_err(dir))?;
    let path = dir.join(name);
    let file = File::create(&path).map_err(write_err(&path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(write_err(&path))?;

    debug!(path = %path.display(), "wrote export");
    Ok(path)
}

fn write_err(path: &Path) -> impl FnOnce(std::io::Error) -> ReportError {
    let path = path.to_path_buf();
    move |source| ReportError::Write { path, source }
}

/// Write the four analysis exports, returning their paths
///
/// # Errors
///
/// See [`write_json`].
pub fn write_analysis(
    dir: &Path,
    records: &[TestRecord],
    failures: &[TestRecord],
    report: &AnalysisReport,
) -> Result<Vec<PathBuf>, ReportError> {
    Ok(vec![
        write_json(dir, ALL_TESTS_FILE, records)?,
        write_json(dir, FAILURE_DETAILS_FILE, failures)?,
        write_json(dir, FAILURE_SUMMARY_FILE, &report.categories)?,
        write_json(dir, REPORT_FILE, report)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use testlens_extract::Status;
    use testlens_triage::compare;

    fn records() -> Vec<TestRecord> {
        vec![
            TestRecord::new("a", Status::Pass),
            TestRecord::new("b", Status::Fail)
                .with_diagnostics("timed out", "")
                .with_category("Timeout"),
        ]
    }

    #[test]
    fn test_write_json_creates_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("a").join("b");
        let path = write_json(&nested, "x.json", &[1, 2, 3]).expect("write");
        let text = std::fs::read_to_string(path).expect("read back");
        let value: Vec<u32> = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value, vec![1, 2, 3]);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_write_json_reports_unwritable_path() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let result = write_json(file.path(), "x.json", &1);
        assert!(matches!(result, Err(ReportError::Write { .. })));
    }

    #[test]
    fn test_write_analysis_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let records = records();
        let failures = vec![records[1].clone()];
        let summary = RunSummary::from_records(records.clone());
        let categories = vec![CategoryCount {
            category: "Timeout".to_string(),
            count: 1,
        }];
        let report = AnalysisReport::new(Path::new("junit.xml"), &summary, &categories);

        let written = write_analysis(dir.path(), &records, &failures, &report).expect("write");
        let names: Vec<String> = written
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![ALL_TESTS_FILE, FAILURE_DETAILS_FILE, FAILURE_SUMMARY_FILE, REPORT_FILE]
        );

        let report: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(REPORT_FILE)).expect("read report"),
        )
        .expect("parse report");
        assert_eq!(report["total"], 2);
        assert_eq!(report["failed"], 1);
        assert_eq!(report["input"], "junit.xml");
        assert_eq!(report["categories"][0]["category"], "Timeout");
        assert!(report["generated_at"].is_string());
    }

    #[test]
    fn test_comparison_report_counts() {
        let before = vec![TestRecord::new("a", Status::Fail)];
        let after = vec![TestRecord::new("a", Status::Pass)];
        let report =
            ComparisonReport::new(Path::new("a.xml"), Path::new("b.xml"), compare(&before, &after));
        assert_eq!(report.summary.fixed, 1);
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["results"][0]["change"], "Fixed");
        assert_eq!(json["summary"]["total"], 1);
    }
}
