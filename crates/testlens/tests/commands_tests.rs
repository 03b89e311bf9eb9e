// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end tests for the analyze and compare commands

use std::fs;
use std::path::{Path, PathBuf};

use similar_asserts::assert_eq;
use tempfile::TempDir;
use testlens::commands::{AnalyzeOptions, analyze, compare_runs};
use testlens::report::{
    ALL_TESTS_FILE, COMPARISON_FILE, FAILURE_DETAILS_FILE, FAILURE_SUMMARY_FILE, REPORT_FILE,
    ReportError,
};
use testlens_extract::{DEFAULT_FLATTEN_CAP, ExtractError, TestRecord};

const BASELINE: &str = r#"<?xml version="1.0"?>
<testsuite name="web">
  <testcase classname="web.Login" name="loads"/>
  <testcase classname="web.Login" name="rejects_bad_password"/>
  <testcase classname="web.Cart" name="adds_item"><failure message="ElementNotFound: #add"/></testcase>
</testsuite>"#;

const CANDIDATE: &str = r#"<?xml version="1.0"?>
<testsuite name="web">
  <testcase classname="web.Login" name="loads"/>
  <testcase classname="web.Login" name="rejects_bad_password"><failure message="expected 401 but got 200"/></testcase>
  <testcase classname="web.Cart" name="adds_item"/>
</testsuite>"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write input");
    path
}

fn options(input: PathBuf, output: PathBuf) -> AnalyzeOptions {
    AnalyzeOptions {
        input,
        rules: None,
        flatten_cap: DEFAULT_FLATTEN_CAP,
        output,
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read export")).expect("valid json")
}

#[test]
fn test_analyze_writes_all_exports() {
    let tmp = TempDir::new().expect("temp dir");
    let input = write(tmp.path(), "candidate.xml", CANDIDATE);
    let out = tmp.path().join("out");

    let analysis = analyze(&options(input, out.clone())).expect("analyze");
    assert_eq!(analysis.summary.total, 3);
    assert_eq!(analysis.failures.len(), 1);
    assert_eq!(analysis.written.len(), 4);
    for name in [ALL_TESTS_FILE, FAILURE_DETAILS_FILE, FAILURE_SUMMARY_FILE, REPORT_FILE] {
        assert!(out.join(name).is_file(), "missing {name}");
    }

    let details = read_json(&out.join(FAILURE_DETAILS_FILE));
    assert_eq!(details[0]["testcase"], "rejects_bad_password");
    // "401" is an Auth pattern but Assertion comes first in the table
    assert_eq!(details[0]["category"], "Assertion");

    let all: Vec<TestRecord> =
        serde_json::from_str(&fs::read_to_string(out.join(ALL_TESTS_FILE)).expect("read"))
            .expect("records");
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|r| r.category.is_none()));
}

#[test]
fn test_analyze_with_custom_rules() {
    let tmp = TempDir::new().expect("temp dir");
    let input = write(tmp.path(), "candidate.xml", CANDIDATE);
    let rules = write(
        tmp.path(),
        "rules.json",
        r#"[{"label": "Login", "patterns": ["401"]}]"#,
    );
    let mut opts = options(input, tmp.path().join("out"));
    opts.rules = Some(rules);

    let analysis = analyze(&opts).expect("analyze");
    assert_eq!(analysis.categories.len(), 1);
    assert_eq!(analysis.categories[0].category, "Login");
}

#[test]
fn test_analyze_bad_rules_file() {
    let tmp = TempDir::new().expect("temp dir");
    let input = write(tmp.path(), "candidate.xml", CANDIDATE);
    let rules = write(tmp.path(), "rules.json", "not json");
    let mut opts = options(input, tmp.path().join("out"));
    opts.rules = Some(rules);

    assert!(matches!(analyze(&opts), Err(ReportError::Rules(_))));
}

#[test]
fn test_analyze_empty_report_writes_nothing() {
    let tmp = TempDir::new().expect("temp dir");
    let input = write(tmp.path(), "empty.xml", "");
    let out = tmp.path().join("out");

    let analysis = analyze(&options(input, out.clone())).expect("analyze");
    assert!(analysis.is_empty());
    assert!(analysis.written.is_empty());
    assert!(!out.exists());
}

#[test]
fn test_analyze_missing_input() {
    let tmp = TempDir::new().expect("temp dir");
    let result = analyze(&options(tmp.path().join("nope.xml"), tmp.path().join("out")));
    assert!(matches!(
        result,
        Err(ReportError::Extract(ExtractError::InputNotFound { .. }))
    ));
}

#[test]
fn test_compare_reports() {
    let tmp = TempDir::new().expect("temp dir");
    let baseline = write(tmp.path(), "baseline.xml", BASELINE);
    let candidate = write(tmp.path(), "candidate.xml", CANDIDATE);
    let out = tmp.path().join("out");

    let comparison = compare_runs(&baseline, &candidate, &out).expect("compare");
    let summary = &comparison.report.summary;
    assert_eq!(summary.total, 3);
    assert_eq!(summary.still_passing, 1);
    assert_eq!(summary.new_failures, 1);
    assert_eq!(summary.fixed, 1);
    assert_eq!(comparison.written, out.join(COMPARISON_FILE));

    let json = read_json(&comparison.written);
    assert_eq!(json["results"][1]["change"], "New Failure");
    assert_eq!(json["results"][1]["message_b"], "expected 401 but got 200");
    assert_eq!(json["results"][2]["change"], "Fixed");
}

#[test]
fn test_compare_against_previous_export() {
    let tmp = TempDir::new().expect("temp dir");
    let baseline = write(tmp.path(), "baseline.xml", BASELINE);
    let candidate = write(tmp.path(), "candidate.xml", CANDIDATE);
    let first_out = tmp.path().join("monday");
    analyze(&options(baseline, first_out.clone())).expect("analyze baseline");

    let comparison = compare_runs(
        &first_out.join(ALL_TESTS_FILE),
        &candidate,
        &tmp.path().join("diff"),
    )
    .expect("compare");
    assert_eq!(comparison.report.summary.new_failures, 1);
    assert_eq!(comparison.report.summary.fixed, 1);
}
