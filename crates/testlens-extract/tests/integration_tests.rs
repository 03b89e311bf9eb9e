// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for testlens-extract
//!
//! These tests run the full load/parse/extract pipeline over report fixtures
//! in the formats commonly found in CI artifacts.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use similar_asserts::assert_eq;
use testlens_extract::{
    Cascade, RunSummary, Status, TestRecord, extract_records, extract_text, parse_report,
};
use testlens_markup::parse;

/// Get the fixtures directory for test data
fn fixtures_dir() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    Path::new(&manifest_dir).join("tests/fixtures")
}

fn fixture(name: &str) -> Vec<TestRecord> {
    parse_report(fixtures_dir().join(name)).expect("fixture should load")
}

fn summary_line(records: &[TestRecord]) -> Vec<(String, Status)> {
    records
        .iter()
        .map(|r| (r.testcase.clone(), r.status))
        .collect()
}

// ============================================================================
// Report formats
// ============================================================================

#[test]
fn test_junit_report() {
    let records = fixture("junit.xml");
    assert_eq!(
        summary_line(&records),
        vec![
            ("test_add_item".to_string(), Status::Pass),
            ("test_remove_item".to_string(), Status::Fail),
            ("test_gateway_timeout".to_string(), Status::Fail),
            ("test_refund".to_string(), Status::Pass),
            ("test_add_item".to_string(), Status::Pass),
        ]
    );

    let removed = &records[1];
    assert_eq!(removed.classname, "tests.test_cart");
    assert_eq!(removed.time, "0.020");
    assert_eq!(removed.message, "AssertionError: expected 0 items but found 1");
    assert!(removed.details.starts_with("Traceback (most recent call last):"));

    let timeout = &records[2];
    assert_eq!(timeout.message, "TimeoutError: gateway did not respond");
    assert_eq!(timeout.details, "socket timed out after 1.5s");

    // Same name, different class: two distinct keys
    assert!(records[0].key() != records[4].key());
}

#[test]
fn test_junit_summary() {
    let summary = RunSummary::from_records(fixture("junit.xml"));
    assert_eq!(summary.total, 5);
    assert_eq!(summary.passed, 3);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.skipped, 0);
}

#[test]
fn test_nunit_report() {
    let records = fixture("nunit.xml");
    assert_eq!(
        summary_line(&records),
        vec![
            ("Reserve_ReducesAvailable".to_string(), Status::Pass),
            ("Release_RestoresAvailable".to_string(), Status::Fail),
            ("Audit_Logs".to_string(), Status::Skipped),
        ]
    );
    assert_eq!(records[0].classname, "Inventory.Tests.StockTests");
    assert_eq!(records[0].time, "0.004");
    assert!(records[1].message.contains("Expected: 10"));
    assert!(records[1].details.contains("StockTests.cs:line 27"));
    assert!(records[2].message.is_empty());
}

#[test]
fn test_trx_report_skips_definitions() {
    let records = fixture("trx.xml");
    assert_eq!(
        summary_line(&records),
        vec![
            ("ParsesHeader".to_string(), Status::Pass),
            ("RejectsEmpty".to_string(), Status::Fail),
        ]
    );
    assert_eq!(records[1].time, "00:00:00.002");
    assert!(records[1].message.contains("no exception was thrown"));
}

#[test]
fn test_html_report() {
    let records = fixture("report.html");
    assert_eq!(
        summary_line(&records),
        vec![
            ("login page loads".to_string(), Status::Pass),
            ("checkout completes".to_string(), Status::Fail),
            ("search suggestions".to_string(), Status::Skipped),
        ]
    );
    assert!(records[1].message.contains("ElementNotFound"));
}

#[test]
fn test_testng_report_yields_test_methods() {
    let records = fixture("testng.xml");
    assert_eq!(
        summary_line(&records),
        vec![
            ("opensLoginPage".to_string(), Status::Pass),
            ("rejectsBadPassword".to_string(), Status::Fail),
            ("addsItem".to_string(), Status::Pass),
        ]
    );
    assert!(records[1].message.contains("expected [true] but found [false]"));
    assert!(records[1].details.contains("LoginTest.java:42"));
    assert!(records.iter().all(|r| r.testcase != "Regression"));
}

#[test]
fn test_malformed_report_keeps_readable_prefix() {
    let records = fixture("malformed.xml");
    assert!(records.len() >= 2, "got {records:?}");
    assert_eq!(records[0].key(), ("first", "m.A"));
    assert!(records[0].passed());
    assert_eq!(records[1].testcase, "second");
    assert!(records[1].failed());
    assert_eq!(records[1].message, "Connection refused");
}

#[test]
fn test_custom_report_uses_repeated_siblings() {
    let root = parse(
        &std::fs::read_to_string(fixtures_dir().join("custom.xml")).expect("read fixture"),
    );
    let extraction = Cascade::default().run(&root);
    assert_eq!(extraction.tier, Some("repeated-siblings"));
    assert_eq!(
        summary_line(&extraction.records),
        vec![
            ("disk space".to_string(), Status::Pass),
            ("db migrations".to_string(), Status::Fail),
            ("cache warmup".to_string(), Status::Fail),
        ]
    );
    assert!(extraction.records.iter().all(|r| r.classname == "check"));
}

// ============================================================================
// Extraction guarantees
// ============================================================================

#[test]
fn test_one_record_per_canonical_tag_in_document_order() {
    let cases: String = (0..40)
        .map(|i| format!(r#"<testcase name="t{i}" classname="c{}"/>"#, i % 3))
        .collect();
    let markup = format!(
        r#"<testsuites><testsuite name="a">{cases}</testsuite><testsuite name="b">{cases}</testsuite></testsuites>"#
    );
    let records = extract_records(&parse(&markup));
    assert_eq!(records.len(), 80);
    assert_eq!(records[0].testcase, "t0");
    assert_eq!(records[39].testcase, "t39");
    assert_eq!(records[40].testcase, "t0");
}

#[test]
fn test_explicit_failing_status_outranks_passing_child() {
    let records = extract_records(&parse(
        r#"<testsuite><testcase name="t" status="failed"><passed/><success>yes</success></testcase></testsuite>"#,
    ));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, Status::Fail);
}

#[test]
fn test_blank_message_attribute_marks_failure() {
    let records = extract_text(
        r#"<testsuite><testcase name="t" message=""/><testcase name="u"/></testsuite>"#,
        &Cascade::default(),
    );
    assert_eq!(
        summary_line(&records),
        vec![("t".to_string(), Status::Fail), ("u".to_string(), Status::Pass)]
    );
    assert!(records[0].message.is_empty());
}

#[test]
fn test_five_bare_cases_three_failing() {
    let records = extract_text(
        r#"<results><case outcome="fail"/><case/><case outcome="fail"/><case/><case outcome="fail"/></results>"#,
        &Cascade::default(),
    );
    assert_eq!(records.len(), 5);
    assert_eq!(records.iter().filter(|r| r.failed()).count(), 3);
    assert_eq!(records.iter().filter(|r| r.passed()).count(), 2);
}

#[test]
fn test_repeated_siblings_never_fall_through_to_flatten() {
    let root = parse("<data><row><cell/></row><row><cell/><cell/></row><footer/></data>");
    let extraction = Cascade::default().run(&root);
    assert_eq!(extraction.tier, Some("repeated-siblings"));
    assert_eq!(extraction.records.len(), 2);
}

#[test]
fn test_flatten_respects_cap() {
    let markup = format!("<root><wrapper>{}</wrapper></root>", "<item/>".repeat(300));
    let extraction = Cascade::default().run(&parse(&markup));
    assert_eq!(extraction.tier, Some("flatten"));
    assert_eq!(extraction.records.len(), 100);

    let records = Cascade::with_flatten_cap(7).extract(&parse(&markup));
    assert_eq!(records.len(), 7);
}

#[test]
fn test_empty_input_yields_no_records() {
    assert!(extract_text("", &Cascade::default()).is_empty());
    assert!(extract_text("   \n\t", &Cascade::default()).is_empty());
}

#[test]
fn test_deep_nesting_terminates() {
    let depth = 5_000;
    let markup = format!("{}{}", "<n>".repeat(depth), "</n>".repeat(depth));
    let records = extract_text(&markup, &Cascade::default());
    assert!(records.len() <= 100);
}

#[test]
fn test_unterminated_tags_extract_quickly() {
    for input in ["<a x ".repeat(40_000), "</a ".repeat(50_000)] {
        let started = Instant::now();
        let records = extract_text(&input, &Cascade::default());
        let elapsed = started.elapsed();
        assert!(
            elapsed < Duration::from_secs(2),
            "{} bytes took {elapsed:?}",
            input.len()
        );
        assert!(records.len() <= 1);
    }
}

#[test]
fn test_records_export_as_json() {
    let records = fixture("junit.xml");
    let json = serde_json::to_value(&records).expect("serialize");
    assert_eq!(json[1]["status"], "FAIL");
    assert_eq!(json[0]["testcase"], "test_add_item");
}
