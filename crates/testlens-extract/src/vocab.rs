// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fixed vocabularies driving the extraction heuristics
//!
//! All lists are matched case-insensitively. Where a list is scanned in order
//! (attribute lookups, name sources) the order is part of the observable
//! behavior: the first hit wins.

/// The canonical test-record tag
pub const CANONICAL_TEST_TAG: &str = "testcase";

/// The canonical test-suite container tag
pub const CANONICAL_SUITE_TAG: &str = "testsuite";

/// Known test-record tag names
pub const TEST_TAGS: &[&str] = &[
    "testcase",
    "test-case",
    "test",
    "testresult",
    "test-step",
    "unittestresult",
];

/// Substrings that make a tag name look like a test/case/result holder
pub const TEST_TAG_TOKENS: &[&str] = &["test", "case", "result", "unittest"];

/// Suite-level containers and report metadata; never records themselves
pub const CONTAINER_TAGS: &[&str] = &[
    "testsuite",
    "testsuites",
    "test-suite",
    "test-suites",
    "testrun",
    "test-run",
    "testresults",
    "test-results",
    "results",
    "assembly",
    "assemblies",
    "collection",
    "testdefinitions",
    "testentries",
    "testentry",
    "testlists",
    "testlist",
    "testsettings",
    "resultsummary",
];

/// Subtrees holding report metadata rather than executions
pub const METADATA_SUBTREES: &[&str] = &[
    "testdefinitions",
    "testentries",
    "testlists",
    "testsettings",
    "resultsummary",
    "properties",
];

/// Attributes that identify a test, in lookup order
pub const NAME_ATTRS: &[&str] = &["name", "testName", "testname", "method", "id"];

/// Name-like attributes accepted alongside an outcome attribute on a generic tag
pub const OUTCOME_NAME_ATTRS: &[&str] = &["name", "testname"];

/// Attributes carrying an explicit outcome, in lookup order
pub const OUTCOME_ATTRS: &[&str] = &["result", "outcome", "status"];

/// Attributes carrying the owning class
pub const CLASSNAME_ATTRS: &[&str] = &["classname", "class", "className"];

/// Attributes carrying a duration
pub const TIME_ATTRS: &[&str] = &["time", "duration"];

/// Tags whose presence under a test signals a failure
pub const FAILURE_TAGS: &[&str] = &[
    "failure",
    "error",
    "failed",
    "failuremessage",
    "reason",
    "failure-message",
];

/// Attributes preferred over element text when reading a diagnostic
pub const TEXT_ATTRS: &[&str] = &[
    "message",
    "reason",
    "text",
    "failureMessage",
    "failure-message",
];

/// Attributes on a test node that by themselves signal a failure
pub const MESSAGE_ATTRS: &[&str] = &["message", "reason", "failure"];

/// Lowercased text fragments that mark a test's own text as a failure
pub const FAILURE_TEXT_TOKENS: &[&str] = &["traceback", "assertionerror", "error:", "exception"];

/// Children or attributes a synthesized record takes its name from, in order
pub const SYNTHETIC_NAME_SOURCES: &[&str] = &["name", "id", "title", "testName", "testname"];

/// Lowercased text fragments that mark a synthesized record as failed
pub const SYNTHETIC_FAILURE_TOKENS: &[&str] =
    &["error", "failed", "exception", "traceback", "assertion"];

/// Outcome values meaning the test failed
pub const FAILING_STATUSES: &[&str] = &["failed", "fail", "error", "failure"];

/// Outcome values meaning the test passed
pub const PASSING_STATUSES: &[&str] = &["passed", "pass", "ok", "success"];

/// Outcome values meaning the test did not run
pub const SKIPPING_STATUSES: &[&str] = &["skipped", "skip", "ignored"];

/// Whether `tag` is in `list`, ignoring case
#[must_use]
pub fn contains_tag(list: &[&str], tag: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(tag))
}
