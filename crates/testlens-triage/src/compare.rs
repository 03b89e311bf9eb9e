// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Run comparison
//!
//! Two runs are joined on `(testcase, classname)`. A key seen on one side
//! only is [`RunStatus::Unknown`] on the other. Each pair is then labelled by
//! the first matching row of:
//!
//! | baseline  | candidate | change             |
//! |-----------|-----------|--------------------|
//! | UNKNOWN   | any       | Other/Changed      |
//! | any       | UNKNOWN   | Other/Changed      |
//! | not FAIL  | FAIL      | New Failure        |
//! | FAIL      | not FAIL  | Fixed              |
//! | FAIL      | FAIL      | Persistent Failure |
//! | PASS      | PASS      | Still Passing      |
//! | otherwise |           | Other/Changed      |
//!
//! Keys are not unique within a run; when a run repeats a key, its last
//! record is the one compared.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use testlens_extract::{Status, TestRecord};
use tracing::debug;

/// Status of a test on one side of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    /// Test passed
    Pass,
    /// Test failed
    Fail,
    /// Test was skipped
    Skipped,
    /// Test absent from this run, or status unrecognised
    Unknown,
}

impl RunStatus {
    /// Map a status string onto a comparison status; anything outside the
    /// status vocabularies is `Unknown`
    #[must_use]
    pub fn normalize(value: &str) -> Self {
        Status::from_vocabulary(value).map_or(Self::Unknown, Self::from)
    }

    /// Canonical uppercase label
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skipped => "SKIPPED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl From<Status> for RunStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Pass => Self::Pass,
            Status::Fail => Self::Fail,
            Status::Skipped => Self::Skipped,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Unknown, Self::normalize))
    }
}

/// How a test's status moved between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Change {
    /// Failing now, not failing before
    #[serde(rename = "New Failure")]
    NewFailure,
    /// Failing before, not failing now
    #[serde(rename = "Fixed")]
    Fixed,
    /// Failing in both runs
    #[serde(rename = "Persistent Failure")]
    PersistentFailure,
    /// Passing in both runs
    #[serde(rename = "Still Passing")]
    StillPassing,
    /// Any other transition, including either side missing
    #[serde(rename = "Other/Changed")]
    Other,
}

impl Change {
    /// Label a status transition
    #[must_use]
    pub fn classify(baseline: RunStatus, candidate: RunStatus) -> Self {
        use RunStatus::{Fail, Pass, Unknown};
        match (baseline, candidate) {
            (Unknown, _) | (_, Unknown) => Self::Other,
            (a, Fail) if a != Fail => Self::NewFailure,
            (Fail, b) if b != Fail => Self::Fixed,
            (Fail, Fail) => Self::PersistentFailure,
            (Pass, Pass) => Self::StillPassing,
            _ => Self::Other,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NewFailure => "New Failure",
            Self::Fixed => "Fixed",
            Self::PersistentFailure => "Persistent Failure",
            Self::StillPassing => "Still Passing",
            Self::Other => "Other/Changed",
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a run comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Test name
    pub testcase: String,
    /// Owning class, possibly empty
    pub classname: String,
    /// Status in the baseline run
    pub status_a: RunStatus,
    /// Status in the candidate run
    pub status_b: RunStatus,
    /// Baseline diagnostic
    #[serde(default)]
    pub message_a: String,
    /// Candidate diagnostic
    #[serde(default)]
    pub message_b: String,
    /// Transition label
    pub change: Change,
}

impl ComparisonResult {
    /// Check if this row is a regression
    #[must_use]
    pub fn is_regression(&self) -> bool {
        self.change == Change::NewFailure
    }
}

type Key<'a> = (&'a str, &'a str);

/// Index a run by key, keeping first-appearance order and the last record
/// seen for each key
fn index_run(records: &[TestRecord]) -> (Vec<Key<'_>>, HashMap<Key<'_>, &TestRecord>) {
    let mut order = Vec::new();
    let mut latest: HashMap<Key<'_>, &TestRecord> = HashMap::with_capacity(records.len());
    for record in records {
        if latest.insert(record.key(), record).is_some() {
            debug!(
                testcase = %record.testcase,
                classname = %record.classname,
                "duplicate test key; keeping the later record"
            );
        } else {
            order.push(record.key());
        }
    }
    (order, latest)
}

fn side(record: Option<&&TestRecord>) -> (RunStatus, String) {
    record.map_or((RunStatus::Unknown, String::new()), |r| {
        (r.status.into(), r.message.clone())
    })
}

/// Compare a baseline run against a candidate run
///
/// Rows follow the baseline's key order, followed by keys only present in
/// the candidate in their order of appearance.
#[must_use]
pub fn compare(baseline: &[TestRecord], candidate: &[TestRecord]) -> Vec<ComparisonResult> {
    let (order_a, index_a) = index_run(baseline);
    let (order_b, index_b) = index_run(candidate);

    let only_b = order_b.into_iter().filter(|key| !index_a.contains_key(key));
    let results: Vec<ComparisonResult> = order_a
        .into_iter()
        .chain(only_b)
        .map(|key @ (testcase, classname)| {
            let (status_a, message_a) = side(index_a.get(&key));
            let (status_b, message_b) = side(index_b.get(&key));
            ComparisonResult {
                testcase: testcase.to_string(),
                classname: classname.to_string(),
                status_a,
                status_b,
                message_a,
                message_b,
                change: Change::classify(status_a, status_b),
            }
        })
        .collect();

    debug!(
        baseline = baseline.len(),
        candidate = candidate.len(),
        rows = results.len(),
        "compared runs"
    );
    results
}

/// Per-change counts over a comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// Rows compared
    pub total: usize,
    /// "New Failure" rows
    pub new_failures: usize,
    /// "Fixed" rows
    pub fixed: usize,
    /// "Persistent Failure" rows
    pub persistent_failures: usize,
    /// "Still Passing" rows
    pub still_passing: usize,
    /// "Other/Changed" rows
    pub other: usize,
}

impl ChangeSummary {
    /// Count the rows of a comparison
    #[must_use]
    pub fn from_results(results: &[ComparisonResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.change {
                Change::NewFailure => summary.new_failures += 1,
                Change::Fixed => summary.fixed += 1,
                Change::PersistentFailure => summary.persistent_failures += 1,
                Change::StillPassing => summary.still_passing += 1,
                Change::Other => summary.other += 1,
            }
        }
        summary
    }

    /// Count for one change label
    #[must_use]
    pub fn count(&self, change: Change) -> usize {
        match change {
            Change::NewFailure => self.new_failures,
            Change::Fixed => self.fixed,
            Change::PersistentFailure => self.persistent_failures,
            Change::StillPassing => self.still_passing,
            Change::Other => self.other,
        }
    }

    /// Check if the candidate introduced no new failures
    #[must_use]
    pub fn has_regressions(&self) -> bool {
        self.new_failures > 0
    }
}
