//! Test record types

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::vocab::{FAILING_STATUSES, PASSING_STATUSES, SKIPPING_STATUSES, contains_tag};

/// Outcome of one extracted test execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Test passed (or showed no failure evidence)
    Pass,
    /// Test failed or errored
    Fail,
    /// Test was skipped/ignored
    Skipped,
}

impl Status {
    /// Map a free-form outcome value onto a status
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Returns `None` for values outside the failing/passing/skipping
    /// vocabularies.
    #[must_use]
    pub fn from_vocabulary(value: &str) -> Option<Self> {
        let value = value.trim();
        if contains_tag(FAILING_STATUSES, value) {
            Some(Self::Fail)
        } else if contains_tag(PASSING_STATUSES, value) {
            Some(Self::Pass)
        } else if contains_tag(SKIPPING_STATUSES, value) {
            Some(Self::Skipped)
        } else {
            None
        }
    }

    /// Canonical uppercase label
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_vocabulary(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised test status: {raw:?}")))
    }
}

/// One test execution extracted from a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Test name; synthesized when the report carries none
    pub testcase: String,
    /// Owning class or group, possibly empty
    #[serde(default)]
    pub classname: String,
    /// Duration exactly as written in the report, unit-less
    #[serde(default)]
    pub time: String,
    /// Derived outcome
    pub status: Status,
    /// Short diagnostic
    #[serde(default)]
    pub message: String,
    /// Fuller diagnostic text
    #[serde(default)]
    pub details: String,
    /// Failure category, assigned after extraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TestRecord {
    /// Create a record with only a name and status
    #[must_use]
    pub fn new(testcase: impl Into<String>, status: Status) -> Self {
        Self {
            testcase: testcase.into(),
            classname: String::new(),
            time: String::new(),
            status,
            message: String::new(),
            details: String::new(),
            category: None,
        }
    }

    /// Set the class name
    #[must_use]
    pub fn with_classname(mut self, classname: impl Into<String>) -> Self {
        self.classname = classname.into();
        self
    }

    /// Set the duration
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Set the short and full diagnostics
    #[must_use]
    pub fn with_diagnostics(mut self, message: impl Into<String>, details: impl Into<String>) -> Self {
        self.message = message.into();
        self.details = details.into();
        self
    }

    /// Attach a failure category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Check if the test passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }

    /// Check if the test failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == Status::Fail
    }

    /// Check if the test was skipped
    #[must_use]
    pub fn skipped(&self) -> bool {
        self.status == Status::Skipped
    }

    /// Text fed to failure categorization: message and details
    #[must_use]
    pub fn diagnostic_text(&self) -> String {
        format!("{} {}", self.message, self.details)
    }

    /// Composite identity used to correlate runs. Not unique within a run.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.testcase, &self.classname)
    }
}

/// Aggregated counts over one extracted run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Records extracted
    pub total: usize,
    /// Records with status PASS
    pub passed: usize,
    /// Records with status FAIL
    pub failed: usize,
    /// Records with status SKIPPED
    pub skipped: usize,
    /// The records themselves, in extraction order
    pub records: Vec<TestRecord>,
}

impl RunSummary {
    /// Summarize a record list
    #[must_use]
    pub fn from_records(records: Vec<TestRecord>) -> Self {
        let passed = records.iter().filter(|r| r.passed()).count();
        let failed = records.iter().filter(|r| r.failed()).count();
        let skipped = records.iter().filter(|r| r.skipped()).count();
        Self {
            total: records.len(),
            passed,
            failed,
            skipped,
            records,
        }
    }

    /// Check if nothing failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Check if extraction found nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Get failing records
    #[must_use]
    pub fn failing_records(&self) -> Vec<&TestRecord> {
        self.records.iter().filter(|r| r.failed()).collect()
    }
}
