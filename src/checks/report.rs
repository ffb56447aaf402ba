//! Batch report: per-check results and the aggregate verdict.

use super::check::ProcessCheck;
use crate::record::BatchRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Outcome of one acceptance check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessCheckResult {
    /// Whether the check passed.
    pub passed: bool,
    /// Human-readable explanation, suitable for a batch report.
    pub message: String,
}

impl ProcessCheckResult {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

/// One line of the final report: a named check and its result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub check: String,
    pub passed: bool,
    pub message: String,
}

/// Overall disposition of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BatchVerdict {
    Success,
    Failed,
}

impl fmt::Display for BatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        })
    }
}

/// The final report for one batch: every check's result plus the verdict.
///
/// A report is produced for every run, successful or aborted, so there is
/// always traceability output even on partial data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    /// Whether the run reached the terminal state.
    pub completed: bool,
    /// The abort reason, when the run was cut short.
    pub abort: Option<String>,
    pub entries: Vec<ReportEntry>,
    pub verdict: BatchVerdict,
}

impl BatchReport {
    /// Run every check against the finished record and aggregate.
    ///
    /// The verdict is `Success` only when every check passed AND the run
    /// completed; an incomplete run is failed even if each individual check
    /// passed, as defense against a gap in any one check's logic.
    pub fn evaluate(
        checks: &[ProcessCheck],
        record: &BatchRecord,
        completed: bool,
        abort: Option<String>,
    ) -> Self {
        let entries: Vec<ReportEntry> = checks
            .iter()
            .map(|check| {
                let result = check.evaluate(record, completed);
                ReportEntry {
                    check: check.name().to_string(),
                    passed: result.passed,
                    message: result.message,
                }
            })
            .collect();

        let all_passed = entries.iter().all(|entry| entry.passed);
        let verdict = if all_passed && completed {
            BatchVerdict::Success
        } else {
            BatchVerdict::Failed
        };

        Self {
            batch_id: record.id(),
            completed,
            abort,
            entries,
            verdict,
        }
    }

    pub fn is_success(&self) -> bool {
        self.verdict == BatchVerdict::Success
    }

    /// The entries for checks that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|entry| !entry.passed)
    }
}
