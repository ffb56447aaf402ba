//! Acceptance evaluation of a finished batch.
//!
//! Decoupled from the state machine: the checks only ever see the recorded
//! reading history and the completion flag. The check list is built from the
//! same `ProcessParams` that configured the state machine, so control and
//! verification share one source of truth.

pub mod check;
pub mod report;

pub use check::ProcessCheck;
pub use report::{BatchReport, BatchVerdict, ProcessCheckResult, ReportEntry};

use crate::config::ProcessParams;

/// Build the fixed, ordered acceptance check list for one batch.
///
/// For now this is the one check set this process needs; a larger system
/// would look the list up per batch type, which is why the checks are
/// data rather than code.
pub fn acceptance_checks(params: &ProcessParams) -> Vec<ProcessCheck> {
    vec![
        ProcessCheck::ProcessCompleted,
        ProcessCheck::FillLevelReached {
            window: params.fill,
        },
        ProcessCheck::FillLevelMaintained {
            window: params.fill,
        },
        ProcessCheck::TemperatureRange,
        ProcessCheck::TargetTemperatureReached {
            window: params.stop_temperature,
        },
        ProcessCheck::PhRange,
        ProcessCheck::PressureRange,
        ProcessCheck::PressureMaximum {
            ceiling: params.max_pressure,
        },
        ProcessCheck::RunTime,
    ]
}
