//! Acceptance checks over a finished batch record.
//!
//! Each check is a configured evaluator over the full reading history plus
//! the completion flag, independent of the state machine that produced the
//! history. Checks come in two registers: CPP checks, which can fail the
//! batch, and informational checks, which always pass and exist purely so
//! the observed ranges land in the report for traceability.

use super::report::ProcessCheckResult;
use crate::config::Limit;
use crate::record::{BatchRecord, MeasurementField, MinMax, StepTag};

/// One configured acceptance check.
///
/// A closed set: the report runs whatever list the builder hands it, and
/// every variant's evaluation is checked for exhaustiveness at compile time.
#[derive(Clone, Debug, PartialEq)]
pub enum ProcessCheck {
    /// Did the run reach the terminal state? Independent of the record.
    ProcessCompleted,
    /// Did the fill stage actually reach the target window?
    FillLevelReached { window: Limit },
    /// Did the level stay inside the window for the whole run stage?
    FillLevelMaintained { window: Limit },
    /// Informational: temperature range over the whole batch.
    TemperatureRange,
    /// Did the reaction peak inside the stop window? The `empty` stage is
    /// included because contents can keep heating while the tank drains.
    TargetTemperatureReached { window: Limit },
    /// Informational: pH range over the whole batch.
    PhRange,
    /// Informational: pressure range over the whole batch.
    PressureRange,
    /// Did pressure stay at or below the ceiling everywhere?
    PressureMaximum { ceiling: f64 },
    /// Informational: how long the run stage lasted.
    RunTime,
}

impl ProcessCheck {
    /// Stable name for report entries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProcessCompleted => "process-completed",
            Self::FillLevelReached { .. } => "fill-level-reached",
            Self::FillLevelMaintained { .. } => "fill-level-maintained",
            Self::TemperatureRange => "temperature-range",
            Self::TargetTemperatureReached { .. } => "target-temperature-reached",
            Self::PhRange => "ph-range",
            Self::PressureRange => "pressure-range",
            Self::PressureMaximum { .. } => "pressure-maximum",
            Self::RunTime => "run-time",
        }
    }

    /// Evaluate this check against the finished record.
    pub fn evaluate(&self, record: &BatchRecord, completed: bool) -> ProcessCheckResult {
        match self {
            Self::ProcessCompleted => {
                if completed {
                    ProcessCheckResult::pass("process ran to completion")
                } else {
                    ProcessCheckResult::fail("process was aborted before completion")
                }
            }

            Self::FillLevelReached { window } => {
                match segment_range(record, &[StepTag::Fill], MeasurementField::FillPercent) {
                    None => ProcessCheckResult::fail("no readings recorded during the fill stage"),
                    Some(range) => {
                        let message =
                            format!("maximum level reached during fill was {}%", range.max);
                        if window.contains(range.max) {
                            ProcessCheckResult::pass(message)
                        } else {
                            ProcessCheckResult::fail(message)
                        }
                    }
                }
            }

            Self::FillLevelMaintained { window } => {
                match segment_range(record, &[StepTag::Run], MeasurementField::FillPercent) {
                    None => ProcessCheckResult::fail("no readings recorded during the run stage"),
                    Some(range) => {
                        if !window.contains(range.min) {
                            ProcessCheckResult::fail(format!(
                                "CPP out of range: fill level dropped to {}% during run",
                                range.min
                            ))
                        } else if !window.contains(range.max) {
                            ProcessCheckResult::fail(format!(
                                "CPP out of range: fill level rose to {}% during run",
                                range.max
                            ))
                        } else {
                            ProcessCheckResult::pass(format!(
                                "CPP met: fill level held between {}% and {}% during run",
                                range.min, range.max
                            ))
                        }
                    }
                }
            }

            Self::TemperatureRange => {
                informational_range(record, MeasurementField::Temperature, "temperature")
            }

            Self::TargetTemperatureReached { window } => {
                match segment_range(
                    record,
                    &[StepTag::Run, StepTag::Empty],
                    MeasurementField::Temperature,
                ) {
                    None => ProcessCheckResult::fail(
                        "no readings recorded during the run or empty stages",
                    ),
                    Some(range) => {
                        if window.contains(range.max) {
                            ProcessCheckResult::pass(format!(
                                "CPP met: maximum temperature was {}",
                                range.max
                            ))
                        } else {
                            ProcessCheckResult::fail(format!(
                                "CPP out of range: maximum temperature was {}",
                                range.max
                            ))
                        }
                    }
                }
            }

            Self::PhRange => informational_range(record, MeasurementField::Ph, "pH"),

            Self::PressureRange => {
                informational_range(record, MeasurementField::Pressure, "pressure")
            }

            Self::PressureMaximum { ceiling } => {
                match record.reading_range(MeasurementField::Pressure) {
                    // Compliance cannot be shown without observations.
                    Err(_) => ProcessCheckResult::fail("no readings recorded"),
                    Ok(range) => {
                        if range.max <= *ceiling {
                            ProcessCheckResult::pass(format!(
                                "CPP met: maximum pressure was {}",
                                range.max
                            ))
                        } else {
                            ProcessCheckResult::fail(format!(
                                "CPP out of range: pressure reached {}",
                                range.max
                            ))
                        }
                    }
                }
            }

            Self::RunTime => match record.filter_by_step(&[StepTag::Run]).process_duration() {
                Err(_) => ProcessCheckResult::pass("no readings recorded during the run stage"),
                Ok(duration) => ProcessCheckResult::pass(format!(
                    "run stage lasted {:.1}s",
                    duration.as_secs_f64()
                )),
            },
        }
    }
}

/// Min/max of one field over a step segment, or `None` if the segment holds
/// no readings.
fn segment_range(record: &BatchRecord, steps: &[StepTag], field: MeasurementField) -> Option<MinMax> {
    record.filter_by_step(steps).reading_range(field).ok()
}

/// Report-only range over the whole record; never fails the batch.
fn informational_range(
    record: &BatchRecord,
    field: MeasurementField,
    label: &str,
) -> ProcessCheckResult {
    match record.reading_range(field) {
        Err(_) => ProcessCheckResult::pass("no readings recorded"),
        Ok(range) => ProcessCheckResult::pass(format!(
            "{label} ranged from {} to {}",
            range.min, range.max
        )),
    }
}
