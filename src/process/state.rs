//! The batch process state machine.
//!
//! Each state decides, from one live device poll, the next state and any
//! valve commands to issue. The machine is a singly linked, acyclic chain
//! (`Start -> Fill -> Run -> Empty -> Done`) built once per batch from the
//! process parameters and advanced by substitution: the driver replaces its
//! current-state value with whatever `advance` returns. No state is ever
//! mutated after construction.
//!
//! Strictly speaking this process is simple enough to write imperatively;
//! the explicit machine buys testable per-state transition logic and cheap
//! extension to more complicated processes.

use crate::config::{Limit, ProcessParams};
use crate::device::{ReactorDevice, ValveId, ValveState};
use crate::error::AbortReason;
use crate::record::{Measurements, StepTag};

/// One state of the batch process.
///
/// Identity is the state's `StepTag`; non-terminal states also own their
/// configuration and their successor.
#[derive(Clone, Debug, PartialEq)]
pub enum ProcessState {
    /// Pre-flight checks, then open the input valve.
    Start { next: Box<ProcessState> },

    /// Wait for the vessel to reach the target fill window.
    Fill {
        window: Limit,
        next: Box<ProcessState>,
    },

    /// Hold the reaction until the temperature reaches the stop window,
    /// watching the pressure ceiling the whole time.
    Run {
        max_pressure: f64,
        stop_window: Limit,
        next: Box<ProcessState>,
    },

    /// Wait for the vessel to drain.
    Empty,

    /// Terminal sentinel; asking it to advance is a contract violation.
    Done,
}

impl ProcessState {
    /// Build the full process chain for one batch from its parameters.
    ///
    /// The same `ProcessParams` value also builds the acceptance check
    /// list, keeping control and verification on one source of truth.
    pub fn sequence(params: &ProcessParams) -> ProcessState {
        ProcessState::Start {
            next: Box::new(ProcessState::Fill {
                window: params.fill,
                next: Box::new(ProcessState::Run {
                    max_pressure: params.max_pressure,
                    stop_window: params.stop_temperature,
                    next: Box::new(ProcessState::Empty),
                }),
            }),
        }
    }

    /// The step tag identifying this state, used to label readings.
    pub fn step(&self) -> StepTag {
        match self {
            Self::Start { .. } => StepTag::Start,
            Self::Fill { .. } => StepTag::Fill,
            Self::Run { .. } => StepTag::Run,
            Self::Empty => StepTag::Empty,
            Self::Done => StepTag::Done,
        }
    }

    /// True once the process has nothing left to do.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Poll the device, issue any valve commands this state calls for, and
    /// return the state that follows together with the polled measurements.
    ///
    /// A self-transition (still filling, still heating, still draining)
    /// returns the same state back. An abort condition is returned as an
    /// error instead of a next state; the driver must stop polling and run
    /// the universal cleanup.
    pub fn advance<D: ReactorDevice>(
        self,
        device: &mut D,
    ) -> Result<(ProcessState, Measurements), AbortReason> {
        match self {
            Self::Start { next } => {
                // Pre-flight sanity checks before kicking off the process.
                if device.valve_state(ValveId::Input)? != ValveState::Closed {
                    return Err(AbortReason::PreconditionViolation(
                        "input valve was already open at batch start".to_string(),
                    ));
                }
                if device.valve_state(ValveId::Output)? != ValveState::Closed {
                    return Err(AbortReason::PreconditionViolation(
                        "output valve was open at batch start".to_string(),
                    ));
                }

                let status = device.status()?;
                device.open_valve(ValveId::Input)?;
                Ok((*next, status))
            }

            Self::Fill { window, next } => {
                let status = device.status()?;
                let fill = status.fill_percent;

                if fill < window.min {
                    // Still filling.
                    return Ok((Self::Fill { window, next }, status));
                }
                if fill <= window.max {
                    device.close_valve(ValveId::Input)?;
                    return Ok((*next, status));
                }
                if fill > window.max {
                    return Err(AbortReason::OverLimit("reactor over-filled".to_string()));
                }

                // The three branches above are exhaustive for real numbers;
                // only a NaN fill level lands here.
                Err(AbortReason::LogicError(
                    "fill level comparison was not exhaustive".to_string(),
                ))
            }

            Self::Run {
                max_pressure,
                stop_window,
                next,
            } => {
                let status = device.status()?;

                // Pressure dominates temperature.
                if status.pressure > max_pressure {
                    return Err(AbortReason::OverLimit("reactor over-pressure".to_string()));
                }

                let temperature = status.temperature;
                if temperature < stop_window.min {
                    // Still waiting for the temperature to reach the stop window.
                    return Ok((
                        Self::Run {
                            max_pressure,
                            stop_window,
                            next,
                        },
                        status,
                    ));
                }
                if temperature <= stop_window.max {
                    device.open_valve(ValveId::Output)?;
                    return Ok((*next, status));
                }
                if temperature > stop_window.max {
                    // Behavior above the stop window was never specified for
                    // this process; aborting is the conservative policy.
                    return Err(AbortReason::OverLimit(
                        "reactor over-temperature".to_string(),
                    ));
                }

                Err(AbortReason::LogicError(
                    "temperature comparison was not exhaustive".to_string(),
                ))
            }

            Self::Empty => {
                let status = device.status()?;
                if status.fill_percent > 0.0 {
                    // Still draining.
                    Ok((Self::Empty, status))
                } else {
                    Ok((Self::Done, status))
                }
            }

            Self::Done => Err(AbortReason::LogicError(
                "advance called on the terminal 'done' state".to_string(),
            )),
        }
    }
}
