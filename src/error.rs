//! Abort taxonomy for a batch run.

use crate::device::DeviceError;
use thiserror::Error;

/// Reasons a batch run terminates early.
///
/// Any of these short-circuits the driver loop: the loop stops polling,
/// performs the universal cleanup (close input valve, open output valve)
/// exactly once, and still produces a check report with the completion flag
/// cleared.
#[derive(Debug, Error)]
pub enum AbortReason {
    /// The device was in an unexpected state before the batch began.
    /// Fatal to the batch, not to the process.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// A critical process parameter exceeded a bound enforced by the state
    /// machine itself.
    #[error("process parameter over limit: {0}")]
    OverLimit(String),

    /// The independent safety backstop fired, regardless of which process
    /// state was active.
    #[error("safety critical parameter '{parameter}' out of bounds: {value}")]
    SafetyLimitExceeded {
        parameter: &'static str,
        value: f64,
    },

    /// A programming-contract violation: a non-exhaustive transition branch
    /// was reached, or a terminal state was asked to advance. Never retried.
    #[error("process logic error: {0}")]
    LogicError(String),

    /// The device transport failed. Retries, if any, belong to the
    /// transport layer; the core treats this as an abort.
    #[error("reactor device failure: {0}")]
    Device(#[from] DeviceError),
}
