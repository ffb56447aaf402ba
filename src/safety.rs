//! Independent safety backstop for the batch process.
//!
//! Not every process state inspects every measurement — pressure, for
//! example, goes unchecked while filling or draining. The safety monitor
//! closes that gap: it sees every polled reading, regardless of which state
//! is active, and vetoes the run when a safety-critical parameter leaves
//! its hard limits. A real control system would run the same check
//! server-side as well.

use crate::config::SafetyLimits;
use crate::error::AbortReason;
use crate::record::Measurements;

/// Stateless evaluator of safety-critical hard limits.
///
/// `check` is a pure function of its inputs; the monitor holds only its
/// configured limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SafetyMonitor {
    max_pressure: f64,
    max_temperature: f64,
}

impl SafetyMonitor {
    pub fn new(limits: &SafetyLimits) -> Self {
        Self {
            max_pressure: limits.max_pressure,
            max_temperature: limits.max_temperature,
        }
    }

    /// Inspect one reading's measurements against the hard limits.
    ///
    /// Temperature is checked before pressure. Must be invoked once per
    /// polled reading, after that reading has been appended to the batch
    /// record.
    pub fn check(&self, measurements: &Measurements) -> Result<(), AbortReason> {
        if measurements.temperature > self.max_temperature {
            return Err(AbortReason::SafetyLimitExceeded {
                parameter: "temperature",
                value: measurements.temperature,
            });
        }

        if measurements.pressure > self.max_pressure {
            return Err(AbortReason::SafetyLimitExceeded {
                parameter: "pressure",
                value: measurements.pressure,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> SafetyMonitor {
        SafetyMonitor::new(&SafetyLimits {
            max_pressure: 200.0,
            max_temperature: 100.0,
        })
    }

    fn measurements(pressure: f64, temperature: f64) -> Measurements {
        Measurements {
            fill_percent: 50.0,
            pressure,
            temperature,
            ph: 7.0,
        }
    }

    #[test]
    fn in_bounds_readings_pass() {
        assert!(monitor().check(&measurements(113.0, 90.0)).is_ok());
        // Exactly at the limit is still in bounds.
        assert!(monitor().check(&measurements(200.0, 100.0)).is_ok());
    }

    #[test]
    fn over_temperature_fires() {
        let err = monitor().check(&measurements(113.0, 110.0)).unwrap_err();
        assert!(matches!(
            err,
            AbortReason::SafetyLimitExceeded {
                parameter: "temperature",
                ..
            }
        ));
    }

    #[test]
    fn over_pressure_fires() {
        let err = monitor().check(&measurements(210.0, 90.0)).unwrap_err();
        assert!(matches!(
            err,
            AbortReason::SafetyLimitExceeded {
                parameter: "pressure",
                ..
            }
        ));
    }

    #[test]
    fn temperature_is_checked_before_pressure() {
        // Both out of bounds: the temperature violation wins.
        let err = monitor().check(&measurements(210.0, 110.0)).unwrap_err();
        assert!(matches!(
            err,
            AbortReason::SafetyLimitExceeded {
                parameter: "temperature",
                ..
            }
        ));
    }
}
