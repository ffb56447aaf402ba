//! Property-based tests for the transition and safety logic.
//!
//! These tests use proptest to verify the universally quantified branch
//! contracts: every fill level below the window self-transitions, every
//! level inside it closes the input valve exactly once, and so on.

use bioreactor::config::{Limit, SafetyLimits};
use bioreactor::device::{DeviceError, ReactorDevice, ValveId, ValveState};
use bioreactor::process::ProcessState;
use bioreactor::record::{BatchRecord, MeasurementField, Measurements, Reading, StepTag};
use bioreactor::safety::SafetyMonitor;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

/// Scripted device: fixed measurements plus a count of valve commands.
struct ScriptedReactor {
    measurements: Measurements,
    commands: usize,
}

impl ScriptedReactor {
    fn with_fill(fill_percent: f64) -> Self {
        Self {
            measurements: Measurements {
                fill_percent,
                pressure: 113.0,
                temperature: 25.0,
                ph: 7.0,
            },
            commands: 0,
        }
    }
}

impl ReactorDevice for ScriptedReactor {
    fn status(&mut self) -> Result<Measurements, DeviceError> {
        Ok(self.measurements)
    }

    fn valve_state(&mut self, _valve: ValveId) -> Result<ValveState, DeviceError> {
        Ok(ValveState::Closed)
    }

    fn open_valve(&mut self, _valve: ValveId) -> Result<(), DeviceError> {
        self.commands += 1;
        Ok(())
    }

    fn close_valve(&mut self, _valve: ValveId) -> Result<(), DeviceError> {
        self.commands += 1;
        Ok(())
    }
}

fn fill_state() -> ProcessState {
    ProcessState::Fill {
        window: Limit::new(50.0, 60.0),
        next: Box::new(ProcessState::Empty),
    }
}

fn safety_monitor() -> SafetyMonitor {
    SafetyMonitor::new(&SafetyLimits {
        max_pressure: 200.0,
        max_temperature: 100.0,
    })
}

fn reading_at(i: usize, step: StepTag, fill_percent: f64, pressure: f64) -> Reading {
    Reading {
        timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
        step,
        measurements: Measurements {
            fill_percent,
            pressure,
            temperature: 25.0,
            ph: 7.0,
        },
    }
}

prop_compose! {
    fn arbitrary_step()(variant in 0..5u8) -> StepTag {
        match variant {
            0 => StepTag::Start,
            1 => StepTag::Fill,
            2 => StepTag::Run,
            3 => StepTag::Empty,
            _ => StepTag::Done,
        }
    }
}

proptest! {
    #[test]
    fn fill_below_window_self_transitions_without_commands(fill in 0.0..50.0f64) {
        let mut reactor = ScriptedReactor::with_fill(fill);
        let (next, _) = fill_state().advance(&mut reactor).unwrap();

        prop_assert_eq!(next, fill_state());
        prop_assert_eq!(reactor.commands, 0);
    }

    #[test]
    fn fill_within_window_closes_input_exactly_once(fill in 50.0..=60.0f64) {
        let mut reactor = ScriptedReactor::with_fill(fill);
        let (next, _) = fill_state().advance(&mut reactor).unwrap();

        prop_assert_eq!(next, ProcessState::Empty);
        prop_assert_eq!(reactor.commands, 1);
    }

    #[test]
    fn fill_above_window_aborts_without_commands(excess in 0.5..200.0f64) {
        let mut reactor = ScriptedReactor::with_fill(60.0 + excess);
        let result = fill_state().advance(&mut reactor);

        prop_assert!(result.is_err());
        prop_assert_eq!(reactor.commands, 0);
    }

    #[test]
    fn safety_monitor_passes_everything_in_bounds(
        pressure in 0.0..=200.0f64,
        temperature in 0.0..=100.0f64,
    ) {
        let measurements = Measurements {
            fill_percent: 50.0,
            pressure,
            temperature,
            ph: 7.0,
        };

        prop_assert!(safety_monitor().check(&measurements).is_ok());
    }

    #[test]
    fn safety_monitor_rejects_over_temperature(excess in 0.5..100.0f64) {
        let measurements = Measurements {
            fill_percent: 50.0,
            pressure: 113.0,
            temperature: 100.0 + excess,
            ph: 7.0,
        };

        prop_assert!(safety_monitor().check(&measurements).is_err());
    }

    #[test]
    fn safety_monitor_rejects_over_pressure(excess in 0.5..100.0f64) {
        let measurements = Measurements {
            fill_percent: 50.0,
            pressure: 200.0 + excess,
            temperature: 90.0,
            ph: 7.0,
        };

        prop_assert!(safety_monitor().check(&measurements).is_err());
    }

    #[test]
    fn filter_preserves_order_and_source(
        steps in prop::collection::vec(arbitrary_step(), 1..30)
    ) {
        let mut record = BatchRecord::new();
        for (i, step) in steps.iter().enumerate() {
            record.record_reading(reading_at(i, *step, i as f64, 113.0));
        }

        let filtered = record.filter_by_step(&[StepTag::Run]);

        // Source untouched.
        prop_assert_eq!(record.len(), steps.len());

        // Filtered readings are exactly the run-tagged ones, in order.
        let expected: Vec<f64> = steps
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == StepTag::Run)
            .map(|(i, _)| i as f64)
            .collect();
        let actual: Vec<f64> = filtered
            .readings()
            .iter()
            .map(|r| r.measurements.fill_percent)
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn reading_range_matches_true_extremes(
        values in prop::collection::vec(0.0..200.0f64, 1..30)
    ) {
        let mut record = BatchRecord::new();
        for (i, value) in values.iter().enumerate() {
            record.record_reading(reading_at(i, StepTag::Run, 50.0, *value));
        }

        let range = record.reading_range(MeasurementField::Pressure).unwrap();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(range.min, min);
        prop_assert_eq!(range.max, max);
    }
}
