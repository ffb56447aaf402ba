//! Batch record: the append-only, time-ordered history of one batch.
//!
//! During a run the driver loop appends one reading per polling cycle; once
//! the run ends the record is handed, read-only, to the acceptance checks.
//! The queries here deliberately rescan the reading list each call — batch
//! records are short (hundreds of readings) and the simpler implementation
//! wins over cached aggregates.

use super::reading::{MeasurementField, Measurements, Reading, StepTag};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Error returned by queries that need at least one reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("batch record contains no readings")]
pub struct EmptyRecordError;

/// Minimum and maximum observed value of one measurement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

/// Time-ordered history of readings for one batch.
///
/// Append-only: readings are never updated or removed, and within a record
/// timestamps are non-decreasing in insertion order. `record` upholds the
/// ordering itself; `record_reading` trusts the caller to.
///
/// # Example
///
/// ```rust
/// use bioreactor::record::{BatchRecord, Measurements, StepTag};
///
/// let m = Measurements { fill_percent: 40.0, pressure: 113.0, temperature: 25.0, ph: 7.0 };
/// let mut record = BatchRecord::new();
/// record.record(StepTag::Start, m);
/// record.record(StepTag::Fill, m);
///
/// assert_eq!(record.len(), 2);
/// assert!(record.process_steps().contains(&StepTag::Fill));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchRecord {
    id: Uuid,
    readings: Vec<Reading>,
}

impl Default for BatchRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchRecord {
    /// Create an empty record with a fresh batch identifier.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            readings: Vec::new(),
        }
    }

    /// The batch identifier, carried into reports for traceability.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Append a reading stamped with the current time. Never fails.
    pub fn record(&mut self, step: StepTag, measurements: Measurements) {
        self.readings.push(Reading::now(step, measurements));
    }

    /// Append a pre-built reading.
    ///
    /// The caller must keep timestamps non-decreasing in insertion order.
    /// Intended for tests and replay tooling; live runs go through `record`.
    pub fn record_reading(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    /// All readings, in insertion order.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// The set of distinct process steps observed in this record.
    pub fn process_steps(&self) -> HashSet<StepTag> {
        self.readings.iter().map(|r| r.step).collect()
    }

    /// Elapsed time between the first and last reading.
    ///
    /// Errors on an empty record rather than underflowing; a real batch is
    /// never empty because the driver records the `start` reading first.
    pub fn process_duration(&self) -> Result<Duration, EmptyRecordError> {
        match (self.readings.first(), self.readings.last()) {
            (Some(first), Some(last)) => Ok(last
                .timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .unwrap_or(Duration::ZERO)),
            _ => Err(EmptyRecordError),
        }
    }

    /// Build a new record holding only the readings tagged with one of the
    /// given steps, preserving relative order. The source is untouched, and
    /// the filtered record keeps the same batch id: it is still evidence
    /// about the same physical batch.
    pub fn filter_by_step(&self, steps: &[StepTag]) -> BatchRecord {
        BatchRecord {
            id: self.id,
            readings: self
                .readings
                .iter()
                .filter(|r| steps.contains(&r.step))
                .cloned()
                .collect(),
        }
    }

    /// Minimum and maximum observed value of the named measurement.
    pub fn reading_range(&self, field: MeasurementField) -> Result<MinMax, EmptyRecordError> {
        let mut values = self.readings.iter().map(|r| r.measurements.get(field));
        let first = values.next().ok_or(EmptyRecordError)?;
        Ok(values.fold(
            MinMax {
                min: first,
                max: first,
            },
            |range, value| MinMax {
                min: range.min.min(value),
                max: range.max.max(value),
            },
        ))
    }
}
