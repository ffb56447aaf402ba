//! Reading value types: measurements, step tags, and timestamped snapshots.
//!
//! A `Reading` is an immutable snapshot of the reactor taken during one
//! polling cycle, tagged with the process step that was active at the time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One snapshot of the reactor's measured parameters.
///
/// The schema is fixed: every status returned by the reactor carries all
/// four values. The wire format spells the acidity key as `pH`.
///
/// # Example
///
/// ```rust
/// use bioreactor::record::Measurements;
///
/// let json = r#"{"fill_percent": 55.0, "pressure": 113.0, "temperature": 25.0, "pH": 7.0}"#;
/// let m: Measurements = serde_json::from_str(json).unwrap();
/// assert_eq!(m.fill_percent, 55.0);
/// assert_eq!(m.ph, 7.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// Fill level of the vessel, 0–100.
    pub fill_percent: f64,
    /// Head-space pressure.
    pub pressure: f64,
    /// Contents temperature.
    pub temperature: f64,
    /// Acidity of the contents.
    #[serde(rename = "pH")]
    pub ph: f64,
}

impl Measurements {
    /// Read one named field. Used by range queries over a batch record.
    pub fn get(&self, field: MeasurementField) -> f64 {
        match field {
            MeasurementField::FillPercent => self.fill_percent,
            MeasurementField::Pressure => self.pressure,
            MeasurementField::Temperature => self.temperature,
            MeasurementField::Ph => self.ph,
        }
    }
}

/// Typed selector for one of the four measured parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementField {
    FillPercent,
    Pressure,
    Temperature,
    Ph,
}

impl MeasurementField {
    /// Get the field's name for display/reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FillPercent => "fill_percent",
            Self::Pressure => "pressure",
            Self::Temperature => "temperature",
            Self::Ph => "pH",
        }
    }
}

impl fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Label for the process step a reading was taken under.
///
/// Step tags mirror the identity of the process state machine's states but
/// are used purely as labels for filtering a batch record; control decisions
/// never dispatch on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepTag {
    Start,
    Fill,
    Run,
    Empty,
    Done,
}

impl StepTag {
    /// Get the step's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Fill => "fill",
            Self::Run => "run",
            Self::Empty => "empty",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for StepTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One timestamped, step-tagged snapshot of the reactor.
///
/// Readings are immutable values; a batch record only ever appends them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// When the snapshot was taken (UTC wall clock).
    pub timestamp: DateTime<Utc>,
    /// The process step active when the snapshot was taken.
    pub step: StepTag,
    /// The measured parameters.
    pub measurements: Measurements,
}

impl Reading {
    /// Create a reading stamped with the current time.
    pub fn now(step: StepTag, measurements: Measurements) -> Self {
        Self {
            timestamp: Utc::now(),
            step,
            measurements,
        }
    }
}
