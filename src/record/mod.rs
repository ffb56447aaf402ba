//! Batch record storage: readings and the append-only batch history.

pub mod batch;
pub mod reading;

// Re-export commonly used types
pub use batch::{BatchRecord, EmptyRecordError, MinMax};
pub use reading::{MeasurementField, Measurements, Reading, StepTag};
