//! Bioreactor: batch process sequencing, safety backstop, and CPP
//! verification for a remote bioreactor.
//!
//! Three core pieces cooperate over one batch:
//!
//! - **Process state machine** ([`process::ProcessState`]): decides, from
//!   each live device poll, the next process stage and the valve commands
//!   to issue, as a closed chain `start -> fill -> run -> empty -> done`.
//! - **Safety monitor** ([`safety::SafetyMonitor`]): an independent
//!   backstop that inspects every polled reading against hard limits,
//!   regardless of which state is active.
//! - **Batch record and acceptance checks** ([`record::BatchRecord`],
//!   [`checks`]): the append-only reading history and the declarative
//!   check list that turns it into a pass/fail report for every critical
//!   process parameter.
//!
//! The driver loop ([`runner::run_batch`]) wires the three to a
//! [`device::ReactorDevice`] — the HTTP client for the real reactor, or the
//! in-process simulator.
//!
//! # Example
//!
//! ```rust
//! use bioreactor::{run_batch, BatchConfig, SimulatedReactor};
//!
//! let mut device = SimulatedReactor::new();
//! let config = BatchConfig {
//!     poll_interval_ms: 0,
//!     ..BatchConfig::default()
//! };
//!
//! let report = run_batch(&mut device, &config, |_step, _elapsed| {});
//! assert!(report.is_success());
//! ```

pub mod checks;
pub mod config;
pub mod device;
pub mod error;
pub mod process;
pub mod record;
pub mod runner;
pub mod safety;

// Re-export commonly used types
pub use checks::{acceptance_checks, BatchReport, BatchVerdict, ProcessCheck, ProcessCheckResult};
pub use config::{BatchConfig, Limit, ProcessParams, SafetyLimits};
pub use device::{HttpReactor, ReactorDevice, SimulatedReactor};
pub use error::AbortReason;
pub use process::ProcessState;
pub use record::{BatchRecord, Measurements, Reading, StepTag};
pub use runner::run_batch;
pub use safety::SafetyMonitor;
