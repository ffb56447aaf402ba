//! Reactor device interface: the seam between the sequencing core and the
//! physical (or simulated) reactor.
//!
//! The core only ever talks to a `ReactorDevice`; the HTTP client and the
//! in-process simulator both live behind it. Every operation is fallible,
//! and the core never retries — a transport failure aborts the batch.

pub mod http;
pub mod sim;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::record::Measurements;

pub use http::HttpReactor;
pub use sim::SimulatedReactor;

/// The two valves every reactor exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValveId {
    Input,
    Output,
}

impl fmt::Display for ValveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Output => "output",
        })
    }
}

/// State of a valve as reported by the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValveState {
    Open,
    Closed,
}

impl fmt::Display for ValveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Closed => "closed",
        })
    }
}

/// Errors surfaced by a reactor device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The underlying HTTP transport failed.
    #[error("reactor API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device answered, but not with anything we can interpret.
    #[error("reactor returned a malformed payload: {0}")]
    Payload(String),

    /// A valve command was acknowledged with the wrong resulting state.
    #[error("{valve} valve did not reach the {expected} state")]
    ValveFault {
        valve: ValveId,
        expected: ValveState,
    },
}

/// Control and measurement interface of one reactor.
///
/// Implementations take `&mut self` because issuing a valve command changes
/// device state, and the simulator advances its model on every status poll.
pub trait ReactorDevice {
    /// Poll the current measurement set.
    fn status(&mut self) -> Result<Measurements, DeviceError>;

    /// Read the current state of one valve.
    fn valve_state(&mut self, valve: ValveId) -> Result<ValveState, DeviceError>;

    /// Command one valve open.
    fn open_valve(&mut self, valve: ValveId) -> Result<(), DeviceError>;

    /// Command one valve closed.
    fn close_valve(&mut self, valve: ValveId) -> Result<(), DeviceError>;
}
