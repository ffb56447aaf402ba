//! The process state machine sequencing one batch through its stages.

pub mod state;

pub use state::ProcessState;
