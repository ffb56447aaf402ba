//! The driver loop: sequences one batch against a reactor device.
//!
//! Single-threaded cooperative polling. Each cycle advances the state
//! machine off one live device poll, appends the reading to the batch
//! record, and then runs the independent safety backstop on that same
//! reading. On any abort the loop stops, performs the universal cleanup
//! exactly once, and still evaluates the acceptance checks so a report is
//! produced even on partial data.

use crate::checks::{acceptance_checks, BatchReport};
use crate::config::BatchConfig;
use crate::device::{ReactorDevice, ValveId};
use crate::process::ProcessState;
use crate::record::{BatchRecord, StepTag};
use crate::safety::SafetyMonitor;
use std::time::{Duration, Instant};

/// Run one batch to completion or abort, and always return its report.
///
/// `on_transition` is invoked whenever the state identity changes, with the
/// new step and the elapsed wall-clock time; the CLI uses it for progress
/// output and tests for observing the traversal.
///
/// The batch record and the live state are owned exclusively by this loop;
/// a second batch needs a fresh call (and typically a fresh device).
pub fn run_batch<D, F>(device: &mut D, config: &BatchConfig, mut on_transition: F) -> BatchReport
where
    D: ReactorDevice,
    F: FnMut(StepTag, Duration),
{
    let mut state = ProcessState::sequence(&config.process);
    let monitor = SafetyMonitor::new(&config.safety);
    let mut record = BatchRecord::new();
    let checks = acceptance_checks(&config.process);
    let poll = config.poll_interval();
    let started = Instant::now();

    let abort = loop {
        if state.is_terminal() {
            break None;
        }

        let step = state.step();
        let (next, status) = match state.advance(device) {
            Ok(outcome) => outcome,
            Err(reason) => break Some(reason),
        };

        // Record first, then backstop: the safety check for a reading runs
        // only after that reading is part of the batch record.
        record.record(step, status);
        if let Err(reason) = monitor.check(&status) {
            break Some(reason);
        }

        if next.step() != step {
            on_transition(next.step(), started.elapsed());
        }
        state = next;

        if !state.is_terminal() && !poll.is_zero() {
            std::thread::sleep(poll);
        }
    };

    let completed = abort.is_none();
    let abort_message = abort.map(|reason| {
        let mut message = reason.to_string();
        // Universal cleanup, exactly once per abort: stop feeding the vessel
        // and relieve it. Both commands are attempted even if the first
        // fails; opening the output valve is the pressure-relief step and
        // must not be skipped because the input valve faulted.
        if let Err(error) = device.close_valve(ValveId::Input) {
            message.push_str(&format!("; cleanup failed to close input valve: {error}"));
        }
        if let Err(error) = device.open_valve(ValveId::Output) {
            message.push_str(&format!("; cleanup failed to open output valve: {error}"));
        }
        message
    });

    BatchReport::evaluate(&checks, &record, completed, abort_message)
}
