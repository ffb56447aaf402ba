//! Deterministic in-process reactor model.
//!
//! A discrete-time stand-in for the physical device: every status poll
//! advances the model one tick. With the default rates a default-configured
//! batch runs to completion; the knobs exist so tests can force abort paths
//! (over-pressure, runaway heating) without a network.

use super::{DeviceError, ReactorDevice, ValveId, ValveState};
use crate::record::Measurements;

/// Simulated reactor with simple first-order behavior per tick:
/// contents rise while the input valve is open, heat while the vessel is
/// sealed and non-empty, and drain while the output valve is open.
#[derive(Clone, Debug)]
pub struct SimulatedReactor {
    input: ValveState,
    output: ValveState,
    fill_percent: f64,
    temperature: f64,
    pressure: f64,
    ph: f64,
    fill_rate: f64,
    heat_rate: f64,
    drain_rate: f64,
}

impl Default for SimulatedReactor {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedReactor {
    pub fn new() -> Self {
        Self {
            input: ValveState::Closed,
            output: ValveState::Closed,
            fill_percent: 0.0,
            temperature: 25.0,
            pressure: 113.0,
            ph: 7.0,
            fill_rate: 5.0,
            heat_rate: 3.0,
            drain_rate: 10.0,
        }
    }

    /// Fix the head-space pressure for the whole run.
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    /// Degrees gained per tick while the vessel is sealed.
    pub fn with_heat_rate(mut self, heat_rate: f64) -> Self {
        self.heat_rate = heat_rate;
        self
    }

    /// Percent gained per tick while the input valve is open.
    pub fn with_fill_rate(mut self, fill_rate: f64) -> Self {
        self.fill_rate = fill_rate;
        self
    }

    fn tick(&mut self) {
        if self.input == ValveState::Open {
            self.fill_percent = (self.fill_percent + self.fill_rate).min(100.0);
        }
        if self.output == ValveState::Open {
            self.fill_percent = (self.fill_percent - self.drain_rate).max(0.0);
        } else if self.input == ValveState::Closed && self.fill_percent > 0.0 {
            // Sealed and non-empty: the reaction heats the contents.
            self.temperature += self.heat_rate;
        }
    }
}

impl ReactorDevice for SimulatedReactor {
    fn status(&mut self) -> Result<Measurements, DeviceError> {
        self.tick();
        Ok(Measurements {
            fill_percent: self.fill_percent,
            pressure: self.pressure,
            temperature: self.temperature,
            ph: self.ph,
        })
    }

    fn valve_state(&mut self, valve: ValveId) -> Result<ValveState, DeviceError> {
        Ok(match valve {
            ValveId::Input => self.input,
            ValveId::Output => self.output,
        })
    }

    fn open_valve(&mut self, valve: ValveId) -> Result<(), DeviceError> {
        match valve {
            ValveId::Input => self.input = ValveState::Open,
            ValveId::Output => self.output = ValveState::Open,
        }
        Ok(())
    }

    fn close_valve(&mut self, valve: ValveId) -> Result<(), DeviceError> {
        match valve {
            ValveId::Input => self.input = ValveState::Closed,
            ValveId::Output => self.output = ValveState::Closed,
        }
        Ok(())
    }
}
