//! Blocking HTTP client for the mini-MES bioreactor REST API.
//!
//! Wire layout: `GET {host}/bioreactor/0` resolves the reactor id,
//! `GET {host}/bioreactor/{id}` returns the measurement set, and the two
//! valves live at `{host}/bioreactor/{id}/input-valve` and
//! `.../output-valve`, read with `GET` and commanded with a
//! `PUT {"state": "open"|"closed"}` that echoes the resulting state back.

use super::{DeviceError, ReactorDevice, ValveId, ValveState};
use crate::record::Measurements;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Deserialize)]
struct ReactorIdentity {
    id: u64,
}

#[derive(Serialize, Deserialize)]
struct ValvePayload {
    state: ValveState,
}

/// One physical reactor behind the REST API.
pub struct HttpReactor {
    client: Client,
    base_url: String,
    reactor_id: u64,
}

impl HttpReactor {
    /// Hostname of the production mini-MES service.
    pub const DEFAULT_HOST: &'static str = "http://mini-mes.resilience.com";

    /// Connect to the service and resolve the reactor's identifier.
    pub fn connect(host: &str) -> Result<Self, DeviceError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        let base_url = host.trim_end_matches('/').to_string();

        let identity: ReactorIdentity = client
            .get(format!("{base_url}/bioreactor/0"))
            .send()?
            .error_for_status()?
            .json()?;

        Ok(Self {
            client,
            base_url,
            reactor_id: identity.id,
        })
    }

    pub fn reactor_id(&self) -> u64 {
        self.reactor_id
    }

    fn reactor_url(&self) -> String {
        format!("{}/bioreactor/{}", self.base_url, self.reactor_id)
    }

    fn valve_url(&self, valve: ValveId) -> String {
        let name = match valve {
            ValveId::Input => "input-valve",
            ValveId::Output => "output-valve",
        };
        format!("{}/{}", self.reactor_url(), name)
    }

    fn set_valve(&mut self, valve: ValveId, state: ValveState) -> Result<(), DeviceError> {
        let echoed: ValvePayload = self
            .client
            .put(self.valve_url(valve))
            .json(&ValvePayload { state })
            .send()?
            .error_for_status()?
            .json()?;

        // The API acknowledges with the valve's resulting state; anything
        // other than what we asked for means the valve itself is faulty.
        if echoed.state != state {
            return Err(DeviceError::ValveFault {
                valve,
                expected: state,
            });
        }
        Ok(())
    }
}

impl ReactorDevice for HttpReactor {
    fn status(&mut self) -> Result<Measurements, DeviceError> {
        Ok(self
            .client
            .get(self.reactor_url())
            .send()?
            .error_for_status()?
            .json()?)
    }

    fn valve_state(&mut self, valve: ValveId) -> Result<ValveState, DeviceError> {
        let payload: ValvePayload = self
            .client
            .get(self.valve_url(valve))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(payload.state)
    }

    fn open_valve(&mut self, valve: ValveId) -> Result<(), DeviceError> {
        self.set_valve(valve, ValveState::Open)
    }

    fn close_valve(&mut self, valve: ValveId) -> Result<(), DeviceError> {
        self.set_valve(valve, ValveState::Closed)
    }
}
