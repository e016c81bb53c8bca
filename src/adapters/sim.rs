//! Simulated engines.
//!
//! Stands in for the flight-simulator connection on the host.  Each engine
//! follows its throttle with a first-order torque lag:
//!
//! ```text
//!   target = throttle * torque_gain
//!   torque += (target - torque) * (1 - e^(-dt / tau))
//! ```
//!
//! A `torque_gain` above 1.0 lets full throttle overshoot the limit, which
//! is how the replay scenarios provoke interventions.

use log::debug;

use crate::app::ports::{CommandSink, TelemetrySource};
use crate::error::{CommandError, TelemetryError};
use crate::telemetry::{EngineSample, EngineSamples, MAX_ENGINES, MAX_THROTTLE_PERCENT};

/// One simulated engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimEngine {
    pub throttle_percent: f64,
    pub torque_percent: f64,
    /// Steady-state torque percent per throttle percent.
    pub torque_gain: f64,
    /// Torque response time constant (ms).
    pub tau_ms: f64,
}

impl SimEngine {
    pub fn new(torque_gain: f64) -> Self {
        Self {
            throttle_percent: 0.0,
            torque_percent: 0.0,
            torque_gain,
            tau_ms: 800.0,
        }
    }

    fn step(&mut self, dt_ms: f64) {
        let target = self.throttle_percent * self.torque_gain;
        let alpha = if self.tau_ms > 0.0 {
            1.0 - (-dt_ms / self.tau_ms).exp()
        } else {
            1.0
        };
        self.torque_percent += (target - self.torque_percent) * alpha;
    }

    fn sample(&self) -> EngineSample {
        EngineSample::new(self.torque_percent, self.throttle_percent)
    }
}

/// A bank of up to four simulated engines behind one connection.
#[derive(Debug, Clone, Default)]
pub struct SimulatedEngines {
    engines: heapless::Vec<SimEngine, MAX_ENGINES>,
    connected: bool,
    /// When set, every throttle write is refused.
    reject_commands: bool,
    commands_applied: u64,
}

impl SimulatedEngines {
    /// A connected bank with no vehicle loaded.
    pub fn new() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    /// Replace the loaded vehicle.  Extra engines beyond [`MAX_ENGINES`]
    /// are dropped.
    pub fn load_vehicle(&mut self, engines: &[SimEngine]) {
        self.engines.clear();
        for e in engines.iter().take(MAX_ENGINES) {
            let _ = self.engines.push(*e);
        }
        debug!("Sim vehicle loaded with {} engine(s)", self.engines.len());
    }

    /// Remove the vehicle (engine count drops to zero).
    pub fn unload_vehicle(&mut self) {
        self.engines.clear();
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn set_reject_commands(&mut self, reject: bool) {
        self.reject_commands = reject;
    }

    /// Pilot input: move one throttle lever.
    pub fn set_throttle(&mut self, engine: usize, throttle_percent: f64) {
        if let Some(e) = self.engines.get_mut(engine) {
            e.throttle_percent = throttle_percent.clamp(0.0, MAX_THROTTLE_PERCENT);
        }
    }

    /// Pilot input: move every throttle lever together.
    pub fn set_all_throttles(&mut self, throttle_percent: f64) {
        for i in 0..self.engines.len() {
            self.set_throttle(i, throttle_percent);
        }
    }

    /// Advance engine dynamics by `dt_ms`.
    pub fn step(&mut self, dt_ms: u64) {
        for e in &mut self.engines {
            e.step(dt_ms as f64);
        }
    }

    pub fn engines(&self) -> &[SimEngine] {
        &self.engines
    }

    pub fn commands_applied(&self) -> u64 {
        self.commands_applied
    }
}

impl TelemetrySource for SimulatedEngines {
    fn read_engines(&mut self) -> Result<EngineSamples, TelemetryError> {
        if !self.connected {
            return Err(TelemetryError::Disconnected);
        }
        Ok(self.engines.iter().map(SimEngine::sample).collect())
    }
}

impl CommandSink for SimulatedEngines {
    fn apply_throttles(&mut self, throttle_percents: &[f64]) -> Result<(), CommandError> {
        if !self.connected {
            return Err(CommandError::Disconnected);
        }
        if self.reject_commands {
            return Err(CommandError::Rejected);
        }
        if throttle_percents.len() != self.engines.len() {
            return Err(CommandError::EngineCountMismatch {
                expected: self.engines.len(),
                got: throttle_percents.len(),
            });
        }
        // Validated above; apply the whole vector in one pass.
        for (e, &t) in self.engines.iter_mut().zip(throttle_percents) {
            e.throttle_percent = t.clamp(0.0, MAX_THROTTLE_PERCENT);
        }
        self.commands_applied += 1;
        Ok(())
    }
}
