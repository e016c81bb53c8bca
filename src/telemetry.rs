//! Engine telemetry data contract.
//!
//! The telemetry source delivers a fresh, ordered vector of per-engine
//! samples every tick.  Position in the vector is the engine's identity
//! for that tick only; engines carry no persistent id.  The vector is
//! bounded at [`MAX_ENGINES`] by the simulator's telemetry contract.

use serde::{Deserialize, Serialize};

use crate::config::LimiterConfig;
use crate::error::TelemetryError;

/// Upper bound on engines reported by the simulated vehicle.
pub const MAX_ENGINES: usize = 4;

/// Throttle ceiling in percent.
pub const MAX_THROTTLE_PERCENT: f64 = 100.0;

/// One engine's reading for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSample {
    /// Torque as a percentage of the aircraft's rated maximum.
    pub torque_percent: f64,
    /// Throttle lever position (0–100 %).
    pub throttle_percent: f64,
}

impl EngineSample {
    pub const fn new(torque_percent: f64, throttle_percent: f64) -> Self {
        Self {
            torque_percent,
            throttle_percent,
        }
    }
}

/// Ordered per-engine samples for one tick (0–4 entries).
pub type EngineSamples = heapless::Vec<EngineSample, MAX_ENGINES>;

/// A per-engine `f64` vector with the same bound as [`EngineSamples`].
pub type EngineValues = heapless::Vec<f64, MAX_ENGINES>;

/// Build a bounded sample vector from a slice.
///
/// Fails with [`TelemetryError::TooManyEngines`] if the slice holds more
/// than [`MAX_ENGINES`] entries.
pub fn samples_from_slice(samples: &[EngineSample]) -> Result<EngineSamples, TelemetryError> {
    EngineSamples::from_slice(samples).map_err(|()| TelemetryError::TooManyEngines(samples.len()))
}

// ---------------------------------------------------------------------------
// Torque bands (presentation / diagnostics only)
// ---------------------------------------------------------------------------

/// Coarse classification of a torque reading.
///
/// Only diagnostics and log output look at this.  The controller acts on
/// `max_torque_percent` alone; a reading in the `Warning` band triggers
/// no correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TorqueBand {
    #[default]
    Normal,
    Warning,
    Overlimit,
}

impl TorqueBand {
    /// Classify a torque reading against the configured limit.
    ///
    /// NaN lands in `Normal`, matching the limit evaluator.
    pub fn classify(torque_percent: f64, config: &LimiterConfig) -> Self {
        if torque_percent > config.max_torque_percent {
            Self::Overlimit
        } else if torque_percent >= config.max_torque_percent * config.warning_threshold {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Highest band across all engines; `Normal` for an empty vector.
    pub fn worst(samples: &[EngineSample], config: &LimiterConfig) -> Self {
        samples
            .iter()
            .map(|s| Self::classify(s.torque_percent, config))
            .max()
            .unwrap_or_default()
    }
}

impl core::fmt::Display for TorqueBand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning => write!(f, "warning"),
            Self::Overlimit => write!(f, "overlimit"),
        }
    }
}
