//! Torque limiter configuration parameters
//!
//! All tunable parameters for the limiter.
//! Values can be overridden from a JSON settings file or at runtime via
//! [`AppCommand::UpdateConfig`](crate::app::commands::AppCommand).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Limiter configuration.
///
/// Treated as read-only for the duration of a tick.  The controller does
/// not re-validate it; [`LimiterConfig::validate`] runs wherever a new
/// config enters the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimiterConfig {
    /// Master switch.  Disabled means no controller instance exists.
    pub enabled: bool,

    // --- Limit ---
    /// Torque (percent of rated) above which an engine is overlimit.
    pub max_torque_percent: f64,
    /// Fraction of `max_torque_percent` where the display turns amber.
    /// Presentation only, never a controller decision boundary.
    pub warning_threshold: f64,

    // --- Correction ---
    /// Throttle percentage points removed per percentage point of excess torque.
    pub aggression_factor: f64,
    /// Safety floor for commanded throttle (0-100%).
    pub min_throttle_percent: f64,

    // --- Timing ---
    /// Minimum interval between two interventions (milliseconds).
    pub cooldown_ms: u64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            enabled: true,

            // Limit
            max_torque_percent: 100.0,
            warning_threshold: 0.90,

            // Correction
            aggression_factor: 2.5,
            min_throttle_percent: 40.0,

            // Timing
            cooldown_ms: 2000,
        }
    }
}

impl LimiterConfig {
    /// Range-check every field.
    ///
    /// Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_torque_percent.is_finite() && self.max_torque_percent > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "max_torque_percent must be finite and > 0",
            ));
        }
        if !(self.warning_threshold > 0.0 && self.warning_threshold <= 1.0) {
            return Err(ConfigError::ValidationFailed(
                "warning_threshold must be in (0, 1]",
            ));
        }
        if !(self.aggression_factor.is_finite() && self.aggression_factor > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "aggression_factor must be finite and > 0",
            ));
        }
        if !(0.0..=100.0).contains(&self.min_throttle_percent) {
            return Err(ConfigError::ValidationFailed(
                "min_throttle_percent must be 0–100",
            ));
        }
        Ok(())
    }
}
