//! Proportional throttle correction.
//!
//! For each overlimit engine the throttle is pulled back by
//! `(torque - max) * aggression` percentage points, bounded below by the
//! safety floor and above by full throttle.  Compliant engines are copied
//! through unchanged so the command sink always receives a full vector.

use crate::config::LimiterConfig;
use crate::telemetry::{EngineSample, EngineSamples, EngineValues, MAX_THROTTLE_PERCENT};

use super::limit::OverlimitSet;

/// Corrected throttle for one overlimit engine.
///
/// Uses `max`/`min` rather than `f64::clamp` so a NaN candidate (NaN
/// throttle reading) resolves to the safety floor instead of propagating.
pub fn corrected_throttle(sample: &EngineSample, config: &LimiterConfig) -> f64 {
    let excess = sample.torque_percent - config.max_torque_percent;
    let reduction = excess * config.aggression_factor;
    let candidate = sample.throttle_percent - reduction;
    candidate
        .max(config.min_throttle_percent)
        .min(MAX_THROTTLE_PERCENT)
}

/// Full per-engine recommended throttle vector.
pub fn recommended_throttles(
    samples: &EngineSamples,
    overlimit: OverlimitSet,
    config: &LimiterConfig,
) -> EngineValues {
    samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if overlimit.contains(i) {
                corrected_throttle(s, config)
            } else {
                s.throttle_percent
            }
        })
        .collect()
}
