//! Intervention events.
//!
//! One [`InterventionEvent`] is produced per correction cycle.  It carries
//! the command the sink applies (the full recommended throttle vector) and
//! the before/after diagnostics for logging.  Once built it is never
//! mutated.

use serde::Serialize;

use crate::control::OverlimitSet;
use crate::telemetry::{EngineSamples, EngineValues};

/// A single controller-issued correction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionEvent {
    /// 1-based index of this intervention within the current episode.
    pub intervention_count: u32,
    pub overlimit_engine_indices: OverlimitSet,
    pub torque_percents: EngineValues,
    pub current_throttle_percents: EngineValues,
    /// One entry per engine; compliant engines repeat their current throttle.
    pub recommended_throttle_percents: EngineValues,
}

impl InterventionEvent {
    /// Package a decision.  `recommended` must have one entry per sample.
    pub fn new(
        intervention_count: u32,
        overlimit: OverlimitSet,
        samples: &EngineSamples,
        recommended: EngineValues,
    ) -> Self {
        debug_assert_eq!(samples.len(), recommended.len());
        Self {
            intervention_count,
            overlimit_engine_indices: overlimit,
            torque_percents: samples.iter().map(|s| s.torque_percent).collect(),
            current_throttle_percents: samples.iter().map(|s| s.throttle_percent).collect(),
            recommended_throttle_percents: recommended,
        }
    }

    /// Number of engines covered by this event.
    pub fn engine_count(&self) -> usize {
        self.recommended_throttle_percents.len()
    }
}
