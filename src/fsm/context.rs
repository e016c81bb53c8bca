//! Runtime state carried across ticks.
//!
//! `LimiterRuntimeState` is the only value the limiter mutates between
//! ticks.  It has exactly one owner (the [`TorqueLimiter`](super::TorqueLimiter)
//! or whoever calls [`process_sample`](super::process_sample) directly).

use serde::{Deserialize, Serialize};

use super::LimiterPhase;

/// Mutable state of one limiter instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimiterRuntimeState {
    /// True while an intervention episode is in progress.
    pub is_limiting: bool,
    /// Interventions issued in the current episode (0 when idle).
    pub intervention_count: u32,
    /// Monotonic time (ms) of the most recent intervention, `None` before
    /// the first one.  Survives episode resets so back-to-back episodes
    /// still honour the cooldown.
    pub last_intervention_ms: Option<u64>,
    /// Engine count seen on the previous tick.
    pub last_engine_count: usize,
}

impl LimiterRuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LimiterPhase {
        if self.is_limiting {
            LimiterPhase::Limiting
        } else {
            LimiterPhase::Idle
        }
    }

    /// Leave the current episode.
    pub(crate) fn end_episode(&mut self) {
        self.is_limiting = false;
        self.intervention_count = 0;
    }
}
