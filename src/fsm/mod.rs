//! Intervention-episode state machine.
//!
//! ```text
//!          [overlimit && cooldown open]
//!   IDLE ──────────────────────────────▶ LIMITING ──┐
//!     ▲                                     │       │ [overlimit && cooldown open]
//!     │          [no engine overlimit]      │       │  count += 1, emit
//!     └─────────────────────────────────────┘  ◀────┘
//!
//!   0 engines -> >0 engines: forced back to IDLE before the tick runs
//! ```
//!
//! The whole machine is one function, [`process_sample`], over an explicit
//! [`LimiterRuntimeState`].  Time is passed in, never read from a clock,
//! so a sequence of calls is fully deterministic.

pub mod context;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::LimiterConfig;
use crate::control::cooldown::remaining_ms;
use crate::control::{may_intervene, overlimit_engines, recommended_throttles};
use crate::intervention::InterventionEvent;
use crate::telemetry::EngineSamples;

pub use context::LimiterRuntimeState;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Externally visible phase of the limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimiterPhase {
    Idle,
    Limiting,
}

// ---------------------------------------------------------------------------
// State tracker
// ---------------------------------------------------------------------------

/// Run one tick of the limiter.
///
/// 1. Engines reappearing after a zero-engine tick discard stale episode state.
/// 2. Zero engines: nothing else happens.
/// 3. No overlimit engine: the episode (if any) ends.
/// 4. Overlimit and cooldown open: count, stamp, correct, emit.
/// 5. `last_engine_count` is always updated.
///
/// Total over its input domain: never panics, never fails.
pub fn process_sample(
    state: &mut LimiterRuntimeState,
    config: &LimiterConfig,
    samples: &EngineSamples,
    now_ms: u64,
) -> Option<InterventionEvent> {
    let engine_count = samples.len();

    if state.last_engine_count == 0 && engine_count > 0 {
        if state.is_limiting {
            info!("Engines appeared ({engine_count}); discarding stale limiting episode");
        }
        state.end_episode();
    }

    let event = if engine_count == 0 {
        None
    } else {
        evaluate(state, config, samples, now_ms)
    };

    state.last_engine_count = engine_count;
    event
}

fn evaluate(
    state: &mut LimiterRuntimeState,
    config: &LimiterConfig,
    samples: &EngineSamples,
    now_ms: u64,
) -> Option<InterventionEvent> {
    let overlimit = overlimit_engines(samples, config.max_torque_percent);

    if overlimit.is_empty() {
        if state.is_limiting {
            info!(
                "Torque back within limit after {} intervention(s)",
                state.intervention_count
            );
        }
        state.end_episode();
        return None;
    }

    if !may_intervene(state.last_intervention_ms, config.cooldown_ms, now_ms) {
        debug!(
            "Engines {overlimit} overlimit, cooldown active for {} ms",
            remaining_ms(state.last_intervention_ms, config.cooldown_ms, now_ms)
        );
        return None;
    }

    if !state.is_limiting {
        info!("Torque limit exceeded on engines {overlimit}; limiting");
    }
    state.is_limiting = true;
    state.intervention_count = state.intervention_count.saturating_add(1);
    state.last_intervention_ms = Some(now_ms);

    let recommended = recommended_throttles(samples, overlimit, config);
    Some(InterventionEvent::new(
        state.intervention_count,
        overlimit,
        samples,
        recommended,
    ))
}

// ---------------------------------------------------------------------------
// Owned limiter
// ---------------------------------------------------------------------------

/// A limiter instance: runtime state plus the function that drives it.
///
/// Exists only while the feature is enabled; dropping it is how the
/// feature is switched off.
#[derive(Debug, Default)]
pub struct TorqueLimiter {
    state: LimiterRuntimeState,
}

impl TorqueLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one telemetry tick.  See [`process_sample`].
    pub fn process_sample(
        &mut self,
        config: &LimiterConfig,
        samples: &EngineSamples,
        now_ms: u64,
    ) -> Option<InterventionEvent> {
        process_sample(&mut self.state, config, samples, now_ms)
    }

    pub fn state(&self) -> &LimiterRuntimeState {
        &self.state
    }

    pub fn phase(&self) -> LimiterPhase {
        self.state.phase()
    }
}
