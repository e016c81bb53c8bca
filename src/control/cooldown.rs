//! Cooldown gate.
//!
//! Enforces a minimum interval between two corrections so engine and
//! propeller dynamics settle before the next proportional step.  Time is
//! a monotonic millisecond counter supplied by the caller.

/// Whether a new intervention may be issued at `now_ms`.
///
/// `last_intervention_ms` is `None` until the first intervention, in which
/// case the gate is open.  A clock that appears to run backwards yields
/// zero elapsed time.
pub fn may_intervene(last_intervention_ms: Option<u64>, cooldown_ms: u64, now_ms: u64) -> bool {
    match last_intervention_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= cooldown_ms,
    }
}

/// Milliseconds until the gate opens again (0 if already open).
pub fn remaining_ms(last_intervention_ms: Option<u64>, cooldown_ms: u64, now_ms: u64) -> u64 {
    match last_intervention_ms {
        None => 0,
        Some(last) => cooldown_ms.saturating_sub(now_ms.saturating_sub(last)),
    }
}
