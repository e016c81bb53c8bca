//! Pure control laws.
//!
//! Every function here is stateless: no mutation, no I/O, no clock.  The
//! [`fsm`](crate::fsm) module owns the runtime state and decides when to
//! call them.

pub mod cooldown;
pub mod correction;
pub mod limit;

pub use cooldown::may_intervene;
pub use correction::recommended_throttles;
pub use limit::{OverlimitSet, overlimit_engines};
