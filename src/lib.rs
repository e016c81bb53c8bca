//! TorqueLimiter library.
//!
//! Closed-loop engine-protection controller for simulated aircraft with up
//! to four engines.  Exposes the pure control core (`control`, `fsm`) and
//! the hexagonal service layer (`app`, `adapters`) for the simulator
//! binary and for integration tests.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fsm;
pub mod intervention;
pub mod telemetry;

pub use config::LimiterConfig;
pub use fsm::{LimiterPhase, LimiterRuntimeState, TorqueLimiter, process_sample};
pub use intervention::InterventionEvent;
pub use telemetry::{EngineSample, EngineSamples, MAX_ENGINES};
