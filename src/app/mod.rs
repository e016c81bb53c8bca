//! Application core: pure domain logic, zero I/O.
//!
//! This module wires the torque limiter to the outside world: enabling and
//! disabling, per-tick orchestration, config hot-reload and diagnostics.
//! All interaction with the simulator happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without a
//! running sim.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
