//! Unified error types for the torque limiter.
//!
//! The controller core (`control`, `fsm`) cannot fail.  Errors only arise
//! at the port boundary: reading telemetry, writing throttle commands, and
//! loading configuration.  All variants are `Copy` so adapters can hand
//! them back to the service without allocation.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible port operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Telemetry could not be read for this tick.
    Telemetry(TelemetryError),
    /// A throttle command was not applied.
    Command(CommandError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telemetry(e) => write!(f, "telemetry: {e}"),
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Telemetry errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryError {
    /// No connection to the simulator.
    Disconnected,
    /// The simulator has not produced a fresh sample yet.
    NotReady,
    /// More engines reported than the telemetry contract allows.
    TooManyEngines(usize),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "simulator disconnected"),
            Self::NotReady => write!(f, "no fresh sample"),
            Self::TooManyEngines(n) => write!(f, "{n} engines reported, at most 4 supported"),
        }
    }
}

impl From<TelemetryError> for Error {
    fn from(e: TelemetryError) -> Self {
        Self::Telemetry(e)
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// No connection to the simulator.
    Disconnected,
    /// The simulator refused the write.
    Rejected,
    /// Command vector length does not match the engines the sink knows about.
    EngineCountMismatch { expected: usize, got: usize },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "simulator disconnected"),
            Self::Rejected => write!(f, "write rejected"),
            Self::EngineCountMismatch { expected, got } => {
                write!(f, "engine count mismatch: expected {expected}, got {got}")
            }
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
