//! Port traits: the hexagonal boundary between the limiter and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (simulator telemetry, throttle writer, event sinks,
//! settings storage, clock) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches the simulator connection directly.

use crate::config::LimiterConfig;
use crate::error::{CommandError, TelemetryError};
use crate::telemetry::EngineSamples;

// ───────────────────────────────────────────────────────────────
// Telemetry source (driven adapter: simulator → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
pub trait TelemetrySource {
    /// Return the current per-engine samples, ordered by engine position.
    /// An empty vector means no vehicle / no engines loaded.
    fn read_engines(&mut self) -> Result<EngineSamples, TelemetryError>;
}

// ───────────────────────────────────────────────────────────────
// Command sink (driven adapter: domain → simulator)
// ───────────────────────────────────────────────────────────────

/// Write-side port: applies a throttle command.
pub trait CommandSink {
    /// Apply one throttle per engine as a **single** write.
    ///
    /// Implementations must not apply a partial vector: either every
    /// engine takes its new value or none does.
    fn apply_throttles(&mut self, throttle_percents: &[f64]) -> Result<(), CommandError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging / UI)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, overlay,
/// audio cue, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic time source in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ settings storage)
// ───────────────────────────────────────────────────────────────

/// Loads and persists limiter configuration.
///
/// Implementations MUST validate values with
/// [`LimiterConfig::validate`] on both load and save.  Invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], never clamped, so the
/// controller never sees e.g. a safety floor above full throttle.
pub trait ConfigPort {
    /// Load configuration.  Returns [`LimiterConfig::default()`] if no
    /// stored config exists.
    fn load(&self) -> Result<LimiterConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &LimiterConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage.
    NotFound,
    /// Stored config could not be parsed.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
