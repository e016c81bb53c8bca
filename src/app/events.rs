//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (log line, overlay, audio cue).

use crate::app::ports::ConfigError;
use crate::error::{CommandError, TelemetryError};
use crate::fsm::LimiterPhase;
use crate::intervention::InterventionEvent;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started.  `enabled` mirrors the config switch.
    Started { enabled: bool },

    /// The limiter was switched on (fresh instance, no prior state).
    Enabled,

    /// The limiter was switched off and its state dropped.
    Disabled,

    /// The number of reported engines changed (vehicle load / unload).
    EnginesChanged { from: usize, to: usize },

    /// The limiter moved between idle and limiting.
    PhaseChanged { from: LimiterPhase, to: LimiterPhase },

    /// A correction was issued.
    Intervention(InterventionEvent),

    /// The command sink refused a correction.  Limiter state is not rolled back.
    CommandRejected(CommandError),

    /// Telemetry could not be read; the tick was skipped.
    TelemetryUnavailable(TelemetryError),

    /// A new configuration was applied.
    ConfigUpdated,

    /// A new configuration failed validation and was discarded.
    ConfigRejected(ConfigError),
}
