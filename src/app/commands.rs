//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (settings menu,
//! key binding, config reload) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::config::LimiterConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Construct a fresh limiter instance.
    Enable,

    /// Drop the limiter instance and all its state.
    Disable,

    /// Hot-reload configuration.  Validated before it is applied.
    UpdateConfig(LimiterConfig),

    /// Persist the current config at the next auto-save check.
    SaveConfig,

    /// Zero the session counters.
    ResetStatistics,
}
