//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  An overlay or audio-cue adapter would implement the
//! same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn fmt_values(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.1}")).collect();
    parts.join("/")
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Intervention(ev) => {
                info!(
                    "INTERVENE | #{} | engines={} | torque={}% | throttle={}% -> {}%",
                    ev.intervention_count,
                    ev.overlimit_engine_indices,
                    fmt_values(&ev.torque_percents),
                    fmt_values(&ev.current_throttle_percents),
                    fmt_values(&ev.recommended_throttle_percents),
                );
            }
            AppEvent::PhaseChanged { from, to } => {
                info!("STATE | {from:?} -> {to:?}");
            }
            AppEvent::EnginesChanged { from, to } => {
                info!("ENGINES | {from} -> {to}");
            }
            AppEvent::CommandRejected(e) => {
                warn!("COMMAND | rejected: {e}");
            }
            AppEvent::TelemetryUnavailable(e) => {
                warn!("TELEM | unavailable: {e}");
            }
            AppEvent::ConfigUpdated => {
                info!("CONFIG | updated");
            }
            AppEvent::ConfigRejected(e) => {
                warn!("CONFIG | rejected: {e}");
            }
            AppEvent::Enabled => {
                info!("LIMITER | enabled");
            }
            AppEvent::Disabled => {
                info!("LIMITER | disabled");
            }
            AppEvent::Started { enabled } => {
                info!("START | enabled={enabled}");
            }
        }
    }
}
