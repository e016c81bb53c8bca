//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the configuration and, while enabled, one
//! [`TorqueLimiter`].  All I/O flows through port traits injected at call
//! sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  TelemetrySource ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                      │       AppService        │
//!      CommandSink ◀── │  Limit · Cooldown · FSM │ ◀── Clock
//!                      └────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::LimiterConfig;
use crate::fsm::{LimiterPhase, LimiterRuntimeState, TorqueLimiter};
use crate::intervention::InterventionEvent;
use crate::telemetry::TorqueBand;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Clock, CommandSink, ConfigPort, EventSink, TelemetrySource};

/// Delay after the last config change before it is auto-saved.
const AUTO_SAVE_DELAY_MS: u64 = 5000;

// ───────────────────────────────────────────────────────────────
// Session statistics
// ───────────────────────────────────────────────────────────────

/// Counters kept for diagnostics.  Never read by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Ticks processed while enabled.
    pub ticks: u64,
    /// Ticks skipped because telemetry was unavailable.
    pub telemetry_failures: u64,
    /// Interventions issued across all episodes.
    pub interventions: u64,
    /// Interventions the command sink refused.
    pub rejected_commands: u64,
    /// Longest episode seen, in interventions.
    pub longest_episode: u32,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: LimiterConfig,
    /// `None` while disabled: no state, no work per tick.
    limiter: Option<TorqueLimiter>,
    stats: SessionStats,
    /// Hottest band seen on the last tick, diagnostics only.
    torque_band: TorqueBand,
    config_dirty: bool,
    dirty_since_ms: u64,
    /// Explicit save pending; bypasses the auto-save delay.
    save_requested: bool,
}

impl AppService {
    /// Construct the service.  The config is assumed already validated by
    /// the [`ConfigPort`] that produced it.
    pub fn new(config: LimiterConfig) -> Self {
        let limiter = config.enabled.then(TorqueLimiter::new);
        Self {
            config,
            limiter,
            stats: SessionStats::default(),
            torque_band: TorqueBand::Normal,
            config_dirty: false,
            dirty_since_ms: 0,
            save_requested: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            enabled: self.is_enabled(),
        });
        info!(
            "AppService started (limiter {})",
            if self.is_enabled() { "enabled" } else { "disabled" }
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: read telemetry → limiter → command sink.
    ///
    /// The `sim` parameter satisfies **both** [`TelemetrySource`] and
    /// [`CommandSink`], mirroring a single simulator connection.
    ///
    /// Returns the intervention issued this tick, if any.
    pub fn tick(
        &mut self,
        sim: &mut (impl TelemetrySource + CommandSink),
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Option<InterventionEvent> {
        let limiter = self.limiter.as_mut()?;
        self.stats.ticks += 1;

        // 1. Telemetry
        let samples = match sim.read_engines() {
            Ok(s) => s,
            Err(e) => {
                warn!("Telemetry unavailable: {e}; tick skipped");
                self.stats.telemetry_failures += 1;
                sink.emit(&AppEvent::TelemetryUnavailable(e));
                return None;
            }
        };

        let band = TorqueBand::worst(&samples, &self.config);
        if band != self.torque_band {
            info!("Torque band {} -> {band}", self.torque_band);
            self.torque_band = band;
        }

        let prev_engines = limiter.state().last_engine_count;
        let prev_phase = limiter.phase();

        // 2. Limiter (pure decision)
        let decision = limiter.process_sample(&self.config, &samples, clock.now_ms());
        let new_phase = limiter.phase();
        let episode = limiter.state().intervention_count;

        if samples.len() != prev_engines {
            info!("Engine count {prev_engines} -> {}", samples.len());
            sink.emit(&AppEvent::EnginesChanged {
                from: prev_engines,
                to: samples.len(),
            });
        }

        // 3. Command sink. State has already advanced and is not rolled back.
        if let Some(ev) = &decision {
            self.stats.interventions += 1;
            self.stats.longest_episode = self.stats.longest_episode.max(episode);
            sink.emit(&AppEvent::Intervention(ev.clone()));

            if let Err(e) = sim.apply_throttles(&ev.recommended_throttle_percents) {
                warn!("Throttle command #{} not applied: {e}", ev.intervention_count);
                self.stats.rejected_commands += 1;
                sink.emit(&AppEvent::CommandRejected(e));
            }
        }

        // 4. Phase change
        if new_phase != prev_phase {
            sink.emit(&AppEvent::PhaseChanged {
                from: prev_phase,
                to: new_phase,
            });
        }

        decision
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(&mut self, cmd: AppCommand, clock: &impl Clock, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::Enable => {
                if !self.config.enabled {
                    self.config.enabled = true;
                    self.mark_config_dirty(clock.now_ms());
                }
                self.set_enabled(true, sink);
            }
            AppCommand::Disable => {
                if self.config.enabled {
                    self.config.enabled = false;
                    self.mark_config_dirty(clock.now_ms());
                }
                self.set_enabled(false, sink);
            }
            AppCommand::UpdateConfig(new_config) => {
                if let Err(e) = new_config.validate() {
                    warn!("Configuration rejected: {e}");
                    sink.emit(&AppEvent::ConfigRejected(e));
                    return;
                }
                let enabled = new_config.enabled;
                self.config = new_config;
                self.mark_config_dirty(clock.now_ms());
                info!("Configuration updated at runtime");
                sink.emit(&AppEvent::ConfigUpdated);
                self.set_enabled(enabled, sink);
            }
            AppCommand::SaveConfig => {
                self.config_dirty = true;
                self.save_requested = true;
                info!("Explicit config save requested (will flush on next auto-save check)");
            }
            AppCommand::ResetStatistics => {
                self.stats = SessionStats::default();
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Current limiter phase, `None` while disabled.
    pub fn phase(&self) -> Option<LimiterPhase> {
        self.limiter.as_ref().map(TorqueLimiter::phase)
    }

    /// Limiter runtime state, `None` while disabled.
    pub fn runtime_state(&self) -> Option<&LimiterRuntimeState> {
        self.limiter.as_ref().map(TorqueLimiter::state)
    }

    /// Hottest torque band seen on the last processed tick.
    pub fn torque_band(&self) -> TorqueBand {
        self.torque_band
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> LimiterConfig {
        self.config.clone()
    }

    // ── Internal ──────────────────────────────────────────────

    /// Construct or drop the limiter instance.
    fn set_enabled(&mut self, enabled: bool, sink: &mut impl EventSink) {
        match (enabled, self.limiter.is_some()) {
            (true, false) => {
                self.limiter = Some(TorqueLimiter::new());
                info!("Torque limiter enabled");
                sink.emit(&AppEvent::Enabled);
            }
            (false, true) => {
                self.limiter = None;
                self.torque_band = TorqueBand::Normal;
                info!("Torque limiter disabled");
                sink.emit(&AppEvent::Disabled);
            }
            _ => {}
        }
    }

    // ── Config dirty-flag management ──────────────────────────

    fn mark_config_dirty(&mut self, now_ms: u64) {
        if !self.config_dirty {
            self.config_dirty = true;
            self.dirty_since_ms = now_ms;
        }
    }

    /// Save the config once it has been unchanged for a few seconds.
    /// Returns `true` if the config was saved.
    pub fn auto_save_if_needed(&mut self, storage: &impl ConfigPort, clock: &impl Clock) -> bool {
        if !self.config_dirty {
            return false;
        }
        if !self.save_requested
            && clock.now_ms().saturating_sub(self.dirty_since_ms) < AUTO_SAVE_DELAY_MS
        {
            return false;
        }
        match storage.save(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                self.save_requested = false;
                info!("Config auto-saved");
                true
            }
            Err(e) => {
                warn!("Config auto-save failed: {e}");
                false
            }
        }
    }

    /// Force-save if dirty (call before shutdown).
    pub fn force_save_if_dirty(&mut self, storage: &impl ConfigPort) {
        if !self.config_dirty {
            return;
        }
        match storage.save(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                self.save_requested = false;
                info!("Config force-saved before shutdown");
            }
            Err(e) => {
                warn!("Config force-save failed: {e}");
            }
        }
    }

    /// Whether the config has unsaved changes.
    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }
}
