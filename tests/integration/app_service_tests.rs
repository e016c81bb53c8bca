//! Integration tests for the AppService → limiter → command sink pipeline.
//!
//! These run against the scripted [`MockSim`] and verify the full chain
//! from a telemetry frame down to the throttle write, with a hand-driven
//! clock so cooldown timing is exact.

use crate::mock_sim::{MockConfigStore, MockSim, RecordingSink};

use torquelimiter::adapters::time::ManualClock;
use torquelimiter::app::commands::AppCommand;
use torquelimiter::app::events::AppEvent;
use torquelimiter::app::service::AppService;
use torquelimiter::config::LimiterConfig;
use torquelimiter::error::{CommandError, TelemetryError};
use torquelimiter::fsm::LimiterPhase;
use torquelimiter::telemetry::{EngineSample, TorqueBand};

fn make_app() -> (AppService, ManualClock, RecordingSink) {
    let mut app = AppService::new(LimiterConfig::default());
    let mut sink = RecordingSink::default();
    app.start(&mut sink);
    (app, ManualClock::new(0), sink)
}

// ── Reference scenarios ──────────────────────────────────────

#[test]
fn full_throttle_overtorque_pulls_back_to_80() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::steady(&[EngineSample::new(108.0, 100.0)]);

    let ev = app.tick(&mut sim, &clock, &mut sink).expect("intervention");

    assert_eq!(&ev.recommended_throttle_percents[..], &[80.0]);
    assert_eq!(sim.last_write(), Some(&[80.0][..]));
    assert_eq!(app.phase(), Some(LimiterPhase::Limiting));
}

#[test]
fn correction_stops_at_safety_floor() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::steady(&[EngineSample::new(108.0, 55.0)]);

    app.tick(&mut sim, &clock, &mut sink);

    assert_eq!(sim.last_write(), Some(&[40.0][..]));
}

#[test]
fn compliant_engine_keeps_its_throttle() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::steady(&[
        EngineSample::new(105.0, 90.0),
        EngineSample::new(95.0, 90.0),
    ]);

    let ev = app.tick(&mut sim, &clock, &mut sink).expect("intervention");

    assert_eq!(sim.last_write(), Some(&[77.5, 90.0][..]));
    assert!(ev.overlimit_engine_indices.contains(0));
    assert!(!ev.overlimit_engine_indices.contains(1));
}

// ── Episode lifecycle ─────────────────────────────────────────

#[test]
fn episode_events_are_emitted_in_order() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::new();
    sim.push(&[EngineSample::new(108.0, 100.0)]);
    sim.push(&[EngineSample::new(95.0, 80.0)]);

    app.tick(&mut sim, &clock, &mut sink);
    clock.advance(500);
    app.tick(&mut sim, &clock, &mut sink);

    let kinds: Vec<&'static str> = sink
        .events
        .iter()
        .map(|e| match e {
            AppEvent::Started { .. } => "started",
            AppEvent::EnginesChanged { .. } => "engines",
            AppEvent::Intervention(_) => "intervention",
            AppEvent::PhaseChanged { to: LimiterPhase::Limiting, .. } => "limiting",
            AppEvent::PhaseChanged { to: LimiterPhase::Idle, .. } => "idle",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["started", "engines", "intervention", "limiting", "idle"]
    );
}

#[test]
fn ticks_inside_cooldown_write_nothing() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::steady(&[EngineSample::new(110.0, 100.0)]);

    for _ in 0..4 {
        app.tick(&mut sim, &clock, &mut sink);
        clock.advance(500);
    }
    // t = 0 intervenes; 500, 1000, 1500 are inside the 2 s window.
    assert_eq!(sim.writes.len(), 1);
    assert_eq!(app.runtime_state().unwrap().intervention_count, 1);

    app.tick(&mut sim, &clock, &mut sink); // t = 2000
    assert_eq!(sim.writes.len(), 2);
    assert_eq!(app.runtime_state().unwrap().intervention_count, 2);
    assert_eq!(app.stats().longest_episode, 2);
}

#[test]
fn vehicle_reload_discards_stale_episode() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::new();
    sim.push(&[EngineSample::new(110.0, 100.0)]);
    sim.push(&[]);
    sim.push(&[EngineSample::new(60.0, 70.0); 4]);

    app.tick(&mut sim, &clock, &mut sink);
    assert_eq!(app.phase(), Some(LimiterPhase::Limiting));
    clock.advance(250);
    app.tick(&mut sim, &clock, &mut sink);
    assert_eq!(app.phase(), Some(LimiterPhase::Limiting));
    clock.advance(250);
    app.tick(&mut sim, &clock, &mut sink);

    let st = app.runtime_state().unwrap();
    assert!(!st.is_limiting);
    assert_eq!(st.intervention_count, 0);
    assert_eq!(st.last_engine_count, 4);
    assert!(sink.events.contains(&AppEvent::EnginesChanged { from: 0, to: 4 }));
}

// ── Port failures ─────────────────────────────────────────────

#[test]
fn rejected_command_does_not_roll_back_state() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::steady(&[EngineSample::new(108.0, 100.0)]);
    sim.reject_writes = true;

    assert!(app.tick(&mut sim, &clock, &mut sink).is_some());

    let st = app.runtime_state().unwrap();
    assert!(st.is_limiting);
    assert_eq!(st.intervention_count, 1);
    assert_eq!(st.last_intervention_ms, Some(0));
    assert_eq!(app.stats().rejected_commands, 1);
    assert!(
        sink.events
            .contains(&AppEvent::CommandRejected(CommandError::Rejected))
    );
}

#[test]
fn telemetry_failure_skips_tick_without_touching_state() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::new();
    sim.push(&[EngineSample::new(108.0, 100.0)]);
    sim.push_error(TelemetryError::Disconnected);

    app.tick(&mut sim, &clock, &mut sink);
    let before = *app.runtime_state().unwrap();
    clock.advance(3000);
    assert!(app.tick(&mut sim, &clock, &mut sink).is_none());

    assert_eq!(*app.runtime_state().unwrap(), before);
    assert_eq!(app.stats().telemetry_failures, 1);
    assert!(
        sink.events
            .contains(&AppEvent::TelemetryUnavailable(TelemetryError::Disconnected))
    );
}

// ── Enable / disable ──────────────────────────────────────────

#[test]
fn disabled_service_reads_nothing_and_writes_nothing() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::new();
    sim.push_error(TelemetryError::NotReady);
    sim.steady = torquelimiter::telemetry::samples_from_slice(&[EngineSample::new(120.0, 100.0)])
        .unwrap();

    app.handle_command(AppCommand::Disable, &clock, &mut sink);
    assert!(app.tick(&mut sim, &clock, &mut sink).is_none());

    assert!(sim.writes.is_empty());
    assert_eq!(app.stats().ticks, 0);
    assert!(!sink.events.iter().any(|e| matches!(e, AppEvent::TelemetryUnavailable(_))));
}

#[test]
fn re_enable_starts_from_clean_state() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::steady(&[EngineSample::new(110.0, 100.0)]);

    app.tick(&mut sim, &clock, &mut sink);
    app.handle_command(AppCommand::Disable, &clock, &mut sink);
    app.handle_command(AppCommand::Enable, &clock, &mut sink);

    // Fresh instance: no cooldown carried over, count restarts at 1.
    clock.advance(100);
    let ev = app.tick(&mut sim, &clock, &mut sink).expect("intervention");
    assert_eq!(ev.intervention_count, 1);
}

#[test]
fn torque_band_tracks_hottest_engine_without_intervening() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::steady(&[EngineSample::new(50.0, 80.0)]);
    sim.push(&[EngineSample::new(50.0, 80.0), EngineSample::new(95.0, 80.0)]);

    assert!(app.tick(&mut sim, &clock, &mut sink).is_none());
    assert_eq!(app.torque_band(), TorqueBand::Warning);
    assert!(sim.writes.is_empty());

    clock.advance(500);
    app.tick(&mut sim, &clock, &mut sink);
    assert_eq!(app.torque_band(), TorqueBand::Normal);
}

// ── Config hot reload ─────────────────────────────────────────

#[test]
fn updated_gain_applies_on_next_tick() {
    let (mut app, clock, mut sink) = make_app();
    let mut sim = MockSim::steady(&[EngineSample::new(104.0, 100.0)]);
    let cfg = LimiterConfig {
        aggression_factor: 5.0,
        ..LimiterConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(cfg), &clock, &mut sink);

    app.tick(&mut sim, &clock, &mut sink);
    assert_eq!(sim.last_write(), Some(&[80.0][..]));
}

#[test]
fn config_auto_saves_after_delay() {
    let (mut app, clock, mut sink) = make_app();
    let store = MockConfigStore::default();
    let cfg = LimiterConfig {
        cooldown_ms: 1000,
        ..LimiterConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(cfg), &clock, &mut sink);
    assert!(app.is_config_dirty());

    clock.advance(4999);
    assert!(!app.auto_save_if_needed(&store, &clock));
    clock.advance(1);
    assert!(app.auto_save_if_needed(&store, &clock));
    assert_eq!(store.saves.get(), 1);
    assert!(!app.is_config_dirty());
}

#[test]
fn failed_save_keeps_config_dirty() {
    let (mut app, clock, mut sink) = make_app();
    let store = MockConfigStore {
        fail: true,
        ..MockConfigStore::default()
    };
    app.handle_command(AppCommand::SaveConfig, &clock, &mut sink);
    app.force_save_if_dirty(&store);
    assert!(app.is_config_dirty());
}

#[test]
fn explicit_save_flushes_on_next_check_early_in_session() {
    let (mut app, clock, mut sink) = make_app();
    let store = MockConfigStore::default();

    clock.set(1200);
    app.handle_command(AppCommand::SaveConfig, &clock, &mut sink);
    clock.advance(250);

    assert!(app.auto_save_if_needed(&store, &clock));
    assert_eq!(store.saves.get(), 1);
    assert!(!app.is_config_dirty());

    // Ordinary edits still wait out the delay afterwards.
    app.handle_command(AppCommand::Disable, &clock, &mut sink);
    clock.advance(250);
    assert!(!app.auto_save_if_needed(&store, &clock));
}
