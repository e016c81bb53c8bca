//! Closed-loop tests: AppService driving the simulated engine bank.
//!
//! Unlike the scripted mock, the simulated engines respond to the throttle
//! the limiter writes, so these check that the loop actually settles.

use crate::mock_sim::RecordingSink;

use torquelimiter::adapters::sim::{SimEngine, SimulatedEngines};
use torquelimiter::adapters::time::ManualClock;
use torquelimiter::app::events::AppEvent;
use torquelimiter::app::ports::Clock;
use torquelimiter::app::service::AppService;
use torquelimiter::config::LimiterConfig;
use torquelimiter::fsm::LimiterPhase;

const TICK_MS: u64 = 500;

fn run(app: &mut AppService, sim: &mut SimulatedEngines, clock: &ManualClock, sink: &mut RecordingSink, ticks: u32) {
    for _ in 0..ticks {
        clock.advance(TICK_MS);
        sim.step(TICK_MS);
        app.tick(sim, clock, sink);
    }
}

#[test]
fn twin_at_full_power_settles_under_limit() {
    let mut app = AppService::new(LimiterConfig::default());
    let clock = ManualClock::new(0);
    let mut sink = RecordingSink::default();
    let mut sim = SimulatedEngines::new();
    sim.load_vehicle(&[SimEngine::new(1.12), SimEngine::new(1.04)]);
    sim.set_all_throttles(100.0);

    run(&mut app, &mut sim, &clock, &mut sink, 120);

    assert!(app.stats().interventions >= 2);
    for e in sim.engines() {
        assert!(e.torque_percent < 100.5, "torque {} not settled", e.torque_percent);
        assert!(e.throttle_percent >= 40.0);
        assert!(e.throttle_percent < 100.0);
    }
    assert_eq!(app.phase(), Some(LimiterPhase::Idle));
}

#[test]
fn interventions_respect_cooldown_in_closed_loop() {
    let mut app = AppService::new(LimiterConfig::default());
    let clock = ManualClock::new(0);
    let mut sink = RecordingSink::default();
    let mut sim = SimulatedEngines::new();
    sim.load_vehicle(&[SimEngine::new(1.3)]);
    sim.set_all_throttles(100.0);

    let mut stamps = Vec::new();
    for _ in 0..60 {
        clock.advance(TICK_MS);
        sim.step(TICK_MS);
        if app.tick(&mut sim, &clock, &mut sink).is_some() {
            stamps.push(clock.now_ms());
        }
    }

    assert!(!stamps.is_empty());
    for pair in stamps.windows(2) {
        assert!(pair[1] - pair[0] >= 2000, "interventions at {:?}", pair);
    }
}

#[test]
fn disconnect_skips_ticks_then_resumes() {
    let mut app = AppService::new(LimiterConfig::default());
    let clock = ManualClock::new(0);
    let mut sink = RecordingSink::default();
    let mut sim = SimulatedEngines::new();
    sim.load_vehicle(&[SimEngine::new(1.0)]);
    sim.set_all_throttles(80.0);

    run(&mut app, &mut sim, &clock, &mut sink, 2);
    sim.set_connected(false);
    run(&mut app, &mut sim, &clock, &mut sink, 3);
    sim.set_connected(true);
    run(&mut app, &mut sim, &clock, &mut sink, 2);

    let failures = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::TelemetryUnavailable(_)))
        .count();
    assert_eq!(failures, 3);
    assert_eq!(app.stats().ticks, 7);
    assert_eq!(app.runtime_state().unwrap().last_engine_count, 1);
}
