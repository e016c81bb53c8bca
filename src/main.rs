//! TorqueLimiter simulator: replays a scripted flight against simulated
//! engines and logs every controller decision.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                     │
//! │                                                            │
//! │  SimulatedEngines   LogEventSink   JsonConfigFile          │
//! │  (Telemetry+Cmd)    (EventSink)    (ConfigPort)            │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ───────────────       │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │          AppService (pure logic)                 │      │
//! │  │  Limit · Cooldown · Correction · FSM             │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `torquelimiter-sim [--config PATH] [--ticks N] [--interval-ms MS]`

use anyhow::{Context, Result, bail};
use log::info;

use torquelimiter::adapters::config_file::JsonConfigFile;
use torquelimiter::adapters::log_sink::LogEventSink;
use torquelimiter::adapters::sim::{SimEngine, SimulatedEngines};
use torquelimiter::adapters::time::ManualClock;
use torquelimiter::app::ports::ConfigPort;
use torquelimiter::app::service::AppService;
use torquelimiter::config::LimiterConfig;
use torquelimiter::error::Error;

struct Args {
    config: Option<String>,
    ticks: u32,
    interval_ms: u64,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        ticks: 60,
        interval_ms: 500,
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--config" => args.config = Some(it.next().context("--config needs a path")?),
            "--ticks" => {
                args.ticks = it
                    .next()
                    .context("--ticks needs a value")?
                    .parse()
                    .context("--ticks must be an integer")?;
            }
            "--interval-ms" => {
                args.interval_ms = it
                    .next()
                    .context("--interval-ms needs a value")?
                    .parse()
                    .context("--interval-ms must be an integer")?;
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    if args.interval_ms == 0 {
        bail!("--interval-ms must be > 0");
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = parse_args()?;

    info!("TorqueLimiter sim v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Config ─────────────────────────────────────────────
    let store = args.config.as_deref().map(JsonConfigFile::new);
    let config = match &store {
        Some(s) => s
            .load()
            .map_err(Error::from)
            .with_context(|| format!("loading {}", s.path().display()))?,
        None => LimiterConfig::default(),
    };
    info!("Config: {:?}", config);

    // ── 2. Adapters + service ─────────────────────────────────
    let clock = ManualClock::new(0);
    let mut sink = LogEventSink::new();
    let mut sim = SimulatedEngines::new();
    sim.load_vehicle(&[SimEngine::new(1.12), SimEngine::new(1.04)]);
    sim.set_all_throttles(100.0);

    let mut app = AppService::new(config);
    app.start(&mut sink);

    // ── 3. Replay: twin at full power, then swap to a quad ───
    let reload_at = args.ticks / 2;
    for n in 0..args.ticks {
        clock.advance(args.interval_ms);
        sim.step(args.interval_ms);

        if n == reload_at {
            info!("Unloading vehicle");
            sim.unload_vehicle();
        } else if n == reload_at + 1 {
            info!("Loading quad-engine vehicle");
            sim.load_vehicle(&[SimEngine::new(1.08); 4]);
            sim.set_all_throttles(100.0);
        }

        app.tick(&mut sim, &clock, &mut sink);

        if let Some(s) = &store {
            app.auto_save_if_needed(s, &clock);
        }
    }

    // ── 4. Summary ────────────────────────────────────────────
    let stats = app.stats();
    info!(
        "Done: {} ticks, {} interventions ({} rejected), longest episode {}",
        stats.ticks, stats.interventions, stats.rejected_commands, stats.longest_episode
    );
    for (i, e) in sim.engines().iter().enumerate() {
        info!(
            "Engine {}: throttle={:.1}% torque={:.1}%",
            i, e.throttle_percent, e.torque_percent
        );
    }

    if let Some(s) = &store {
        app.force_save_if_dirty(s);
    }
    Ok(())
}
