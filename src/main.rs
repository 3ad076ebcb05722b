//! Grain Catcher entry point
//!
//! Runs a headless match at 60 Hz with the autopilot at the controls, logs
//! gameplay events and prints the final HUD snapshot as JSON.
//!
//! Usage: `grain-catcher [tuning.json|-] [seed] [seconds]`

use std::path::Path;
use std::process::ExitCode;

use grain_catcher::Tuning;
use grain_catcher::consts::TICKS_PER_SECOND;
use grain_catcher::sim::{GameEvent, Session, TickInput};

const DEFAULT_SEED: u64 = 12345;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Grain Catcher (headless) starting...");

    let mut args = std::env::args().skip(1);

    let tuning = match args.next().filter(|arg| arg != "-") {
        Some(path) => match Tuning::load(Path::new(&path)) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let seed = match args.next().map(|arg| arg.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Bad seed ({}), using {}", e, DEFAULT_SEED);
            DEFAULT_SEED
        }
        None => DEFAULT_SEED,
    };

    // Optional cap on simulated seconds; otherwise play until time runs out
    let frame_limit = args
        .next()
        .and_then(|arg| arg.parse::<u64>().ok())
        .map(|secs| secs * TICKS_PER_SECOND);

    let mut session = match Session::new(tuning, seed, 0) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut frame = 0;
    let mut now = 0;
    while !session.is_over() && frame_limit.is_none_or(|limit| frame < limit) {
        frame += 1;
        now = frame * 1000 / TICKS_PER_SECOND;
        session.advance(&input, now);
        for event in session.drain_events() {
            report(&event, now);
        }
    }

    log::info!(
        "Finished after {} frames ({}ms): score {}",
        frame,
        now,
        session.state.score
    );

    match serde_json::to_string_pretty(&session.hud(now)) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize HUD: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(event: &GameEvent, now: u64) {
    match event {
        GameEvent::ItemSpawned { .. } | GameEvent::ItemMissed { .. } => {
            log::trace!("[{:>6}ms] {:?}", now, event)
        }
        GameEvent::ItemCollected { .. } => log::debug!("[{:>6}ms] {:?}", now, event),
        _ => log::info!("[{:>6}ms] {:?}", now, event),
    }
}
