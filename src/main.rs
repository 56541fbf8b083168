//! Dungeon Floor entry point
//!
//! Headless session: loads settings, lets the autopilot play the configured
//! number of runs, and logs how each one ended.
//!
//! Usage: `dungeon-floor [settings.json]`

use std::path::PathBuf;

use dungeon_floor::sim::autopilot;
use dungeon_floor::sim::{RunPhase, TickInput};
use dungeon_floor::{FrameInput, FrameOutcome, Game, Settings};

/// How a single run ended
#[derive(Debug)]
struct RunReport {
    phase: RunPhase,
    frames: u64,
    ticks: u64,
    rooms_cleared: usize,
    rooms: usize,
    hp: u8,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dungeon Floor (headless) starting...");

    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path),
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut game = Game::new(seed, settings.tuning.clone());

    let mut reports = Vec::new();
    for run in 0..settings.runs {
        if run > 0 {
            let restart = FrameInput {
                restart: true,
                ..Default::default()
            };
            game.frame(0.0, &restart);
        }

        let report = play_run(&mut game, &settings);
        log::info!(
            "Run {}: {:?} after {} ticks, {}/{} rooms, hp {}",
            run + 1,
            report.phase,
            report.ticks,
            report.rooms_cleared,
            report.rooms,
            report.hp
        );
        if settings.dump_snapshot {
            match serde_json::to_string(&game.snapshot()) {
                Ok(json) => log::info!("Final frame: {}", json),
                Err(e) => log::warn!("Could not serialize snapshot: {}", e),
            }
        }
        reports.push(report);
    }

    let cleared = reports.iter().filter(|r| r.phase == RunPhase::Cleared).count();
    let died = reports.iter().filter(|r| r.phase == RunPhase::Dead).count();
    let frames: u64 = reports.iter().map(|r| r.frames).sum();
    println!(
        "seed {}: {} runs, {} cleared, {} died, {} unfinished ({} frames)",
        seed,
        reports.len(),
        cleared,
        died,
        reports.len() - cleared - died,
        frames
    );
}

/// Feed frames until the run ends or the time limit is hit
fn play_run(game: &mut Game, settings: &Settings) -> RunReport {
    let max_frames = settings.max_frames();
    let mut frames = 0;

    while frames < max_frames && game.phase() == RunPhase::Active {
        let held = if settings.autopilot {
            autopilot::drive(&game.state)
        } else {
            TickInput::default()
        };
        let input = FrameInput {
            held,
            ..Default::default()
        };
        if game.frame(settings.frame_dt, &input).0 == FrameOutcome::Quit {
            break;
        }
        frames += 1;
    }

    let state = &game.state;
    RunReport {
        phase: state.phase,
        frames,
        ticks: state.time_ticks,
        rooms_cleared: state.floor.cleared_count(),
        rooms: state.floor.room_count(),
        hp: state.player.hp,
    }
}
