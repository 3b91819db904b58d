//! Neon Dodge entry point
//!
//! Native headless runner: loads settings, then lets a simple autopilot play
//! a few thousand frames while the log shows what happens. Useful for
//! checking balance changes without a window.

use std::path::PathBuf;
use std::process::ExitCode;

use glam::Vec2;

use neon_dodge::audio::LogSink;
use neon_dodge::consts::SIM_DT;
use neon_dodge::input::Key;
use neon_dodge::sim::{Command, GameEvent, GamePhase, GameState};
use neon_dodge::{Session, Settings};

/// Environment variable naming a settings file
const SETTINGS_ENV: &str = "NEON_DODGE_SETTINGS";
/// Ten simulated minutes
const DEMO_FRAMES: u32 = 60 * 60 * 10;

fn settings_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(SETTINGS_ENV))
        .map(PathBuf::from)
}

/// Head for the nearest orb still on the field
fn autopilot_target(state: &GameState) -> Option<Vec2> {
    let pos = state.player.pos;
    state
        .orbs
        .iter()
        .filter(|o| !o.collected)
        .map(|o| o.pos)
        .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)))
}

fn steer(session: &mut Session) {
    let target = autopilot_target(session.state());
    let pos = session.state().player.pos;
    let controls = session.controls_mut();
    controls.clear();

    let Some(target) = target else {
        return;
    };
    let delta = target - pos;
    // Dead zone keeps the autopilot from jittering across the target
    if delta.x > 2.0 {
        controls.press(Key::Right);
    } else if delta.x < -2.0 {
        controls.press(Key::Left);
    }
    if delta.y > 2.0 {
        controls.press(Key::Down);
    } else if delta.y < -2.0 {
        controls.press(Key::Up);
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Neon Dodge (native) starting...");

    let settings = match settings_path() {
        Some(path) => Settings::load_or_default(&path),
        None => Settings::default(),
    };

    let mut session = match Session::new(&settings, Box::new(LogSink)) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    session.dispatch(Command::Start);
    let mut failures = 0u32;

    for frame in 0..DEMO_FRAMES {
        steer(&mut session);
        for event in session.update(SIM_DT) {
            if let GameEvent::Failed { .. } = event {
                failures += 1;
            }
        }

        if frame % 600 == 0 {
            let hud = session.hud();
            log::info!(
                "{} | Score: {} | {} | {} | shield {:.0}%",
                hud.level_label(),
                hud.score,
                hud.orbs_label(),
                hud.shields_label(),
                hud.shield_percent
            );
        }

        if session.state().phase == GamePhase::Victory {
            break;
        }
    }

    let state = session.state();
    println!(
        "Reached level {} with {} orbs collected and {} failures ({} sim ticks)",
        state.level, state.score, failures, state.time_ticks
    );
    ExitCode::SUCCESS
}
