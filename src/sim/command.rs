//! Lifecycle intents
//!
//! Menu buttons and hotkeys never touch [`GameState`] directly; they send a
//! [`Command`] and the state machine decides whether it applies.

use serde::{Deserialize, Serialize};

use super::level::{generate_level, restart_level};
use super::state::{GameEvent, GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Leave the intro screen and begin at level 1
    Start,
    Pause,
    Resume,
    TogglePause,
    /// Restart the current attempt right away
    Retry,
    /// Start over after winning
    PlayAgain,
    /// Abandon the run and return to the intro screen
    MainMenu,
    /// Music volume (0.0 - 1.0); audio only
    ChangeVolume(f32),
    /// Sound effects on/off; audio only
    SetSfxEnabled(bool),
}

impl Command {
    /// Whether this command is for the audio collaborator rather than the game
    pub fn is_audio(&self) -> bool {
        matches!(self, Command::ChangeVolume(_) | Command::SetSfxEnabled(_))
    }
}

/// Apply a command to the game. Returns false when it does not apply in the
/// current phase.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    match (command, state.phase) {
        (Command::Start, GamePhase::Intro) => {
            state.score = 0;
            generate_level(state, 1);
            true
        }

        (Command::Pause | Command::TogglePause, GamePhase::Running) => {
            state.phase = GamePhase::Paused;
            state.events.push(GameEvent::Paused);
            true
        }

        (Command::Resume | Command::TogglePause, GamePhase::Paused) => {
            state.phase = GamePhase::Running;
            state.events.push(GameEvent::Resumed);
            true
        }

        (Command::Retry, GamePhase::Failed { restart_level, .. }) => {
            generate_level(state, restart_level);
            true
        }

        (Command::Retry, GamePhase::Running | GamePhase::Paused) => {
            let level = restart_level(&state.tuning, state.level);
            generate_level(state, level);
            true
        }

        (Command::PlayAgain, GamePhase::Victory) => {
            state.score = 0;
            generate_level(state, 1);
            true
        }

        (Command::MainMenu, phase) if phase != GamePhase::Intro => {
            state.clear_entities();
            state.level = 1;
            state.score = 0;
            state.phase = GamePhase::Intro;
            state.events.push(GameEvent::ReturnedToMenu);
            true
        }

        (command, phase) => {
            if !command.is_audio() {
                log::debug!("Ignoring {:?} while {:?}", command, phase);
            }
            false
        }
    }
}
