//! Game loop driver
//!
//! Owns the game state and its collaborators. The host calls [`Session::update`]
//! once per display frame with the real elapsed time; the session turns that
//! into fixed simulation steps, then fans the resulting events out to audio
//! and the log.

use crate::audio::{AudioManager, AudioSink};
use crate::consts::{MAX_FRAME_SECS, MAX_SUBSTEPS, SIM_DT};
use crate::hud::Hud;
use crate::input::{Controls, hotkey_command};
use crate::renderer::{DrawCommand, RenderOptions, Vertex, render, tessellate};
use crate::settings::{Settings, SettingsError};
use crate::sim::{Command, GameEvent, GamePhase, GameState, advance, apply_command};

pub struct Session {
    state: GameState,
    audio: AudioManager,
    controls: Controls,
    options: RenderOptions,
    accumulator: f32,
    /// Events produced by commands, handed out with the next update
    outbox: Vec<GameEvent>,
}

impl Session {
    /// Build a session sitting on the intro screen
    pub fn new(settings: &Settings, sink: Box<dyn AudioSink>) -> Result<Self, SettingsError> {
        let tuning = settings.tuning()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "New session: {} rules, seed {}, quality {}",
            tuning.ruleset.as_str(),
            seed,
            settings.quality.as_str()
        );

        let mut audio = AudioManager::new(sink);
        audio.set_music_volume(settings.music_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_sfx_enabled(settings.sfx_enabled);

        Ok(Self {
            state: GameState::new(seed, tuning),
            audio,
            controls: Controls::new(),
            options: RenderOptions::from_settings(settings),
            accumulator: 0.0,
            outbox: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts that restore or script a run
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Keyboard and touch buttons write here
    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    /// Feed a named key event: movement keys go to the controls, hotkeys
    /// dispatch their command on press. Returns whether the key was used.
    pub fn key_event(&mut self, name: &str, pressed: bool) -> bool {
        if self.controls.handle_named(name, pressed) {
            return true;
        }
        match hotkey_command(name) {
            Some(command) if pressed => self.dispatch(command),
            _ => false,
        }
    }

    /// Route a command to the game or to audio. Returns whether it applied.
    pub fn dispatch(&mut self, command: Command) -> bool {
        if command.is_audio() {
            return self.audio.apply_command(command);
        }

        let applied = apply_command(&mut self.state, command);
        if applied {
            log::debug!("Applied {:?}, now {:?}", command, self.state.phase);
            if self.state.phase != GamePhase::Running {
                self.controls.clear();
            }
            // A restarted level starts from a clean slate of accumulated time
            self.accumulator = 0.0;
            let events = self.state.drain_events();
            self.forward(&events);
            self.outbox.extend(events);
        }
        applied
    }

    /// Advance by real elapsed seconds. Returns every event since the last call.
    pub fn update(&mut self, elapsed: f32) -> Vec<GameEvent> {
        // A bad host timestamp must not poison the accumulator
        let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_SECS);

        let input = self.controls.tick_input();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            advance(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let events = self.state.drain_events();
        self.forward(&events);

        let mut out = std::mem::take(&mut self.outbox);
        out.extend(events);
        out
    }

    fn forward(&mut self, events: &[GameEvent]) {
        for event in events {
            log::debug!("Event: {:?}", event);
            self.audio.handle_event(event);
        }
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    pub fn draw(&self) -> Vec<DrawCommand> {
        render(&self.state, &self.options)
    }

    /// Triangulated frame for a GPU backend
    pub fn frame_vertices(&self) -> Vec<Vertex> {
        tessellate(&self.draw())
    }
}
