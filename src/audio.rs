//! Audio cues
//!
//! The game only decides *which* cue fires and at what volume; playback is
//! up to whatever [`AudioSink`] the host plugs in. Each cue carries a small
//! procedural recipe so a sink can synthesize it without asset files.

use crate::sim::{Command, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Orb collected
    OrbCollect,
    /// Shield pickup grabbed
    ShieldPickup,
    /// Hit an obstacle without a shield
    Fail,
    /// Cleared the final level
    Victory,
}

/// Oscillator shape for a recipe note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator burst in a cue recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    /// Seconds after the cue starts
    pub delay: f32,
    pub length: f32,
    pub waveform: Waveform,
    /// Peak gain before volume scaling
    pub gain: f32,
}

const fn note(freq: f32, delay: f32, length: f32, waveform: Waveform, gain: f32) -> Note {
    Note {
        freq,
        delay,
        length,
        waveform,
        gain,
    }
}

/// Coin-style double ding
const ORB_COLLECT: [Note; 2] = [
    note(988.0, 0.0, 0.08, Waveform::Square, 0.2),
    note(1319.0, 0.07, 0.2, Waveform::Square, 0.2),
];

/// Rising power-up arpeggio
const SHIELD_PICKUP: [Note; 3] = [
    note(600.0, 0.0, 0.15, Waveform::Sine, 0.25),
    note(800.0, 0.08, 0.15, Waveform::Sine, 0.25),
    note(1000.0, 0.16, 0.2, Waveform::Sine, 0.25),
];

/// Sad descending
const FAIL: [Note; 4] = [
    note(400.0, 0.0, 0.3, Waveform::Sine, 0.3),
    note(350.0, 0.2, 0.3, Waveform::Sine, 0.3),
    note(300.0, 0.4, 0.3, Waveform::Sine, 0.3),
    note(200.0, 0.6, 0.4, Waveform::Sine, 0.3),
];

/// Triumphant fanfare
const VICTORY: [Note; 5] = [
    note(500.0, 0.0, 0.25, Waveform::Triangle, 0.25),
    note(600.0, 0.08, 0.25, Waveform::Triangle, 0.25),
    note(700.0, 0.16, 0.25, Waveform::Triangle, 0.25),
    note(800.0, 0.24, 0.25, Waveform::Triangle, 0.25),
    note(1000.0, 0.32, 0.5, Waveform::Triangle, 0.3),
];

impl Cue {
    pub fn recipe(&self) -> &'static [Note] {
        match self {
            Cue::OrbCollect => &ORB_COLLECT,
            Cue::ShieldPickup => &SHIELD_PICKUP,
            Cue::Fail => &FAIL,
            Cue::Victory => &VICTORY,
        }
    }

    /// Cue that should accompany a game event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::OrbCollected { .. } => Some(Cue::OrbCollect),
            GameEvent::ShieldPickedUp { .. } => Some(Cue::ShieldPickup),
            GameEvent::Failed { .. } => Some(Cue::Fail),
            GameEvent::Victory => Some(Cue::Victory),
            _ => None,
        }
    }
}

/// Background music transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Host-side playback
pub trait AudioSink {
    fn play_cue(&mut self, cue: Cue, volume: f32) -> Result<(), AudioError>;
    fn set_music(&mut self, state: MusicState, volume: f32) -> Result<(), AudioError>;
}

/// Sink that drops everything (headless runs)
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play_cue(&mut self, _cue: Cue, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_music(&mut self, _state: MusicState, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Sink that writes cues to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play_cue(&mut self, cue: Cue, volume: f32) -> Result<(), AudioError> {
        log::info!("♪ {:?} (vol {:.2}, {} notes)", cue, volume, cue.recipe().len());
        Ok(())
    }

    fn set_music(&mut self, state: MusicState, volume: f32) -> Result<(), AudioError> {
        log::info!("♪ music {:?} (vol {:.2})", state, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    sfx_volume: f32,
    music_volume: f32,
    sfx_enabled: bool,
    music: MusicState,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            sfx_volume: 1.0,
            music_volume: 0.5,
            sfx_enabled: true,
            music: MusicState::Stopped,
        }
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.refresh_music();
    }

    /// Sound effects on/off (music is unaffected)
    pub fn set_sfx_enabled(&mut self, enabled: bool) {
        self.sfx_enabled = enabled;
    }

    pub fn sfx_enabled(&self) -> bool {
        self.sfx_enabled
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn music(&self) -> MusicState {
        self.music
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.sfx_enabled {
            self.sfx_volume
        } else {
            0.0
        }
    }

    /// Play a sound effect (silently skipped when muted; sink errors are swallowed)
    pub fn play(&mut self, cue: Cue) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play_cue(cue, vol) {
            log::debug!("Cue {:?} not played: {}", cue, e);
        }
    }

    fn set_music(&mut self, state: MusicState) {
        if self.music == state {
            return;
        }
        self.music = state;
        self.refresh_music();
    }

    fn refresh_music(&mut self) {
        let vol = self.music_volume;
        if let Err(e) = self.sink.set_music(self.music, vol) {
            log::debug!("Music {:?} not applied: {}", self.music, e);
        }
    }

    /// React to a game event: fire its cue and move the music transport
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(cue) = Cue::for_event(event) {
            self.play(cue);
        }
        match event {
            GameEvent::LevelStarted { .. } | GameEvent::Resumed => self.set_music(MusicState::Playing),
            GameEvent::Paused => self.set_music(MusicState::Paused),
            GameEvent::Victory | GameEvent::ReturnedToMenu => self.set_music(MusicState::Stopped),
            _ => {}
        }
    }

    /// Apply the audio half of a command. Returns false for non-audio commands.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::ChangeVolume(vol) => {
                self.set_music_volume(vol);
                true
            }
            Command::SetSfxEnabled(enabled) => {
                self.set_sfx_enabled(enabled);
                true
            }
            _ => false,
        }
    }
}
