//! Game settings and preferences
//!
//! Stored as a JSON file, separate from any in-game state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::{RulesetKind, Tuning, TuningError};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 512,
        }
    }

    /// Trail length multiplier (1.0 = the rule set's own length)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium | QualityPreset::High => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Player trail
    pub trails: bool,
    /// Orb and shield bursts
    pub particles: bool,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub sfx_enabled: bool,

    // === Accessibility ===
    /// Reduced motion (drops particle bursts)
    pub reduced_motion: bool,

    // === Gameplay ===
    pub ruleset: RulesetKind,
    /// Overrides the rule set's diagonal normalization when set
    pub normalize_diagonal: Option<bool>,
    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            trails: true,
            particles: true,

            music_volume: 0.5,
            sfx_volume: 1.0,
            sfx_enabled: true,

            reduced_motion: false,

            ruleset: RulesetKind::NeonDodge,
            normalize_diagonal: None,
            seed: None,
        }
    }
}

/// Settings file problems
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(serde_json::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(serde_json::Error),
    #[error("settings produce an unusable rule set: {0}")]
    Tuning(#[from] TuningError),
}

impl Settings {
    /// Effective particle toggle (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if self.effective_particles() {
            self.quality.max_particles()
        } else {
            0
        }
    }

    /// Build the rule set these settings select, with overrides applied
    pub fn tuning(&self) -> Result<Tuning, SettingsError> {
        let mut tuning = self.ruleset.tuning();
        if let Some(normalize) = self.normalize_diagonal {
            tuning.normalize_diagonal = normalize;
        }
        let scaled = (tuning.trail_length as f32 * self.quality.trail_quality()).round() as usize;
        tuning.trail_length = scaled.max(1);
        tuning.max_particles = self.max_particles();
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(SettingsError::Parse)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
