//! HUD snapshot
//!
//! What the overlay shows each frame. The game pushes this out; it never
//! reads anything back from the HUD.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub level: u32,
    pub score: u64,
    pub orbs_collected: usize,
    pub orbs_total: usize,
    /// Shield pickups currently on the field
    pub shields_available: usize,
    /// Shield time left as a percentage of a full shield (0-100)
    pub shield_percent: f32,
    pub paused: bool,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let full = state.tuning.shields.duration_secs;
        let shield_percent = if full > 0.0 {
            (state.player.shield_remaining(state.clock) / full * 100.0).clamp(0.0, 100.0) as f32
        } else {
            0.0
        };

        Self {
            level: state.level,
            score: state.score,
            orbs_collected: state.orbs_collected(),
            orbs_total: state.orbs.len(),
            shields_available: state.shields_available(),
            shield_percent,
            paused: state.phase == GamePhase::Paused,
        }
    }

    pub fn level_label(&self) -> String {
        format!("Level: {}", self.level)
    }

    pub fn orbs_label(&self) -> String {
        format!("Orbs: {}/{}", self.orbs_collected, self.orbs_total)
    }

    pub fn shields_label(&self) -> String {
        format!("Shields: {}", self.shields_available)
    }
}
