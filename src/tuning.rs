//! Data-driven game balance
//!
//! Every gameplay constant lives here. The two rule sets the game has shipped
//! with ("Neon Dodge" and "Patrick") are presets of the same structure, so the
//! simulation has a single code path.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What happens when the player touches an obstacle without a shield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Freeze, wait `delay_secs`, then regenerate the same level
    RetrySameLevel { delay_secs: f64 },
    /// Immediately regenerate at the first level of the current band of ten
    RewindToCheckpoint,
}

/// Which preset a tuning was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RulesetKind {
    #[default]
    NeonDodge,
    Patrick,
}

impl RulesetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RulesetKind::NeonDodge => "Neon Dodge",
            RulesetKind::Patrick => "Patrick",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "neon" | "neon_dodge" | "neon-dodge" | "neondodge" => Some(RulesetKind::NeonDodge),
            "patrick" => Some(RulesetKind::Patrick),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            RulesetKind::NeonDodge => Tuning::neon_dodge(),
            RulesetKind::Patrick => Tuning::patrick(),
        }
    }
}

/// Inclusive-exclusive float range used for randomized sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    pub fn is_fixed(&self) -> bool {
        self.min >= self.max
    }
}

/// Obstacle count, size and speed scaling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleTuning {
    pub count_base: u32,
    /// Extra obstacles per level (floored)
    pub count_per_level: f64,
    pub count_cap: u32,
    pub width: Span,
    pub height: Span,
    /// Per-axis speed at level 0 (px/s)
    pub speed_base: f32,
    pub speed_per_level: f32,
    /// Extra random speed added per axis, uniform in [0, jitter)
    pub speed_jitter: f32,
}

/// Orb count and size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbTuning {
    pub count_base: u32,
    pub count_per_level: f64,
    pub count_min: u32,
    pub radius: f32,
    /// Distance kept from the canvas edge when spawning
    pub spawn_margin: f32,
}

/// Shield pickup pool and timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldTuning {
    pub count: u32,
    pub radius: f32,
    pub spawn_margin: f32,
    /// How long the player stays shielded after a pickup
    pub duration_secs: f64,
    /// How long a consumed pickup stays away
    pub respawn_secs: f64,
}

/// Complete rule set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub ruleset: RulesetKind,
    pub canvas: Vec2,
    pub player_start: Vec2,
    pub player_radius: f32,
    /// Player speed in px/s
    pub player_speed: f32,
    /// Scale diagonal input to unit length
    pub normalize_diagonal: bool,
    pub trail_length: usize,
    pub obstacles: ObstacleTuning,
    pub orbs: OrbTuning,
    pub shields: ShieldTuning,
    pub failure_policy: FailurePolicy,
    /// Clearing this level wins the game
    pub max_level: u32,
    pub max_particles: usize,
}

/// Speeds were authored in px per 60 Hz frame.
const FRAME_RATE: f32 = 60.0;

impl Default for Tuning {
    fn default() -> Self {
        Self::neon_dodge()
    }
}

impl Tuning {
    /// The "Neon Dodge" rules: retry the same level, diagonal speed normalized
    pub fn neon_dodge() -> Self {
        let canvas = Vec2::new(1400.0, 800.0);
        Self {
            ruleset: RulesetKind::NeonDodge,
            canvas,
            player_start: Vec2::new((canvas.x * 0.08).max(80.0), (canvas.y * 0.08).max(80.0)),
            player_radius: 14.0,
            player_speed: 4.5 * FRAME_RATE,
            normalize_diagonal: true,
            trail_length: 30,
            obstacles: ObstacleTuning {
                count_base: 3,
                count_per_level: 0.7,
                count_cap: 40,
                width: Span::new(28.0, 70.0),
                height: Span::new(12.0, 34.0),
                speed_base: 1.6 * FRAME_RATE,
                speed_per_level: 0.18 * FRAME_RATE,
                speed_jitter: 1.2 * FRAME_RATE,
            },
            orbs: OrbTuning {
                count_base: 3,
                count_per_level: 0.5,
                count_min: 3,
                radius: 10.0,
                spawn_margin: 30.0,
            },
            shields: ShieldTuning {
                count: 5,
                radius: 12.0,
                spawn_margin: 30.0,
                duration_secs: 30.0,
                respawn_secs: 60.0,
            },
            failure_policy: FailurePolicy::RetrySameLevel { delay_secs: 0.9 },
            max_level: 100,
            max_particles: 512,
        }
    }

    /// The "Patrick" rules: rewind to the decade checkpoint, no diagonal normalization
    pub fn patrick() -> Self {
        Self {
            ruleset: RulesetKind::Patrick,
            canvas: Vec2::new(800.0, 600.0),
            player_start: Vec2::new(50.0, 50.0),
            player_radius: 12.0,
            player_speed: 3.0 * FRAME_RATE,
            normalize_diagonal: false,
            trail_length: 15,
            obstacles: ObstacleTuning {
                count_base: 5,
                count_per_level: 0.5,
                count_cap: 25,
                width: Span::fixed(40.0),
                height: Span::fixed(15.0),
                speed_base: 2.0 * FRAME_RATE,
                speed_per_level: 0.2 * FRAME_RATE,
                speed_jitter: 0.0,
            },
            orbs: OrbTuning {
                count_base: 3,
                count_per_level: 1.0 / 3.0,
                count_min: 3,
                radius: 8.0,
                spawn_margin: 15.0,
            },
            shields: ShieldTuning {
                count: 5,
                radius: 10.0,
                spawn_margin: 15.0,
                duration_secs: 30.0,
                respawn_secs: 60.0,
            },
            failure_policy: FailurePolicy::RewindToCheckpoint,
            max_level: 100,
            max_particles: 512,
        }
    }

    /// Reject rule sets the generator cannot satisfy
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.canvas.x > 0.0 && self.canvas.y > 0.0) {
            return Err(TuningError::EmptyCanvas);
        }
        let o = &self.obstacles;
        if o.width.min <= 0.0 || o.height.min <= 0.0 || o.width.min > o.width.max || o.height.min > o.height.max {
            return Err(TuningError::BadObstacleSize);
        }
        if o.width.max >= self.canvas.x || o.height.max >= self.canvas.y {
            return Err(TuningError::CanvasTooSmall("obstacles"));
        }
        let orb_extent = 2.0 * self.orbs.spawn_margin.max(self.orbs.radius);
        if orb_extent >= self.canvas.x.min(self.canvas.y) {
            return Err(TuningError::CanvasTooSmall("orbs"));
        }
        let shield_extent = 2.0 * self.shields.spawn_margin.max(self.shields.radius);
        if shield_extent >= self.canvas.x.min(self.canvas.y) {
            return Err(TuningError::CanvasTooSmall("shields"));
        }
        if 2.0 * self.player_radius >= self.canvas.x.min(self.canvas.y) {
            return Err(TuningError::CanvasTooSmall("player"));
        }
        if self.shields.duration_secs <= 0.0 || self.shields.respawn_secs <= 0.0 {
            return Err(TuningError::NonPositiveTimer);
        }
        if let FailurePolicy::RetrySameLevel { delay_secs } = self.failure_policy {
            if delay_secs < 0.0 {
                return Err(TuningError::NonPositiveTimer);
            }
        }
        if self.trail_length == 0 {
            return Err(TuningError::EmptyTrail);
        }
        if self.max_level == 0 {
            return Err(TuningError::NoLevels);
        }
        Ok(())
    }
}

/// Why a tuning cannot be used
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("canvas must have a positive size")]
    EmptyCanvas,
    #[error("obstacle size range is empty or non-positive")]
    BadObstacleSize,
    #[error("canvas is too small to place {0}")]
    CanvasTooSmall(&'static str),
    #[error("shield and restart timers must be positive")]
    NonPositiveTimer,
    #[error("trail length must be at least 1")]
    EmptyTrail,
    #[error("max level must be at least 1")]
    NoLevels,
}
