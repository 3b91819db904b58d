//! Vertex types and palettes for 2D rendering

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::tuning::RulesetKind;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Bytes between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Opaque color from 0xRRGGBB
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with alpha multiplied
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: [f32; 4],
    pub orb: [f32; 4],
    pub shield: [f32; 4],
    pub obstacle: [f32; 4],
    pub player: [f32; 4],
    pub player_shielded: [f32; 4],
    pub aura: [f32; 4],
    /// Distance from the player's edge to the aura ring
    pub aura_gap: f32,
    pub aura_width: f32,
    pub trail: [f32; 4],
    pub trail_style: TrailStyle,
}

/// How the player's trail is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrailStyle {
    /// Fading dots, one per trail point
    Dots { radius: f32 },
    /// Connected polyline
    Line { width: f32 },
}

impl Default for Palette {
    fn default() -> Self {
        Self::neon_dodge()
    }
}

impl Palette {
    pub const fn neon_dodge() -> Self {
        Self {
            background: rgb(0x05050d),
            orb: rgb(0xffd700),
            shield: rgb(0x00ffff),
            obstacle: rgb(0xff33ff),
            player: rgb(0xffffff),
            player_shielded: rgb(0xb7ffb7),
            aura: [183.0 / 255.0, 1.0, 183.0 / 255.0, 0.9],
            aura_gap: 10.0,
            aura_width: 4.0,
            trail: rgb(0x00ffff),
            trail_style: TrailStyle::Dots { radius: 4.0 },
        }
    }

    pub const fn patrick() -> Self {
        Self {
            background: rgb(0x000000),
            orb: rgb(0xff00ff),
            shield: rgb(0x00ffff),
            obstacle: rgb(0xff0000),
            player: rgb(0xffffff),
            player_shielded: rgb(0xffffff),
            aura: rgb(0x00ffff),
            aura_gap: 8.0,
            aura_width: 3.0,
            trail: rgb(0x00ffff),
            trail_style: TrailStyle::Line { width: 2.0 },
        }
    }

    pub const fn for_ruleset(ruleset: RulesetKind) -> Self {
        match ruleset {
            RulesetKind::NeonDodge => Self::neon_dodge(),
            RulesetKind::Patrick => Self::patrick(),
        }
    }
}
