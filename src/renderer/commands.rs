//! Frame description
//!
//! `render` is a pure function of the game state: it never mutates anything
//! (particle ageing happens in the simulation), so calling it twice for the
//! same state yields the same commands.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vertex::{Palette, TrailStyle, with_alpha};
use crate::settings::Settings;
use crate::sim::{GameState, ParticleColor};

const ORB_GLOW: f32 = 18.0;
const SHIELD_GLOW: f32 = 20.0;
const OBSTACLE_GLOW: f32 = 12.0;
const PLAYER_GLOW: f32 = 22.0;
const PARTICLE_RADIUS: f32 = 3.0;

/// One primitive, in canvas pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
        /// Blur radius of the neon halo (0 = none)
        glow: f32,
    },
    Rect {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
        glow: f32,
    },
    /// Stroked circle; `radius` is the stroke's center line
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: [f32; 4],
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
}

/// Visual toggles applied on top of the state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub trails: bool,
    pub particles: bool,
    pub palette: Palette,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trails: true,
            particles: true,
            palette: Palette::default(),
        }
    }
}

impl RenderOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            trails: settings.trails,
            particles: settings.effective_particles(),
            palette: Palette::for_ruleset(settings.ruleset),
        }
    }
}

/// Describe the current frame, back to front
pub fn render(state: &GameState, options: &RenderOptions) -> Vec<DrawCommand> {
    let palette = &options.palette;
    let mut out = Vec::with_capacity(
        2 + state.orbs.len() + state.shields.len() + state.obstacles.len() + state.particles.len() + state.player.trail.len() + 1,
    );

    out.push(DrawCommand::Clear {
        color: palette.background,
    });

    for orb in state.orbs.iter().filter(|o| !o.collected) {
        out.push(DrawCommand::Circle {
            center: orb.pos,
            radius: orb.radius,
            color: palette.orb,
            glow: ORB_GLOW,
        });
    }

    for shield in state.shields.iter().filter(|s| s.active) {
        out.push(DrawCommand::Circle {
            center: shield.pos,
            radius: shield.radius,
            color: palette.shield,
            glow: SHIELD_GLOW,
        });
    }

    for obstacle in &state.obstacles {
        out.push(DrawCommand::Rect {
            min: obstacle.pos,
            size: obstacle.size,
            color: palette.obstacle,
            glow: OBSTACLE_GLOW,
        });
    }

    if options.particles {
        for p in &state.particles {
            let base = match p.color {
                ParticleColor::Orb => palette.orb,
                ParticleColor::Shield => palette.shield,
            };
            out.push(DrawCommand::Circle {
                center: p.pos,
                radius: PARTICLE_RADIUS,
                color: with_alpha(base, p.alpha()),
                glow: 0.0,
            });
        }
    }

    if options.trails {
        push_trail(&mut out, state, palette);
    }

    let player = &state.player;
    out.push(DrawCommand::Circle {
        center: player.pos,
        radius: player.radius,
        color: if player.shield_active {
            palette.player_shielded
        } else {
            palette.player
        },
        glow: PLAYER_GLOW,
    });

    if player.shield_active {
        out.push(DrawCommand::Ring {
            center: player.pos,
            radius: player.radius + palette.aura_gap,
            width: palette.aura_width,
            color: palette.aura,
        });
    }

    out
}

/// Oldest point is faintest
fn push_trail(out: &mut Vec<DrawCommand>, state: &GameState, palette: &Palette) {
    let trail = &state.player.trail;
    let len = trail.len() as f32;
    match palette.trail_style {
        TrailStyle::Dots { radius } => {
            for (i, &point) in trail.iter().enumerate() {
                out.push(DrawCommand::Circle {
                    center: point,
                    radius,
                    color: with_alpha(palette.trail, i as f32 / len),
                    glow: 0.0,
                });
            }
        }
        TrailStyle::Line { width } => {
            for (from, to) in trail.iter().zip(trail.iter().skip(1)) {
                out.push(DrawCommand::Line {
                    from: *from,
                    to: *to,
                    width,
                    color: palette.trail,
                });
            }
        }
    }
}
