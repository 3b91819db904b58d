//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `advance(dt)`
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod command;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{circle_rect_overlap, circles_overlap};
pub use command::{Command, apply_command};
pub use level::{checkpoint_level, generate_level, obstacle_count, orb_count, restart_level};
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, Orb, Particle, ParticleColor, Player, ShieldPickup,
};
pub use tick::{TickInput, advance};
