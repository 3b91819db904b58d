//! Neon Dodge - A neon arcade dodger
//!
//! Steer a glowing orb around a rectangular arena, collect every gold orb to
//! clear the level and avoid the bouncing obstacles. Shield pickups grant a
//! temporary immunity.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, level generation, lifecycle)
//! - `tuning`: Data-driven game balance (both shipped rule sets)
//! - `renderer`: Draw-command description of a frame and its tessellation
//! - `session`: Fixed-timestep loop driver tying the collaborators together
//! - `audio`, `input`, `hud`, `settings`: collaborators around the simulation

pub mod audio;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{AudioManager, AudioSink, Cue};
pub use hud::Hud;
pub use session::Session;
pub use settings::{QualityPreset, Settings, SettingsError};
pub use tuning::{FailurePolicy, RulesetKind, Tuning};

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the game's speeds were authored at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame the loop will try to catch up on
    pub const MAX_FRAME_SECS: f32 = 0.1;
}
