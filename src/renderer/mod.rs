//! Rendering module
//!
//! The game describes each frame as a list of [`DrawCommand`]s; the shapes
//! module turns those into triangle lists for whichever backend the host has.

pub mod commands;
pub mod shapes;
pub mod vertex;

pub use commands::{DrawCommand, RenderOptions, render};
pub use shapes::{as_bytes, tessellate};
pub use vertex::{Palette, TrailStyle, Vertex};
