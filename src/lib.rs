//! RPS Arena - rock, paper and scissors glyphs battling on a 2D surface
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, match status)
//! - `settings`: Match parameters, loadable from JSON
//! - `standings`: Outcome tally across many matches

pub mod settings;
pub mod sim;
pub mod standings;

pub use settings::{MotionSettings, Settings, SettingsError};
pub use standings::Standings;

/// Simulation configuration constants
pub mod consts {
    /// Default tokens per kind at match start
    pub const DEFAULT_TOKEN_COUNT: usize = 5;

    /// Default drawing surface dimensions (pixels)
    pub const DEFAULT_SURFACE_WIDTH: f32 = 640.0;
    pub const DEFAULT_SURFACE_HEIGHT: f32 = 480.0;

    /// Default glyph font size (pixels)
    pub const DEFAULT_FONT_PX: f32 = 28.0;

    /// Chance per token per tick that its velocity wanders
    pub const JITTER_CHANCE: f32 = 0.6;
    /// Maximum velocity change per axis when wandering
    pub const JITTER_MAGNITUDE: f32 = 0.25;

    /// Host loop gives up after this many ticks
    pub const DEFAULT_MAX_TICKS: u64 = 100_000;
}
