//! Deterministic simulation module
//!
//! All game logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (population order, then slot order)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod kind;
pub mod runner;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bounds::{BoundingBox, FixedMetrics, GlyphMetrics, Surface, bounce, overlaps};
pub use kind::{Kind, RULES, Rule};
pub use runner::{MatchOutcome, play_match};
pub use state::{Elimination, Match, MatchStatus, Population, Token};
pub use tick::{TickReport, tick};
