//! Match settings
//!
//! Everything a host needs to set up a match: token count, surface size,
//! glyph font size, motion tuning, seed and the tick limit. Loaded from a
//! JSON file; any field left out takes its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{FixedMetrics, Surface};

/// Errors from loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Random wandering applied to token velocities each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Chance (0.0 - 1.0) that a token's velocity wanders this tick
    pub jitter_chance: f32,
    /// Maximum change per axis when it does
    pub jitter: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            jitter_chance: JITTER_CHANCE,
            jitter: JITTER_MAGNITUDE,
        }
    }
}

impl MotionSettings {
    /// No wandering: tokens keep their velocity until they hit a wall
    pub fn still() -> Self {
        Self {
            jitter_chance: 0.0,
            jitter: 0.0,
        }
    }

    /// True if velocities can change between bounces
    pub fn wanders(&self) -> bool {
        self.jitter_chance > 0.0 && self.jitter > 0.0 && self.jitter.is_finite()
    }
}

/// Match parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tokens per kind at match start
    pub count: usize,
    /// Drawing surface width (pixels)
    pub width: f32,
    /// Drawing surface height (pixels)
    pub height: f32,
    /// Glyph font size used for bounding boxes
    pub font_px: f32,
    /// Velocity wandering
    pub motion: MotionSettings,
    /// RNG seed; hosts pick one when absent
    pub seed: Option<u64>,
    /// Ticks after which the host abandons a match
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            count: DEFAULT_TOKEN_COUNT,
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            font_px: DEFAULT_FONT_PX,
            motion: MotionSettings::default(),
            seed: None,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values the simulation cannot run with.
    ///
    /// Zero counts and empty surfaces are allowed; they make an empty match.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let chance = self.motion.jitter_chance;
        if !chance.is_finite() || !(0.0..=1.0).contains(&chance) {
            return Err(SettingsError::Invalid {
                field: "motion.jitter_chance",
                reason: "must be between 0 and 1",
            });
        }
        if !self.motion.jitter.is_finite() || self.motion.jitter < 0.0 {
            return Err(SettingsError::Invalid {
                field: "motion.jitter",
                reason: "must be a non-negative number",
            });
        }
        if !self.font_px.is_finite() || self.font_px < 0.0 {
            return Err(SettingsError::Invalid {
                field: "font_px",
                reason: "must be a non-negative number",
            });
        }
        if self.max_ticks == 0 {
            return Err(SettingsError::Invalid {
                field: "max_ticks",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    pub fn surface(&self) -> Surface {
        Surface::new(self.width, self.height)
    }

    pub fn metrics(&self) -> FixedMetrics {
        FixedMetrics::new(self.font_px)
    }

    /// Copy with an explicit seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
