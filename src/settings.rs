//! Game settings and tunables
//!
//! Loaded from a JSON file; any field left out keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Mode;

/// Game settings/tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Fixed tick rate (Hz)
    pub tick_rate: u32,
    /// Arena width in pixels
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Bubble radius as a fraction of min(width, height)
    pub radius_fraction: f32,
    /// Attempts before a spawn gives up looking for free space
    pub placement_attempts: u32,

    // === Round ===
    /// Bubbles on screen at session start
    pub initial_bubbles: usize,
    /// Lower bound for the bubble-count indicator
    pub min_bubbles: usize,
    /// Upper bound for bubble count
    pub max_bubbles: usize,
    /// Correct answers between escalations
    pub escalation_interval: u32,
    /// Append a bubble on escalation (up to `max_bubbles`)
    pub grow_on_escalation: bool,
    /// Letter-case mode at session start
    pub initial_mode: Mode,

    // === Audio ===
    /// Cue length to assume when a sound is missing
    pub fallback_cue_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
            radius_fraction: BUBBLE_RADIUS_FRACTION,
            placement_attempts: PLACEMENT_ATTEMPTS,

            initial_bubbles: INITIAL_BUBBLES,
            min_bubbles: MIN_BUBBLES,
            max_bubbles: MAX_BUBBLES,
            escalation_interval: ESCALATION_INTERVAL,
            grow_on_escalation: false,
            initial_mode: Mode::Uppercase,

            fallback_cue_ms: FALLBACK_CUE_MS,
        }
    }
}

impl Settings {
    /// Arena bounds as a vector
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Shared bubble radius for this arena
    pub fn bubble_radius(&self) -> f32 {
        (self.width.min(self.height) * self.radius_fraction).floor()
    }

    /// Milliseconds covered by one tick
    pub fn tick_ms(&self) -> u32 {
        1000 / self.tick_rate
    }

    /// Per-tick travel distance for a unit heading
    pub fn bubble_speed(&self) -> f32 {
        self.height / (5.0 * self.tick_rate as f32)
    }

    /// Check ranges and relationships between fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 || self.tick_rate > 1000 {
            return Err(ConfigError::Invalid {
                field: "tick_rate",
                reason: format!("{} is outside 1..=1000", self.tick_rate),
            });
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!("{}x{} is not a positive size", self.width, self.height),
            });
        }
        if !(self.radius_fraction > 0.0 && self.radius_fraction <= 0.5) {
            return Err(ConfigError::Invalid {
                field: "radius_fraction",
                reason: format!("{} is outside (0, 0.5]", self.radius_fraction),
            });
        }
        if self.bubble_radius() < 1.0 {
            return Err(ConfigError::Invalid {
                field: "radius_fraction",
                reason: "bubble radius rounds to zero for this arena".to_string(),
            });
        }
        if self.min_bubbles == 0 || self.min_bubbles > self.max_bubbles {
            return Err(ConfigError::Invalid {
                field: "min_bubbles",
                reason: format!(
                    "need 1 <= min_bubbles ({}) <= max_bubbles ({})",
                    self.min_bubbles, self.max_bubbles
                ),
            });
        }
        if !(self.min_bubbles..=self.max_bubbles).contains(&self.initial_bubbles) {
            return Err(ConfigError::Invalid {
                field: "initial_bubbles",
                reason: format!(
                    "{} is outside {}..={}",
                    self.initial_bubbles, self.min_bubbles, self.max_bubbles
                ),
            });
        }
        if self.escalation_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "escalation_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.placement_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "placement_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings if the file exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("Using default settings");
            Ok(Self::default())
        }
    }
}
