//! Difficulty presets
//!
//! A difficulty is selected once per session and fixes every tunable the
//! physics step reads. Unknown names are rejected at this boundary rather
//! than silently falling back to a default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown difficulty `{0}` (expected `easy` or `hard`)")]
    UnknownDifficulty(String),
}

/// Named difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a difficulty name as supplied by the menu layer
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(name.to_string())),
        }
    }

    /// The parameter bundle for this level
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                gravity: 500.0,
                restitution: 1.02,
                platform_width_frac: 0.40,
                platform_width_max: 180.0,
                obstacle_count: 3,
                obstacle_speed: 90.0,
            },
            Difficulty::Hard => DifficultyProfile {
                gravity: 800.0,
                restitution: 0.96,
                platform_width_frac: 0.26,
                platform_width_max: 120.0,
                obstacle_count: 5,
                obstacle_speed: 150.0,
            },
        }
    }
}

/// Physics and generation parameters fixed for a session.
///
/// Restitution above 1 makes platform rallies gain energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Applied to top-wall, platform, and obstacle bounces
    pub restitution: f32,
    /// Platform width as a fraction of screen width
    pub platform_width_frac: f32,
    /// Absolute cap on the platform width (px)
    pub platform_width_max: f32,
    pub obstacle_count: u32,
    /// Base obstacle speed before the per-obstacle variation (px/s)
    pub obstacle_speed: f32,
}

impl DifficultyProfile {
    /// Platform width for a given screen: a fraction of the width, capped
    pub fn platform_width(&self, screen_width: f32) -> f32 {
        (screen_width * self.platform_width_frac).min(self.platform_width_max)
    }
}
