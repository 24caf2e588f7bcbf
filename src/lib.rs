//! Gyro Bounce - a tilt-controlled ball-bounce arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `difficulty`: Named parameter presets selected once per session
//! - `highscores`: Best-score tracking over a key/value store boundary
//! - `input`: Tilt sample plumbing (latest-value register)
//! - `session`: Session state machine and frame driver

pub mod difficulty;
pub mod highscores;
pub mod input;
pub mod session;
pub mod sim;

pub use difficulty::{ConfigError, Difficulty, DifficultyProfile};
pub use highscores::{HighScores, KeyValueStore, MemoryStore, StoreError};
pub use input::{Subscription, TiltRegister};
pub use session::{RenderView, Session};

/// Game configuration constants
pub mod consts {
    /// Maximum integration step per frame; larger deltas are clamped to this
    /// so frame-rate hitches can't destabilize the simulation
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Default screen dimensions for hosts that don't supply their own
    pub const DEFAULT_SCREEN_WIDTH: f32 = 390.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 844.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 16.0;
    /// Ball spawns this far above the platform line
    pub const BALL_DROP_HEIGHT: f32 = 300.0;

    /// Platform defaults
    pub const PLATFORM_HEIGHT: f32 = 16.0;
    /// Platform top edge sits this far above the screen bottom
    pub const PLATFORM_BOTTOM_OFFSET: f32 = 200.0;

    /// Horizontal drive velocity per unit of tilt (px/s)
    pub const TILT_SENSITIVITY: f32 = 1000.0;
    /// Nominal sensor sampling interval
    pub const TILT_INTERVAL_MS: u32 = 10;

    /// Fraction of |vx| retained when bouncing off a side wall
    pub const SIDE_FRICTION: f32 = 0.85;
    /// Fraction of the platform drive velocity imparted to the ball on a bounce
    pub const DRIVE_TRANSFER: f32 = 0.35;

    /// Jitter bounds (px/s): horizontal on platform bounces, per-component on
    /// obstacle bounces
    pub const PLATFORM_JITTER: f32 = 18.0;
    pub const OBSTACLE_JITTER: f32 = 12.0;

    /// Obstacle generation ranges
    pub const OBSTACLE_MIN_WIDTH: f32 = 60.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 120.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 14.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 22.0;
    /// Obstacles spawn below this margin from the screen top
    pub const OBSTACLE_TOP_MARGIN: f32 = 80.0;
    /// Obstacles stay at least this far above the platform line
    pub const OBSTACLE_PLATFORM_CLEARANCE: f32 = 120.0;
    /// Minimum horizontal oscillation range
    pub const OBSTACLE_MIN_RANGE: f32 = 40.0;
}
