//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn;
use crate::consts::*;
use crate::difficulty::DifficultyProfile;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// The ball fell off the bottom; entity state is frozen until reset
    GameOver,
}

/// Logical play-field dimensions, fixed for the session's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Constant for the session's lifetime
    pub radius: f32,
}

impl Ball {
    /// Spawn position: centered horizontally, a fixed drop above the platform
    pub fn spawn(bounds: ScreenBounds, platform_y: f32) -> Self {
        Self {
            pos: Vec2::new(bounds.width / 2.0, platform_y - BALL_DROP_HEIGHT),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }
}

/// The player's platform. Only `x` moves; `y` and `width` are fixed at
/// session start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    /// Top edge of the platform
    pub y: f32,
    pub width: f32,
}

impl Platform {
    /// Centered platform sized from the active profile
    pub fn spawn(bounds: ScreenBounds, platform_y: f32, profile: &DifficultyProfile) -> Self {
        let width = profile.platform_width(bounds.width);
        Self {
            x: (bounds.width - width) / 2.0,
            y: platform_y,
            width,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// A moving obstacle oscillating horizontally within a fixed range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub width: f32,
    pub height: f32,
    /// Vertical position, fixed at creation
    pub y: f32,
    /// Left end of the oscillation interval
    pub base_x: f32,
    /// Distance traveled before reversing
    pub range: f32,
    /// Current offset within `[0, range]`
    pub offset: f32,
    /// Horizontal speed (px/s)
    pub speed: f32,
    /// +1.0 or -1.0
    pub dir: f32,
}

impl Obstacle {
    /// Current left edge
    #[inline]
    pub fn x(&self) -> f32 {
        self.base_x + self.offset
    }

    /// Collision shape at the current position
    pub fn rect(&self) -> Rect {
        Rect::new(self.x(), self.y, self.width, self.height)
    }

    /// Advance along the oscillation; clamp at either end and flip direction
    /// exactly there, never mid-range.
    pub fn advance(&mut self, dt: f32) {
        self.offset += self.dir * self.speed * dt;
        if self.offset <= 0.0 {
            self.offset = 0.0;
            self.dir = 1.0;
        } else if self.offset >= self.range {
            self.offset = self.range;
            self.dir = -1.0;
        }
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub bounds: ScreenBounds,
    /// Copy of the profile selected at session start; immutable per session
    pub profile: DifficultyProfile,
    /// Seed this state was built from, for reproducing a run
    pub seed: u64,
    pub rng: Pcg32,
    pub ball: Ball,
    pub platform: Platform,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Build a fresh state: entities at spawn, obstacles regenerated, score
    /// zero, phase Running. This is the whole of the reset path; nothing
    /// survives from a previous run.
    pub fn new(bounds: ScreenBounds, profile: DifficultyProfile, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platform_y = bounds.height - PLATFORM_BOTTOM_OFFSET;
        let obstacles = spawn::generate_obstacles(&mut rng, &profile, bounds, platform_y);

        Self {
            bounds,
            profile,
            seed,
            rng,
            ball: Ball::spawn(bounds, platform_y),
            platform: Platform::spawn(bounds, platform_y, &profile),
            obstacles,
            score: 0,
            phase: GamePhase::Running,
        }
    }
}
