//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (the host clamps and supplies `dt`)
//! - Seeded RNG only
//! - No I/O, rendering, or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Rect, circle_rect_collision, clamp, nearest_point_on_rect, reflect_velocity};
pub use spawn::generate_obstacles;
pub use state::{Ball, GamePhase, GameState, Obstacle, Platform, ScreenBounds};
pub use tick::{TickInput, tick};
