//! Procedural obstacle placement
//!
//! All draws go through the caller's RNG, so a given seed always produces
//! the same field and tests can inject a known source.

use rand::Rng;

use super::state::{Obstacle, ScreenBounds};
use crate::consts::*;
use crate::difficulty::DifficultyProfile;

/// Place `profile.obstacle_count` obstacles across the field between the top
/// margin and the platform clearance line.
pub fn generate_obstacles(
    rng: &mut impl Rng,
    profile: &DifficultyProfile,
    bounds: ScreenBounds,
    platform_y: f32,
) -> Vec<Obstacle> {
    (0..profile.obstacle_count)
        .map(|_| spawn_obstacle(rng, profile, bounds, platform_y))
        .collect()
}

fn spawn_obstacle(
    rng: &mut impl Rng,
    profile: &DifficultyProfile,
    bounds: ScreenBounds,
    platform_y: f32,
) -> Obstacle {
    let width = rng.random_range(OBSTACLE_MIN_WIDTH..=OBSTACLE_MAX_WIDTH);
    let height = rng.random_range(OBSTACLE_MIN_HEIGHT..=OBSTACLE_MAX_HEIGHT);
    let y = rng.random_range(OBSTACLE_TOP_MARGIN..(platform_y - OBSTACLE_PLATFORM_CLEARANCE));

    // The oscillation interval plus the obstacle body must fit on-screen
    let range_max = (bounds.width - width).max(OBSTACLE_MIN_RANGE);
    let range = rng.random_range(OBSTACLE_MIN_RANGE..=range_max);
    let base_x = rng.random_range(0.0..=(bounds.width - width - range).max(0.0));

    let speed = profile.obstacle_speed * rng.random_range(0.7..1.2);
    let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

    Obstacle {
        width,
        height,
        y,
        base_x,
        range,
        offset: 0.0,
        speed,
        dir,
    }
}
