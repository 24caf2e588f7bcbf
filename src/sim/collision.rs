//! Collision detection and response for the play field
//!
//! The ball is a circle; everything it can hit (platform, obstacles) is an
//! axis-aligned rectangle, so the whole collision story is the nearest-point
//! circle-vs-rect test plus an impulse reflection scaled by restitution.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Result of a circle-vs-rect check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether the circle overlaps the rectangle
    pub hit: bool,
    /// Surface normal pointing from the rectangle toward the circle center
    pub normal: Vec2,
    /// Distance from the rectangle's nearest point to the circle center
    pub distance: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            distance: f32::MAX,
        }
    }
}

#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Nearest point on (or in) a rectangle to `point`, clamping each axis
/// independently
#[inline]
pub fn nearest_point_on_rect(point: Vec2, rect: &Rect) -> Vec2 {
    Vec2::new(
        clamp(point.x, rect.x, rect.x + rect.w),
        clamp(point.y, rect.y, rect.y + rect.h),
    )
}

/// Check a circle against a rectangle.
///
/// Collision holds iff the squared distance from the rectangle's nearest
/// point to the circle center is below radius². When the center is inside
/// the rectangle the direction is undefined; the normal falls back to
/// straight up `(0, -1)` so no NaN ever leaves this function. Approximate
/// for deep penetration, which is fine while obstacles stay thin relative
/// to the ball.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    let nearest = nearest_point_on_rect(center, rect);
    let delta = center - nearest;
    let dist_sq = delta.length_squared();

    if dist_sq >= radius * radius {
        return CollisionResult::miss();
    }

    const EPS: f32 = 1e-6;
    let (normal, distance) = if dist_sq <= EPS {
        // Center is on or inside the rect; degenerate direction
        (Vec2::new(0.0, -1.0), 0.0)
    } else {
        let distance = dist_sq.sqrt();
        (delta / distance, distance)
    };

    CollisionResult {
        hit: true,
        normal,
        distance,
    }
}

/// Reflect velocity off a surface with restitution `e`:
/// `v' = v - (1 + e) * (v . n) * n`
///
/// Elastic at `e = 1`, lossy below, amplifying above. `normal` must be
/// unit length.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    velocity - (1.0 + restitution) * velocity.dot(normal) * normal
}


#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Bounce law: the post-collision normal component is the negated
        // pre-collision component scaled by restitution; tangential motion
        // is untouched.
        #[test]
        fn reflection_obeys_bounce_law(
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            angle in 0.0f32..std::f32::consts::TAU,
            e in 0.1f32..1.5,
        ) {
            let v = Vec2::new(vx, vy);
            let n = Vec2::new(angle.cos(), angle.sin());
            let t = Vec2::new(-n.y, n.x);
            let r = reflect_velocity(v, n, e);

            let pre = v.dot(n);
            let post = r.dot(n);
            prop_assert!((post + e * pre).abs() <= 0.05 + 1e-3 * pre.abs());
            prop_assert!((r.dot(t) - v.dot(t)).abs() <= 0.05);
        }

        #[test]
        fn clamp_result_stays_in_bounds(
            v in -1e6f32..1e6,
            lo in -100.0f32..0.0,
            hi in 0.0f32..100.0,
        ) {
            let c = clamp(v, lo, hi);
            prop_assert!(c >= lo);
            prop_assert!(c <= hi);
        }
    }
}
