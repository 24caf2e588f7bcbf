//! Fixed timestep simulation tick
//!
//! Advances one frame of the game deterministically. The stage order is
//! load-bearing: each stage reads mutations made by the previous one within
//! the same frame.

use rand::Rng;

use super::collision::{circle_rect_collision, clamp, reflect_velocity};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest tilt sample (horizontal acceleration, device units)
    pub tilt: f32,
}

/// Advance the game state by one frame.
///
/// `dt` is clamped to [`MAX_FRAME_DT`] so a stalled frame can't blow up the
/// integration. Does nothing while the phase is GameOver; the session stays
/// frozen until reset.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let dt = dt.min(MAX_FRAME_DT);

    // 1. Platform follows the tilt signal, hard-clamped to the screen
    let drive_vx = input.tilt * TILT_SENSITIVITY;
    state.platform.x = clamp(
        state.platform.x + drive_vx * dt,
        0.0,
        state.bounds.width - state.platform.width,
    );

    // 2. Ball integration, semi-implicit Euler: velocity first, then position
    state.ball.vel.y += state.profile.gravity * dt;
    state.ball.pos += state.ball.vel * dt;

    let r = state.ball.radius;

    // 3. Side walls keep the ball on-screen, losing a fixed fraction of
    //    horizontal speed per hit
    if state.ball.pos.x - r < 0.0 {
        state.ball.pos.x = r;
        state.ball.vel.x = -state.ball.vel.x * SIDE_FRICTION;
    } else if state.ball.pos.x + r > state.bounds.width {
        state.ball.pos.x = state.bounds.width - r;
        state.ball.vel.x = -state.ball.vel.x * SIDE_FRICTION;
    }

    // 4. Top wall bounces with the profile's restitution
    if state.ball.pos.y - r < 0.0 {
        state.ball.pos.y = r;
        state.ball.vel.y = -state.ball.vel.y * state.profile.restitution;
    }

    // 5. Platform catch
    resolve_platform(state, drive_vx);

    // 6. Obstacles move, then the ball is pushed back out of any it overlaps
    resolve_obstacles(state, dt);

    // 7. Fully off the bottom edge ends the run
    if state.ball.pos.y - r > state.bounds.height {
        state.phase = GamePhase::GameOver;
        log::info!("ball lost, final score {}", state.score);
    }
}

/// Platform collision: the top edge is treated as a line segment. The ball
/// must have reached the line with its bottom edge, still have its top edge
/// at or above it, be moving downward, and overlap the platform span
/// horizontally.
fn resolve_platform(state: &mut GameState, drive_vx: f32) {
    const SKIN: f32 = 1e-4;

    let p = state.platform;
    let b = state.ball;
    let r = b.radius;

    let nearest_x = clamp(b.pos.x, p.x, p.right());
    let reached = b.pos.y + r >= p.y;
    let not_through = b.pos.y - r <= p.y;
    let within_span = (nearest_x - b.pos.x).abs() <= r + SKIN;

    if reached && not_through && within_span && b.vel.y > 0.0 {
        // Snap just above the surface and bounce upward
        state.ball.pos.y = p.y - r - 0.01;
        state.ball.vel.y = -b.vel.y.abs() * state.profile.restitution;

        // Carry part of the platform's drive into the ball, with a small
        // random nudge that breaks up periodic rallies
        let jitter = state.rng.random_range(-PLATFORM_JITTER..=PLATFORM_JITTER);
        state.ball.vel.x += drive_vx * DRIVE_TRANSFER + jitter;

        state.score += 1;
        log::debug!("platform bounce, score {}", state.score);
    }
}

/// Advance every obstacle along its oscillation, then resolve any overlap
/// with the ball: push out along the collision normal by the penetration
/// depth, reflect, and jitter both velocity components independently.
fn resolve_obstacles(state: &mut GameState, dt: f32) {
    let restitution = state.profile.restitution;

    for ob in &mut state.obstacles {
        ob.advance(dt);

        let result = circle_rect_collision(state.ball.pos, state.ball.radius, &ob.rect());
        if !result.hit {
            continue;
        }

        let depth = state.ball.radius - result.distance;
        state.ball.pos += result.normal * depth;
        state.ball.vel = reflect_velocity(state.ball.vel, result.normal, restitution);
        state.ball.vel.x += state.rng.random_range(-OBSTACLE_JITTER..=OBSTACLE_JITTER);
        state.ball.vel.y += state.rng.random_range(-OBSTACLE_JITTER..=OBSTACLE_JITTER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{Difficulty, DifficultyProfile};
    use crate::sim::state::{Obstacle, ScreenBounds};
    use glam::Vec2;

    const DT: f32 = 1.0 / 120.0;

    fn bounds() -> ScreenBounds {
        ScreenBounds {
            width: 400.0,
            height: 800.0,
        }
    }

    /// Profile with no obstacles so tests can stage collisions by hand
    fn bare_profile(gravity: f32, restitution: f32) -> DifficultyProfile {
        DifficultyProfile {
            gravity,
            restitution,
            platform_width_frac: 0.35,
            platform_width_max: 140.0,
            obstacle_count: 0,
            obstacle_speed: 0.0,
        }
    }

    #[test]
    fn test_platform_stays_clamped() {
        let mut state = GameState::new(bounds(), Difficulty::Easy.profile(), 3);
        for i in 0..2_000 {
            let tilt = if i % 2 == 0 { 5.0 } else { -5.0 };
            tick(&mut state, &TickInput { tilt }, DT);
            assert!(state.platform.x >= 0.0);
            assert!(state.platform.right() <= state.bounds.width);
        }
    }

    #[test]
    fn test_side_wall_reflection_scales_vx() {
        let mut state = GameState::new(bounds(), bare_profile(500.0, 1.0), 3);
        state.ball.pos = Vec2::new(state.ball.radius + 1.0, 300.0);
        state.ball.vel = Vec2::new(-200.0, 0.0);

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.ball.pos.x, state.ball.radius);
        assert!((state.ball.vel.x - 200.0 * SIDE_FRICTION).abs() < 1e-3);
        // Still on-screen
        assert!(state.ball.pos.x - state.ball.radius >= 0.0);
    }

    #[test]
    fn test_top_wall_reflection_uses_restitution() {
        let e = 1.02;
        let mut state = GameState::new(bounds(), bare_profile(500.0, e), 3);
        state.ball.pos = Vec2::new(200.0, state.ball.radius + 1.0);
        state.ball.vel = Vec2::new(0.0, -300.0);

        tick(&mut state, &TickInput::default(), DT);

        let vy_at_impact = 300.0 - 500.0 * DT;
        assert_eq!(state.ball.pos.y, state.ball.radius);
        assert!(state.ball.vel.y > 0.0);
        assert!((state.ball.vel.y - vy_at_impact * e).abs() < 1e-2);
    }

    #[test]
    fn test_straight_drop_bounce() {
        // Drop straight down onto a centered platform: vy flips sign scaled
        // by restitution, score becomes 1
        let e = 0.88;
        let g = 2000.0;
        let mut state = GameState::new(bounds(), bare_profile(g, e), 3);
        let p = state.platform;

        state.ball.pos = Vec2::new(p.x + p.width / 2.0, p.y - state.ball.radius - 1.0);
        state.ball.vel = Vec2::new(0.0, 200.0);

        tick(&mut state, &TickInput::default(), DT);

        let vy_at_impact = 200.0 + g * DT;
        assert!(state.ball.vel.y < 0.0);
        assert!((state.ball.vel.y.abs() - e * vy_at_impact).abs() < 1e-2);
        assert_eq!(state.score, 1);
        // Snapped just above the surface
        assert!(state.ball.pos.y + state.ball.radius <= p.y);
        // No drive, so only jitter may have leaked into vx
        assert!(state.ball.vel.x.abs() <= PLATFORM_JITTER + 1e-3);
    }

    #[test]
    fn test_no_score_moving_upward_through_platform() {
        let mut state = GameState::new(bounds(), bare_profile(0.0, 1.0), 3);
        let p = state.platform;

        state.ball.pos = Vec2::new(p.x + p.width / 2.0, p.y - 1.0);
        state.ball.vel = Vec2::new(0.0, -100.0);

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.score, 0);
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_score_not_incremented_twice_for_one_contact() {
        let mut state = GameState::new(bounds(), bare_profile(500.0, 0.88), 3);
        let p = state.platform;

        state.ball.pos = Vec2::new(p.x + p.width / 2.0, p.y - state.ball.radius - 1.0);
        state.ball.vel = Vec2::new(0.0, 200.0);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 1);

        // Rebounding upward: the next frames must not score again
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_drive_transfer_on_bounce() {
        let mut state = GameState::new(bounds(), bare_profile(500.0, 0.88), 3);
        let p = state.platform;

        state.ball.pos = Vec2::new(p.x + p.width / 2.0, p.y - state.ball.radius - 1.0);
        state.ball.vel = Vec2::new(0.0, 200.0);

        let tilt = 0.5;
        tick(&mut state, &TickInput { tilt }, DT);

        let expected = tilt * TILT_SENSITIVITY * DRIVE_TRANSFER;
        assert_eq!(state.score, 1);
        assert!((state.ball.vel.x - expected).abs() <= PLATFORM_JITTER + 1e-3);
    }

    #[test]
    fn test_obstacle_hit_pushes_ball_out_and_reflects() {
        let mut state = GameState::new(bounds(), bare_profile(0.0, 1.0), 3);
        state.obstacles.push(Obstacle {
            width: 80.0,
            height: 18.0,
            y: 310.0,
            base_x: 160.0,
            range: 40.0,
            offset: 0.0,
            speed: 0.0,
            dir: 1.0,
        });
        // Overlapping from above by 6px, at rest
        state.ball.pos = Vec2::new(200.0, 300.0);
        state.ball.vel = Vec2::ZERO;

        tick(&mut state, &TickInput::default(), DT);

        // Pushed up by the penetration depth, now just touching
        assert!((state.ball.pos.y - 294.0).abs() < 1e-3);
        // Reflection of a zero velocity is zero; only jitter remains
        assert!(state.ball.vel.x.abs() <= OBSTACLE_JITTER + 1e-3);
        assert!(state.ball.vel.y.abs() <= OBSTACLE_JITTER + 1e-3);
    }

    #[test]
    fn test_game_over_fires_once_and_freezes_state() {
        let mut state = GameState::new(bounds(), bare_profile(500.0, 1.0), 3);
        state.ball.pos = Vec2::new(200.0, state.bounds.height + state.ball.radius + 5.0);
        state.ball.vel = Vec2::new(40.0, 100.0);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Further ticks must not mutate anything
        let frozen = state.clone();
        for _ in 0..20 {
            tick(&mut state, &TickInput { tilt: 3.0 }, DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ball, frozen.ball);
        assert_eq!(state.platform, frozen.platform);
        assert_eq!(state.score, frozen.score);
    }

    #[test]
    fn test_not_over_while_partially_visible() {
        let mut state = GameState::new(bounds(), bare_profile(0.0, 1.0), 3);
        // Bottom edge below the screen but top edge still above it
        state.ball.pos = Vec2::new(200.0, state.bounds.height + state.ball.radius - 1.0);
        state.ball.vel = Vec2::ZERO;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = GameState::new(bounds(), bare_profile(0.0, 1.0), 3);
        state.ball.pos = Vec2::new(200.0, 300.0);
        state.ball.vel = Vec2::new(60.0, 0.0);

        // A one-second hitch must integrate as MAX_FRAME_DT
        tick(&mut state, &TickInput::default(), 1.0);
        assert!((state.ball.pos.x - (200.0 + 60.0 * MAX_FRAME_DT)).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let profile = Difficulty::Hard.profile();
        let mut a = GameState::new(bounds(), profile, 99_999);
        let mut b = GameState::new(bounds(), profile, 99_999);

        for i in 0..1_200 {
            let tilt = (i as f32 * 0.05).sin() * 0.6;
            let input = TickInput { tilt };
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }

        assert_eq!(a.ball, b.ball);
        assert_eq!(a.platform, b.platform);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
    }
}
