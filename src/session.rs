//! Game session state machine and frame driver
//!
//! Owns the simulation state, the tilt register, and the best-score tracker.
//! The host calls [`Session::frame`] at its own cadence; the session samples
//! the tilt register once, runs the physics step, and commits the score
//! exactly once on the Running -> GameOver transition. All persistence stays
//! here at the session boundary; the physics step itself does no I/O.

use serde::Serialize;

use crate::difficulty::{ConfigError, Difficulty};
use crate::highscores::{HighScores, KeyValueStore};
use crate::input::TiltRegister;
use crate::sim::state::{Ball, GamePhase, GameState, Obstacle, Platform, ScreenBounds};
use crate::sim::tick::{TickInput, tick};

/// Everything the render surface needs for one frame, borrowed read-only.
/// There is deliberately no mutation path back into the simulation.
#[derive(Debug, Serialize)]
pub struct RenderView<'a> {
    pub ball: &'a Ball,
    pub platform: &'a Platform,
    pub obstacles: &'a [Obstacle],
    pub score: u32,
    pub phase: GamePhase,
}

/// One play session at a fixed difficulty
#[derive(Debug)]
pub struct Session<S> {
    difficulty: Difficulty,
    state: GameState,
    tilt: TiltRegister,
    scores: HighScores<S>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(difficulty: Difficulty, bounds: ScreenBounds, seed: u64, store: S) -> Self {
        let state = GameState::new(bounds, difficulty.profile(), seed);
        log::info!("session start: {} (seed {seed})", difficulty.as_str());
        Self {
            difficulty,
            state,
            tilt: TiltRegister::new(),
            scores: HighScores::new(store),
        }
    }

    /// Like [`Session::new`], validating a difficulty name from the UI layer
    pub fn from_name(
        name: &str,
        bounds: ScreenBounds,
        seed: u64,
        store: S,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(Difficulty::from_name(name)?, bounds, seed, store))
    }

    /// Clone of the tilt slot for the host's sensor callback
    pub fn tilt_register(&self) -> TiltRegister {
        self.tilt.clone()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Recorded best for the active difficulty
    pub fn best_score(&self) -> u32 {
        self.scores.best(self.difficulty)
    }

    /// Run one frame: sample the tilt register once, step the simulation,
    /// and on the game-over edge attempt this run's single score commit.
    ///
    /// Safe to keep calling after game over; the step is a no-op then and
    /// the commit cannot re-fire.
    pub fn frame(&mut self, dt: f32) {
        let was_running = self.state.phase == GamePhase::Running;

        let input = TickInput {
            tilt: self.tilt.load(),
        };
        tick(&mut self.state, &input, dt);

        if was_running && self.state.phase == GamePhase::GameOver {
            self.scores.commit(self.difficulty, self.state.score);
        }
    }

    /// Reinitialize everything for a fresh run: entities respawned,
    /// obstacles regenerated under an advanced seed, score zero, phase
    /// Running.
    pub fn reset_game(&mut self) {
        let seed = self.state.seed.wrapping_add(1);
        self.state = GameState::new(self.state.bounds, self.difficulty.profile(), seed);
        log::info!("reset: {} (seed {seed})", self.difficulty.as_str());
    }

    /// Switch difficulty and start over. Validates first; an unknown name
    /// leaves the running session untouched.
    pub fn change_difficulty(&mut self, name: &str) -> Result<(), ConfigError> {
        self.difficulty = Difficulty::from_name(name)?;
        self.reset_game();
        Ok(())
    }

    /// Read-only view for the render surface, pulled once per frame
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            ball: &self.state.ball,
            platform: &self.state.platform,
            obstacles: &self.state.obstacles,
            score: self.state.score,
            phase: self.state.phase,
        }
    }
}
