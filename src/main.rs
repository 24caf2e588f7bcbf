//! Gyro Bounce entry point
//!
//! Headless demo driver: runs a few sessions against a scripted tilt feed
//! and prints the final frame as JSON. Usage:
//!
//! ```text
//! gyro-bounce [easy|hard] [seed]
//! ```

use std::process::ExitCode;

use gyro_bounce::consts::TILT_INTERVAL_MS;
use gyro_bounce::sim::{GamePhase, ScreenBounds};
use gyro_bounce::{MemoryStore, Session, Subscription, TiltRegister};

/// Frame cadence of the demo loop (the host owns this; the core only clamps)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Cap per run so a lucky rally can't spin forever
const MAX_RUN_SECONDS: f32 = 120.0;
/// Number of games played back to back, separated by resets
const RUNS: u32 = 3;

/// Scripted stand-in for the device accelerometer: a slow sweep with a
/// wobble on top, sampled on the same 10ms grid a real sensor would use.
struct ScriptedSensor {
    register: TiltRegister,
    elapsed_ms: u32,
}

impl ScriptedSensor {
    fn subscribe(register: TiltRegister) -> (Self, Subscription) {
        let sensor = Self {
            register,
            elapsed_ms: 0,
        };
        let guard = Subscription::new(|| log::debug!("tilt feed unsubscribed"));
        (sensor, guard)
    }

    /// Push samples for every sampling interval covered by one frame
    fn run_for(&mut self, dt: f32) {
        let target_ms = self.elapsed_ms + (dt * 1000.0) as u32;
        while self.elapsed_ms < target_ms {
            self.elapsed_ms += TILT_INTERVAL_MS;
            let t = self.elapsed_ms as f32 / 1000.0;
            let sample = (t * 0.9).sin() * 0.5 + (t * 3.7).sin() * 0.15;
            self.register.store(sample);
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty = args.next().unwrap_or_else(|| "easy".to_string());
    let seed: u64 = match args.next().map(|s| s.parse()).transpose() {
        Ok(seed) => seed.unwrap_or(1337),
        Err(_) => {
            eprintln!("seed must be an integer");
            return ExitCode::from(2);
        }
    };

    let mut session =
        match Session::from_name(&difficulty, ScreenBounds::default(), seed, MemoryStore::new()) {
            Ok(session) => session,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::from(2);
            }
        };

    let (mut sensor, _guard) = ScriptedSensor::subscribe(session.tilt_register());

    for run in 1..=RUNS {
        if run > 1 {
            session.reset_game();
        }

        let mut elapsed = 0.0f32;
        while session.phase() == GamePhase::Running && elapsed < MAX_RUN_SECONDS {
            sensor.run_for(FRAME_DT);
            // Raw frame delta; the core clamps to MAX_FRAME_DT on its own
            session.frame(FRAME_DT);
            elapsed += FRAME_DT;
        }

        log::info!(
            "run {run}/{RUNS}: score {}, best so far {}",
            session.score(),
            session.best_score()
        );
    }

    match serde_json::to_string_pretty(&session.render_view()) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("failed to encode final frame: {err}");
            return ExitCode::from(1);
        }
    }

    ExitCode::SUCCESS
}
