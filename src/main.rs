//! Sloth Hop headless demo driver
//!
//! Stands in for a presentation layer: wires the engine to a JSON-file
//! score store and a logging feedback sink, then plays one run at a
//! fixed 60 Hz with a naive autopilot that taps whenever the player
//! sits below the oncoming gap. Useful for watching the simulation and
//! difficulty ramp without any rendering.
//!
//! Usage: `sloth-hop [seed]`

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use sloth_hop::{Engine, Feedback, GameConfig, GamePhase, JsonFileStore};

const DT: f32 = 1.0 / 60.0;
const MAX_TICKS: u32 = 60 * 60 * 10; // ten simulated minutes

/// Feedback sink that narrates gameplay through the logger
struct LogFeedback;

impl Feedback for LogFeedback {
    fn on_jump(&mut self) {
        log::debug!("hop");
    }

    fn on_score_increment(&mut self, score: u32) {
        if score % 10 == 0 {
            log::info!("milestone reached: {score}");
        } else {
            log::info!("score: {score}");
        }
    }

    fn on_collision(&mut self) {
        log::info!("run over");
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
    };

    let store = JsonFileStore::open("sloth-hop-scores.json");
    let mut engine = Engine::new(
        GameConfig::default(),
        seed,
        Box::new(store),
        Box::new(LogFeedback),
    )?;

    engine.handle_tap();
    let mut final_score = 0;
    for _ in 0..MAX_TICKS {
        if engine.phase() == GamePhase::Playing {
            autopilot(&mut engine);
        }
        engine.tick(DT);
        match engine.phase() {
            GamePhase::GameOver => final_score = engine.score(),
            GamePhase::Menu => break,
            GamePhase::Playing => {}
        }
    }

    println!(
        "seed {seed}: score {final_score}, best {}",
        engine.high_score()
    );
    Ok(())
}

/// Tap whenever the player hangs below the center of the nearest gap
/// still ahead of it. Crude, but holds the hover well enough to show
/// the speed and gap ramps.
fn autopilot(engine: &mut Engine) {
    let player_x = engine.config().player_x();
    let pipe_width = engine.config().pipe_width;
    let player_y = engine.player_snapshot().y;

    let target_y = engine
        .pipe_snapshot()
        .iter()
        .find(|p| p.x + pipe_width >= player_x)
        .map(|p| p.vertical_offset)
        .unwrap_or(0.0);

    if player_y > target_y {
        engine.handle_tap();
    }
}
