//! Simulation loop and game state machine
//!
//! The engine owns every piece of mutable game state and mutates it
//! only inside `tick`, which the host drives from its frame clock.
//! Input arrives as abstract taps; presentation reads plain-data
//! snapshots back. Nothing here blocks, suspends, or performs I/O
//! beyond the best-effort high-score save at run end.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::player_hits_pipe;
use super::pipes::{self, Pipe};
use super::player::PlayerBody;
use crate::config::{ConfigError, GameConfig};
use crate::feedback::Feedback;
use crate::geom::bounding_box;
use crate::store::{HIGH_SCORE_KEY, ScoreStore};
use crate::{clamp_dt, consts};

/// Current phase of the game
///
/// Exactly one phase is active; physics advances only while `Playing`.
/// `GameOver` is transient: it holds the final frame for a short
/// countdown (taps ignored), then the engine resets itself back to
/// `Menu` without further input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a tap to start a run
    Menu,
    /// Active run
    Playing,
    /// Run just ended; counting down back to Menu
    GameOver,
}

/// Player state handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Vertical offset from the mid-screen lane
    pub y: f32,
    pub scale: f32,
    /// Tilt in degrees
    pub rotation: f32,
}

/// Obstacle state handed to the presentation layer, left-to-right order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeSnapshot {
    pub x: f32,
    pub gap_height: f32,
    pub vertical_offset: f32,
}

/// The simulation engine and game controller.
///
/// Construct once with injected configuration, persistence, and
/// feedback; drive with [`Engine::handle_tap`] and [`Engine::tick`].
pub struct Engine {
    cfg: GameConfig,
    phase: GamePhase,
    player: PlayerBody,
    /// Live obstacles; insertion order = spawn order = screen order
    pipes: Vec<Pipe>,
    score: u32,
    high_score: u32,
    seed: u64,
    rng: Pcg32,
    time_ticks: u64,
    over_ticks: u32,
    has_played_once: bool,
    store: Box<dyn ScoreStore>,
    feedback: Box<dyn Feedback>,
}

impl Engine {
    /// Build an engine. Fails fast on invalid configuration; a failed
    /// high-score read is tolerated and treated as "no best yet".
    pub fn new(
        cfg: GameConfig,
        seed: u64,
        store: Box<dyn ScoreStore>,
        feedback: Box<dyn Feedback>,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let high_score = store
            .load(HIGH_SCORE_KEY)
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
            .unwrap_or(0);
        log::info!("engine ready: seed {seed}, best score {high_score}");

        let player = PlayerBody::new(&cfg);
        Ok(Self {
            cfg,
            phase: GamePhase::Menu,
            player,
            pipes: Vec::new(),
            score: 0,
            high_score,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            over_ticks: 0,
            has_played_once: false,
            store,
            feedback,
        })
    }

    /// Begin a new run. Only meaningful from the menu; no-op otherwise.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.player.reset(&self.cfg);
        self.score = 0;
        self.pipes.clear();
        let first = pipes::initial_pipe(self.score, &mut self.rng, &self.cfg);
        self.pipes.push(first);
        self.has_played_once = true;
        self.phase = GamePhase::Playing;
        log::info!("run started (seed {})", self.seed);
    }

    /// Context-sensitive tap: starts a run from the menu, jumps while
    /// playing, ignored during the game-over transition.
    pub fn handle_tap(&mut self) {
        match self.phase {
            GamePhase::Menu => self.start(),
            GamePhase::Playing => {
                self.player.jump(self.cfg.jump_impulse);
                self.feedback.on_jump();
            }
            GamePhase::GameOver => {}
        }
    }

    /// Advance the simulation by one frame of `dt` seconds.
    ///
    /// Physics runs only while `Playing`; during `GameOver` only the
    /// return-to-menu countdown advances, and in `Menu` this is a
    /// no-op. A stale tick delivered after a phase change therefore
    /// cannot corrupt state.
    pub fn tick(&mut self, dt: f32) {
        match self.phase {
            GamePhase::Menu => {}
            GamePhase::GameOver => {
                self.over_ticks = self.over_ticks.saturating_sub(1);
                if self.over_ticks == 0 {
                    self.return_to_menu();
                }
            }
            GamePhase::Playing => self.step(clamp_dt(dt)),
        }
    }

    /// One playing-phase tick, in strict order: integrate, scroll,
    /// prune, spawn, collide, boundary-check, score. Collision
    /// short-circuits the tick so a clipping frame can never also
    /// award a point, and difficulty inputs are the tick-start score
    /// so threshold crossings take effect next tick, not mid-tick.
    fn step(&mut self, dt: f32) {
        self.time_ticks += 1;
        let score_at_start = self.score;

        self.player.apply_gravity(self.cfg.gravity, dt);
        self.player.update_rotation();
        self.player.decay_scale_pop(dt);

        let speed = pipes::pipe_speed(score_at_start, &self.cfg);
        pipes::advance(&mut self.pipes, speed, dt);
        pipes::prune(&mut self.pipes, &self.cfg);
        pipes::spawn_if_due(&mut self.pipes, score_at_start, &mut self.rng, &self.cfg);

        let polygon = self.player.hitbox(&self.cfg);
        let bounds = bounding_box(&polygon);
        let collided = self
            .pipes
            .iter()
            .any(|pipe| player_hits_pipe(&polygon, &bounds, pipe, &self.cfg));
        if collided {
            self.end_run();
            return;
        }

        if self.boundary_breached() {
            self.end_run();
            return;
        }

        let player_x = self.cfg.player_x();
        for pipe in &mut self.pipes {
            if !pipe.passed && pipe.x + self.cfg.pipe_width < player_x {
                pipe.passed = true;
                self.score += 1;
                self.feedback.on_score_increment(self.score);
            }
        }
    }

    /// Top/bottom breach with a small margin, in screen space
    fn boundary_breached(&self) -> bool {
        let screen_y = self.player.y + self.cfg.screen_center_y();
        let margin = self.cfg.boundary_margin();
        screen_y + margin > self.cfg.screen_height || screen_y - margin < 0.0
    }

    /// End the run: emit feedback, persist the best score if beaten,
    /// hold the final frame through the game-over countdown.
    fn end_run(&mut self) {
        self.feedback.on_collision();
        if self.score > self.high_score {
            self.high_score = self.score;
            if self.store.save(HIGH_SCORE_KEY, u64::from(self.high_score)) {
                log::info!("new best score {}", self.high_score);
            } else {
                log::warn!("best score {} not persisted", self.high_score);
            }
        }
        log::info!(
            "run ended after {} ticks: score {}, best {}",
            self.time_ticks,
            self.score,
            self.high_score
        );
        self.over_ticks = consts::GAME_OVER_TICKS;
        if self.over_ticks == 0 {
            self.return_to_menu();
        } else {
            self.phase = GamePhase::GameOver;
        }
    }

    fn return_to_menu(&mut self) {
        self.player.reset(&self.cfg);
        self.pipes.clear();
        self.score = 0;
        self.phase = GamePhase::Menu;
    }

    // --- read-only observers for the presentation layer ---

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether any run has been started since construction
    #[inline]
    pub fn has_played_once(&self) -> bool {
        self.has_played_once
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn player_snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            y: self.player.y,
            scale: self.player.scale,
            rotation: self.player.rotation,
        }
    }

    /// Live obstacles, left to right
    pub fn pipe_snapshot(&self) -> Vec<PipeSnapshot> {
        self.pipes
            .iter()
            .map(|p| PipeSnapshot {
                x: p.x,
                gap_height: p.gap_height,
                vertical_offset: p.vertical_offset,
            })
            .collect()
    }
}
