//! Obstacle generation and difficulty scaling
//!
//! Pipes are immutable once spawned except for `x` (scroll) and
//! `passed` (one-shot scoring flag). The engine owns the live list;
//! insertion order is spawn order is left-to-right screen order, and
//! the functions here preserve it.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts;

/// A gated obstacle: two solid halves around a passable gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge of the solid, scrolls left every tick
    pub x: f32,
    /// Height of the passable gap
    pub gap_height: f32,
    /// Gap-center offset from mid-screen; positive = lower
    pub vertical_offset: f32,
    /// One-shot scoring flag; monotonic false -> true
    pub passed: bool,
}

/// Discrete difficulty step for a score.
///
/// Zero at and below the threshold; past it the level climbs one step
/// per `difficulty_step` points, starting with the very first point
/// above the threshold, and saturates at `max_difficulty_level`.
pub fn difficulty_level(score: u32, cfg: &GameConfig) -> u32 {
    if score <= cfg.difficulty_threshold {
        return 0;
    }
    let past = score - cfg.difficulty_threshold - 1;
    (past / cfg.difficulty_step + 1).min(cfg.max_difficulty_level)
}

/// Gap size for a score: linear interpolation from the base (easy)
/// fraction of screen height down to the min (hard) fraction, in
/// `max_difficulty_level` discrete steps.
pub fn gap_height(score: u32, cfg: &GameConfig) -> f32 {
    let base = cfg.screen_height * cfg.base_gap_fraction;
    if cfg.max_difficulty_level == 0 {
        return base;
    }
    let min = cfg.screen_height * cfg.min_gap_fraction;
    let level = difficulty_level(score, cfg) as f32;
    base - level * (base - min) / cfg.max_difficulty_level as f32
}

/// Scroll speed for a score: the base speed through the threshold, then
/// a fixed increment per `difficulty_step` points. Deliberately
/// uncapped; very high scores scroll arbitrarily fast.
pub fn pipe_speed(score: u32, cfg: &GameConfig) -> f32 {
    if score <= cfg.speed_threshold {
        return cfg.base_pipe_speed;
    }
    let steps = (score - cfg.speed_threshold) / cfg.difficulty_step;
    cfg.base_pipe_speed + steps as f32 * cfg.speed_increment
}

/// Scroll every pipe left by the current speed, delta-time scaled
/// against the 60 Hz baseline.
pub fn advance(pipes: &mut [Pipe], speed: f32, dt: f32) {
    let distance = speed * dt * consts::DT_BASELINE;
    for pipe in pipes {
        pipe.x -= distance;
    }
}

/// Drop pipes whose trailing edge has scrolled past the removal
/// threshold. Order-preserving.
pub fn prune(pipes: &mut Vec<Pipe>, cfg: &GameConfig) {
    let removal_x = cfg.removal_x();
    pipes.retain(|p| p.x + cfg.pipe_width >= removal_x);
}

/// Append at most one new pipe, once the rightmost live pipe has
/// scrolled past the spawn threshold. Returns whether a spawn happened.
///
/// An empty list never spawns; the engine seeds the first pipe of a run
/// explicitly.
pub fn spawn_if_due(pipes: &mut Vec<Pipe>, score: u32, rng: &mut Pcg32, cfg: &GameConfig) -> bool {
    let Some(last) = pipes.last() else {
        return false;
    };
    if last.x >= cfg.spawn_threshold_x() {
        return false;
    }
    let pipe = new_pipe(cfg.spawn_x(), score, rng, cfg);
    pipes.push(pipe);
    true
}

/// The single pipe seeded at the start of a run, placed a quarter
/// screen beyond the right edge.
pub fn initial_pipe(score: u32, rng: &mut Pcg32, cfg: &GameConfig) -> Pipe {
    new_pipe(cfg.first_pipe_x(), score, rng, cfg)
}

fn new_pipe(x: f32, score: u32, rng: &mut Pcg32, cfg: &GameConfig) -> Pipe {
    let band = cfg.screen_height * cfg.vertical_offset_fraction;
    Pipe {
        x,
        gap_height: gap_height(score, cfg),
        vertical_offset: rng.random_range(-band..=band),
        passed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn cfg() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_difficulty_staircase_plateaus() {
        let cfg = cfg();
        // threshold=10, step=5, max=4
        assert_eq!(difficulty_level(0, &cfg), 0);
        assert_eq!(difficulty_level(10, &cfg), 0);
        assert_eq!(difficulty_level(11, &cfg), 1);
        assert_eq!(difficulty_level(15, &cfg), 1);
        assert_eq!(difficulty_level(16, &cfg), 2);
        assert_eq!(difficulty_level(25, &cfg), 3);
        assert_eq!(difficulty_level(26, &cfg), 4);
        // saturates
        assert_eq!(difficulty_level(1000, &cfg), 4);
    }

    #[test]
    fn test_gap_height_staircase() {
        let cfg = cfg();
        assert_eq!(gap_height(5, &cfg), gap_height(10, &cfg));
        assert!(gap_height(10, &cfg) > gap_height(11, &cfg));
        assert_eq!(gap_height(11, &cfg), gap_height(15, &cfg));
        assert!(gap_height(15, &cfg) > gap_height(16, &cfg));

        // exactly max_level + 1 distinct plateaus over the whole range
        let mut plateaus: Vec<f32> = (0..100).map(|s| gap_height(s, &cfg)).collect();
        plateaus.dedup();
        assert_eq!(plateaus.len(), cfg.max_difficulty_level as usize + 1);

        // endpoints
        assert_eq!(gap_height(0, &cfg), cfg.screen_height * cfg.base_gap_fraction);
        assert_eq!(gap_height(100, &cfg), cfg.screen_height * cfg.min_gap_fraction);
    }

    #[test]
    fn test_pipe_speed_uncapped_ramp() {
        let cfg = cfg();
        assert_eq!(pipe_speed(0, &cfg), cfg.base_pipe_speed);
        assert_eq!(pipe_speed(10, &cfg), cfg.base_pipe_speed);
        // first step lands a full difficulty_step past the threshold
        assert_eq!(pipe_speed(14, &cfg), cfg.base_pipe_speed);
        assert_eq!(pipe_speed(15, &cfg), cfg.base_pipe_speed + cfg.speed_increment);
        assert_eq!(pipe_speed(20, &cfg), cfg.base_pipe_speed + 2.0 * cfg.speed_increment);
        // no cap
        let fast = pipe_speed(510, &cfg);
        assert_eq!(fast, cfg.base_pipe_speed + 100.0 * cfg.speed_increment);
    }

    proptest! {
        /// The gap never widens as the score rises.
        #[test]
        fn prop_gap_non_increasing(score in 0u32..200) {
            let cfg = cfg();
            prop_assert!(gap_height(score, &cfg) >= gap_height(score + 1, &cfg));
        }
    }

    #[test]
    fn test_advance_scales_with_dt() {
        let mut pipes = vec![Pipe { x: 100.0, gap_height: 200.0, vertical_offset: 0.0, passed: false }];
        advance(&mut pipes, 4.0, 1.0 / 60.0);
        assert!((pipes[0].x - 96.0).abs() < 1e-4);
        // half-rate frame moves twice the distance
        advance(&mut pipes, 4.0, 1.0 / 30.0);
        assert!((pipes[0].x - 88.0).abs() < 1e-4);
    }

    #[test]
    fn test_prune_keeps_order_and_live_pipes() {
        let cfg = cfg();
        let mk = |x: f32| Pipe { x, gap_height: 200.0, vertical_offset: 0.0, passed: true };
        // removal_x = -50, pipe_width = 80: trailing edge below -50 goes
        let mut pipes = vec![mk(-200.0), mk(-100.0), mk(50.0), mk(300.0)];
        prune(&mut pipes, &cfg);
        assert_eq!(pipes.iter().map(|p| p.x).collect::<Vec<_>>(), vec![-100.0, 50.0, 300.0]);
    }

    #[test]
    fn test_spawn_appends_one_at_right_edge() {
        let cfg = cfg();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pipes = vec![Pipe { x: 250.0, gap_height: 280.0, vertical_offset: 0.0, passed: false }];

        // rightmost still right of the threshold: nothing spawns
        assert!(!spawn_if_due(&mut pipes, 0, &mut rng, &cfg));
        assert_eq!(pipes.len(), 1);

        pipes[0].x = 150.0;
        assert!(spawn_if_due(&mut pipes, 0, &mut rng, &cfg));
        assert_eq!(pipes.len(), 2);
        let spawned = pipes[1];
        assert_eq!(spawned.x, cfg.spawn_x());
        assert!(!spawned.passed);
        let band = cfg.screen_height * cfg.vertical_offset_fraction;
        assert!(spawned.vertical_offset.abs() <= band);
        // strict left-to-right ordering
        assert!(pipes[0].x < pipes[1].x);

        // exactly one per call even when far past the threshold
        assert!(!spawn_if_due(&mut pipes, 0, &mut rng, &cfg));
    }

    #[test]
    fn test_spawn_noop_on_empty_list() {
        let cfg = cfg();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pipes = Vec::new();
        assert!(!spawn_if_due(&mut pipes, 0, &mut rng, &cfg));
        assert!(pipes.is_empty());
    }

    #[test]
    fn test_seeded_offsets_are_deterministic() {
        let cfg = cfg();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for score in 0..20 {
            let pa = initial_pipe(score, &mut a, &cfg);
            let pb = initial_pipe(score, &mut b, &cfg);
            assert_eq!(pa, pb);
        }
    }
}
