//! Player body
//!
//! Owns the vertical physics state and the derived hitbox. The body is
//! created once and reused across runs; the engine resets it on every
//! new run and mutates it exactly once per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::geom::rotate_points;
use crate::{clamp_dt, consts};

/// Hitbox outline of the crouched glider silhouette, as (x, y) fractions
/// of the scaled bounding square, wound clockwise from the head.
///
/// The asymmetry (outstretched front claw, trailing rear foot) is part
/// of the obstacle-clearance feel and must stay bit-exact; collision
/// behavior is tuned against these offsets.
const HITBOX_OUTLINE: [(f32, f32); 10] = [
    (0.35, 0.32), // head/neck
    (0.50, 0.25), // crown of the back
    (0.70, 0.33), // shoulder
    (0.97, 0.50), // front claw tip
    (0.95, 0.60), // underside of the claw
    (0.70, 0.60), // forearm
    (0.60, 0.60), // belly
    (0.30, 0.85), // rear leg
    (0.05, 0.75), // rear foot tip
    (0.15, 0.55), // haunch, closing back to the head
];

/// The player-controlled body: one vertical degree of freedom plus the
/// transient presentation state that feeds the hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Vertical offset from the mid-screen lane; larger = lower
    pub y: f32,
    /// Vertical speed; negative = upward
    pub velocity: f32,
    /// Hitbox/visual scale; pops to 1.2 briefly on jump
    pub scale: f32,
    /// Tilt in degrees, derived from the velocity sign each tick
    pub rotation: f32,
    /// Seconds left on the jump scale pop
    pub scale_pop_remaining: f32,
}

impl PlayerBody {
    pub fn new(cfg: &GameConfig) -> Self {
        let mut body = Self {
            y: 0.0,
            velocity: 0.0,
            scale: 1.0,
            rotation: 0.0,
            scale_pop_remaining: 0.0,
        };
        body.reset(cfg);
        body
    }

    /// Return to the run-start state. Idempotent.
    pub fn reset(&mut self, cfg: &GameConfig) {
        self.y = cfg.player_start_y();
        self.velocity = 0.0;
        self.scale = 1.0;
        self.rotation = 0.0;
        self.scale_pop_remaining = 0.0;
    }

    /// Apply a jump impulse: the velocity is replaced, not accumulated,
    /// so jump height is crisp and repeatable. Also starts the scale pop.
    pub fn jump(&mut self, impulse: f32) {
        self.velocity = impulse;
        self.scale = consts::JUMP_SCALE_POP;
        self.scale_pop_remaining = consts::JUMP_SCALE_POP_SECS;
    }

    /// Integrate gravity and position. Constants are tuned against a
    /// 60 Hz frame, so both terms scale by `dt * 60`; `dt` is clamped
    /// into the sane band first.
    pub fn apply_gravity(&mut self, gravity: f32, dt: f32) {
        let dt = clamp_dt(dt);
        self.velocity += gravity * dt * consts::DT_BASELINE;
        self.y += self.velocity * dt * consts::DT_BASELINE;
    }

    /// Tilt from the velocity sign only: any ascent pitches up, any
    /// descent (including zero velocity) pitches down. Magnitude never
    /// enters; smoothing is a presentation concern.
    pub fn update_rotation(&mut self) {
        self.rotation = if self.velocity < 0.0 {
            consts::ROTATION_ASCENDING_DEG
        } else {
            consts::ROTATION_DESCENDING_DEG
        };
    }

    /// Wind down the jump scale pop; the engine calls this every tick so
    /// all mutation stays inside the simulation step.
    pub fn decay_scale_pop(&mut self, dt: f32) {
        if self.scale_pop_remaining > 0.0 {
            self.scale_pop_remaining -= dt;
            if self.scale_pop_remaining <= 0.0 {
                self.scale_pop_remaining = 0.0;
                self.scale = 1.0;
            }
        }
    }

    /// Hitbox polygon in screen space for the body's current scale and
    /// rotation, centered on the player anchor column.
    pub fn hitbox(&self, cfg: &GameConfig) -> [Vec2; 10] {
        let center = Vec2::new(cfg.player_x(), self.y + cfg.screen_center_y());
        hitbox_polygon(center, cfg.player_size(), self.scale, self.rotation)
    }
}

/// Build the fixed-topology hitbox polygon: the outline fractions mapped
/// onto a `size * scale` square centered at `center`, rotated about that
/// center when `rotation_degrees` is non-zero.
pub fn hitbox_polygon(center: Vec2, size: f32, scale: f32, rotation_degrees: f32) -> [Vec2; 10] {
    let side = size * scale;
    let min = center - Vec2::splat(side / 2.0);

    let mut points = HITBOX_OUTLINE
        .map(|(fx, fy)| Vec2::new(min.x + side * fx, min.y + side * fy));
    rotate_points(&mut points, center, rotation_degrees);
    points
}
