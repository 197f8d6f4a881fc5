//! Collision between the player hitbox and pipe solids
//!
//! Each pipe contributes two solid regions, an upper and a lower half
//! stacked around the gap. Every half is an axis-aligned rect with
//! triangular corner cutouts: the two corners bordering the gap mouth
//! carry the larger cutout leg, the two far corners the smaller one.
//!
//! The containment test is two-way: a hit is any hitbox vertex inside
//! the notched rect, or any corner of the notched region inside the
//! hitbox polygon. One direction alone lets a fast, thin, or rotated
//! polygon straddle a region without either containing the other's
//! vertices.

use glam::Vec2;

use super::pipes::Pipe;
use crate::config::GameConfig;
use crate::geom::{Corner, CutRect, Rect, point_in_polygon};

/// Build the upper and lower solid regions for a pipe.
///
/// The (upper half, gap, lower half) stack is centered at mid-screen
/// plus the pipe's vertical offset; `pipe.x` is the left edge.
pub fn solid_halves(pipe: &Pipe, cfg: &GameConfig) -> [CutRect; 2] {
    let near = cfg.cutout_near();
    let far = cfg.cutout_far();

    let stack_height = 2.0 * cfg.pipe_half_height + pipe.gap_height;
    let stack_top = cfg.screen_center_y() + pipe.vertical_offset - stack_height / 2.0;
    let left = pipe.x;
    let right = pipe.x + cfg.pipe_width;

    // Upper half: gap mouth along its bottom edge
    let mut upper_cuts = [0.0; 4];
    upper_cuts[Corner::BottomLeft as usize] = near;
    upper_cuts[Corner::BottomRight as usize] = near;
    upper_cuts[Corner::TopLeft as usize] = far;
    upper_cuts[Corner::TopRight as usize] = far;
    let upper = CutRect::new(
        Rect::new(
            Vec2::new(left, stack_top),
            Vec2::new(right, stack_top + cfg.pipe_half_height),
        ),
        upper_cuts,
    );

    // Lower half: gap mouth along its top edge
    let lower_top = stack_top + cfg.pipe_half_height + pipe.gap_height;
    let mut lower_cuts = [0.0; 4];
    lower_cuts[Corner::TopLeft as usize] = near;
    lower_cuts[Corner::TopRight as usize] = near;
    lower_cuts[Corner::BottomLeft as usize] = far;
    lower_cuts[Corner::BottomRight as usize] = far;
    let lower = CutRect::new(
        Rect::new(
            Vec2::new(left, lower_top),
            Vec2::new(right, lower_top + cfg.pipe_half_height),
        ),
        lower_cuts,
    );

    [upper, lower]
}

/// Two-way containment test between a hitbox polygon and one solid
/// half, with an AABB fast-reject up front.
pub fn hitbox_hits_half(polygon: &[Vec2], bounds: &Rect, half: &CutRect) -> bool {
    if half.rect.is_degenerate() || !bounds.intersects(&half.rect) {
        return false;
    }

    if polygon.iter().any(|&v| half.contains(v)) {
        return true;
    }

    half.corner_points()
        .iter()
        .any(|&corner| point_in_polygon(corner, polygon))
}

/// True iff the hitbox intersects either solid half of the pipe.
pub fn player_hits_pipe(polygon: &[Vec2], bounds: &Rect, pipe: &Pipe, cfg: &GameConfig) -> bool {
    solid_halves(pipe, cfg)
        .iter()
        .any(|half| hitbox_hits_half(polygon, bounds, half))
}
