//! 2D geometry kernel
//!
//! Pure predicates shared by the simulation: axis-aligned rects,
//! polygon containment, rotation, and rects with triangular corner
//! cutouts (the pipe solids). Screen convention throughout: y grows
//! downward, so "top" edges have the smaller y.
//!
//! Degenerate inputs (empty point sets, polygons with fewer than three
//! vertices, zero-area rects) never panic; containment tests simply
//! return `false`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle stored as min/max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True for rects that enclose no area
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Inclusive containment; points exactly on an edge count as inside
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// AABB overlap test, used as a fast-reject before polygon tests
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min.x, self.min.y),
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            Vec2::new(self.max.x, self.max.y),
        ]
    }
}

/// Min/max bounds of a point set; empty input yields the zero rect.
pub fn bounding_box(points: &[Vec2]) -> Rect {
    let Some((&first, rest)) = points.split_first() else {
        return Rect::ZERO;
    };
    let mut min = first;
    let mut max = first;
    for p in rest {
        min = min.min(*p);
        max = max.max(*p);
    }
    Rect { min, max }
}

/// Even-odd ray-casting containment test.
///
/// The polygon is treated as implicitly closed. Fewer than three
/// vertices always yields `false`. A point exactly on an edge may land
/// on either side of the crossing test; the result is stable for a
/// given input but not specified, so callers must not rely on on-edge
/// behavior.
pub fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        if ((pi.y > p.y) != (pj.y > p.y))
            && (p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Rotate points in place about a pivot, angle in degrees.
///
/// Exactly zero degrees is a no-op so an unrotated polygon carries no
/// floating-point noise.
pub fn rotate_points(points: &mut [Vec2], center: Vec2, degrees: f32) {
    if degrees == 0.0 {
        return;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    for p in points.iter_mut() {
        let d = *p - center;
        *p = Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + center;
    }
}

/// Rect corners, in the order of [`Rect::corners`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

/// Axis-aligned rect with a triangular cutout at each corner.
///
/// `cuts` holds one leg length per corner, indexed by [`Corner`]; zero
/// leaves the corner intact. A cutout with leg `L` removes the points
/// whose distances along the two adjacent edges sum to `L` or less, so
/// a point exactly on the diagonal counts as removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutRect {
    pub rect: Rect,
    pub cuts: [f32; 4],
}

impl CutRect {
    pub fn new(rect: Rect, cuts: [f32; 4]) -> Self {
        Self { rect, cuts }
    }

    /// Plain rect with all four corners intact
    pub fn solid(rect: Rect) -> Self {
        Self {
            rect,
            cuts: [0.0; 4],
        }
    }

    fn corner_pos(&self, corner: Corner) -> Vec2 {
        self.rect.corners()[corner as usize]
    }

    /// True iff `p` is inside the rect and outside every corner cutout.
    ///
    /// Degenerate rects contain nothing.
    pub fn contains(&self, p: Vec2) -> bool {
        if self.rect.is_degenerate() || !self.rect.contains(p) {
            return false;
        }
        for corner in Corner::ALL {
            let leg = self.cuts[corner as usize];
            if leg <= 0.0 {
                continue;
            }
            let c = self.corner_pos(corner);
            let along_x = (p.x - c.x).abs();
            let along_y = (p.y - c.y).abs();
            if along_x + along_y <= leg {
                return false;
            }
        }
        true
    }

    /// Corner points of the notched region.
    ///
    /// Intact corners contribute the rect corner itself; cut corners
    /// contribute the two endpoints of the cutout diagonal, so a removed
    /// corner tip is never reported as part of the solid.
    pub fn corner_points(&self) -> Vec<Vec2> {
        let mut out = Vec::with_capacity(8);
        for corner in Corner::ALL {
            let c = self.corner_pos(corner);
            let leg = self.cuts[corner as usize];
            if leg <= 0.0 {
                out.push(c);
                continue;
            }
            // Diagonal endpoints sit `leg` along each edge, toward the
            // rect interior.
            let toward_x = if c.x == self.rect.min.x { 1.0 } else { -1.0 };
            let toward_y = if c.y == self.rect.min.y { 1.0 } else { -1.0 };
            out.push(Vec2::new(c.x + toward_x * leg, c.y));
            out.push(Vec2::new(c.x, c.y + toward_y * leg));
        }
        out
    }
}
