//! Geometry helpers for the simulation
//!
//! Axis-aligned rectangles and circle tests. Every clamp and overlap check in
//! the simulation goes through here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (min inclusive, max inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrink by `margin` on every side (negative grows)
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Grow by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        self.inset(-margin)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Nearest point inside the rectangle.
    ///
    /// Uses max/min rather than `f32::clamp` so a rectangle inverted by a large
    /// inset collapses onto its max edge instead of panicking.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.max(self.min).min(self.max)
    }

    /// Keep a circle of `radius` fully inside the rectangle
    pub fn clamp_circle(&self, center: Vec2, radius: f32) -> Vec2 {
        self.inset(radius).clamp_point(center)
    }
}

/// Circle-circle overlap (touching counts), no square root
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let combined = radius_a + radius_b;
    pos_a.distance_squared(pos_b) <= combined * combined
}

/// Circle-rectangle overlap via the closest point on the rectangle
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = rect.clamp_point(center);
    center.distance_squared(nearest) <= radius * radius
}

/// Unit vector from `from` toward `to` (zero if coincident)
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}
