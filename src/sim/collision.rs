//! Axis-aligned bounding box collision
//!
//! The runner and every obstacle are plain rectangles. Collision always uses
//! the logical boxes; sprite padding is a rendering concern only.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawner::Obstacle;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Rectangle from its top-left corner and size
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap on both axes. Touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Scale about the center (used for sprite padding)
    pub fn scaled(&self, factor: f32) -> Aabb {
        let half = self.size() * factor * 0.5;
        let center = self.center();
        Aabb {
            min: center - half,
            max: center + half,
        }
    }
}

/// Does the runner's hitbox overlap this obstacle?
#[inline]
pub fn hits(player: &Aabb, obstacle: &Obstacle) -> bool {
    player.overlaps(&obstacle.hitbox())
}
