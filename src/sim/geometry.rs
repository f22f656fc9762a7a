//! Playfield geometry
//!
//! Screen-space coordinates: origin at the top-left, y grows downward.
//! The running surface sits `ground_height` above the bottom edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::Stance;
use crate::tuning::Tuning;

/// Dimensions derived from the tuning and the current playfield width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
    /// Left edge of the runner (fixed)
    pub player_x: f32,
    pub standing: Vec2,
    pub crouching: Vec2,
}

impl Geometry {
    pub fn new(tuning: &Tuning, width: f32) -> Self {
        Self {
            width,
            height: tuning.playfield_height,
            ground_height: tuning.ground_height,
            player_x: tuning.player_x,
            standing: Vec2::new(tuning.player_width, tuning.player_height),
            crouching: Vec2::new(tuning.crouch_width, tuning.crouch_height),
        }
    }

    /// Same geometry with a different playfield width
    pub fn with_width(self, width: f32) -> Self {
        Self { width, ..self }
    }

    /// Y of the running surface
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Runner sprite size for a stance
    #[inline]
    pub fn player_size(&self, stance: Stance) -> Vec2 {
        match stance {
            Stance::Standing => self.standing,
            Stance::Crouching => self.crouching,
        }
    }

    /// Resting y (top edge) of the runner for a stance
    #[inline]
    pub fn ground_line(&self, stance: Stance) -> f32 {
        self.ground_y() - self.player_size(stance).y
    }
}
