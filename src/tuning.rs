//! Data-driven game balance
//!
//! Every physics, geometry and difficulty knob lives here. Defaults match
//! `crate::consts`; a JSON document can override any subset of fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Physics;

/// Errors produced while loading or validating a tuning document
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// A size, speed or interval that must be positive is not
    NonPositive(&'static str),
    /// Jumps must move the runner upward
    JumpNotUpward(f32),
    /// The interval floor sits above the starting interval
    IntervalFloorAboveStart { min: f32, start: f32 },
    /// The runner does not fit between the ceiling and the ground strip
    RunnerTallerThanSky { sky: f32, runner: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning document: {}", e),
            TuningError::NonPositive(field) => write!(f, "`{}` must be positive", field),
            TuningError::JumpNotUpward(v) => {
                write!(f, "`jump_impulse` must be negative (got {})", v)
            }
            TuningError::IntervalFloorAboveStart { min, start } => write!(
                f,
                "`spawn_interval_min` ({}) exceeds `spawn_interval_start` ({})",
                min, start
            ),
            TuningError::RunnerTallerThanSky { sky, runner } => write!(
                f,
                "runner height {} does not fit above the ground ({} available)",
                runner, sky
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_height: f32,
    pub ground_height: f32,

    // === Runner ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub crouch_width: f32,
    pub crouch_height: f32,

    // === Physics ===
    pub gravity: f32,
    pub fast_fall_multiplier: f32,
    pub jump_impulse: f32,

    // === Difficulty ===
    pub obstacle_speed_start: f32,
    pub speed_increment: f32,
    pub spawn_interval_start: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_decrement: f32,
    pub spawn_jitter: f32,
    pub min_gap_factor: f32,

    // === Presentation ===
    pub sprite_padding: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            crouch_width: PLAYER_CROUCH_WIDTH,
            crouch_height: PLAYER_CROUCH_HEIGHT,

            gravity: GRAVITY,
            fast_fall_multiplier: FAST_FALL_MULTIPLIER,
            jump_impulse: JUMP_IMPULSE,

            obstacle_speed_start: OBSTACLE_SPEED_START,
            speed_increment: SPEED_INCREMENT,
            spawn_interval_start: SPAWN_INTERVAL_START,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_decrement: SPAWN_INTERVAL_DECREMENT,
            spawn_jitter: SPAWN_JITTER,
            min_gap_factor: MIN_GAP_FACTOR,

            sprite_padding: SPRITE_PADDING,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("playfield_height", self.playfield_height),
            ("ground_height", self.ground_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("crouch_width", self.crouch_width),
            ("crouch_height", self.crouch_height),
            ("gravity", self.gravity),
            ("fast_fall_multiplier", self.fast_fall_multiplier),
            ("obstacle_speed_start", self.obstacle_speed_start),
            ("spawn_interval_start", self.spawn_interval_start),
            ("spawn_interval_min", self.spawn_interval_min),
            ("min_gap_factor", self.min_gap_factor),
            ("sprite_padding", self.sprite_padding),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive(field));
            }
        }
        if self.jump_impulse >= 0.0 {
            return Err(TuningError::JumpNotUpward(self.jump_impulse));
        }
        if self.spawn_interval_min > self.spawn_interval_start {
            return Err(TuningError::IntervalFloorAboveStart {
                min: self.spawn_interval_min,
                start: self.spawn_interval_start,
            });
        }
        let sky = self.playfield_height - self.ground_height;
        let runner = self.player_height.max(self.crouch_height);
        if sky < runner {
            return Err(TuningError::RunnerTallerThanSky { sky, runner });
        }
        Ok(())
    }

    /// Physics parameters for the kinematics step
    pub fn physics(&self) -> Physics {
        Physics {
            gravity: self.gravity,
            fast_fall_multiplier: self.fast_fall_multiplier,
            jump_impulse: self.jump_impulse,
        }
    }

    /// Smallest number of ticks allowed between two spawns
    pub fn min_spawn_gap(&self) -> f32 {
        self.spawn_interval_min * self.min_gap_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.jump_impulse, -12.0);
        assert_eq!(tuning.min_spawn_gap() as u64, 33);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8, "spawn_jitter": 0.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.spawn_jitter, 0.0);
        // Untouched fields keep their defaults
        assert_eq!(tuning.obstacle_speed_start, OBSTACLE_SPEED_START);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "gravity": 0.0 }"#),
            Err(TuningError::NonPositive("gravity"))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "jump_impulse": 4.0 }"#),
            Err(TuningError::JumpNotUpward(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_interval_min": 200.0 }"#),
            Err(TuningError::IntervalFloorAboveStart { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "playfield_height": 60.0 }"#),
            Err(TuningError::RunnerTallerThanSky { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "ground_height": 150.0, "crouch_height": 120.0 }"#),
            Err(TuningError::RunnerTallerThanSky { .. })
        ));
        // Exactly filling the sky is allowed
        assert!(Tuning::from_json(r#"{ "playfield_height": 100.0 }"#).is_ok());
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
