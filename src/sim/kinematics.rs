//! Runner kinematics
//!
//! One tick is one explicit Euler step: `vel += acc; y += vel`. The runner
//! never moves horizontally. `ground_line` is the resting y (top edge) for
//! the runner's current stance, see [`Geometry::ground_line`].

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::geometry::Geometry;
use crate::consts::GROUND_EPSILON;

/// Runner posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

/// Constants for the vertical integration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    pub gravity: f32,
    pub fast_fall_multiplier: f32,
    /// Velocity set by a jump (negative = up)
    pub jump_impulse: f32,
}

/// The player character's vertical state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge of the standing sprite
    pub y: f32,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
    pub stance: Stance,
    /// Amplified gravity after a mid-air "down"
    pub fast_falling: bool,
}

impl Player {
    /// A standing runner at rest on the ground
    pub fn grounded(ground_line: f32) -> Self {
        Self {
            y: ground_line,
            vel_y: 0.0,
            stance: Stance::Standing,
            fast_falling: false,
        }
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.stance == Stance::Crouching
    }

    /// On (or within `GROUND_EPSILON` of) the ground
    #[inline]
    pub fn is_grounded(&self, ground_line: f32) -> bool {
        self.y >= ground_line - GROUND_EPSILON
    }

    /// Advance one tick
    pub fn update(&mut self, physics: &Physics, ground_line: f32) {
        let acceleration = if self.fast_falling {
            physics.gravity * physics.fast_fall_multiplier
        } else {
            physics.gravity
        };

        // A crouching runner resting on the ground does not accumulate gravity
        if !self.is_crouching() || self.y < ground_line {
            self.vel_y += acceleration;
            self.y += self.vel_y;
        }

        if self.y >= ground_line {
            self.y = ground_line;
            self.vel_y = 0.0;
            self.fast_falling = false;
        }
        if self.y < 0.0 {
            self.y = 0.0;
            self.vel_y = 0.0;
        }
    }

    /// Jump if standing on the ground. Returns whether the jump happened.
    pub fn jump(&mut self, physics: &Physics, ground_line: f32) -> bool {
        if self.is_crouching() || !self.is_grounded(ground_line) {
            return false;
        }
        self.vel_y = physics.jump_impulse;
        self.fast_falling = false;
        true
    }

    /// "Down" pressed: fast-fall in the air, crouch on the ground
    pub fn handle_down_action(&mut self, ground_line: f32) {
        // Key repeat while already crouched
        if self.is_crouching() {
            return;
        }
        if !self.is_grounded(ground_line) {
            if !self.fast_falling {
                self.fast_falling = true;
            }
        } else {
            self.stance = Stance::Crouching;
            self.fast_falling = false;
        }
    }

    /// "Down" released: stand up and stop fast-falling
    pub fn handle_up_action(&mut self) {
        if self.is_crouching() {
            self.stance = Stance::Standing;
        }
        self.fast_falling = false;
    }

    /// Current hitbox. A crouching runner is drawn on the crouch ground line.
    pub fn hitbox(&self, geometry: &Geometry) -> Aabb {
        let size = geometry.player_size(self.stance);
        let top = match self.stance {
            Stance::Standing => self.y,
            Stance::Crouching => geometry.ground_line(Stance::Crouching),
        };
        Aabb::from_rect(geometry.player_x, top, size.x, size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const PHYSICS: Physics = Physics {
        gravity: 0.6,
        fast_fall_multiplier: 3.0,
        jump_impulse: -12.0,
    };

    #[test]
    fn test_one_tick_euler() {
        let mut player = Player::grounded(200.0);
        assert!(player.jump(&PHYSICS, 200.0));
        player.update(&PHYSICS, 200.0);
        assert!((player.vel_y - -11.4).abs() < 1e-4);
        assert!((player.y - 188.6).abs() < 1e-4);
    }

    #[test]
    fn test_standing_on_ground_stays_put() {
        let mut player = Player::grounded(150.0);
        for _ in 0..10 {
            player.update(&PHYSICS, 150.0);
        }
        assert_eq!(player.y, 150.0);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let mut player = Player::grounded(150.0);
        player.jump(&PHYSICS, 150.0);
        player.update(&PHYSICS, 150.0);
        player.update(&PHYSICS, 150.0);

        let vel = player.vel_y;
        assert!(!player.jump(&PHYSICS, 150.0));
        assert_eq!(player.vel_y, vel);
    }

    #[test]
    fn test_no_jump_while_crouching() {
        let mut player = Player::grounded(150.0);
        player.handle_down_action(150.0);
        assert!(player.is_crouching());
        assert!(!player.jump(&PHYSICS, 175.0));
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_jump_within_epsilon_of_ground() {
        let mut player = Player::grounded(150.0);
        player.y = 149.5;
        assert!(player.jump(&PHYSICS, 150.0));
        assert_eq!(player.vel_y, -12.0);
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut player = Player::grounded(150.0);
        player.jump(&PHYSICS, 150.0);

        let mut peak = player.y;
        for _ in 0..100 {
            player.update(&PHYSICS, 150.0);
            peak = peak.min(player.y);
        }
        assert!(peak < 40.0, "peak was {}", peak);
        assert_eq!(player.y, 150.0);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_down_in_air_fast_falls() {
        let mut player = Player::grounded(150.0);
        player.jump(&PHYSICS, 150.0);
        player.update(&PHYSICS, 150.0);

        player.handle_down_action(150.0);
        assert!(player.fast_falling);
        assert!(!player.is_crouching());

        let vel = player.vel_y;
        player.update(&PHYSICS, 150.0);
        assert!((player.vel_y - (vel + 1.8)).abs() < 1e-4);
    }

    #[test]
    fn test_fast_fall_cleared_on_landing() {
        let mut player = Player::grounded(150.0);
        player.jump(&PHYSICS, 150.0);
        player.update(&PHYSICS, 150.0);
        player.handle_down_action(150.0);

        for _ in 0..60 {
            player.update(&PHYSICS, 150.0);
        }
        assert!(!player.fast_falling);
        // Holding down through the landing does not become a crouch
        assert!(!player.is_crouching());
    }

    #[test]
    fn test_down_on_ground_crouches() {
        let mut player = Player::grounded(150.0);
        player.handle_down_action(150.0);
        assert!(player.is_crouching());
        assert!(!player.fast_falling);

        player.handle_up_action();
        assert!(!player.is_crouching());
    }

    #[test]
    fn test_crouch_settles_on_crouch_line() {
        let geo = Geometry::new(&Tuning::default(), 800.0);
        let mut player = Player::grounded(geo.ground_line(Stance::Standing));
        player.handle_down_action(geo.ground_line(Stance::Standing));

        for _ in 0..30 {
            player.update(&PHYSICS, geo.ground_line(player.stance));
        }
        assert_eq!(player.y, geo.ground_line(Stance::Crouching));
        assert_eq!(player.vel_y, 0.0);

        // Resting crouch stops integrating
        player.update(&PHYSICS, geo.ground_line(player.stance));
        assert_eq!(player.vel_y, 0.0);

        // Standing back up snaps to the standing line on the next tick
        player.handle_up_action();
        player.update(&PHYSICS, geo.ground_line(player.stance));
        assert_eq!(player.y, geo.ground_line(Stance::Standing));
    }

    #[test]
    fn test_repeated_down_while_crouched_is_ignored() {
        let mut player = Player::grounded(150.0);
        player.handle_down_action(150.0);
        // The crouch line is lower, so the runner now reads as "above" it
        player.handle_down_action(175.0);
        assert!(player.is_crouching());
        assert!(!player.fast_falling);
    }

    #[test]
    fn test_up_action_clears_fast_fall() {
        let mut player = Player::grounded(150.0);
        player.jump(&PHYSICS, 150.0);
        player.update(&PHYSICS, 150.0);
        player.handle_down_action(150.0);
        player.handle_up_action();
        assert!(!player.fast_falling);
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut player = Player::grounded(150.0);
        player.y = 2.0;
        player.vel_y = -12.0;
        player.update(&PHYSICS, 150.0);
        assert_eq!(player.y, 0.0);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_hitbox_follows_stance() {
        let geo = Geometry::new(&Tuning::default(), 800.0);
        let mut player = Player::grounded(geo.ground_line(Stance::Standing));

        let standing = player.hitbox(&geo);
        assert_eq!(standing, Aabb::from_rect(50.0, 150.0, 40.0, 50.0));

        player.handle_down_action(geo.ground_line(Stance::Standing));
        let crouched = player.hitbox(&geo);
        assert_eq!(crouched, Aabb::from_rect(50.0, 175.0, 45.0, 25.0));
        assert_eq!(crouched.bottom(), standing.bottom());
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_bounds(
            actions in proptest::collection::vec(0u8..4, 1..300),
            start_y in 0.0f32..150.0,
            start_vel in -20.0f32..20.0,
        ) {
            let geo = Geometry::new(&Tuning::default(), 800.0);
            let mut player = Player::grounded(geo.ground_line(Stance::Standing));
            player.y = start_y;
            player.vel_y = start_vel;

            for action in actions {
                let line = geo.ground_line(player.stance);
                match action {
                    0 => { player.jump(&PHYSICS, line); }
                    1 => player.handle_down_action(line),
                    2 => player.handle_up_action(),
                    _ => {}
                }
                let line = geo.ground_line(player.stance);
                player.update(&PHYSICS, line);
                prop_assert!(player.y >= 0.0 && player.y <= line);
                if player.fast_falling {
                    prop_assert!(!player.is_crouching());
                    prop_assert!(player.y < line);
                }
            }
        }
    }
}
