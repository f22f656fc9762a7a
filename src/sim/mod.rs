//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per displayed frame
//! - Seeded RNG only
//! - Obstacles visited newest first
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod kinematics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_command;
pub use collision::{Aabb, hits};
pub use geometry::Geometry;
pub use kinematics::{Physics, Player, Stance};
pub use spawner::{ArchetypeShape, Obstacle, ObstacleKind, Placement};
pub use state::{GamePhase, SimulationState};
pub use tick::{Command, CommandEffect, TickOutcome, apply_command, tick};
