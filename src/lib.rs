//! Dino Dash - a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Simulation (kinematics, obstacle spawning, collisions, game state)
//! - `driver`: Per-frame clock, lifecycle and asset gating
//! - `renderer`: Scene building and the Canvas2D backend
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod driver;
pub mod highscores;
pub mod leaderboard;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::Driver;
pub use highscores::{MemoryScoreStore, ScoreStore};
pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardError, PlaceholderLeaderboard};
pub use settings::{Settings, Toggle};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions. Height is fixed, width follows the container.
    pub const PLAYFIELD_HEIGHT: f32 = 250.0;
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 800.0;
    /// Height of the ground strip below the running surface
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Runner placement and sprite sizes
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_CROUCH_WIDTH: f32 = 45.0;
    pub const PLAYER_CROUCH_HEIGHT: f32 = 25.0;

    /// Downward acceleration per tick (screen y grows downward)
    pub const GRAVITY: f32 = 0.6;
    /// Gravity multiplier while fast-falling
    pub const FAST_FALL_MULTIPLIER: f32 = 3.0;
    /// Vertical velocity set by a jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// How close to the ground line still counts as grounded
    pub const GROUND_EPSILON: f32 = 1.0;

    /// Obstacle scroll speed (pixels per tick)
    pub const OBSTACLE_SPEED_START: f32 = 5.0;
    pub const SPEED_INCREMENT: f32 = 0.001;

    /// Spawn cadence (ticks between obstacle groups)
    pub const SPAWN_INTERVAL_START: f32 = 95.0;
    pub const SPAWN_INTERVAL_MIN: f32 = 55.0;
    pub const SPAWN_INTERVAL_DECREMENT: f32 = 0.05;
    pub const SPAWN_JITTER: f32 = 20.0;
    /// Fraction of the minimum interval that jitter can never undercut
    pub const MIN_GAP_FACTOR: f32 = 0.6;

    /// Sprites draw this much larger than their hitbox
    pub const SPRITE_PADDING: f32 = 1.1;
}
