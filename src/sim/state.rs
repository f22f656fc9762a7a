//! Game state and session lifecycle
//!
//! Everything a session mutates lives in `SimulationState`. There are no
//! globals; the driver owns exactly one instance.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::geometry::Geometry;
use super::kinematics::{Physics, Player, Stance};
use super::spawner::{self, Obstacle};
use crate::highscores::ScoreStore;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first Jump
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended, frozen until restart
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance parameters in force
    pub tuning: Tuning,
    /// Playfield dimensions
    pub geometry: Geometry,
    pub phase: GamePhase,
    /// +1 per tick while running
    pub score: u64,
    /// Best score seen on this device
    pub best_score: u64,
    /// Scroll speed (pixels per tick)
    pub obstacle_speed: f32,
    /// Frame index of the next spawn
    pub next_spawn_tick: u64,
    /// Base spawn interval before jitter
    pub spawn_interval_base: f32,
    /// Ticks since start
    pub frame_count: u64,
    pub player: Player,
    /// Active obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SimulationState {
    /// Create a session waiting to start
    pub fn new(tuning: Tuning, width: f32, seed: u64) -> Self {
        let geometry = Geometry::new(&tuning, width);
        Self {
            seed,
            geometry,
            phase: GamePhase::NotStarted,
            score: 0,
            best_score: 0,
            obstacle_speed: tuning.obstacle_speed_start,
            next_spawn_tick: 0,
            spawn_interval_base: tuning.spawn_interval_start,
            frame_count: 0,
            player: Player::grounded(geometry.ground_line(Stance::Standing)),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn physics(&self) -> Physics {
        self.tuning.physics()
    }

    /// Resting y for the runner's current stance
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.geometry.ground_line(self.player.stance)
    }

    /// Runner hitbox for its current stance
    pub fn player_hitbox(&self) -> Aabb {
        self.player.hitbox(&self.geometry)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Begin (or restart) a run. No-op while already running.
    pub fn start(&mut self, store: &dyn ScoreStore) -> bool {
        if self.is_running() {
            return false;
        }

        self.score = 0;
        self.frame_count = 0;
        self.obstacles.clear();
        self.obstacle_speed = self.tuning.obstacle_speed_start;
        self.spawn_interval_base = self.tuning.spawn_interval_start;
        self.next_spawn_tick = spawner::first_spawn_tick(&self.tuning, &mut self.rng);
        self.player = Player::grounded(self.geometry.ground_line(Stance::Standing));
        self.best_score = store.get();
        self.phase = GamePhase::Running;

        log::info!(
            "Run started (best {}, first spawn at frame {})",
            self.best_score,
            self.next_spawn_tick
        );
        true
    }

    /// End the run, persisting a new best. Returns true on a new best.
    pub fn game_over(&mut self, store: &mut dyn ScoreStore) -> bool {
        self.phase = GamePhase::GameOver;
        self.player.fast_falling = false;

        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
            store.set(self.best_score);
        }
        log::info!(
            "Game over at frame {}: score {}{}",
            self.frame_count,
            self.score,
            if new_best { " (new best)" } else { "" }
        );
        new_best
    }

    /// Apply a new playfield width and re-place everything vertically
    pub fn relayout(&mut self, width: f32) {
        self.geometry = self.geometry.with_width(width);
        match self.phase {
            GamePhase::NotStarted => {
                self.player = Player::grounded(self.geometry.ground_line(Stance::Standing));
            }
            GamePhase::Running => {
                // Landed outright: no leftover velocity or fast-fall
                self.player.y = self.geometry.ground_line(self.player.stance);
                self.player.vel_y = 0.0;
                self.player.fast_falling = false;
            }
            // The crash pose stays frozen
            GamePhase::GameOver => {}
        }
        for obstacle in &mut self.obstacles {
            obstacle.relayout(&self.geometry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::sim::spawner::ObstacleKind;

    #[test]
    fn test_new_state_defaults() {
        let state = SimulationState::new(Tuning::default(), 800.0, 1);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.y, 150.0);
        assert_eq!(state.obstacle_speed, 5.0);
    }

    #[test]
    fn test_start_loads_best_and_runs() {
        let store = MemoryScoreStore::with_best(420);
        let mut state = SimulationState::new(Tuning::default(), 800.0, 1);
        assert!(state.start(&store));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.best_score, 420);
        assert!(state.next_spawn_tick >= 75);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let store = MemoryScoreStore::default();
        let mut state = SimulationState::new(Tuning::default(), 800.0, 1);
        state.start(&store);
        state.score = 77;
        state.frame_count = 77;

        assert!(!state.start(&store));
        assert_eq!(state.score, 77);
        assert_eq!(state.frame_count, 77);
    }

    #[test]
    fn test_game_over_updates_best_only_when_beaten() {
        let mut store = MemoryScoreStore::with_best(100);
        let mut state = SimulationState::new(Tuning::default(), 800.0, 1);

        state.start(&store);
        state.score = 50;
        assert!(!state.game_over(&mut store));
        assert_eq!(state.best_score, 100);
        assert_eq!(store.get(), 100);

        state.start(&store);
        state.score = 150;
        assert!(state.game_over(&mut store));
        assert_eq!(state.best_score, 150);
        assert_eq!(store.get(), 150);
    }

    #[test]
    fn test_game_over_clears_fast_fall() {
        let mut store = MemoryScoreStore::default();
        let mut state = SimulationState::new(Tuning::default(), 800.0, 1);
        state.start(&store);
        state.player.y = 80.0;
        state.player.fast_falling = true;
        state.game_over(&mut store);
        assert!(!state.player.fast_falling);
        assert_eq!(state.player.y, 80.0);
    }

    #[test]
    fn test_relayout_reanchors_obstacles() {
        let store = MemoryScoreStore::default();
        let mut state = SimulationState::new(Tuning::default(), 800.0, 1);
        state.start(&store);
        state.obstacles.push(Obstacle {
            id: 99,
            kind: ObstacleKind::FlyingLow,
            x: 300.0,
            y: -40.0,
            width: 50.0,
            height: 30.0,
        });
        state.player.y = 90.0;

        state.relayout(480.0);
        assert_eq!(state.geometry.width, 480.0);
        assert_eq!(state.obstacles[0].y, 135.0);
        assert_eq!(state.obstacles[0].x, 300.0);
        assert_eq!(state.player.y, 150.0);
    }

    #[test]
    fn test_relayout_mid_fast_fall_lands_cleanly() {
        let store = MemoryScoreStore::default();
        let mut state = SimulationState::new(Tuning::default(), 800.0, 1);
        state.start(&store);
        let physics = state.physics();
        let line = state.ground_line();
        state.player.jump(&physics, line);
        for _ in 0..3 {
            state.player.update(&physics, line);
        }
        state.player.handle_down_action(line);
        assert!(state.player.fast_falling);
        assert!(state.player.vel_y < 0.0);

        state.relayout(640.0);
        assert_eq!(state.player.y, state.ground_line());
        assert_eq!(state.player.vel_y, 0.0);
        assert!(!state.player.fast_falling);

        // No second jump out of the leftover impulse
        state.player.update(&physics, state.ground_line());
        assert_eq!(state.player.y, state.ground_line());
    }

    #[test]
    fn test_relayout_keeps_crash_pose() {
        let mut store = MemoryScoreStore::default();
        let mut state = SimulationState::new(Tuning::default(), 800.0, 1);
        state.start(&store);
        state.player.y = 90.0;
        state.game_over(&mut store);

        state.relayout(640.0);
        assert_eq!(state.player.y, 90.0);
    }
}
