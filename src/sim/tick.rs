//! Per-frame simulation tick
//!
//! One call advances the run by exactly one frame. There is no wall-clock
//! timestep: game speed follows the display refresh rate.

use super::collision;
use super::spawner::{self, ObstacleKind};
use super::state::{GamePhase, SimulationState};
use crate::highscores::ScoreStore;

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Space / ArrowUp / tap. Also starts and restarts the game.
    Jump,
    /// ArrowDown pressed
    DownPressed,
    /// ArrowDown released
    DownReleased,
    /// Restart button (game over only)
    Restart,
}

/// What a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEffect {
    /// Nothing changed
    Ignored,
    /// A new run began; the driver must start ticking
    Started,
    /// The runner reacted
    Applied,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing advanced
    Idle,
    /// One frame simulated
    Advanced,
    /// The runner hit an obstacle this frame
    GameOver {
        score: u64,
        new_best: bool,
        hit: ObstacleKind,
    },
}

/// Apply a player command
pub fn apply_command(
    state: &mut SimulationState,
    command: Command,
    store: &dyn ScoreStore,
) -> CommandEffect {
    match (state.phase, command) {
        (GamePhase::NotStarted, Command::Jump)
        | (GamePhase::GameOver, Command::Jump)
        | (GamePhase::GameOver, Command::Restart) => {
            if state.start(store) {
                CommandEffect::Started
            } else {
                CommandEffect::Ignored
            }
        }
        (GamePhase::Running, Command::Jump) => {
            let physics = state.physics();
            let ground_line = state.ground_line();
            if state.player.jump(&physics, ground_line) {
                CommandEffect::Applied
            } else {
                CommandEffect::Ignored
            }
        }
        (GamePhase::Running, Command::DownPressed) => {
            let ground_line = state.ground_line();
            state.player.handle_down_action(ground_line);
            CommandEffect::Applied
        }
        (GamePhase::Running, Command::DownReleased) => {
            state.player.handle_up_action();
            CommandEffect::Applied
        }
        _ => CommandEffect::Ignored,
    }
}

/// Advance the session by one frame
pub fn tick(state: &mut SimulationState, store: &mut dyn ScoreStore) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Idle;
    }

    // Runner
    let physics = state.physics();
    let ground_line = state.ground_line();
    state.player.update(&physics, ground_line);

    // Spawning
    if spawner::spawn_due(state) {
        spawner::spawn_group(state);
        spawner::schedule_next(state);
    }

    // Scroll, collide, prune
    if let Some(hit) = advance_obstacles(state) {
        let score = state.score;
        let new_best = state.game_over(store);
        return TickOutcome::GameOver {
            score,
            new_best,
            hit,
        };
    }

    state.score += 1;
    state.obstacle_speed += state.tuning.speed_increment;
    state.frame_count += 1;
    TickOutcome::Advanced
}

/// Move every obstacle, newest first, stopping at the first collision
fn advance_obstacles(state: &mut SimulationState) -> Option<ObstacleKind> {
    let player = state.player_hitbox();
    let speed = state.obstacle_speed;

    let mut i = state.obstacles.len();
    while i > 0 {
        i -= 1;
        let obstacle = &mut state.obstacles[i];
        obstacle.advance(speed);
        if collision::hits(&player, obstacle) {
            return Some(obstacle.kind);
        }
        if obstacle.is_off_screen() {
            state.obstacles.remove(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::sim::spawner::Obstacle;
    use crate::tuning::Tuning;

    fn running(seed: u64) -> (SimulationState, MemoryScoreStore) {
        let store = MemoryScoreStore::default();
        let mut state = SimulationState::new(Tuning::default(), 800.0, seed);
        assert_eq!(apply_command(&mut state, Command::Jump, &store), CommandEffect::Started);
        (state, store)
    }

    fn ground_obstacle(id: u32, x: f32) -> Obstacle {
        Obstacle {
            id,
            kind: ObstacleKind::GroundLow,
            x,
            y: 160.0,
            width: 20.0,
            height: 40.0,
        }
    }

    #[test]
    fn test_idle_before_start() {
        let mut store = MemoryScoreStore::default();
        let mut state = SimulationState::new(Tuning::default(), 800.0, 1);
        assert_eq!(tick(&mut state, &mut store), TickOutcome::Idle);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_score_increments_once_per_tick() {
        let (mut state, mut store) = running(1);
        for expected in 1..=50u64 {
            assert_eq!(tick(&mut state, &mut store), TickOutcome::Advanced);
            assert_eq!(state.score, expected);
            assert_eq!(state.frame_count, expected);
        }
        assert!((state.obstacle_speed - (5.0 + 50.0 * 0.001)).abs() < 1e-4);
    }

    #[test]
    fn test_first_jump_starts_not_jumps() {
        let (state, _) = running(1);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.vel_y, 0.0);
    }

    #[test]
    fn test_collision_ends_run_and_freezes() {
        let (mut state, mut store) = running(1);
        // Right in front of the runner: after one tick of scrolling it overlaps
        state.obstacles.push(ground_obstacle(500, 92.0));

        let outcome = tick(&mut state, &mut store);
        assert!(matches!(
            outcome,
            TickOutcome::GameOver {
                score: 0,
                new_best: false,
                hit: ObstacleKind::GroundLow
            }
        ));
        assert_eq!(state.phase, GamePhase::GameOver);

        let frozen_x = state.obstacles[0].x;
        for _ in 0..10 {
            assert_eq!(tick(&mut state, &mut store), TickOutcome::Idle);
        }
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles[0].x, frozen_x);
    }

    #[test]
    fn test_collision_short_circuits_older_obstacles() {
        let (mut state, mut store) = running(1);
        state.obstacles.push(ground_obstacle(1, 600.0));
        state.obstacles.push(ground_obstacle(2, 92.0));

        tick(&mut state, &mut store);
        assert_eq!(state.phase, GamePhase::GameOver);
        // The newest obstacle collided first; the older one never moved
        assert_eq!(state.obstacles[0].x, 600.0);
    }

    #[test]
    fn test_jump_clears_low_obstacle() {
        let (mut state, mut store) = running(1);
        state.next_spawn_tick = u64::MAX;
        state.obstacles.push(ground_obstacle(1, 130.0));

        assert_eq!(apply_command(&mut state, Command::Jump, &store), CommandEffect::Applied);
        for _ in 0..60 {
            let outcome = tick(&mut state, &mut store);
            assert!(!matches!(outcome, TickOutcome::GameOver { .. }));
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_crouch_ducks_flying_obstacle() {
        let (mut state, mut store) = running(1);
        state.next_spawn_tick = u64::MAX;
        let geo = state.geometry;
        state.obstacles.push(Obstacle {
            id: 1,
            kind: ObstacleKind::FlyingLow,
            x: 100.0,
            y: ObstacleKind::FlyingLow.shape().top(&geo),
            width: 50.0,
            height: 30.0,
        });

        apply_command(&mut state, Command::DownPressed, &store);
        for _ in 0..40 {
            tick(&mut state, &mut store);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_standing_hits_flying_obstacle() {
        let (mut state, mut store) = running(1);
        let geo = state.geometry;
        state.obstacles.push(Obstacle {
            id: 1,
            kind: ObstacleKind::FlyingHigh,
            x: 60.0,
            y: ObstacleKind::FlyingHigh.shape().top(&geo),
            width: 100.0,
            height: 25.0,
        });
        tick(&mut state, &mut store);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_offscreen_obstacles_pruned() {
        let (mut state, mut store) = running(1);
        state.next_spawn_tick = u64::MAX;
        // Behind the runner, trailing edge at 3
        state.obstacles.push(ground_obstacle(1, -17.0));

        tick(&mut state, &mut store);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_spawns_on_schedule() {
        let (mut state, mut store) = running(1);
        let due = state.next_spawn_tick;
        for _ in 0..due {
            tick(&mut state, &mut store);
            assert!(state.obstacles.is_empty());
        }
        tick(&mut state, &mut store);
        assert!(!state.obstacles.is_empty());
        assert!(state.next_spawn_tick > due);
    }

    #[test]
    fn test_down_ignored_before_start() {
        let store = MemoryScoreStore::default();
        let mut state = SimulationState::new(Tuning::default(), 800.0, 1);
        assert_eq!(
            apply_command(&mut state, Command::DownPressed, &store),
            CommandEffect::Ignored
        );
        assert_eq!(state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let (mut state, mut store) = running(1);
        assert_eq!(apply_command(&mut state, Command::Restart, &store), CommandEffect::Ignored);

        state.obstacles.push(ground_obstacle(1, 92.0));
        tick(&mut state, &mut store);
        assert_eq!(state.phase, GamePhase::GameOver);

        assert_eq!(apply_command(&mut state, Command::Restart, &store), CommandEffect::Started);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.obstacle_speed, state.tuning.obstacle_speed_start);
    }

    #[test]
    fn test_same_seed_same_run() {
        let (mut a, mut store_a) = running(99);
        let (mut b, mut store_b) = running(99);
        for _ in 0..2000 {
            tick(&mut a, &mut store_a);
            tick(&mut b, &mut store_b);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.next_spawn_tick, b.next_spawn_tick);
    }
}
