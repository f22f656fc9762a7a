//! Idle/demo mode - a simple bot that plays the game
//!
//! Looks at the nearest obstacle still ahead of the runner: jumps ground
//! obstacles, ducks under flying ones, and stands back up once clear.

use super::state::SimulationState;
use super::tick::Command;

/// Ticks of lead time before a ground obstacle reaches the runner
const JUMP_LEAD_TICKS: f32 = 8.0;
/// Ticks of lead time before a flying obstacle reaches the runner
const DUCK_LEAD_TICKS: f32 = 12.0;

/// Pick the command the bot would issue this frame, if any
pub fn autopilot_command(state: &SimulationState) -> Option<Command> {
    if !state.is_running() {
        return None;
    }

    let player = state.player_hitbox();
    let standing = state.geometry.standing;
    let standing_top = state.geometry.ground_y() - standing.y;
    let speed = state.obstacle_speed.max(f32::EPSILON);

    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.x + o.width > player.left())
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    let crouching = state.player.is_crouching();
    let Some(obstacle) = threat else {
        return crouching.then_some(Command::DownReleased);
    };

    let distance = obstacle.x - player.right();
    // Flying obstacles that clear a standing runner need no reaction
    let needs_duck = obstacle.is_flying() && obstacle.y + obstacle.height > standing_top;

    if needs_duck {
        if !crouching && distance < speed * DUCK_LEAD_TICKS {
            return Some(Command::DownPressed);
        }
        return None;
    }

    if crouching {
        return Some(Command::DownReleased);
    }

    let ground_line = state.ground_line();
    if !obstacle.is_flying()
        && state.player.is_grounded(ground_line)
        && distance < speed * JUMP_LEAD_TICKS
    {
        return Some(Command::Jump);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::sim::spawner::{Obstacle, ObstacleKind};
    use crate::sim::tick::{apply_command, tick, TickOutcome};
    use crate::tuning::Tuning;

    fn running() -> SimulationState {
        let mut state = SimulationState::new(Tuning::default(), 800.0, 3);
        state.start(&MemoryScoreStore::default());
        state
    }

    fn place(state: &mut SimulationState, kind: ObstacleKind, x: f32) {
        let shape = kind.shape();
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind,
            x,
            y: shape.top(&state.geometry),
            width: shape.size.x,
            height: shape.size.y,
        });
    }

    #[test]
    fn test_no_command_when_clear() {
        let state = running();
        assert_eq!(autopilot_command(&state), None);
    }

    #[test]
    fn test_jumps_close_ground_obstacle() {
        let mut state = running();
        place(&mut state, ObstacleKind::GroundWide, 120.0);
        assert_eq!(autopilot_command(&state), Some(Command::Jump));
    }

    #[test]
    fn test_waits_for_distant_obstacle() {
        let mut state = running();
        place(&mut state, ObstacleKind::GroundWide, 600.0);
        assert_eq!(autopilot_command(&state), None);
    }

    #[test]
    fn test_ducks_flying_obstacle() {
        let mut state = running();
        place(&mut state, ObstacleKind::FlyingHigh, 120.0);
        assert_eq!(autopilot_command(&state), Some(Command::DownPressed));
    }

    #[test]
    fn test_stands_up_when_clear() {
        let mut state = running();
        state.player.handle_down_action(state.ground_line());
        assert_eq!(autopilot_command(&state), Some(Command::DownReleased));
    }

    #[test]
    fn test_bot_survives_a_while() {
        let mut store = MemoryScoreStore::default();
        let mut state = running();
        for _ in 0..3000 {
            if let Some(command) = autopilot_command(&state) {
                apply_command(&mut state, command, &store);
            }
            if let TickOutcome::GameOver { .. } = tick(&mut state, &mut store) {
                break;
            }
        }
        assert!(state.score > 500, "bot crashed at {}", state.score);
    }
}
