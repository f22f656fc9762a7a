//! Obstacle archetypes, spawning and scrolling
//!
//! Difficulty ramps two ways: the base spawn interval shrinks on every
//! spawn (down to a floor), and the scroll speed grows every tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::geometry::Geometry;
use super::state::SimulationState;
use crate::tuning::Tuning;

/// Obstacle archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    GroundLow,
    GroundMid,
    GroundTall,
    GroundWide,
    GroundTallest,
    TripleCluster,
    FlyingLow,
    FlyingHigh,
}

/// Where an archetype sits vertically
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    /// Base on the running surface
    Ground,
    /// Hovering `y_offset` above the running surface
    Flying { y_offset: f32 },
}

/// A row of identical obstacles spawned together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub count: u32,
    pub gap: u32,
}

/// Fixed geometry for one archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeShape {
    pub size: Vec2,
    pub placement: Placement,
    pub cluster: Option<Cluster>,
}

impl ArchetypeShape {
    const fn ground(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            placement: Placement::Ground,
            cluster: None,
        }
    }

    const fn flying(width: f32, height: f32, y_offset: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            placement: Placement::Flying { y_offset },
            cluster: None,
        }
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.placement, Placement::Flying { .. })
    }

    /// Top edge for this archetype on the given playfield
    pub fn top(&self, geometry: &Geometry) -> f32 {
        match self.placement {
            Placement::Ground => geometry.ground_y() - self.size.y,
            Placement::Flying { y_offset } => {
                (geometry.ground_y() - self.size.y - y_offset).max(0.0)
            }
        }
    }

    /// Number of obstacles in one spawn and the horizontal step between them
    pub fn layout(&self) -> (u32, f32) {
        match self.cluster {
            Some(Cluster { count, gap }) => (count, self.size.x + gap as f32),
            None => (1, 0.0),
        }
    }
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 8] = [
        ObstacleKind::GroundLow,
        ObstacleKind::GroundMid,
        ObstacleKind::GroundTall,
        ObstacleKind::GroundWide,
        ObstacleKind::GroundTallest,
        ObstacleKind::TripleCluster,
        ObstacleKind::FlyingLow,
        ObstacleKind::FlyingHigh,
    ];

    pub fn shape(self) -> ArchetypeShape {
        match self {
            ObstacleKind::GroundLow => ArchetypeShape::ground(20.0, 40.0),
            ObstacleKind::GroundMid => ArchetypeShape::ground(30.0, 30.0),
            ObstacleKind::GroundTall => ArchetypeShape::ground(45.0, 50.0),
            ObstacleKind::GroundWide => ArchetypeShape::ground(60.0, 35.0),
            ObstacleKind::GroundTallest => ArchetypeShape::ground(25.0, 55.0),
            ObstacleKind::TripleCluster => ArchetypeShape {
                cluster: Some(Cluster { count: 3, gap: 10 }),
                ..ArchetypeShape::ground(15.0, 30.0)
            },
            ObstacleKind::FlyingLow => ArchetypeShape::flying(50.0, 30.0, 35.0),
            ObstacleKind::FlyingHigh => ArchetypeShape::flying(100.0, 25.0, 45.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::GroundLow => "ground-low",
            ObstacleKind::GroundMid => "ground-mid",
            ObstacleKind::GroundTall => "ground-tall",
            ObstacleKind::GroundWide => "ground-wide",
            ObstacleKind::GroundTallest => "ground-tallest",
            ObstacleKind::TripleCluster => "triple-cluster",
            ObstacleKind::FlyingLow => "flying-low",
            ObstacleKind::FlyingHigh => "flying-high",
        }
    }

    /// Uniform pick over all archetypes
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A single collidable obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge, decreasing every tick
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Logical (unpadded) hitbox
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }

    pub fn is_flying(&self) -> bool {
        self.kind.shape().is_flying()
    }

    /// Trailing edge has passed the left boundary
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// Scroll left by one tick
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// Recompute vertical placement from the current geometry
    pub fn relayout(&mut self, geometry: &Geometry) {
        self.y = self.kind.shape().top(geometry);
    }
}

/// Uniform jitter in `[-range, +range)`
pub fn jitter<R: Rng>(rng: &mut R, range: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * range
}

/// Tick of the first spawn after a (re)start
pub fn first_spawn_tick<R: Rng>(tuning: &Tuning, rng: &mut R) -> u64 {
    let interval = (tuning.spawn_interval_start + jitter(rng, tuning.spawn_jitter)).floor();
    interval.max(0.0) as u64
}

/// Is a spawn scheduled for this tick?
#[inline]
pub fn spawn_due(state: &SimulationState) -> bool {
    state.frame_count >= state.next_spawn_tick
}

/// Spawn one obstacle group at the right edge. Returns the archetype.
pub fn spawn_group(state: &mut SimulationState) -> ObstacleKind {
    let kind = ObstacleKind::random(&mut state.rng);
    let shape = kind.shape();
    let (count, step) = shape.layout();
    let y = shape.top(&state.geometry);

    for i in 0..count {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind,
            x: state.geometry.width + i as f32 * step,
            y,
            width: shape.size.x,
            height: shape.size.y,
        });
    }

    log::debug!(
        "Spawned {} x{} at frame {} (speed {:.3})",
        kind.as_str(),
        count,
        state.frame_count,
        state.obstacle_speed
    );
    kind
}

/// Shrink the base interval and pick the next spawn tick
pub fn schedule_next(state: &mut SimulationState) {
    let tuning = &state.tuning;
    state.spawn_interval_base = (state.spawn_interval_base - tuning.spawn_interval_decrement)
        .max(tuning.spawn_interval_min);

    let offset = jitter(&mut state.rng, tuning.spawn_jitter);
    let interval = (state.spawn_interval_base + offset)
        .floor()
        .max(tuning.min_spawn_gap());
    state.next_spawn_tick = state.frame_count + interval as u64;
}
