//! Sprite manifest and load tracking
//!
//! Every sprite is fetched by URL at startup. The game stays gated until
//! each one has settled; a failed sprite is drawn as a solid box instead.

use std::collections::HashMap;

use crate::sim::ObstacleKind;

/// One sprite the game can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    RunnerStanding,
    RunnerCrouching,
    Obstacle(ObstacleKind),
}

impl AssetId {
    /// Every sprite in load order
    pub fn all() -> Vec<AssetId> {
        let mut ids = vec![AssetId::RunnerStanding, AssetId::RunnerCrouching];
        ids.extend(ObstacleKind::ALL.iter().copied().map(AssetId::Obstacle));
        ids
    }

    /// Image URL
    pub fn source(&self) -> &'static str {
        match self {
            AssetId::RunnerStanding => "https://placehold.co/40x50/666/eee?text=Dino",
            AssetId::RunnerCrouching => "https://placehold.co/45x25/666/eee?text=Duck",
            AssetId::Obstacle(kind) => match kind {
                ObstacleKind::GroundLow => "https://placehold.co/20x40/2a9d8f/eee?text=T",
                ObstacleKind::GroundMid => "https://placehold.co/30x30/2a9d8f/eee?text=S",
                ObstacleKind::GroundTall => "https://placehold.co/45x50/2a9d8f/eee?text=L",
                ObstacleKind::GroundWide => "https://placehold.co/60x35/2a9d8f/eee?text=W",
                ObstacleKind::GroundTallest => "https://placehold.co/25x55/2a9d8f/eee?text=M",
                ObstacleKind::TripleCluster => "https://placehold.co/15x30/2a9d8f/eee?text=3",
                ObstacleKind::FlyingLow => "https://placehold.co/50x30/e76f51/eee?text=F1",
                ObstacleKind::FlyingHigh => "https://placehold.co/90x25/e76f51/eee?text=F2-LONG",
            },
        }
    }
}

/// Load state of a single sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed,
}

/// Tracks load progress for the whole manifest
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    status: HashMap<AssetId, AssetStatus>,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry {
    /// Every manifest entry pending
    pub fn new() -> Self {
        Self {
            status: AssetId::all()
                .into_iter()
                .map(|id| (id, AssetStatus::Pending))
                .collect(),
        }
    }

    /// Everything already settled as loaded (native builds, tests)
    pub fn preloaded() -> Self {
        let mut registry = Self::new();
        for id in AssetId::all() {
            registry.mark_loaded(id);
        }
        registry
    }

    pub fn status(&self, id: AssetId) -> AssetStatus {
        self.status.get(&id).copied().unwrap_or(AssetStatus::Failed)
    }

    pub fn mark_loaded(&mut self, id: AssetId) {
        self.status.insert(id, AssetStatus::Loaded);
    }

    pub fn mark_failed(&mut self, id: AssetId) {
        log::error!("Failed to load image: {}", id.source());
        self.status.insert(id, AssetStatus::Failed);
    }

    /// Sprite can be drawn as an image
    pub fn is_available(&self, id: AssetId) -> bool {
        self.status(id) == AssetStatus::Loaded
    }

    /// No sprite is still pending
    pub fn is_settled(&self) -> bool {
        self.status.values().all(|s| *s != AssetStatus::Pending)
    }

    /// (settled, total) for the loading bar
    pub fn progress(&self) -> (usize, usize) {
        let settled = self
            .status
            .values()
            .filter(|s| **s != AssetStatus::Pending)
            .count();
        (settled, self.status.len())
    }

    pub fn failed_count(&self) -> usize {
        self.status
            .values()
            .filter(|s| **s == AssetStatus::Failed)
            .count()
    }
}
