//! Backend-agnostic draw list
//!
//! `build_scene` turns the current state into a flat list of draw
//! operations in painter order. Backends only have to know how to execute
//! each op; every layout decision is made here.

use crate::assets::{AssetId, AssetRegistry};
use crate::settings::Settings;
use crate::sim::{Aabb, GamePhase, SimulationState, Stance};

use super::colors::Palette;

/// Font used for in-canvas text
pub const FONT: &str = "12px 'Press Start 2P'";

/// A single drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Wipe the whole canvas
    Clear { width: f32, height: f32 },
    /// Draw a loaded sprite stretched over `rect`
    Sprite { asset: AssetId, rect: Aabb },
    /// Solid rectangle
    Fill { color: &'static str, rect: Aabb },
    /// One-pixel rectangle outline
    Outline { color: &'static str, rect: Aabb },
    /// Text centered on `x`
    Text {
        text: String,
        x: f32,
        y: f32,
        color: &'static str,
    },
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: vec![DrawOp::Clear { width, height }],
        }
    }

    fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// All text drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Build the draw list for the current frame
pub fn build_scene(state: &SimulationState, assets: &AssetRegistry, settings: &Settings) -> Scene {
    let geo = &state.geometry;
    let palette = Palette::for_settings(settings);
    let mut scene = Scene::new(geo.width, geo.height);

    if !assets.is_settled() {
        loading_bar(&mut scene, assets, &palette);
        return scene;
    }

    // Runner, drawn at its exact hitbox
    let runner = state.player_hitbox();
    let runner_asset = match state.player.stance {
        Stance::Standing => AssetId::RunnerStanding,
        Stance::Crouching => AssetId::RunnerCrouching,
    };
    if assets.is_available(runner_asset) {
        scene.push(DrawOp::Sprite {
            asset: runner_asset,
            rect: runner,
        });
    } else {
        scene.push(DrawOp::Fill {
            color: palette.runner,
            rect: runner,
        });
    }

    // Obstacles: sprites padded around the logical box, fallbacks exact
    let padding = settings.padding_factor(&state.tuning);
    for obstacle in &state.obstacles {
        let asset = AssetId::Obstacle(obstacle.kind);
        let hitbox = obstacle.hitbox();
        if assets.is_available(asset) {
            scene.push(DrawOp::Sprite {
                asset,
                rect: hitbox.scaled(padding),
            });
        } else {
            let color = if obstacle.is_flying() {
                palette.flying_obstacle
            } else {
                palette.ground_obstacle
            };
            scene.push(DrawOp::Fill { color, rect: hitbox });
        }
    }

    if settings.show_hitboxes {
        scene.push(DrawOp::Outline {
            color: palette.hitbox,
            rect: runner,
        });
        for obstacle in &state.obstacles {
            scene.push(DrawOp::Outline {
                color: palette.hitbox,
                rect: obstacle.hitbox(),
            });
        }
    }

    let message = match state.phase {
        GamePhase::NotStarted => Some("Press SPACE/TAP to Start".to_string()),
        GamePhase::GameOver => Some(format!("Game Over! Score: {}", state.score)),
        GamePhase::Running => None,
    };
    if let Some(text) = message {
        scene.push(DrawOp::Text {
            text,
            x: geo.width / 2.0,
            y: geo.height / 2.0,
            color: palette.text,
        });
    }

    scene
}

fn loading_bar(scene: &mut Scene, assets: &AssetRegistry, palette: &Palette) {
    let (w, h) = (scene.width, scene.height);
    let track = Aabb::from_rect(w * 0.3, h / 2.0 - 5.0, w * 0.4, 10.0);
    scene.push(DrawOp::Fill {
        color: palette.loading_track,
        rect: track,
    });

    let (settled, total) = assets.progress();
    if settled > 0 && total > 0 {
        let fraction = settled as f32 / total as f32;
        scene.push(DrawOp::Fill {
            color: palette.loading_fill,
            rect: Aabb::from_rect(track.left(), track.top(), track.size().x * fraction, 10.0),
        });
    }
}
