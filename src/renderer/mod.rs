//! Rendering module
//!
//! The game state is first flattened into a [`Scene`] draw list, which a
//! backend then executes. The browser build paints with Canvas2D.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawOp, Scene, build_scene};

/// Something that can paint a scene
pub trait Renderer {
    fn render(&mut self, scene: &Scene);
}

/// Renderer that keeps only frame statistics (native runs, tests)
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub last_op_count: usize,
    pub last_texts: Vec<String>,
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene) {
        self.frames += 1;
        self.last_op_count = scene.ops.len();
        self.last_texts = scene.texts().map(str::to_owned).collect();
    }
}

/// Colors for game elements (CSS color strings)
pub mod colors {
    use crate::settings::Settings;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Palette {
        pub runner: &'static str,
        pub ground_obstacle: &'static str,
        pub flying_obstacle: &'static str,
        pub hitbox: &'static str,
        pub text: &'static str,
        pub loading_track: &'static str,
        pub loading_fill: &'static str,
    }

    pub const STANDARD: Palette = Palette {
        runner: "#666",
        ground_obstacle: "#2a9d8f",
        flying_obstacle: "#888",
        hitbox: "#e63946",
        text: "#555",
        loading_track: "#ccc",
        loading_fill: "#888",
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        runner: "#000",
        ground_obstacle: "#004d40",
        flying_obstacle: "#333",
        hitbox: "#d00000",
        text: "#000",
        loading_track: "#999",
        loading_fill: "#000",
    };

    impl Palette {
        pub fn for_settings(settings: &Settings) -> Palette {
            if settings.high_contrast {
                HIGH_CONTRAST
            } else {
                STANDARD
            }
        }
    }
}
