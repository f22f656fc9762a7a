//! Canvas2D backend

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{DrawOp, FONT, Scene};
use super::Renderer;
use crate::assets::AssetId;
use crate::sim::Aabb;

/// Paints scenes onto a `<canvas>` element
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<AssetId, HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("getContext failed: {:?}", e))?
            .ok_or("2d context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "not a 2d context".to_string())?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
        })
    }

    /// Register a loaded sprite
    pub fn insert_image(&mut self, id: AssetId, image: HtmlImageElement) {
        self.images.insert(id, image);
    }

    /// Match the backing store to the playfield size
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    fn draw_sprite(&self, asset: AssetId, rect: &Aabb) {
        let Some(image) = self.images.get(&asset) else {
            return;
        };
        // A decode that failed after onload still reports zero width
        if !image.complete() || image.natural_width() == 0 {
            return;
        }
        let size = rect.size();
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.left() as f64,
            rect.top() as f64,
            size.x as f64,
            size.y as f64,
        ) {
            log::warn!("drawImage failed: {:?}", e);
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, scene: &Scene) {
        self.resize(scene.width.round() as u32, scene.height.round() as u32);

        for op in &scene.ops {
            match op {
                DrawOp::Clear { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
                }
                DrawOp::Sprite { asset, rect } => self.draw_sprite(*asset, rect),
                DrawOp::Fill { color, rect } => {
                    let size = rect.size();
                    self.ctx.set_fill_style_str(color);
                    self.ctx.fill_rect(
                        rect.left() as f64,
                        rect.top() as f64,
                        size.x as f64,
                        size.y as f64,
                    );
                }
                DrawOp::Outline { color, rect } => {
                    let size = rect.size();
                    self.ctx.set_stroke_style_str(color);
                    self.ctx.set_line_width(1.0);
                    self.ctx.stroke_rect(
                        rect.left() as f64,
                        rect.top() as f64,
                        size.x as f64,
                        size.y as f64,
                    );
                }
                DrawOp::Text {
                    text,
                    x,
                    y,
                    color,
                } => {
                    self.ctx.set_fill_style_str(color);
                    self.ctx.set_font(FONT);
                    self.ctx.set_text_align("center");
                    if let Err(e) = self.ctx.fill_text(text, *x as f64, *y as f64) {
                        log::warn!("fillText failed: {:?}", e);
                    }
                }
            }
        }
    }
}
