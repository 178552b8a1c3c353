//! Rendering interface
//!
//! The core describes each frame as sprites, rectangles and text in world
//! coordinates. Frontends implement `Renderer` to put them on screen.

pub mod scene;

use glam::Vec2;

use crate::assets::SpriteHandle;
use crate::sim::Rect;

pub use scene::draw_frame;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GRAY: Color = Color::rgb(96, 96, 96);
    /// Translucent-looking dim used behind overlays
    pub const SHADE: Color = Color::rgb(32, 32, 48);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Drawing backend
pub trait Renderer {
    /// Draw `sprite` stretched over `rect`, rotated by `rotation` radians about its center
    fn draw_sprite(&mut self, sprite: SpriteHandle, rect: Rect, rotation: f32);
    /// Draw text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2);
    fn draw_rect(&mut self, rect: Rect, color: Color);
}
