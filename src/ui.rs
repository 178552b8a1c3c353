//! Screen layout for clickable regions
//!
//! Positions are derived from the screen size once per session so the
//! simulation and the renderer agree on where every button sits.

use glam::Vec2;

use crate::sim::Rect;

pub const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 50.0);
pub const BUTTON_GAP: f32 = 20.0;
pub const TILE_SIZE: Vec2 = Vec2::new(128.0, 128.0);
pub const TILE_GAP: f32 = 32.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Title screen "start" button
    pub start_button: Rect,
    /// Game-over "play again" button (same spot as start)
    pub reset_button: Rect,
    /// Quit button shown under start/reset
    pub exit_button: Rect,
    /// One tile per selectable ship, left to right
    pub skin_tiles: Vec<Rect>,
}

impl Layout {
    pub fn for_screen(screen: Vec2, skins: usize) -> Self {
        let button_pos = (screen - BUTTON_SIZE) / 2.0;
        let start_button = Rect::new(button_pos, BUTTON_SIZE);
        let exit_button = Rect::new(
            button_pos + Vec2::new(0.0, BUTTON_SIZE.y + BUTTON_GAP),
            BUTTON_SIZE,
        );

        // Center the row of tiles; shrink tiles if the row would not fit
        let n = skins as f32;
        let row_width = n * TILE_SIZE.x + (n - 1.0).max(0.0) * TILE_GAP;
        let scale = if row_width > screen.x && row_width > 0.0 {
            screen.x / row_width
        } else {
            1.0
        };
        let tile = TILE_SIZE * scale;
        let gap = TILE_GAP * scale;
        let left = (screen.x - row_width * scale) / 2.0;
        let top = (screen.y - tile.y) / 2.0;
        let skin_tiles = (0..skins)
            .map(|i| Rect::new(Vec2::new(left + i as f32 * (tile.x + gap), top), tile))
            .collect();

        Self {
            start_button,
            reset_button: start_button,
            exit_button,
            skin_tiles,
        }
    }

    /// Index of the skin tile under `point`
    pub fn skin_at(&self, point: Vec2) -> Option<usize> {
        self.skin_tiles.iter().position(|t| t.contains_point(point))
    }
}
