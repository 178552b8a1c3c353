//! Terminal frontend
//!
//! Implements the core's collaborator traits on top of crossterm: a character
//! canvas for `Renderer`, key/mouse tracking for `InputSource`, the terminal
//! bell for `AudioSink` and glyph lookup for `AssetLoader`.

pub mod assets;
pub mod audio;
pub mod canvas;
pub mod input;

use glam::Vec2;

/// Mapping between world coordinates and terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    world: Vec2,
    cols: u16,
    rows: u16,
}

impl Viewport {
    pub fn new(world: Vec2, cols: u16, rows: u16) -> Self {
        Self {
            world,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// World units covered by one cell
    pub fn cell_size(&self) -> Vec2 {
        self.world / Vec2::new(f32::from(self.cols), f32::from(self.rows))
    }

    /// Center of a cell in world coordinates
    pub fn to_world(&self, col: u16, row: u16) -> Vec2 {
        (Vec2::new(f32::from(col), f32::from(row)) + 0.5) * self.cell_size()
    }

    /// Cell containing a world point; may fall outside the grid
    pub fn to_cell(&self, point: Vec2) -> (i32, i32) {
        let cell = (point / self.cell_size()).floor();
        (cell.x as i32, cell.y as i32)
    }
}
