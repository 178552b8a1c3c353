//! Character-cell canvas implementing `Renderer`

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_4;
use std::io::{self, Write};

use crossterm::{QueueableCommand, cursor, style};
use glam::Vec2;

use super::Viewport;
use super::assets::Glyph;
use arcade_shooter::assets::SpriteHandle;
use arcade_shooter::render::{Color, Renderer};
use arcade_shooter::sim::Rect;

/// Spinning sprites cycle through these by eighth-turn
const SPIN_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::WHITE,
        bg: Color::BLACK,
    };
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

pub struct Canvas {
    viewport: Viewport,
    cells: Vec<Cell>,
    glyphs: HashMap<SpriteHandle, Glyph>,
}

impl Canvas {
    pub fn new(viewport: Viewport, glyphs: HashMap<SpriteHandle, Glyph>) -> Self {
        let len = usize::from(viewport.cols()) * usize::from(viewport.rows());
        Self {
            viewport,
            cells: vec![Cell::BLANK; len],
            glyphs,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let len = usize::from(viewport.cols()) * usize::from(viewport.rows());
        self.cells = vec![Cell::BLANK; len];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        let (cols, rows) = (i32::from(self.viewport.cols()), i32::from(self.viewport.rows()));
        if col < 0 || row < 0 || col >= cols || row >= rows {
            return None;
        }
        Some((row * cols + col) as usize)
    }

    /// Cells touched by a world rect, at least one per axis
    fn cell_span(&self, rect: Rect) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
        let cell = self.viewport.cell_size();
        let start = (rect.pos / cell).floor();
        let end = ((rect.pos + rect.size) / cell).ceil().max(start + 1.0);
        (
            start.x as i32..end.x as i32,
            start.y as i32..end.y as i32,
        )
    }

    fn fill(&mut self, rect: Rect, mut paint: impl FnMut(&mut Cell)) {
        let (cols, rows) = self.cell_span(rect);
        for row in rows {
            for col in cols.clone() {
                if let Some(i) = self.index(col, row) {
                    paint(&mut self.cells[i]);
                }
            }
        }
    }

    /// Plain text of one row, for tests and debugging
    pub fn row_text(&self, row: u16) -> String {
        let cols = usize::from(self.viewport.cols());
        let start = usize::from(row) * cols;
        self.cells
            .get(start..start + cols)
            .map(|cells| cells.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    /// Queue the whole canvas; the caller flushes
    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        let cols = usize::from(self.viewport.cols());
        let mut current: Option<(Color, Color)> = None;
        for (row, cells) in self.cells.chunks(cols).enumerate() {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                if current != Some((cell.fg, cell.bg)) {
                    out.queue(style::SetForegroundColor(term_color(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(term_color(cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                out.queue(style::Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

impl Renderer for Canvas {
    fn draw_sprite(&mut self, sprite: SpriteHandle, rect: Rect, rotation: f32) {
        let Some(glyph) = self.glyphs.get(&sprite).copied() else {
            return;
        };
        let ch = if rotation == 0.0 {
            glyph.ch
        } else {
            let step = (rotation / FRAC_PI_4).round() as usize;
            SPIN_FRAMES[step % SPIN_FRAMES.len()]
        };
        self.fill(rect, |cell| {
            cell.ch = ch;
            cell.fg = glyph.fg;
            if let Some(bg) = glyph.bg {
                cell.bg = bg;
            }
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        let (col, row) = self.viewport.to_cell(pos);
        for (i, ch) in text.chars().enumerate() {
            if let Some(idx) = self.index(col + i as i32, row) {
                self.cells[idx].ch = ch;
                self.cells[idx].fg = Color::WHITE;
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.fill(rect, |cell| {
            cell.ch = ' ';
            cell.bg = color;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        let glyphs = HashMap::from([(SpriteHandle(1), Glyph {
            ch: 'Z',
            fg: Color::RED,
            bg: None,
        })]);
        Canvas::new(Viewport::new(Vec2::new(800.0, 600.0), 80, 24), glyphs)
    }

    #[test]
    fn test_sprite_covers_its_cells() {
        let mut canvas = canvas();
        canvas.draw_sprite(SpriteHandle(1), Rect::from_xywh(0.0, 0.0, 64.0, 64.0), 0.0);
        // 64px wide over 10px cells -> 7 columns, 64px tall over 25px rows -> 3 rows
        assert_eq!(canvas.row_text(0).trim_end(), "ZZZZZZZ");
        assert_eq!(canvas.row_text(2).trim_end(), "ZZZZZZZ");
        assert_eq!(canvas.row_text(3).trim_end(), "");
    }

    #[test]
    fn test_tiny_sprite_gets_one_cell() {
        let mut canvas = canvas();
        canvas.draw_sprite(SpriteHandle(1), Rect::from_xywh(101.0, 1.0, 2.0, 2.0), 0.0);
        assert_eq!(canvas.row_text(0).trim(), "Z");
    }

    #[test]
    fn test_offscreen_drawing_is_clipped() {
        let mut canvas = canvas();
        canvas.draw_sprite(SpriteHandle(1), Rect::from_xywh(-64.0, -64.0, 80.0, 80.0), 0.0);
        canvas.draw_text("far away", Vec2::new(5000.0, 10.0));
        assert_eq!(canvas.row_text(0).trim_end(), "ZZ");
    }

    #[test]
    fn test_text_and_unknown_sprite() {
        let mut canvas = canvas();
        canvas.draw_sprite(SpriteHandle(9), Rect::from_xywh(0.0, 0.0, 64.0, 64.0), 0.0);
        canvas.draw_text("Score: 3", Vec2::new(10.0, 30.0));
        assert_eq!(canvas.row_text(1).trim(), "Score: 3");
        assert_eq!(canvas.row_text(0).trim(), "");
    }

    #[test]
    fn test_spinning_sprite_changes_glyph() {
        let mut canvas = canvas();
        canvas.draw_sprite(SpriteHandle(1), Rect::from_xywh(0.0, 0.0, 5.0, 5.0), FRAC_PI_4);
        assert_eq!(canvas.row_text(0).trim(), "/");
    }
}
