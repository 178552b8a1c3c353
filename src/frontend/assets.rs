//! Glyph "assets"
//!
//! The terminal cannot show images or play clips, so each manifest entry is
//! resolved by its file stem to a character (sprites) or a bell flag (sounds).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use arcade_shooter::AssetError;
use arcade_shooter::assets::{AssetLoader, SoundHandle, SpriteHandle};
use arcade_shooter::render::Color;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];
const SOUND_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3"];

/// How a sprite looks on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    /// Fill color for the covered cells, if any
    pub bg: Option<Color>,
}

impl Glyph {
    const fn new(ch: char, fg: Color) -> Self {
        Self { ch, fg, bg: None }
    }
}

#[derive(Debug, Default)]
pub struct GlyphLoader {
    next: u32,
    glyphs: HashMap<SpriteHandle, Glyph>,
    bells: HashSet<SoundHandle>,
}

impl GlyphLoader {
    fn next_id(&mut self) -> u32 {
        self.next += 1;
        self.next
    }

    /// Glyph table for the canvas and the set of sounds that ring the bell
    pub fn into_parts(self) -> (HashMap<SpriteHandle, Glyph>, HashSet<SoundHandle>) {
        (self.glyphs, self.bells)
    }
}

fn stem_and_ext(path: &Path, allowed: &[&str]) -> Result<String, AssetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !allowed.contains(&ext.as_str()) {
        return Err(AssetError::Decode {
            path: path.to_path_buf(),
            reason: format!("unsupported file type `{ext}`"),
        });
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| AssetError::NotFound {
            path: path.to_path_buf(),
        })
}

fn ship_color(stem: &str) -> Color {
    match stem.chars().last() {
        Some('2') => Color::rgb(255, 80, 255),
        Some('3') => Color::rgb(255, 220, 0),
        _ => Color::rgb(0, 220, 255),
    }
}

impl AssetLoader for GlyphLoader {
    fn load_image(&mut self, path: &Path) -> Result<SpriteHandle, AssetError> {
        let stem = stem_and_ext(path, IMAGE_EXTENSIONS)?;
        let glyph = match stem.as_str() {
            s if s.starts_with("ship") => Glyph::new('A', ship_color(s)),
            "bill" | "bullet" => Glyph::new('|', Color::rgb(255, 255, 0)),
            "zombii" | "enemy" => Glyph::new('Z', Color::rgb(0, 255, 0)),
            "obstacle" => Glyph::new('#', Color::rgb(160, 160, 160)),
            "flame" => Glyph::new('*', Color::rgb(255, 120, 0)),
            "bg" | "background" => Glyph {
                ch: ' ',
                fg: Color::WHITE,
                bg: Some(Color::rgb(0, 0, 40)),
            },
            _ => {
                return Err(AssetError::NotFound {
                    path: path.to_path_buf(),
                });
            }
        };
        let handle = SpriteHandle(self.next_id());
        self.glyphs.insert(handle, glyph);
        log::debug!("Image {} -> {:?}", path.display(), glyph.ch);
        Ok(handle)
    }

    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle, AssetError> {
        let stem = stem_and_ext(path, SOUND_EXTENSIONS)?;
        let bell = match stem.as_str() {
            "destroy" | "game_over" | "gameover" => true,
            "bullet" | "thruster" => false,
            _ => {
                return Err(AssetError::NotFound {
                    path: path.to_path_buf(),
                });
            }
        };
        let handle = SoundHandle(self.next_id());
        if bell {
            self.bells.insert(handle);
        }
        Ok(handle)
    }
}
