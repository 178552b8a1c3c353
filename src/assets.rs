//! Asset manifest and logical handles
//!
//! Images and sounds are decoded by the frontend's loader; the core only
//! ever sees the opaque handles it hands back.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::error::AssetError;

/// Opaque handle to a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

/// Opaque handle to a loaded sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Logical sprite slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Ship(usize),
    Bullet,
    Enemy,
    Obstacle,
    Background,
    Flame,
}

/// File paths for every asset, relative to the working directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub ship_skins: Vec<PathBuf>,
    pub bullet: PathBuf,
    pub enemy: PathBuf,
    pub obstacle: PathBuf,
    pub background: PathBuf,
    pub flame: PathBuf,
    pub bullet_sound: PathBuf,
    pub destroy_sound: PathBuf,
    pub game_over_sound: PathBuf,
    pub thruster_sound: PathBuf,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            ship_skins: vec![
                "sprites/ship1.png".into(),
                "sprites/ship2.png".into(),
                "sprites/ship3.png".into(),
            ],
            bullet: "sprites/bill1.png".into(),
            enemy: "sprites/zombii.png".into(),
            obstacle: "sprites/obstacle.png".into(),
            background: "sprites/bg.png".into(),
            flame: "sprites/flame.png".into(),
            bullet_sound: "sounds/bullet.wav".into(),
            destroy_sound: "sounds/destroy.wav".into(),
            game_over_sound: "sounds/game_over.wav".into(),
            thruster_sound: "sounds/thruster.wav".into(),
        }
    }
}

/// Backend that decodes files into handles
pub trait AssetLoader {
    fn load_image(&mut self, path: &Path) -> Result<SpriteHandle, AssetError>;
    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle, AssetError>;
}

/// All loaded handles, resolved by logical slot
#[derive(Debug, Clone, Default)]
pub struct Assets {
    sprites: HashMap<SpriteId, SpriteHandle>,
    sounds: HashMap<SoundEffect, SoundHandle>,
}

impl Assets {
    /// Load every asset in the manifest, stopping at the first failure
    pub fn load(manifest: &AssetManifest, loader: &mut impl AssetLoader) -> Result<Self, AssetError> {
        let mut assets = Self::default();

        for (i, path) in manifest.ship_skins.iter().enumerate() {
            assets.sprites.insert(SpriteId::Ship(i), loader.load_image(path)?);
        }
        let images = [
            (SpriteId::Bullet, &manifest.bullet),
            (SpriteId::Enemy, &manifest.enemy),
            (SpriteId::Obstacle, &manifest.obstacle),
            (SpriteId::Background, &manifest.background),
            (SpriteId::Flame, &manifest.flame),
        ];
        for (id, path) in images {
            assets.sprites.insert(id, loader.load_image(path)?);
        }

        let sounds = [
            (SoundEffect::Bullet, &manifest.bullet_sound),
            (SoundEffect::Destroy, &manifest.destroy_sound),
            (SoundEffect::GameOver, &manifest.game_over_sound),
            (SoundEffect::Thruster, &manifest.thruster_sound),
        ];
        for (effect, path) in sounds {
            assets.sounds.insert(effect, loader.load_sound(path)?);
        }

        log::info!(
            "Loaded {} sprites and {} sounds",
            assets.sprites.len(),
            assets.sounds.len()
        );
        Ok(assets)
    }

    /// Sprite for a slot. Unknown ship skins fall back to the first skin.
    pub fn sprite(&self, id: SpriteId) -> Option<SpriteHandle> {
        match (self.sprites.get(&id), id) {
            (Some(handle), _) => Some(*handle),
            (None, SpriteId::Ship(_)) => self.sprites.get(&SpriteId::Ship(0)).copied(),
            (None, _) => None,
        }
    }

    pub fn sound(&self, effect: SoundEffect) -> Option<SoundHandle> {
        self.sounds.get(&effect).copied()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Hands out sequential handles; fails for any path listed in `missing`
    #[derive(Default)]
    pub(crate) struct FakeLoader {
        pub next: u32,
        pub missing: Vec<PathBuf>,
        pub loaded: Vec<PathBuf>,
    }

    impl FakeLoader {
        fn check(&mut self, path: &Path) -> Result<u32, AssetError> {
            if self.missing.iter().any(|m| m == path) {
                return Err(AssetError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            self.loaded.push(path.to_path_buf());
            self.next += 1;
            Ok(self.next)
        }
    }

    impl AssetLoader for FakeLoader {
        fn load_image(&mut self, path: &Path) -> Result<SpriteHandle, AssetError> {
            self.check(path).map(SpriteHandle)
        }

        fn load_sound(&mut self, path: &Path) -> Result<SoundHandle, AssetError> {
            self.check(path).map(SoundHandle)
        }
    }

    #[test]
    fn test_load_resolves_every_slot() {
        let manifest = AssetManifest::default();
        let mut loader = FakeLoader::default();
        let assets = Assets::load(&manifest, &mut loader).expect("all assets present");

        assert_eq!(loader.loaded.len(), 3 + 5 + 4);
        assert!(assets.sprite(SpriteId::Ship(2)).is_some());
        assert!(assets.sprite(SpriteId::Flame).is_some());
        assert!(assets.sound(SoundEffect::Thruster).is_some());
        assert_ne!(
            assets.sprite(SpriteId::Bullet),
            assets.sprite(SpriteId::Enemy)
        );
    }

    #[test]
    fn test_missing_asset_is_fatal() {
        let manifest = AssetManifest::default();
        let mut loader = FakeLoader {
            missing: vec![PathBuf::from("sounds/game_over.wav")],
            ..Default::default()
        };
        let err = Assets::load(&manifest, &mut loader).unwrap_err();
        assert_eq!(
            err,
            AssetError::NotFound {
                path: PathBuf::from("sounds/game_over.wav")
            }
        );
    }

    #[test]
    fn test_unknown_skin_falls_back_to_first() {
        let assets = Assets::load(&AssetManifest::default(), &mut FakeLoader::default())
            .expect("all assets present");
        assert_eq!(
            assets.sprite(SpriteId::Ship(9)),
            assets.sprite(SpriteId::Ship(0))
        );
    }
}
