//! Game tuning and rules
//!
//! Every gameplay constant lives here so variants differ only by data.
//! Loaded from an optional JSON file; missing fields fall back to defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::AssetManifest;
use crate::error::ConfigError;

/// How enemies move once spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EnemyMotion {
    /// Fall from the top; an enemy reaching the bottom costs a life
    #[default]
    Descend,
    /// Roam freely, reflecting off the screen edges
    Bounce,
}

/// What a bullet does when it overlaps several targets in one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HitPolicy {
    /// Every overlapping target is hit
    #[default]
    AllMatches,
    /// Only the first target in scan order is hit
    FirstMatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl ScreenConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels per second along each held axis
    pub speed: f32,
    pub max_lives: u32,
    /// Up/down movement (some variants only move sideways)
    pub vertical_movement: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            speed: 240.0,
            max_lives: 3,
            vertical_movement: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Maximum live bullets
    pub cap: usize,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 8.0,
            speed: 480.0,
            cap: 32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Spawn trial odds: one success in `spawn_one_in` steps (0 disables spawning)
    pub spawn_one_in: u32,
    /// Enemies attempted per successful trial
    pub batch: u32,
    /// Enemies placed on screen at session reset
    pub initial: u32,
    pub cap: usize,
    pub motion: EnemyMotion,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            speed: 120.0,
            spawn_one_in: 120,
            batch: 5,
            initial: 5,
            cap: 20,
            motion: EnemyMotion::Descend,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: f32,
    pub height: f32,
    /// Leftward scroll speed
    pub speed: f32,
    pub spawn_one_in: u32,
    pub cap: usize,
    /// Spin of harmless obstacles (radians per second)
    pub spin: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            speed: 120.0,
            spawn_one_in: 120,
            cap: 8,
            spin: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub width: f32,
    pub height: f32,
    /// Frames a flame effect stays on screen
    pub ttl_ticks: u32,
    pub cap: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            ttl_ticks: 30,
            cap: 16,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Points per destroyed enemy or neutralized obstacle
    pub score_per_hit: u64,
    pub hit_policy: HitPolicy,
    /// Game over once this many enemies slipped past (hurdle counter)
    pub escape_limit: Option<u32>,
    /// Mouse clicks while playing fire towards the cursor
    pub aimed_fire: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            score_per_hit: 1,
            hit_policy: HitPolicy::AllMatches,
            escape_limit: None,
            aimed_fire: false,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub enemy: EnemyConfig,
    pub obstacle: ObstacleConfig,
    pub effect: EffectConfig,
    pub rules: RulesConfig,
    pub assets: AssetManifest,
}

impl Config {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Number of selectable ship skins
    pub fn skin_count(&self) -> usize {
        self.assets.ship_skins.len()
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player.width, self.player.height)
    }

    pub fn bullet_size(&self) -> Vec2 {
        Vec2::new(self.bullet.width, self.bullet.height)
    }

    pub fn enemy_size(&self) -> Vec2 {
        Vec2::new(self.enemy.width, self.enemy.height)
    }

    pub fn obstacle_size(&self) -> Vec2 {
        Vec2::new(self.obstacle.width, self.obstacle.height)
    }

    pub fn effect_size(&self) -> Vec2 {
        Vec2::new(self.effect.width, self.effect.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let screen = self.screen.size();
        positive("screen", screen)?;
        fits("player", self.player_size(), screen)?;
        fits("bullet", self.bullet_size(), screen)?;
        fits("enemy", self.enemy_size(), screen)?;
        fits("obstacle", self.obstacle_size(), screen)?;
        positive("effect", self.effect_size())?;

        for (field, speed) in [
            ("player.speed", self.player.speed),
            ("bullet.speed", self.bullet.speed),
            ("enemy.speed", self.enemy.speed),
            ("obstacle.speed", self.obstacle.speed),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(invalid(field, format!("must be positive, got {speed}")));
            }
        }

        for (field, cap) in [
            ("bullet.cap", self.bullet.cap),
            ("enemy.cap", self.enemy.cap),
            ("obstacle.cap", self.obstacle.cap),
            ("effect.cap", self.effect.cap),
        ] {
            if cap == 0 {
                return Err(invalid(field, "must be at least 1".into()));
            }
        }

        if self.player.max_lives == 0 {
            return Err(invalid("player.max_lives", "must be at least 1".into()));
        }
        if self.skin_count() == 0 {
            return Err(invalid("assets.ship_skins", "needs at least one skin".into()));
        }
        if self.enemy.initial as usize > self.enemy.cap {
            return Err(invalid(
                "enemy.initial",
                format!("{} exceeds enemy.cap {}", self.enemy.initial, self.enemy.cap),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, size: Vec2) -> Result<(), ConfigError> {
    if size.x > 0.0 && size.y > 0.0 && size.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("size must be positive, got {size}")))
    }
}

fn fits(field: &'static str, size: Vec2, screen: Vec2) -> Result<(), ConfigError> {
    positive(field, size)?;
    if size.x > screen.x || size.y > screen.y {
        return Err(invalid(field, format!("size {size} larger than screen {screen}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.skin_count(), 3);
        assert_eq!(config.rules.hit_policy, HitPolicy::AllMatches);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(
            r#"{ "enemy": { "motion": "Bounce", "cap": 7 }, "rules": { "escape_limit": 5 } }"#,
        )
        .expect("partial config parses");
        assert_eq!(config.enemy.motion, EnemyMotion::Bounce);
        assert_eq!(config.enemy.cap, 7);
        assert_eq!(config.enemy.batch, 5);
        assert_eq!(config.rules.escape_limit, Some(5));
        assert_eq!(config.screen.width, 800.0);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let err = Config::from_json(r#"{ "bullet": { "cap": 0 } }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                field: "bullet.cap",
                reason: "must be at least 1".into()
            }
        );
    }

    #[test]
    fn test_oversized_entity_rejected() {
        let mut config = Config::default();
        config.obstacle.height = 1000.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "obstacle", .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
