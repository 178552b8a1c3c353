//! Arcade Shooter - a small 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pools, spawning, collisions, game phases)
//! - `config`: Data-driven game tuning, loadable from JSON
//! - `ui`: Screen layout for buttons and ship-selection tiles
//! - `input`, `render`, `audio`, `assets`: Narrow collaborator interfaces the
//!   frontend implements

pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod sim;
pub mod ui;

pub use config::Config;
pub use error::{AssetError, ConfigError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Rejection-sampling attempts before an obstacle placement gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

    /// Gap between the ship's bottom edge and the screen bottom at reset
    pub const PLAYER_START_MARGIN: f32 = 20.0;
}
