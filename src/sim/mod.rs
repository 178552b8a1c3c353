//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG owned by the session
//! - Entities kept in insertion order, removed only by compaction
//! - No rendering, audio or terminal dependencies

pub mod collision;
pub mod pool;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use pool::Pool;
pub use rect::{Rect, overlaps};
pub use state::{Entity, EntityKind, GameEvent, GamePhase, Player, Session};
pub use tick::{TickInput, tick};
