//! Game state and core simulation types
//!
//! The `Session` owns everything that changes during one play-through.
//! Frontends get `&Session` for drawing and never hold entities themselves.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::Pool;
use super::rect::Rect;
use super::spawner;
use crate::config::Config;
use crate::consts::PLAYER_START_MARGIN;
use crate::ui::Layout;

/// Current screen mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with the start button
    NotStarted,
    /// Ship-skin selection tiles
    Selecting,
    /// Active gameplay
    Playing,
    /// Simulation frozen, still rendered
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Kind-specific entity data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Bullet,
    Enemy,
    Obstacle {
        /// Contact kills the player; a hit from a bullet clears it
        deadly: bool,
        /// Decorative spin, radians
        rotation: f32,
    },
    /// Flame left where an enemy died
    Effect { ttl_ticks: u32 },
}

/// A bullet, enemy, obstacle or effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at creation
    size: Vec2,
    pub alive: bool,
    pub kind: EntityKind,
}

impl Entity {
    fn new(id: u32, pos: Vec2, vel: Vec2, size: Vec2, kind: EntityKind) -> Self {
        Self {
            id,
            pos,
            vel,
            size,
            alive: true,
            kind,
        }
    }

    pub fn bullet(id: u32, pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self::new(id, pos, vel, size, EntityKind::Bullet)
    }

    pub fn enemy(id: u32, pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self::new(id, pos, vel, size, EntityKind::Enemy)
    }

    pub fn obstacle(id: u32, pos: Vec2, vel: Vec2, size: Vec2, deadly: bool) -> Self {
        Self::new(
            id,
            pos,
            vel,
            size,
            EntityKind::Obstacle {
                deadly,
                rotation: 0.0,
            },
        )
    }

    pub fn effect(id: u32, pos: Vec2, size: Vec2, ttl_ticks: u32) -> Self {
        Self::new(id, pos, Vec2::ZERO, size, EntityKind::Effect { ttl_ticks })
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Whether touching this entity ends the run
    pub fn is_deadly(&self) -> bool {
        match self.kind {
            EntityKind::Enemy => true,
            EntityKind::Obstacle { deadly, .. } => deadly,
            EntityKind::Bullet | EntityKind::Effect { .. } => false,
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

/// The player's ship plus its score/lives ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    size: Vec2,
    pub lives: u32,
    /// Never decreases within a session
    score: u64,
    /// Chosen on the selection screen, fixed for the session
    skin: usize,
}

impl Player {
    pub fn new(config: &Config, skin: usize) -> Self {
        let size = config.player_size();
        Self {
            pos: Vec2::new(
                config.screen.width / 2.0,
                config.screen.height - size.y - PLAYER_START_MARGIN,
            )
            .min(config.screen.size() - size),
            size,
            lives: config.player.max_lives,
            score: 0,
            skin,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn skin(&self) -> usize {
        self.skin
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Returns the lives left afterwards
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }
}

/// Things that happened during a tick, for audio and other observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    ShotFired,
    EnemyDestroyed { pos: Vec2 },
    ObstacleNeutralized { pos: Vec2 },
    LifeLost { remaining: u32 },
    GameOver,
    Paused,
    Resumed,
    ThrusterStarted,
    ThrusterStopped,
    ExitRequested,
}

/// Complete mutable state of one play-through
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) config: Config,
    pub(crate) layout: Layout,
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: Pool,
    pub enemies: Pool,
    pub obstacles: Pool,
    pub effects: Pool,
    /// Enemies that slipped past the bottom edge
    pub escaped: u32,
    /// Simulation ticks spent playing
    pub time_ticks: u64,
    /// Ship currently moving (drives the looping thruster cue)
    pub(crate) thrusting: bool,
    /// Set once the game-over cue has fired for this run
    game_over_latched: bool,
    events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    seed: u64,
    next_id: u32,
}

impl Session {
    /// New session on the title screen
    pub fn new(config: Config, seed: u64) -> Self {
        let layout = Layout::for_screen(config.screen.size(), config.skin_count());
        Self::blank(config, layout, 0, Pcg32::seed_from_u64(seed), seed)
    }

    fn blank(config: Config, layout: Layout, skin: usize, rng: Pcg32, seed: u64) -> Self {
        Self {
            player: Player::new(&config, skin),
            bullets: Pool::with_cap(config.bullet.cap),
            enemies: Pool::with_cap(config.enemy.cap),
            obstacles: Pool::with_cap(config.obstacle.cap),
            effects: Pool::with_cap(config.effect.cap),
            config,
            layout,
            phase: GamePhase::NotStarted,
            escaped: 0,
            time_ticks: 0,
            thrusting: false,
            game_over_latched: false,
            events: Vec::new(),
            rng,
            seed,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the whole session with a fresh run using the current skin.
    ///
    /// Config, layout and the RNG stream carry over; queued events survive so
    /// the frontend still sees anything raised this frame.
    pub fn reset(&mut self) {
        let skin = self.player.skin;
        let mut fresh = Self::blank(
            self.config.clone(),
            self.layout.clone(),
            skin,
            self.rng.clone(),
            self.seed,
        );
        fresh.events = std::mem::take(&mut self.events);
        fresh.phase = GamePhase::Playing;
        spawner::populate_initial(&mut fresh);
        *self = fresh;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Session reset (skin {}, {} enemies)", skin, self.enemies.len());
    }

    /// Leave the title screen
    pub fn start(&mut self) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        if self.config.skin_count() > 1 {
            log::info!("Phase: NotStarted -> Selecting");
            self.phase = GamePhase::Selecting;
        } else {
            log::info!("Phase: NotStarted -> Playing");
            self.player.skin = 0;
            self.reset();
        }
    }

    /// Pick a ship and begin playing. Out-of-range choices are ignored.
    pub fn choose_skin(&mut self, skin: usize) -> bool {
        if self.phase != GamePhase::Selecting || skin >= self.config.skin_count() {
            return false;
        }
        log::info!("Phase: Selecting -> Playing (skin {skin})");
        self.player.skin = skin;
        self.reset();
        true
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                log::info!("Phase: Playing -> Paused");
                self.phase = GamePhase::Paused;
                self.set_thrusting(false);
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                log::info!("Phase: Paused -> Playing");
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    /// End the run. The game-over event fires once per run however often
    /// this is called.
    pub fn enter_game_over(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::info!(
                "Phase: {:?} -> GameOver (score {}, lives {})",
                self.phase,
                self.player.score,
                self.player.lives
            );
            self.phase = GamePhase::GameOver;
            self.set_thrusting(false);
        }
        if !self.game_over_latched {
            self.game_over_latched = true;
            self.events.push(GameEvent::GameOver);
        }
    }

    pub fn is_game_over_latched(&self) -> bool {
        self.game_over_latched
    }

    /// Start a new run from the game-over screen
    pub fn restart(&mut self) {
        if self.phase == GamePhase::GameOver {
            log::info!("Phase: GameOver -> Playing (restart)");
            self.reset();
        }
    }

    pub fn request_exit(&mut self) {
        self.events.push(GameEvent::ExitRequested);
    }

    pub(crate) fn set_thrusting(&mut self, moving: bool) {
        if moving == self.thrusting {
            return;
        }
        self.thrusting = moving;
        self.events.push(if moving {
            GameEvent::ThrusterStarted
        } else {
            GameEvent::ThrusterStopped
        });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
