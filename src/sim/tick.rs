//! Fixed timestep simulation tick
//!
//! Screen-mode transitions plus the per-frame step that advances a run.

use std::f32::consts::TAU;

use glam::Vec2;

use super::collision;
use super::rect::Rect;
use super::spawner;
use super::state::{Entity, EntityKind, GameEvent, GamePhase, Session};
use crate::config::EnemyMotion;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement direction, each axis in -1..=1 (y grows downward)
    pub move_dir: Vec2,
    /// Fire straight up from the ship nose
    pub fire: bool,
    /// Mouse click position this frame, in world coordinates
    pub click: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Start / restart from the keyboard
    pub confirm: bool,
    /// Quit request from the keyboard
    pub exit: bool,
    /// Skin picked from the keyboard on the selection screen
    pub skin_choice: Option<usize>,
}

impl TickInput {
    fn clicked(&self, button: &Rect) -> bool {
        self.click.is_some_and(|p| button.contains_point(p))
    }
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if input.exit {
        session.request_exit();
        return;
    }

    match session.phase {
        GamePhase::NotStarted => {
            if input.clicked(&session.layout.exit_button) {
                session.request_exit();
            } else if input.confirm || input.clicked(&session.layout.start_button) {
                session.start();
            }
        }
        GamePhase::Selecting => {
            let choice = input
                .skin_choice
                .or_else(|| input.click.and_then(|p| session.layout.skin_at(p)));
            if let Some(skin) = choice {
                if !session.choose_skin(skin) {
                    log::debug!("Ignoring skin choice {skin}");
                }
            }
        }
        GamePhase::Paused => {
            if input.pause {
                session.toggle_pause();
            }
        }
        GamePhase::GameOver => {
            if input.clicked(&session.layout.exit_button) {
                session.request_exit();
            } else if input.confirm || input.clicked(&session.layout.reset_button) {
                session.restart();
            }
        }
        GamePhase::Playing => {
            if input.pause {
                session.toggle_pause();
                return;
            }
            step(session, input, dt);
        }
    }
}

/// One gameplay step. Order matters: input, bullets, spawning and motion,
/// collisions, compaction, then the terminal check.
fn step(session: &mut Session, input: &TickInput, dt: f32) {
    apply_input(session, input, dt);
    advance_bullets(session, dt);
    spawner::spawn_step(session);
    advance_enemies(session, dt);
    advance_obstacles(session, dt);
    advance_effects(session);

    collision::resolve(session);

    session.bullets.compact();
    session.enemies.compact();
    session.obstacles.compact();
    session.effects.compact();

    check_terminal(session);
    session.time_ticks += 1;
}

fn apply_input(session: &mut Session, input: &TickInput, dt: f32) {
    let mut dir = input.move_dir.clamp(Vec2::NEG_ONE, Vec2::ONE);
    if !session.config.player.vertical_movement {
        dir.y = 0.0;
    }
    let speed = session.config.player.speed;
    let max = (session.config.screen.size() - session.player.size()).max(Vec2::ZERO);
    session.player.pos = (session.player.pos + dir * speed * dt).clamp(Vec2::ZERO, max);
    session.set_thrusting(dir != Vec2::ZERO);

    if input.fire {
        fire(session, None);
    }
    if session.config.rules.aimed_fire {
        if let Some(target) = input.click {
            fire(session, Some(target));
        }
    }
}

/// Spawn a bullet at the ship nose, straight up or towards `target`
fn fire(session: &mut Session, target: Option<Vec2>) {
    if session.bullets.count_alive() >= session.bullets.cap() {
        log::debug!("Bullet cap {} reached, shot skipped", session.bullets.cap());
        return;
    }
    let size = session.config.bullet_size();
    let speed = session.config.bullet.speed;
    let ship = session.player.rect();
    let origin = Vec2::new(ship.center().x - size.x / 2.0, ship.pos.y - size.y);
    let dir = target
        .and_then(|t| (t - (origin + size / 2.0)).try_normalize())
        .unwrap_or(Vec2::NEG_Y);

    let id = session.next_entity_id();
    session
        .bullets
        .spawn(Entity::bullet(id, origin, dir * speed, size));
    session.push_event(GameEvent::ShotFired);
}

fn advance_bullets(session: &mut Session, dt: f32) {
    let playfield = Rect::new(Vec2::ZERO, session.config.screen.size());
    for bullet in session.bullets.as_mut_slice() {
        if !bullet.alive {
            continue;
        }
        bullet.pos += bullet.vel * dt;
        if !bullet.rect().overlaps(&playfield) {
            bullet.kill();
        }
    }
}

fn advance_enemies(session: &mut Session, dt: f32) {
    let motion = session.config.enemy.motion;
    let screen = session.config.screen.size();
    let mut escaped = 0;

    for enemy in session.enemies.as_mut_slice() {
        if !enemy.alive {
            continue;
        }
        enemy.pos += enemy.vel * dt;
        match motion {
            EnemyMotion::Descend => {
                if enemy.pos.y >= screen.y {
                    log::debug!("Enemy {} escaped", enemy.id);
                    enemy.kill();
                    escaped += 1;
                }
            }
            EnemyMotion::Bounce => bounce(enemy, screen),
        }
    }

    for _ in 0..escaped {
        session.escaped += 1;
        let remaining = session.player.lose_life();
        session.push_event(GameEvent::LifeLost { remaining });
    }
}

/// Reflect off the screen edges and clamp back inside
fn bounce(enemy: &mut Entity, screen: Vec2) {
    let max = (screen - enemy.size()).max(Vec2::ZERO);
    if enemy.pos.x < 0.0 {
        enemy.pos.x = 0.0;
        enemy.vel.x = enemy.vel.x.abs();
    } else if enemy.pos.x > max.x {
        enemy.pos.x = max.x;
        enemy.vel.x = -enemy.vel.x.abs();
    }
    if enemy.pos.y < 0.0 {
        enemy.pos.y = 0.0;
        enemy.vel.y = enemy.vel.y.abs();
    } else if enemy.pos.y > max.y {
        enemy.pos.y = max.y;
        enemy.vel.y = -enemy.vel.y.abs();
    }
}

fn advance_obstacles(session: &mut Session, dt: f32) {
    let spin = session.config.obstacle.spin;
    for obstacle in session.obstacles.as_mut_slice() {
        if !obstacle.alive {
            continue;
        }
        obstacle.pos += obstacle.vel * dt;
        if let EntityKind::Obstacle {
            deadly: false,
            rotation,
        } = &mut obstacle.kind
        {
            *rotation = (*rotation + spin * dt).rem_euclid(TAU);
        }
        if obstacle.pos.x < -obstacle.size().x {
            spawner::recycle_obstacle(obstacle, &mut session.rng, &session.config, &session.player);
        }
    }
}

fn advance_effects(session: &mut Session) {
    for effect in session.effects.as_mut_slice() {
        let expired = match &mut effect.kind {
            EntityKind::Effect { ttl_ticks } => {
                *ttl_ticks = ttl_ticks.saturating_sub(1);
                *ttl_ticks == 0
            }
            _ => false,
        };
        if expired {
            effect.kill();
        }
    }
}

fn check_terminal(session: &mut Session) {
    if session.phase != GamePhase::Playing {
        return;
    }
    let out_of_lives = session.player.lives == 0;
    let too_many_escaped = session
        .config
        .rules
        .escape_limit
        .is_some_and(|limit| session.escaped >= limit);
    if out_of_lives || too_many_escaped {
        session.enter_game_over();
    }
}
