//! Collision resolution for one step
//!
//! Pairwise scans over the live pools. Nothing is removed here; hits only
//! tombstone entities so the scans never see a collection change under them.

use glam::Vec2;

use super::state::{Entity, EntityKind, GameEvent, Session};
use crate::config::HitPolicy;

/// Resolve bullet hits, then player contacts
pub fn resolve(session: &mut Session) {
    resolve_bullets(session);
    resolve_player(session);
}

/// Bullets against obstacles, then enemies.
///
/// A deadly obstacle is neutralized (made harmless) rather than destroyed.
/// An enemy is destroyed and leaves a flame effect behind.
fn resolve_bullets(session: &mut Session) {
    let policy = session.config.rules.hit_policy;
    let points = session.config.rules.score_per_hit;

    let mut events = Vec::new();
    let mut flames: Vec<Vec2> = Vec::new();

    for bullet in session.bullets.as_mut_slice() {
        if !bullet.alive {
            continue;
        }
        let bullet_rect = bullet.rect();
        let mut hit = false;

        for obstacle in session.obstacles.as_mut_slice() {
            if !obstacle.alive || !bullet_rect.overlaps(&obstacle.rect()) {
                continue;
            }
            hit = true;
            bullet.kill();
            if let EntityKind::Obstacle { deadly, rotation } = &mut obstacle.kind {
                if *deadly {
                    *deadly = false;
                    *rotation = 0.0;
                    session.player.award(points);
                    events.push(GameEvent::ObstacleNeutralized { pos: obstacle.pos });
                    log::debug!("Bullet {} neutralized obstacle {}", bullet.id, obstacle.id);
                }
            }
            if policy == HitPolicy::FirstMatch {
                break;
            }
        }
        if hit && policy == HitPolicy::FirstMatch {
            continue;
        }

        for enemy in session.enemies.as_mut_slice() {
            if !enemy.alive || !bullet_rect.overlaps(&enemy.rect()) {
                continue;
            }
            bullet.kill();
            enemy.kill();
            session.player.award(points);
            flames.push(enemy.pos);
            events.push(GameEvent::EnemyDestroyed { pos: enemy.pos });
            log::debug!("Bullet {} destroyed enemy {}", bullet.id, enemy.id);
            if policy == HitPolicy::FirstMatch {
                break;
            }
        }
    }

    let size = session.config.effect_size();
    let ttl = session.config.effect.ttl_ticks;
    for pos in flames {
        let id = session.next_entity_id();
        if !session.effects.spawn(Entity::effect(id, pos, size, ttl)) {
            log::debug!("Effect cap reached, dropping flame at {pos}");
        }
    }
    for event in events {
        session.push_event(event);
    }
}

/// Player against obstacles and enemies.
///
/// Harmless obstacles act as platforms: the ship is set down on top of them,
/// but never pushed off the screen. Anything deadly ends the run.
fn resolve_player(session: &mut Session) {
    let mut fatal = false;
    let max_y = (session.config.screen.height - session.player.size().y).max(0.0);

    for obstacle in session.obstacles.alive() {
        if !session.player.rect().overlaps(&obstacle.rect()) {
            continue;
        }
        if obstacle.is_deadly() {
            log::debug!("Player hit deadly obstacle {}", obstacle.id);
            fatal = true;
        } else {
            let landed = obstacle.pos.y - session.player.size().y;
            session.player.pos.y = landed.clamp(0.0, max_y);
        }
    }

    for enemy in session.enemies.alive() {
        if session.player.rect().overlaps(&enemy.rect()) {
            log::debug!("Player hit enemy {}", enemy.id);
            fatal = true;
        }
    }

    if fatal {
        session.enter_game_over();
    }
}
