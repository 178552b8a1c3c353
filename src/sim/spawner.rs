//! Enemy and obstacle creation
//!
//! Spawning runs inside the step, driven by one Bernoulli trial per kind
//! per tick. Population caps are enforced by the pools; a rejected spawn is
//! simply retried on a later tick.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind, Player, Session};
use crate::config::{Config, EnemyMotion};
use crate::consts::MAX_PLACEMENT_ATTEMPTS;

/// One success in `one_in` trials; zero never succeeds
fn trial(rng: &mut impl Rng, one_in: u32) -> bool {
    one_in > 0 && rng.random_ratio(1, one_in)
}

/// Whole-pixel coordinate in `[0, max]`
fn coordinate(rng: &mut impl Rng, max: f32) -> f32 {
    if max < 1.0 {
        0.0
    } else {
        rng.random_range(0..=max as u32) as f32
    }
}

fn enemy_velocity(rng: &mut impl Rng, motion: EnemyMotion, speed: f32) -> Vec2 {
    let speed = speed.abs();
    match motion {
        EnemyMotion::Descend => Vec2::new(0.0, speed),
        EnemyMotion::Bounce => Vec2::new(
            rng.random_range(-speed..=speed),
            rng.random_range(-speed..=speed),
        ),
    }
}

/// Pick an obstacle row that keeps clear of the player's band
/// (`player.y - obstacle.height` .. `player.y + player.height`).
/// Gives up after a bounded number of rejections.
pub fn obstacle_y(rng: &mut impl Rng, config: &Config, player: &Player) -> Option<f32> {
    let max = config.screen.height - config.obstacle.height;
    let band_top = player.pos.y - config.obstacle.height;
    let band_bottom = player.pos.y + player.size().y;

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let y = coordinate(rng, max);
        if !(y > band_top && y < band_bottom) {
            return Some(y);
        }
    }
    log::warn!(
        "No obstacle row clear of player band {band_top}..{band_bottom} after {MAX_PLACEMENT_ATTEMPTS} tries"
    );
    None
}

/// Place the starting enemies inside the upper half of the screen
pub fn populate_initial(session: &mut Session) {
    let cfg = session.config.enemy.clone();
    let size = session.config.enemy_size();
    let max_x = session.config.screen.width - size.x;
    let max_y = session.config.screen.height / 2.0 - size.y;

    for _ in 0..cfg.initial {
        let pos = Vec2::new(
            coordinate(&mut session.rng, max_x),
            coordinate(&mut session.rng, max_y),
        );
        let vel = enemy_velocity(&mut session.rng, cfg.motion, cfg.speed);
        let id = session.next_entity_id();
        if !session.enemies.spawn(Entity::enemy(id, pos, vel, size)) {
            break;
        }
    }
}

/// Run this tick's spawn trials
pub fn spawn_step(session: &mut Session) {
    try_spawn_enemies(session);
    try_spawn_obstacle(session);
}

fn try_spawn_enemies(session: &mut Session) {
    let cfg = session.config.enemy.clone();
    if !trial(&mut session.rng, cfg.spawn_one_in) {
        return;
    }
    let size = session.config.enemy_size();
    let max_x = session.config.screen.width - size.x;

    for _ in 0..cfg.batch {
        if session.enemies.count_alive() >= cfg.cap {
            log::debug!("Enemy cap {} reached, skipping spawn", cfg.cap);
            break;
        }
        let x = coordinate(&mut session.rng, max_x);
        // Never stack two enemies in the same column
        if session.enemies.alive().any(|e| e.pos.x == x) {
            continue;
        }
        let vel = enemy_velocity(&mut session.rng, cfg.motion, cfg.speed);
        let id = session.next_entity_id();
        session
            .enemies
            .spawn(Entity::enemy(id, Vec2::new(x, -size.y), vel, size));
        log::debug!("Spawned enemy {id} at x={x}");
    }
}

fn try_spawn_obstacle(session: &mut Session) {
    let cfg = session.config.obstacle.clone();
    if !trial(&mut session.rng, cfg.spawn_one_in) {
        return;
    }
    if session.obstacles.count_alive() >= cfg.cap {
        log::debug!("Obstacle cap {} reached, skipping spawn", cfg.cap);
        return;
    }
    let Some(y) = obstacle_y(&mut session.rng, &session.config, &session.player) else {
        return;
    };
    let deadly = session.rng.random_bool(0.5);
    let id = session.next_entity_id();
    let pos = Vec2::new(session.config.screen.width, y);
    session.obstacles.spawn(Entity::obstacle(
        id,
        pos,
        Vec2::new(-cfg.speed, 0.0),
        session.config.obstacle_size(),
        deadly,
    ));
    log::debug!("Spawned obstacle {id} at y={y} (deadly: {deadly})");
}

/// Send an obstacle that left through the left edge back to the right edge
/// with a fresh row and deadliness. Kills it if no clear row is found.
pub(crate) fn recycle_obstacle(
    obstacle: &mut Entity,
    rng: &mut impl Rng,
    config: &Config,
    player: &Player,
) {
    let Some(y) = obstacle_y(rng, config, player) else {
        obstacle.kill();
        return;
    };
    obstacle.pos = Vec2::new(config.screen.width, y);
    if let EntityKind::Obstacle { deadly, rotation } = &mut obstacle.kind {
        *deadly = rng.random_bool(0.5);
        *rotation = 0.0;
    }
    log::debug!("Recycled obstacle {} to y={y}", obstacle.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing_session(config: Config) -> Session {
        let mut session = Session::new(config, 7);
        session.start();
        session.choose_skin(0);
        assert_eq!(session.phase, GamePhase::Playing);
        session
    }

    #[test]
    fn test_initial_population_in_upper_half() {
        let session = playing_session(Config::default());
        assert_eq!(session.enemies.count_alive(), 5);
        for enemy in session.enemies.iter() {
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x <= 736.0);
            assert!(enemy.pos.y >= 0.0 && enemy.pos.y <= 236.0);
        }
    }

    #[test]
    fn test_spawning_never_exceeds_caps() {
        let mut config = Config::default();
        config.enemy.spawn_one_in = 1;
        config.enemy.cap = 12;
        config.obstacle.spawn_one_in = 1;
        config.obstacle.cap = 3;
        let mut session = playing_session(config);

        for _ in 0..200 {
            spawn_step(&mut session);
            assert!(session.enemies.count_alive() <= 12);
            assert!(session.obstacles.count_alive() <= 3);
        }
        assert_eq!(session.obstacles.count_alive(), 3);
    }

    #[test]
    fn test_disabled_trials_spawn_nothing() {
        let mut config = Config::default();
        config.enemy.spawn_one_in = 0;
        config.obstacle.spawn_one_in = 0;
        config.enemy.initial = 0;
        let mut session = playing_session(config);
        for _ in 0..500 {
            spawn_step(&mut session);
        }
        assert!(session.enemies.is_empty());
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_new_enemies_enter_from_above() {
        let mut config = Config::default();
        config.enemy.spawn_one_in = 1;
        config.enemy.initial = 0;
        let mut session = playing_session(config);
        spawn_step(&mut session);
        assert!(!session.enemies.is_empty());
        for enemy in session.enemies.iter() {
            assert_eq!(enemy.pos.y, -64.0);
            assert_eq!(enemy.vel, Vec2::new(0.0, 120.0));
        }
    }

    #[test]
    fn test_batch_skips_occupied_column() {
        let mut config = Config::default();
        config.screen.width = 64.0;
        config.enemy.initial = 0;
        config.enemy.spawn_one_in = 1;
        config.enemy.batch = 3;
        let mut session = playing_session(config);
        // Only column x=0 fits, and it is taken
        let id = session.next_entity_id();
        session.enemies.spawn(Entity::enemy(
            id,
            Vec2::new(0.0, 200.0),
            Vec2::ZERO,
            Vec2::splat(64.0),
        ));

        spawn_step(&mut session);
        assert_eq!(session.enemies.count_alive(), 1);

        session.enemies.mark_dead(id);
        spawn_step(&mut session);
        assert_eq!(session.enemies.count_alive(), 1);
        assert!(session.enemies.alive().all(|e| e.pos.y == -64.0));
    }

    #[test]
    fn test_bounce_velocity_ignores_speed_sign() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            let vel = enemy_velocity(&mut rng, EnemyMotion::Bounce, -50.0);
            assert!(vel.x.abs() <= 50.0 && vel.y.abs() <= 50.0);
        }
        assert_eq!(
            enemy_velocity(&mut rng, EnemyMotion::Descend, -50.0),
            Vec2::new(0.0, 50.0)
        );
    }

    #[test]
    fn test_obstacle_rows_avoid_player_band() {
        let config = Config::default();
        let player = Player::new(&config, 0);
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let y = obstacle_y(&mut rng, &config, &player).expect("plenty of free rows");
            assert!(!(y > player.pos.y - 64.0 && y < player.pos.y + 64.0));
            assert!((0.0..=536.0).contains(&y));
        }
    }

    #[test]
    fn test_obstacle_row_gives_up_when_band_covers_screen() {
        let mut config = Config::default();
        config.screen.height = 64.0;
        config.player.height = 64.0;
        let mut player = Player::new(&config, 0);
        let mut rng = Pcg32::seed_from_u64(3);
        // Only row 0 exists; with the ship just above it the band ends exactly there
        player.pos.y = -64.0;
        assert_eq!(obstacle_y(&mut rng, &config, &player), Some(0.0));

        player.pos.y = 10.0;
        assert_eq!(obstacle_y(&mut rng, &config, &player), None);
    }

    #[test]
    fn test_recycle_moves_to_right_edge() {
        let config = Config::default();
        let player = Player::new(&config, 0);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut obstacle = Entity::obstacle(
            1,
            Vec2::new(-70.0, 40.0),
            Vec2::new(-120.0, 0.0),
            config.obstacle_size(),
            false,
        );
        if let EntityKind::Obstacle { rotation, .. } = &mut obstacle.kind {
            *rotation = 1.5;
        }
        recycle_obstacle(&mut obstacle, &mut rng, &config, &player);
        assert!(obstacle.alive);
        assert_eq!(obstacle.pos.x, 800.0);
        assert!(matches!(obstacle.kind, EntityKind::Obstacle { rotation, .. } if rotation == 0.0));
    }

    #[test]
    fn test_recycle_rerolls_deadliness() {
        let config = Config::default();
        let player = Player::new(&config, 0);
        let mut seen = [false; 2];
        for seed in 0..32 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut obstacle = Entity::obstacle(
                1,
                Vec2::new(-70.0, 40.0),
                Vec2::new(-120.0, 0.0),
                config.obstacle_size(),
                false,
            );
            recycle_obstacle(&mut obstacle, &mut rng, &config, &player);
            seen[usize::from(obstacle.is_deadly())] = true;
        }
        assert_eq!(seen, [true, true]);
    }
}
