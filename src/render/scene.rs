//! Frame composition per game phase

use glam::Vec2;

use super::{Color, Renderer};
use crate::assets::{Assets, SpriteId};
use crate::sim::{EntityKind, GamePhase, Pool, Rect, Session};

/// Inset of button labels from the button's top-left corner
const LABEL_INSET: Vec2 = Vec2::new(10.0, 10.0);
const HUD_POS: Vec2 = Vec2::new(10.0, 10.0);
const LINE_HEIGHT: f32 = 20.0;

/// Draw the whole frame for the session's current phase.
///
/// Reads the session only; call after the tick so the picture matches the
/// state the step left behind.
pub fn draw_frame(session: &Session, assets: &Assets, renderer: &mut impl Renderer) {
    match session.phase {
        GamePhase::NotStarted => draw_title(session, renderer),
        GamePhase::Selecting => draw_selection(session, assets, renderer),
        GamePhase::Playing => {
            draw_playfield(session, assets, renderer);
            draw_hud(session, renderer);
        }
        GamePhase::Paused => {
            draw_playfield(session, assets, renderer);
            draw_hud(session, renderer);
            draw_pause_overlay(session, renderer);
        }
        GamePhase::GameOver => {
            draw_playfield(session, assets, renderer);
            draw_game_over(session, renderer);
        }
    }
}

fn draw_button(renderer: &mut impl Renderer, rect: Rect, color: Color, label: &str) {
    renderer.draw_rect(rect, color);
    renderer.draw_text(label, rect.pos + LABEL_INSET);
}

fn draw_title(session: &Session, renderer: &mut impl Renderer) {
    let layout = session.layout();
    draw_button(renderer, layout.start_button, Color::WHITE, "START GAME");
    draw_button(renderer, layout.exit_button, Color::GRAY, "EXIT");
}

fn draw_selection(session: &Session, assets: &Assets, renderer: &mut impl Renderer) {
    let layout = session.layout();
    if let Some(first) = layout.skin_tiles.first() {
        renderer.draw_text(
            "CHOOSE YOUR SHIP",
            Vec2::new(first.pos.x, first.pos.y - 2.0 * LINE_HEIGHT),
        );
    }
    for (i, tile) in layout.skin_tiles.iter().enumerate() {
        renderer.draw_rect(*tile, Color::SHADE);
        if let Some(sprite) = assets.sprite(SpriteId::Ship(i)) {
            renderer.draw_sprite(sprite, *tile, 0.0);
        }
        renderer.draw_text(
            &format!("{}", i + 1),
            Vec2::new(tile.pos.x, tile.bottom() + LINE_HEIGHT / 2.0),
        );
    }
}

fn draw_pool(pool: &Pool, assets: &Assets, renderer: &mut impl Renderer) {
    for entity in pool.alive() {
        let (id, rotation) = match entity.kind {
            EntityKind::Bullet => (SpriteId::Bullet, 0.0),
            EntityKind::Enemy => (SpriteId::Enemy, 0.0),
            // Deadly obstacles look like enemies and never spin
            EntityKind::Obstacle { deadly: true, .. } => (SpriteId::Enemy, 0.0),
            EntityKind::Obstacle {
                deadly: false,
                rotation,
            } => (SpriteId::Obstacle, rotation),
            EntityKind::Effect { .. } => (SpriteId::Flame, 0.0),
        };
        if let Some(sprite) = assets.sprite(id) {
            renderer.draw_sprite(sprite, entity.rect(), rotation);
        }
    }
}

fn draw_playfield(session: &Session, assets: &Assets, renderer: &mut impl Renderer) {
    if let Some(bg) = assets.sprite(SpriteId::Background) {
        renderer.draw_sprite(bg, Rect::new(Vec2::ZERO, session.config().screen.size()), 0.0);
    }
    if let Some(ship) = assets.sprite(SpriteId::Ship(session.player.skin())) {
        renderer.draw_sprite(ship, session.player.rect(), 0.0);
    }
    draw_pool(&session.bullets, assets, renderer);
    draw_pool(&session.obstacles, assets, renderer);
    draw_pool(&session.enemies, assets, renderer);
    draw_pool(&session.effects, assets, renderer);
}

fn draw_hud(session: &Session, renderer: &mut impl Renderer) {
    renderer.draw_text(&format!("Score: {}", session.player.score()), HUD_POS);
    renderer.draw_text(
        &format!("Lives: {}", session.player.lives),
        HUD_POS + Vec2::new(0.0, LINE_HEIGHT),
    );
    if let Some(limit) = session.config().rules.escape_limit {
        renderer.draw_text(
            &format!("Escaped: {}/{}", session.escaped, limit),
            HUD_POS + Vec2::new(0.0, 2.0 * LINE_HEIGHT),
        );
    }
}

fn draw_pause_overlay(session: &Session, renderer: &mut impl Renderer) {
    let panel = session.layout().start_button;
    renderer.draw_rect(panel, Color::SHADE);
    renderer.draw_text("PAUSED - PRESS P", panel.pos + LABEL_INSET);
}

fn draw_game_over(session: &Session, renderer: &mut impl Renderer) {
    let layout = session.layout();
    draw_button(renderer, layout.reset_button, Color::RED, "GAME OVER");
    renderer.draw_text(
        &format!("SCORE: {}", session.player.score()),
        layout.reset_button.pos + LABEL_INSET + Vec2::new(0.0, LINE_HEIGHT),
    );
    draw_button(renderer, layout.exit_button, Color::GRAY, "EXIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::FakeLoader;
    use crate::assets::{AssetManifest, SpriteHandle};
    use crate::config::Config;
    use crate::sim::Entity;

    #[derive(Debug, Clone, PartialEq)]
    enum Draw {
        Sprite(SpriteHandle, Rect, f32),
        Text(String),
        Rect(Rect, Color),
    }

    #[derive(Default)]
    struct RecordingRenderer {
        draws: Vec<Draw>,
    }

    impl RecordingRenderer {
        fn texts(&self) -> Vec<&str> {
            self.draws
                .iter()
                .filter_map(|d| match d {
                    Draw::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn sprites_of(&self, handle: SpriteHandle) -> usize {
            self.draws
                .iter()
                .filter(|d| matches!(d, Draw::Sprite(h, ..) if *h == handle))
                .count()
        }
    }

    impl Renderer for RecordingRenderer {
        fn draw_sprite(&mut self, sprite: SpriteHandle, rect: Rect, rotation: f32) {
            self.draws.push(Draw::Sprite(sprite, rect, rotation));
        }

        fn draw_text(&mut self, text: &str, _pos: Vec2) {
            self.draws.push(Draw::Text(text.to_string()));
        }

        fn draw_rect(&mut self, rect: Rect, color: Color) {
            self.draws.push(Draw::Rect(rect, color));
        }
    }

    fn assets() -> Assets {
        Assets::load(&AssetManifest::default(), &mut FakeLoader::default()).expect("fake assets")
    }

    fn playing() -> Session {
        let mut config = Config::default();
        config.enemy.initial = 0;
        let mut session = Session::new(config, 2);
        session.start();
        session.choose_skin(1);
        session
    }

    #[test]
    fn test_title_screen() {
        let session = Session::new(Config::default(), 2);
        let mut renderer = RecordingRenderer::default();
        draw_frame(&session, &assets(), &mut renderer);
        assert_eq!(renderer.texts(), vec!["START GAME", "EXIT"]);
        assert_eq!(
            renderer.draws[0],
            Draw::Rect(session.layout().start_button, Color::WHITE)
        );
    }

    #[test]
    fn test_selection_shows_every_skin() {
        let assets = assets();
        let mut session = Session::new(Config::default(), 2);
        session.start();
        let mut renderer = RecordingRenderer::default();
        draw_frame(&session, &assets, &mut renderer);
        for i in 0..3 {
            let ship = assets.sprite(SpriteId::Ship(i)).expect("ship sprite");
            assert_eq!(renderer.sprites_of(ship), 1);
        }
        assert!(renderer.texts().contains(&"3"));
    }

    #[test]
    fn test_dead_entities_are_not_drawn() {
        let assets = assets();
        let mut session = playing();
        let size = Vec2::splat(64.0);
        let live = session.next_entity_id();
        session
            .enemies
            .spawn(Entity::enemy(live, Vec2::new(10.0, 10.0), Vec2::ZERO, size));
        let dead = session.next_entity_id();
        session
            .enemies
            .spawn(Entity::enemy(dead, Vec2::new(200.0, 10.0), Vec2::ZERO, size));
        session.enemies.mark_dead(dead);

        let mut renderer = RecordingRenderer::default();
        draw_frame(&session, &assets, &mut renderer);
        let enemy = assets.sprite(SpriteId::Enemy).expect("enemy sprite");
        assert_eq!(renderer.sprites_of(enemy), 1);
        assert!(renderer.texts().contains(&"Score: 0"));
        assert!(renderer.texts().contains(&"Lives: 3"));
    }

    #[test]
    fn test_obstacle_sprites_follow_deadliness() {
        let assets = assets();
        let mut session = playing();
        let size = Vec2::splat(64.0);
        let id = session.next_entity_id();
        session
            .obstacles
            .spawn(Entity::obstacle(id, Vec2::new(10.0, 10.0), Vec2::ZERO, size, true));
        let id = session.next_entity_id();
        let mut harmless = Entity::obstacle(id, Vec2::new(300.0, 10.0), Vec2::ZERO, size, false);
        harmless.kind = EntityKind::Obstacle {
            deadly: false,
            rotation: 1.25,
        };
        session.obstacles.spawn(harmless);

        let mut renderer = RecordingRenderer::default();
        draw_frame(&session, &assets, &mut renderer);
        let enemy = assets.sprite(SpriteId::Enemy).expect("enemy sprite");
        let obstacle = assets.sprite(SpriteId::Obstacle).expect("obstacle sprite");
        assert_eq!(renderer.sprites_of(enemy), 1);
        assert!(renderer.draws.contains(&Draw::Sprite(
            obstacle,
            Rect::new(Vec2::new(300.0, 10.0), size),
            1.25
        )));
    }

    #[test]
    fn test_pause_overlay_and_game_over_panel() {
        let assets = assets();
        let mut session = playing();
        session.toggle_pause();
        let mut renderer = RecordingRenderer::default();
        draw_frame(&session, &assets, &mut renderer);
        assert!(renderer.texts().contains(&"PAUSED - PRESS P"));

        session.toggle_pause();
        session.player.award(7);
        session.enter_game_over();
        let mut renderer = RecordingRenderer::default();
        draw_frame(&session, &assets, &mut renderer);
        let texts = renderer.texts();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.contains(&"SCORE: 7"));
        assert!(texts.contains(&"EXIT"));
    }
}
