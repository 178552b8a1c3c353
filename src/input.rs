//! Platform input mapped to per-tick commands

use glam::Vec2;

use crate::sim::TickInput;

/// Logical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Pause,
    Confirm,
    Exit,
    /// Number row, 1-9
    Digit(u8),
}

/// Keyboard and mouse state for the current frame
pub trait InputSource {
    /// Key is down this frame
    fn is_held(&self, key: Key) -> bool;
    /// Key went down this frame
    fn just_pressed(&self, key: Key) -> bool;
    /// Primary button went down this frame
    fn mouse_just_pressed(&self) -> bool;
    /// Cursor in world coordinates
    fn cursor(&self) -> Vec2;
}

/// Sample the input source into a `TickInput`
pub fn read_tick_input(source: &impl InputSource) -> TickInput {
    let axis = |neg: Key, pos: Key| {
        let mut v = 0.0;
        if source.is_held(neg) {
            v -= 1.0;
        }
        if source.is_held(pos) {
            v += 1.0;
        }
        v
    };

    TickInput {
        move_dir: Vec2::new(axis(Key::Left, Key::Right), axis(Key::Up, Key::Down)),
        fire: source.just_pressed(Key::Fire),
        click: source.mouse_just_pressed().then(|| source.cursor()),
        pause: source.just_pressed(Key::Pause),
        confirm: source.just_pressed(Key::Confirm),
        exit: source.just_pressed(Key::Exit),
        skin_choice: (1..=9u8)
            .find(|d| source.just_pressed(Key::Digit(*d)))
            .map(|d| usize::from(d - 1)),
    }
}
