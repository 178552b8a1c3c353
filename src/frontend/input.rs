//! crossterm events folded into per-frame key and mouse state
//!
//! Terminals without key-release reporting only send repeated presses while a
//! key is down, so a key counts as held while its last press or repeat is
//! within `HOLD_WINDOW` frames. Terminals with release events drop it at once.

use std::collections::{HashMap, HashSet};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use glam::Vec2;

use super::Viewport;
use arcade_shooter::input::{InputSource, Key};

/// About 130 ms at 60 Hz, longer than typical OS key-repeat intervals
const HOLD_WINDOW: u64 = 8;

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let key = match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Exit,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Esc => Key::Exit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Key::Left,
            'd' => Key::Right,
            'w' => Key::Up,
            's' => Key::Down,
            ' ' => Key::Fire,
            'p' => Key::Pause,
            'q' => Key::Exit,
            d @ '1'..='9' => Key::Digit(d as u8 - b'0'),
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

pub struct TermInput {
    viewport: Viewport,
    frame: u64,
    /// Frame each held key was last seen pressed or repeated
    key_frame: HashMap<Key, u64>,
    pressed: HashSet<Key>,
    clicked: bool,
    cursor: Vec2,
}

impl TermInput {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            frame: 0,
            key_frame: HashMap::new(),
            pressed: HashSet::new(),
            clicked: false,
            cursor: Vec2::ZERO,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Forget last frame's one-shot presses and clicks
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.pressed.clear();
        self.clicked = false;
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                let Some(key) = map_key(*code, *modifiers) else {
                    return;
                };
                match kind {
                    KeyEventKind::Press => {
                        self.key_frame.insert(key, self.frame);
                        self.pressed.insert(key);
                    }
                    KeyEventKind::Repeat => {
                        self.key_frame.insert(key, self.frame);
                    }
                    KeyEventKind::Release => {
                        self.key_frame.remove(&key);
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                self.cursor = self.viewport.to_world(*column, *row);
                if *kind == MouseEventKind::Down(MouseButton::Left) {
                    self.clicked = true;
                }
            }
            _ => {}
        }
    }
}

impl InputSource for TermInput {
    fn is_held(&self, key: Key) -> bool {
        self.key_frame
            .get(&key)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn mouse_just_pressed(&self) -> bool {
        self.clicked
    }

    fn cursor(&self) -> Vec2 {
        self.cursor
    }
}
