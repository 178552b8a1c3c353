//! Terminal bell as an audio sink

use std::collections::HashSet;

use arcade_shooter::assets::SoundHandle;
use arcade_shooter::audio::AudioSink;

#[derive(Debug, Default)]
pub struct TermAudio {
    bells: HashSet<SoundHandle>,
    ring: bool,
}

impl TermAudio {
    pub fn new(bells: HashSet<SoundHandle>) -> Self {
        Self { bells, ring: false }
    }

    /// Whether a bell cue was played since the last call
    pub fn take_ring(&mut self) -> bool {
        std::mem::take(&mut self.ring)
    }
}

impl AudioSink for TermAudio {
    fn play(&mut self, sound: SoundHandle, volume: f32) {
        log::debug!("play {sound:?} at {volume:.2}");
        if volume > 0.0 && self.bells.contains(&sound) {
            self.ring = true;
        }
    }

    fn rewind(&mut self, sound: SoundHandle) {
        log::trace!("rewind {sound:?}");
    }

    fn pause(&mut self, sound: SoundHandle) {
        log::debug!("pause {sound:?}");
    }
}
