//! Sound cues driven by simulation events
//!
//! The simulation never touches audio. Each frame the frontend drains the
//! session's events and hands them to the `AudioManager`, which decides what
//! to play on whatever `AudioSink` the platform provides.

use crate::assets::{Assets, SoundHandle};
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Shot fired
    Bullet,
    /// Enemy destroyed or obstacle neutralized
    Destroy,
    /// Run ended
    GameOver,
    /// Looping engine sound while the ship moves
    Thruster,
}

/// Platform audio output
pub trait AudioSink {
    fn play(&mut self, sound: SoundHandle, volume: f32);
    /// Seek back to the start so the next `play` restarts the clip
    fn rewind(&mut self, sound: SoundHandle);
    fn pause(&mut self, sound: SoundHandle);
}

/// Audio manager for the game
pub struct AudioManager<S> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Restart a one-shot cue from the beginning
    pub fn play(&mut self, effect: SoundEffect, assets: &Assets) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(sound) = assets.sound(effect) else {
            log::warn!("No sound loaded for {effect:?}");
            return;
        };
        self.sink.rewind(sound);
        self.sink.play(sound, vol);
    }

    /// Play the cues for one frame's events
    pub fn handle_events(&mut self, events: &[GameEvent], assets: &Assets) {
        for event in events {
            match event {
                GameEvent::ShotFired => self.play(SoundEffect::Bullet, assets),
                GameEvent::EnemyDestroyed { .. } | GameEvent::ObstacleNeutralized { .. } => {
                    self.play(SoundEffect::Destroy, assets)
                }
                GameEvent::GameOver => self.play(SoundEffect::GameOver, assets),
                GameEvent::ThrusterStarted => {
                    let vol = self.effective_volume();
                    if vol > 0.0 {
                        if let Some(sound) = assets.sound(SoundEffect::Thruster) {
                            self.sink.play(sound, vol);
                        }
                    }
                }
                GameEvent::ThrusterStopped | GameEvent::Paused => {
                    if let Some(sound) = assets.sound(SoundEffect::Thruster) {
                        self.sink.pause(sound);
                    }
                }
                GameEvent::SessionStarted
                | GameEvent::LifeLost { .. }
                | GameEvent::Resumed
                | GameEvent::ExitRequested => {}
            }
        }
    }
}
