//! Background music.
//!
//! Playback goes through an [`AudioBackend`]. A backend that fails to start
//! disables music for the rest of the run; the game keeps going silently.

use anyhow::Result;

use crate::types::DEFAULT_MUSIC_VOLUME;

pub trait AudioBackend {
    /// Start (or restart) the looping track.
    fn play_loop(&mut self, volume: f32) -> Result<()>;
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// Backend for hosts without audio output. Tracks state only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SilentBackend {
    pub playing: bool,
    pub volume: f32,
}

impl AudioBackend for SilentBackend {
    fn play_loop(&mut self, volume: f32) -> Result<()> {
        self.playing = true;
        self.volume = volume;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

pub struct BackgroundMusic {
    backend: Option<Box<dyn AudioBackend>>,
    volume: f32,
    playing: bool,
}

impl BackgroundMusic {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            volume: DEFAULT_MUSIC_VOLUME,
            playing: false,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend::default()))
    }

    pub fn enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Volume as a whole percentage, for the options screen.
    pub fn volume_percent(&self) -> u8 {
        (self.volume * 100.0).round() as u8
    }

    /// Set the volume, clamped to `0.0..=1.0`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        if let Some(backend) = self.backend.as_mut() {
            backend.set_volume(self.volume);
        }
    }

    pub fn set_volume_percent(&mut self, percent: i32) {
        self.set_volume(percent.clamp(0, 100) as f32 / 100.0);
    }

    pub fn play(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match backend.play_loop(self.volume) {
            Ok(()) => self.playing = true,
            Err(e) => {
                log::warn!("background music unavailable: {:#}", e);
                self.backend = None;
                self.playing = false;
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.stop();
        }
        self.playing = false;
    }
}

impl std::fmt::Debug for BackgroundMusic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundMusic")
            .field("enabled", &self.enabled())
            .field("volume", &self.volume)
            .field("playing", &self.playing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct Broken;

    impl AudioBackend for Broken {
        fn play_loop(&mut self, _volume: f32) -> Result<()> {
            bail!("no device")
        }
        fn stop(&mut self) {}
        fn set_volume(&mut self, _volume: f32) {}
    }

    #[test]
    fn test_volume_clamped() {
        let mut m = BackgroundMusic::silent();
        assert_eq!(m.volume_percent(), 10);
        m.set_volume(1.7);
        assert_eq!(m.volume(), 1.0);
        m.set_volume(-0.2);
        assert_eq!(m.volume(), 0.0);
        m.set_volume_percent(55);
        assert_eq!(m.volume_percent(), 55);
        m.set_volume_percent(400);
        assert_eq!(m.volume_percent(), 100);
    }

    #[test]
    fn test_play_stop() {
        let mut m = BackgroundMusic::silent();
        m.play();
        assert!(m.is_playing());
        m.stop();
        assert!(!m.is_playing());
    }

    #[test]
    fn test_failed_backend_disables_music() {
        let mut m = BackgroundMusic::new(Box::new(Broken));
        m.play();
        assert!(!m.is_playing());
        assert!(!m.enabled());
        // Further calls are harmless.
        m.play();
        m.set_volume(0.5);
        m.stop();
        assert_eq!(m.volume(), 0.5);
    }
}
