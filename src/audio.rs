//! Audio seam
//!
//! The game only needs to start sounds and learn how long they last; mixing
//! and decoding belong to the player implementation.

use std::collections::HashMap;
use std::fmt;

use crate::error::AssetError;

/// Sound identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    /// "Find the letter ..." prompt
    Question(char),
    /// Praise for popping the letter
    Bravo(char),
    /// Any bubble popping
    Pop,
    /// Tap that missed the target
    Wrong,
    /// Background music
    Soundtrack,
}

impl SoundId {
    /// Storage key, always lowercase (`question-a`, `bravo-z`, `pop`, ...)
    pub fn key(&self) -> String {
        match self {
            SoundId::Question(c) => format!("question-{}", c.to_ascii_lowercase()),
            SoundId::Bravo(c) => format!("bravo-{}", c.to_ascii_lowercase()),
            SoundId::Pop => "pop".to_string(),
            SoundId::Wrong => "wrong".to_string(),
            SoundId::Soundtrack => "soundtrack".to_string(),
        }
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Something that can play sounds
pub trait AudioPlayer {
    /// Start a sound; returns its length in milliseconds
    fn play(&mut self, sound: SoundId) -> Result<u32, AssetError>;

    /// Start a sound on repeat
    fn play_looping(&mut self, sound: SoundId) -> Result<(), AssetError>;

    /// App went to the background
    fn pause(&mut self) {}

    fn resume(&mut self) {}
}

/// Play `sound`, falling back to `fallback_ms` if it is unavailable.
///
/// Used for cues whose length schedules a timer: a missing file must not
/// stall the round.
pub fn play_cue(audio: &mut dyn AudioPlayer, sound: SoundId, fallback_ms: u32) -> u32 {
    match audio.play(sound) {
        Ok(ms) => ms,
        Err(e) => {
            log::warn!("{e}; assuming {fallback_ms} ms");
            fallback_ms
        }
    }
}

/// Fire-and-forget effect; failures are only logged
pub fn play_effect(audio: &mut dyn AudioPlayer, sound: SoundId) {
    if let Err(e) = audio.play(sound) {
        log::warn!("{e}");
    }
}

/// Player that produces no sound but reports plausible durations.
///
/// Keys listed in `missing` behave as absent files.
#[derive(Debug, Clone)]
pub struct SilentAudio {
    pub durations: HashMap<String, u32>,
    pub default_ms: u32,
    pub missing: Vec<String>,
}

impl Default for SilentAudio {
    fn default() -> Self {
        Self::new(1500)
    }
}

impl SilentAudio {
    pub fn new(default_ms: u32) -> Self {
        Self {
            durations: HashMap::new(),
            default_ms,
            missing: Vec::new(),
        }
    }

    /// Override the reported length of one sound
    pub fn with_duration(mut self, sound: SoundId, ms: u32) -> Self {
        self.durations.insert(sound.key(), ms);
        self
    }

    /// Treat a sound as absent
    pub fn without(mut self, sound: SoundId) -> Self {
        self.missing.push(sound.key());
        self
    }
}

impl AudioPlayer for SilentAudio {
    fn play(&mut self, sound: SoundId) -> Result<u32, AssetError> {
        let key = sound.key();
        if self.missing.contains(&key) {
            return Err(AssetError::MissingSound { key });
        }
        let ms = self.durations.get(&key).copied().unwrap_or(self.default_ms);
        log::debug!("Playing {} ({} ms)", key, ms);
        Ok(ms)
    }

    fn play_looping(&mut self, sound: SoundId) -> Result<(), AssetError> {
        self.play(sound).map(|_| ())
    }
}
