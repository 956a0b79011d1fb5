//! Alpha Pop - an alphabet learning game
//!
//! Bubbles carrying letters drift around the screen and the player pops the
//! one matching the announced letter.
//!
//! Core modules:
//! - `sim`: Simulation (placement, physics, round state machine)
//! - `platform`: Event dispatcher and platform shims
//! - `renderer`: Frame composition handed to an external renderer
//! - `audio`: Sound identifiers and the audio player seam
//! - `assets`: Font/background enumeration
//! - `settings`: Tunables loaded from JSON

pub mod assets;
pub mod audio;
pub mod error;
pub mod layout;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AssetError, ConfigError, PlacementError, SessionError};
pub use settings::Settings;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 30;

    /// Default arena size for desktop runs
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 480.0;
    /// Arena size that layout metrics are designed against
    pub const REFERENCE_EXTENT: f32 = 800.0;

    /// Bubble radius as a fraction of the smaller screen dimension
    pub const BUBBLE_RADIUS_FRACTION: f32 = 1.0 / 8.0;

    /// Bubble count bounds
    pub const INITIAL_BUBBLES: usize = 4;
    pub const MIN_BUBBLES: usize = 1;
    pub const MAX_BUBBLES: usize = 8;

    /// Correct answers between background changes
    pub const ESCALATION_INTERVAL: u32 = 7;

    /// Number of letter-case modes
    pub const MODE_COUNT: usize = 3;

    /// Placement retry budget before giving up on a clean spawn
    pub const PLACEMENT_ATTEMPTS: u32 = 4096;

    /// Cue duration used when a sound cannot report its length
    pub const FALLBACK_CUE_MS: u32 = 2000;

    /// Haptic pulse length for a wrong tap (seconds)
    pub const WRONG_VIBRATE_SECS: f32 = 1.0;
}

/// Uniformly random unit heading
#[inline]
pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let theta = rng.random::<f32>() * std::f32::consts::TAU;
    Vec2::new(theta.cos(), theta.sin())
}

/// Whether `point` lies strictly inside the circle at `center`
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    point.distance(center) < radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_heading_is_unit() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let h = random_heading(&mut rng);
            assert!((h.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_circle_contains_is_strict() {
        let c = Vec2::new(10.0, 10.0);
        assert!(circle_contains(c, 5.0, Vec2::new(12.0, 10.0)));
        assert!(!circle_contains(c, 5.0, Vec2::new(15.0, 10.0)));
    }
}
