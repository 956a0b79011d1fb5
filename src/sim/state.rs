//! Session state and core simulation types
//!
//! Everything a round mutates lives on [`Session`]; collaborators only ever see
//! copies of display data.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::alphabet::AlphabetCursor;
use super::mode::{Letter, Mode, ModeController};
use super::placement::place;
use crate::assets::{AssetSet, BackgroundHandle, FontHandle};
use crate::error::{PlacementError, SessionError};
use crate::layout::Layout;
use crate::random_heading;
use crate::settings::Settings;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Target letter is being spoken
    Announcing,
    /// Waiting for the player to find the target
    Playing,
    /// Celebrating a correct pop; input is ignored
    Bravo,
}

/// A floating letter bubble
#[derive(Debug, Clone, Serialize)]
pub struct Bubble {
    pub letter: Letter,
    pub font: FontHandle,
    pub radius: f32,
    /// Top-left corner of the bounding box
    pub position: Vec2,
    /// Heading; not renormalized after collisions
    pub direction: Vec2,
}

impl Bubble {
    #[inline]
    pub fn diameter(&self) -> f32 {
        2.0 * self.radius
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.radius)
    }

    /// Whether a pointer at `point` lands inside this bubble's circle
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        crate::circle_contains(self.center(), self.radius, point)
    }
}

/// How a new bubble's spawn should react to a full arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// Must produce a bubble; take the least-overlapping spot
    Replace,
    /// May be refused
    Grow,
}

/// Complete session context
#[derive(Debug, Clone)]
pub struct Session {
    pub seed: u64,
    pub settings: Settings,
    pub layout: Layout,
    pub assets: AssetSet,
    pub rng: Pcg32,
    /// Shared bubble radius
    pub radius: f32,
    /// Bubbles in display order
    pub bubbles: Vec<Bubble>,
    /// Index of the bubble being searched for
    pub target: usize,
    pub phase: Phase,
    /// Correct pops this session
    pub correct: u32,
    /// Index into `assets.backgrounds`
    pub background: usize,
    pub mode: ModeController,
    pub alphabet: AlphabetCursor,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Session {
    /// Build a session: shuffle backgrounds, populate bubbles, pick a target.
    ///
    /// The session starts in `Announcing`; the caller announces the first
    /// target (see `round::start`).
    pub fn new(seed: u64, settings: Settings, mut assets: AssetSet) -> Result<Self, SessionError> {
        settings.validate()?;
        assets.check()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        {
            use rand::seq::SliceRandom;
            assets.backgrounds.shuffle(&mut rng);
        }
        let alphabet = AlphabetCursor::new(&mut rng);
        let mut session = Self {
            seed,
            layout: Layout::with_count_range(settings.bounds(), settings.min_bubbles, settings.max_bubbles),
            radius: settings.bubble_radius(),
            mode: ModeController::new(settings.initial_mode),
            settings,
            assets,
            rng,
            bubbles: Vec::new(),
            target: 0,
            phase: Phase::Announcing,
            correct: 0,
            background: 0,
            alphabet,
            time_ticks: 0,
        };

        // At least one bubble has to fit, further ones may be refused
        let first = session.spawn_bubble(SpawnPolicy::Grow)?;
        session.bubbles.push(first);
        let wanted = session.settings.initial_bubbles;
        session.grow_to(wanted);

        session.target = session.rng.random_range(0..session.bubbles.len());
        log::info!(
            "Session {} started: {} bubbles, radius {}, target {:?}",
            seed,
            session.bubbles.len(),
            session.radius,
            session.target_bubble().letter
        );
        Ok(session)
    }

    pub fn bounds(&self) -> Vec2 {
        self.settings.bounds()
    }

    pub fn target_bubble(&self) -> &Bubble {
        &self.bubbles[self.target]
    }

    pub fn current_background(&self) -> &BackgroundHandle {
        &self.assets.backgrounds[self.background % self.assets.backgrounds.len()]
    }

    /// Create a bubble at a free position with the next letter.
    ///
    /// Spawn space is checked against the current collection, so callers
    /// replacing a bubble remove it first.
    pub fn spawn_bubble(&mut self, policy: SpawnPolicy) -> Result<Bubble, PlacementError> {
        let position = match place(
            &self.bubbles,
            self.radius,
            self.settings.bounds(),
            self.settings.placement_attempts,
            &mut self.rng,
        ) {
            Ok(p) => p,
            Err(PlacementError::Exhausted { attempts, best }) if policy == SpawnPolicy::Replace => {
                log::warn!(
                    "No free spot after {} attempts, spawning with overlap at {:?}",
                    attempts,
                    best
                );
                best
            }
            Err(e) => return Err(e),
        };

        let base = self.alphabet.next_letter();
        let letter = self.mode.apply(base, &mut self.rng);
        let font = self.assets.fonts[self.rng.random_range(0..self.assets.fonts.len())].clone();
        Ok(Bubble {
            letter,
            font,
            radius: self.radius,
            position,
            direction: random_heading(&mut self.rng),
        })
    }

    /// Pop the bubble at `index` and put a fresh one in its slot
    pub fn replace_bubble(&mut self, index: usize) -> Result<(), PlacementError> {
        let popped = self.bubbles.remove(index);
        match self.spawn_bubble(SpawnPolicy::Replace) {
            Ok(bubble) => {
                log::debug!(
                    "Replaced {:?} with {:?} at slot {}",
                    popped.letter,
                    bubble.letter,
                    index
                );
                self.bubbles.insert(index, bubble);
                Ok(())
            }
            Err(e) => {
                self.bubbles.insert(index, popped);
                Err(e)
            }
        }
    }

    /// Append bubbles until `n` exist or space runs out; returns the new count
    pub fn grow_to(&mut self, n: usize) -> usize {
        let n = n.min(self.settings.max_bubbles);
        while self.bubbles.len() < n {
            match self.spawn_bubble(SpawnPolicy::Grow) {
                Ok(bubble) => self.bubbles.push(bubble),
                Err(e) => {
                    log::warn!("Cannot grow to {} bubbles: {}", n, e);
                    break;
                }
            }
        }
        self.bubbles.len()
    }

    /// Remove bubbles at random indices, never index 0, until `n` remain
    pub fn shrink_to(&mut self, n: usize) -> usize {
        let n = n.max(1);
        while self.bubbles.len() > n {
            let idx = self.rng.random_range(1..self.bubbles.len());
            self.bubbles.remove(idx);
        }
        self.bubbles.len()
    }

    /// Clamp the target back into range after a collection mutation
    pub fn revalidate_target(&mut self) {
        debug_assert!(!self.bubbles.is_empty(), "bubble collection emptied");
        if self.target >= self.bubbles.len() {
            log::error!(
                "Target index {} out of range for {} bubbles; clamping",
                self.target,
                self.bubbles.len()
            );
            self.target = self.bubbles.len().saturating_sub(1);
        }
    }

    /// Plain-data view for logging/inspection
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed: self.seed,
            phase: self.phase,
            mode: self.mode.mode(),
            correct: self.correct,
            time_ticks: self.time_ticks,
            target: self.target,
            background: self.current_background().name().to_string(),
            letters: self.bubbles.iter().map(|b| b.letter.display()).collect(),
        }
    }
}

/// Serializable summary of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub phase: Phase,
    pub mode: Mode,
    pub correct: u32,
    pub time_ticks: u64,
    pub target: usize,
    pub background: String,
    pub letters: String,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::rc::Rc;

    use crate::assets::BuiltinAssets;

    pub fn builtin_assets() -> AssetSet {
        AssetSet::load(Rc::new(BuiltinAssets::default())).unwrap()
    }

    pub fn session_with(seed: u64, settings: Settings) -> Session {
        let assets = builtin_assets();
        Session::new(seed, settings, assets).unwrap()
    }

    pub fn session(seed: u64) -> Session {
        session_with(seed, Settings::default())
    }

    /// Spawn-time overlap check across every pair
    pub fn assert_no_overlap(bubbles: &[Bubble]) {
        for i in 0..bubbles.len() {
            for j in (i + 1)..bubbles.len() {
                let d = bubbles[i].center().distance(bubbles[j].center());
                assert!(
                    d >= bubbles[i].radius + bubbles[j].radius,
                    "bubbles {i} and {j} overlap (distance {d})"
                );
            }
        }
    }
}
