//! Idle/demo mode
//!
//! A stand-in player: waits a reaction delay once the target is announced,
//! then taps it, occasionally fumbling onto a neighbouring bubble.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Phase, Session};

#[derive(Debug, Clone)]
pub struct IdlePlayer {
    rng: Pcg32,
    /// Ticks to wait after play starts
    pub reaction_ticks: u32,
    /// Chance of tapping a wrong bubble instead of the target, in `0..=1`
    fumble_chance: f64,
    waited: u32,
}

impl IdlePlayer {
    pub fn new(seed: u64, reaction_ticks: u32, fumble_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            reaction_ticks,
            fumble_chance: if fumble_chance.is_nan() {
                0.0
            } else {
                fumble_chance.clamp(0.0, 1.0)
            },
            waited: 0,
        }
    }

    pub fn fumble_chance(&self) -> f64 {
        self.fumble_chance
    }

    /// Where to tap this tick, if anywhere
    pub fn decide(&mut self, session: &Session) -> Option<Vec2> {
        if session.phase != Phase::Playing {
            self.waited = 0;
            return None;
        }
        self.waited += 1;
        if self.waited < self.reaction_ticks {
            return None;
        }
        self.waited = 0;

        if session.bubbles.len() > 1 && self.rng.random_bool(self.fumble_chance) {
            let offset = self.rng.random_range(1..session.bubbles.len());
            let other = (session.target + offset) % session.bubbles.len();
            return Some(session.bubbles[other].center());
        }
        session.bubbles.get(session.target).map(|b| b.center())
    }
}
