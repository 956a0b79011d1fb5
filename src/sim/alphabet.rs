//! Shuffled-once alphabet cycle
//!
//! Each spawned bubble takes the next letter of a permutation fixed at session
//! start, so every letter shows up once per 26 spawns.

use rand::Rng;
use rand::seq::SliceRandom;

pub const ALPHABET_LEN: usize = 26;

#[derive(Debug, Clone)]
pub struct AlphabetCursor {
    permutation: [char; ALPHABET_LEN],
    counter: u64,
}

impl AlphabetCursor {
    /// New cursor over a fresh shuffle
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cursor = Self {
            permutation: std::array::from_fn(|i| (b'a' + i as u8) as char),
            counter: 0,
        };
        cursor.reset(rng);
        cursor
    }

    /// Reshuffle and restart the count
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.permutation.shuffle(rng);
        self.counter = 0;
    }

    /// Next lowercase letter in the cycle
    pub fn next_letter(&mut self) -> char {
        let letter = self.permutation[(self.counter % ALPHABET_LEN as u64) as usize];
        self.counter += 1;
        letter
    }

    /// Letters drawn so far
    pub fn drawn(&self) -> u64 {
        self.counter
    }
}
