//! Letter-case policy for newly spawned bubbles

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MODE_COUNT;

/// Case of a displayed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterCase {
    Upper,
    Lower,
}

/// A letter as shown on a bubble: base letter plus the case it is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Letter {
    /// Lowercase ASCII letter `a..=z`
    base: char,
    pub case: LetterCase,
}

impl Letter {
    pub fn new(base: char, case: LetterCase) -> Self {
        Self {
            base: base.to_ascii_lowercase(),
            case,
        }
    }

    /// Case-normalized letter (what the player is asked for)
    pub fn base(&self) -> char {
        self.base
    }

    /// Glyph as drawn on the bubble
    pub fn display(&self) -> char {
        match self.case {
            LetterCase::Upper => self.base.to_ascii_uppercase(),
            LetterCase::Lower => self.base,
        }
    }
}

/// Letter-case policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Uppercase,
    MixedCase,
    Lowercase,
}

impl Mode {
    pub const ALL: [Mode; MODE_COUNT] = [Mode::Uppercase, Mode::MixedCase, Mode::Lowercase];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Uppercase => "Aa>A",
            Mode::MixedCase => "Aa",
            Mode::Lowercase => "Aa>a",
        }
    }

    /// Next mode, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % MODE_COUNT]
    }
}

/// Holds the session's mode and applies it to drawn letters
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Advance to the next mode; existing bubbles keep their case
    pub fn cycle(&mut self) -> Mode {
        self.mode = self.mode.next();
        log::info!("Letter mode -> {:?}", self.mode);
        self.mode
    }

    /// Give `base` a case according to the current mode
    pub fn apply<R: Rng + ?Sized>(&self, base: char, rng: &mut R) -> Letter {
        let case = match self.mode {
            Mode::Uppercase => LetterCase::Upper,
            Mode::Lowercase => LetterCase::Lower,
            Mode::MixedCase => {
                if rng.random_bool(0.5) {
                    LetterCase::Upper
                } else {
                    LetterCase::Lower
                }
            }
        };
        Letter::new(base, case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_fixed_modes_force_case() {
        let mut rng = Pcg32::seed_from_u64(1);
        let upper = ModeController::new(Mode::Uppercase);
        let lower = ModeController::new(Mode::Lowercase);
        for c in 'a'..='z' {
            assert_eq!(upper.apply(c, &mut rng).case, LetterCase::Upper);
            assert_eq!(lower.apply(c, &mut rng).case, LetterCase::Lower);
        }
    }

    #[test]
    fn test_mixed_mode_is_roughly_fair() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mixed = ModeController::new(Mode::MixedCase);
        let draws = 10_000;
        let upper = (0..draws)
            .filter(|_| mixed.apply('q', &mut rng).case == LetterCase::Upper)
            .count();
        let share = upper as f64 / draws as f64;
        assert!((0.45..0.55).contains(&share), "upper share {share}");
    }

    #[test]
    fn test_cycle_mode_count_times_is_identity() {
        for start in Mode::ALL {
            let mut ctl = ModeController::new(start);
            for _ in 0..MODE_COUNT {
                ctl.cycle();
            }
            assert_eq!(ctl.mode(), start);
        }
    }

    #[test]
    fn test_cycle_order() {
        let mut ctl = ModeController::new(Mode::Uppercase);
        assert_eq!(ctl.cycle(), Mode::MixedCase);
        assert_eq!(ctl.cycle(), Mode::Lowercase);
        assert_eq!(ctl.cycle(), Mode::Uppercase);
    }

    #[test]
    fn test_letter_display_and_base() {
        let l = Letter::new('G', LetterCase::Lower);
        assert_eq!(l.base(), 'g');
        assert_eq!(l.display(), 'g');
        assert_eq!(Letter::new('g', LetterCase::Upper).display(), 'G');
    }
}
