//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod alphabet;
pub mod idle;
pub mod mode;
pub mod physics;
pub mod placement;
pub mod round;
pub mod state;
pub mod tick;
pub mod timer;

pub use alphabet::{ALPHABET_LEN, AlphabetCursor};
pub use idle::IdlePlayer;
pub use mode::{Letter, LetterCase, Mode, ModeController};
pub use placement::place;
pub use round::TapOutcome;
pub use state::{Bubble, Phase, Session, SessionSnapshot, SpawnPolicy};
pub use tick::tick;
pub use timer::{TimerKind, Timers};
