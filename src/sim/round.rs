//! Round state machine
//!
//! Announcing --(announce timer)--> Playing --(target popped)--> Bravo
//! --(bravo timer)--> Announcing. Taps are ignored while in Bravo.

use glam::Vec2;
use rand::Rng;

use super::mode::{Letter, Mode};
use super::state::{Phase, Session};
use super::timer::{TimerKind, Timers};
use crate::audio::{AudioPlayer, SoundId, play_cue, play_effect};

/// What a pointer-down did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Input is gated off (Bravo)
    Ignored,
    /// Mode indicator cycled the letter case policy
    ModeChanged(Mode),
    /// Count indicator resized the bubble set
    CountChanged(usize),
    /// Target popped; `correct` is the new running total
    Correct { letter: Letter, correct: u32 },
    /// Non-target bubble(s) under the pointer were popped
    Wrong { popped: usize },
    /// Tap hit nothing
    Miss,
}

/// Begin the session: start the soundtrack and announce the first target
pub fn start(session: &mut Session, timers: &mut Timers, audio: &mut dyn AudioPlayer) {
    if let Err(e) = audio.play_looping(SoundId::Soundtrack) {
        log::warn!("{e}; continuing without music");
    }
    announce(session, timers, audio);
}

/// Speak the target letter and wait for the prompt to finish
pub fn announce(session: &mut Session, timers: &mut Timers, audio: &mut dyn AudioPlayer) {
    session.revalidate_target();
    let letter = session.target_bubble().letter;
    let ms = play_cue(
        audio,
        SoundId::Question(letter.base()),
        session.settings.fallback_cue_ms,
    );
    timers.arm(TimerKind::Announce, ms);
    session.phase = Phase::Announcing;
    log::info!("Find the letter {}", letter.base().to_ascii_uppercase());
}

/// Handle a timer firing
pub fn on_timer(
    session: &mut Session,
    timers: &mut Timers,
    audio: &mut dyn AudioPlayer,
    kind: TimerKind,
) {
    match (kind, session.phase) {
        (TimerKind::Announce, Phase::Announcing) => {
            session.phase = Phase::Playing;
            log::debug!("Announcement over, playing");
        }
        (TimerKind::Bravo, Phase::Bravo) => announce(session, timers, audio),
        (kind, phase) => log::debug!("Stale {:?} timer in {:?}", kind, phase),
    }
}

/// Handle a pointer-down at `pos`
pub fn on_pointer(
    session: &mut Session,
    timers: &mut Timers,
    audio: &mut dyn AudioPlayer,
    pos: Vec2,
) -> TapOutcome {
    if session.phase == Phase::Bravo {
        return TapOutcome::Ignored;
    }

    if session.layout.on_mode_indicator(pos) {
        return TapOutcome::ModeChanged(session.mode.cycle());
    }
    if let Some(n) = session.layout.count_at(pos) {
        return TapOutcome::CountChanged(set_bubble_count(session, n));
    }

    session.revalidate_target();
    // The target wins over any bubble overlapping it
    if session.target_bubble().contains(pos) {
        return pop_target(session, timers, audio);
    }

    play_effect(audio, SoundId::Wrong);
    let hits: Vec<usize> = session
        .bubbles
        .iter()
        .enumerate()
        .filter(|(_, b)| b.contains(pos))
        .map(|(i, _)| i)
        .collect();
    if hits.is_empty() {
        log::debug!("Tap at {:?} missed everything", pos);
        return TapOutcome::Miss;
    }
    for &i in &hits {
        play_effect(audio, SoundId::Pop);
        if let Err(e) = session.replace_bubble(i) {
            log::warn!("Could not replace bubble {}: {}", i, e);
        }
    }
    log::debug!("Wrong tap popped {} bubble(s)", hits.len());
    TapOutcome::Wrong { popped: hits.len() }
}

/// Correct answer: celebrate, replace the target, escalate, pick a new target
fn pop_target(
    session: &mut Session,
    timers: &mut Timers,
    audio: &mut dyn AudioPlayer,
) -> TapOutcome {
    let letter = session.target_bubble().letter;
    play_effect(audio, SoundId::Pop);
    let ms = play_cue(
        audio,
        SoundId::Bravo(letter.base()),
        session.settings.fallback_cue_ms,
    );

    let target = session.target;
    if let Err(e) = session.replace_bubble(target) {
        log::warn!("Could not replace target: {}", e);
    }

    session.correct += 1;
    if session.correct % session.settings.escalation_interval == 0 {
        escalate(session);
    }

    session.target = session.rng.random_range(0..session.bubbles.len());
    timers.cancel(TimerKind::Announce);
    timers.arm(TimerKind::Bravo, ms);
    session.phase = Phase::Bravo;
    log::info!(
        "Popped {} ({} correct)",
        letter.base().to_ascii_uppercase(),
        session.correct
    );
    TapOutcome::Correct {
        letter,
        correct: session.correct,
    }
}

/// Periodic reward: next background, optionally one more bubble
fn escalate(session: &mut Session) {
    session.background = (session.background + 1) % session.assets.backgrounds.len();
    log::info!("Background -> {}", session.current_background());
    if session.settings.grow_on_escalation {
        let wanted = session.bubbles.len() + 1;
        session.grow_to(wanted);
    }
}

/// Resize the bubble set to `n`, keeping the current target as bubble 0.
///
/// Returns the resulting count, which can fall short of `n` when the arena
/// has no room for more.
pub fn set_bubble_count(session: &mut Session, n: usize) -> usize {
    let n = n.clamp(session.settings.min_bubbles, session.settings.max_bubbles);
    session.revalidate_target();
    let target = session.target;
    session.bubbles.swap(0, target);
    session.target = 0;

    let count = if n > session.bubbles.len() {
        session.grow_to(n)
    } else {
        session.shrink_to(n)
    };
    session.revalidate_target();
    log::info!("Bubble count -> {}", count);
    count
}
