//! Platform abstraction layer
//!
//! Hosts feed [`Event`]s into a [`Game`], which owns the session, the timers
//! and the output collaborators. Everything runs on one thread; each event is
//! handled to completion before the next one is taken off the queue.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use glam::Vec2;

use crate::audio::AudioPlayer;
use crate::consts::WRONG_VIBRATE_SECS;
use crate::renderer::{Frame, Renderer};
use crate::sim::{self, Session, TapOutcome, TimerKind, Timers, round};

/// Input from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// One fixed simulation step
    Tick,
    TimerExpired(TimerKind),
    PointerDown(Vec2),
    /// Back key; ends the run loop
    Back,
    /// App lost focus
    Suspend,
    Resume,
}

/// Vibration motor, where the device has one
pub trait Haptics {
    fn vibrate(&mut self, seconds: f32);
}

/// Event dispatcher
pub struct Game {
    pub session: Session,
    pub timers: Timers,
    audio: Box<dyn AudioPlayer>,
    renderer: Box<dyn Renderer>,
    haptics: Option<Box<dyn Haptics>>,
    queue: VecDeque<Event>,
    suspended: bool,
    started: bool,
}

impl Game {
    pub fn new(session: Session, audio: Box<dyn AudioPlayer>, renderer: Box<dyn Renderer>) -> Self {
        Self {
            session,
            timers: Timers::default(),
            audio,
            renderer,
            haptics: None,
            queue: VecDeque::new(),
            suspended: false,
            started: false,
        }
    }

    pub fn with_haptics(mut self, haptics: Box<dyn Haptics>) -> Self {
        self.haptics = Some(haptics);
        self
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Start music and announce the first target. Idempotent.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        log::info!("Session {} starting", self.session.seed);
        round::start(&mut self.session, &mut self.timers, self.audio.as_mut());
    }

    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Drain the queue, including events enqueued while draining
    pub fn run_until_idle(&mut self) -> ControlFlow<()> {
        while let Some(event) = self.queue.pop_front() {
            self.handle(event)?;
        }
        ControlFlow::Continue(())
    }

    /// Queue `events` in order and drain
    pub fn run(&mut self, events: impl IntoIterator<Item = Event>) -> ControlFlow<()> {
        self.queue.extend(events);
        self.run_until_idle()
    }

    /// Handle one event; `Break` means the host should shut down
    pub fn handle(&mut self, event: Event) -> ControlFlow<()> {
        match event {
            Event::Back => {
                log::info!("Back pressed, stopping");
                return ControlFlow::Break(());
            }
            Event::Suspend => {
                if !self.suspended {
                    self.suspended = true;
                    self.audio.pause();
                    log::debug!("Suspended");
                }
            }
            Event::Resume => {
                if self.suspended {
                    self.suspended = false;
                    self.audio.resume();
                    log::debug!("Resumed");
                }
            }
            // May have been queued before a suspend
            Event::TimerExpired(kind) => {
                round::on_timer(&mut self.session, &mut self.timers, self.audio.as_mut(), kind);
            }
            _ if self.suspended => log::trace!("Dropping {:?} while suspended", event),
            Event::Tick => self.on_tick(),
            Event::PointerDown(pos) => {
                let outcome =
                    round::on_pointer(&mut self.session, &mut self.timers, self.audio.as_mut(), pos);
                log::debug!("Tap at {pos}: {outcome:?}");
                if matches!(outcome, TapOutcome::Wrong { popped } if popped > 0) {
                    if let Some(haptics) = self.haptics.as_mut() {
                        haptics.vibrate(WRONG_VIBRATE_SECS);
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn on_tick(&mut self) {
        let elapsed = self.session.settings.tick_ms();
        for kind in self.timers.advance(elapsed) {
            self.queue.push_back(Event::TimerExpired(kind));
        }
        // Draw, then move
        self.renderer.draw(&Frame::compose(&self.session));
        sim::tick(&mut self.session);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::audio::{SilentAudio, SoundId};
    use crate::renderer::LogRenderer;
    use crate::sim::Phase;
    use crate::sim::state::test_support::*;

    struct CountingHaptics(Rc<Cell<u32>>);

    impl Haptics for CountingHaptics {
        fn vibrate(&mut self, _seconds: f32) {
            self.0.set(self.0.get() + 1);
        }
    }

    struct CountingRenderer(Rc<Cell<u32>>);

    impl Renderer for CountingRenderer {
        fn draw(&mut self, _frame: &Frame) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn game(seed: u64, cue_ms: u32) -> Game {
        let mut game = Game::new(
            session(seed),
            Box::new(SilentAudio::new(cue_ms)),
            Box::new(LogRenderer::default()),
        );
        game.start();
        game
    }

    fn ticks(n: usize) -> impl Iterator<Item = Event> {
        std::iter::repeat_n(Event::Tick, n)
    }

    #[test]
    fn test_announce_then_play() {
        // 33 ms per tick; 300 ms needs 10 ticks
        let mut g = game(5, 300);
        assert_eq!(g.session.phase, Phase::Announcing);
        assert!(g.run(ticks(9)).is_continue());
        assert_eq!(g.session.phase, Phase::Announcing);
        assert!(g.run(ticks(1)).is_continue());
        assert_eq!(g.session.phase, Phase::Playing);
    }

    #[test]
    fn test_full_round() {
        let mut g = game(6, 100);
        g.run(ticks(5));
        assert_eq!(g.session.phase, Phase::Playing);

        let tap = g.session.target_bubble().center();
        g.run([Event::PointerDown(tap)]);
        assert_eq!(g.session.phase, Phase::Bravo);
        assert_eq!(g.session.correct, 1);

        // Bravo cue then the next announcement
        g.run(ticks(5));
        assert_eq!(g.session.phase, Phase::Announcing);
        g.run(ticks(5));
        assert_eq!(g.session.phase, Phase::Playing);
    }

    #[test]
    fn test_back_stops() {
        let mut g = game(7, 100);
        let flow = g.run([Event::Tick, Event::Back, Event::Tick]);
        assert!(flow.is_break());
        assert_eq!(g.session.time_ticks, 1);
    }

    #[test]
    fn test_suspend_freezes_everything() {
        let mut g = game(8, 100);
        g.run([Event::Suspend]);
        assert!(g.is_suspended());
        let before: Vec<_> = g.session.bubbles.iter().map(|b| b.position).collect();
        g.run(ticks(50));
        assert_eq!(g.session.time_ticks, 0);
        assert_eq!(g.session.phase, Phase::Announcing);
        assert_eq!(g.timers.remaining(TimerKind::Announce), Some(100));
        let after: Vec<_> = g.session.bubbles.iter().map(|b| b.position).collect();
        assert_eq!(before, after);

        g.run([Event::Resume]);
        g.run(ticks(4));
        assert_eq!(g.session.phase, Phase::Playing);
    }

    #[test]
    fn test_expiry_queued_before_suspend_is_delivered() {
        let mut g = game(8, 100);
        // The 4th tick queues the expiry behind the suspend
        g.run(ticks(4).chain([Event::Suspend]));
        assert!(g.is_suspended());
        assert_eq!(g.session.phase, Phase::Playing);
    }

    #[test]
    fn test_each_tick_draws_once() {
        let frames = Rc::new(Cell::new(0));
        let mut g = Game::new(
            session(9),
            Box::new(SilentAudio::default()),
            Box::new(CountingRenderer(frames.clone())),
        );
        g.start();
        g.run(ticks(12));
        assert_eq!(frames.get(), 12);
    }

    #[test]
    fn test_wrong_tap_vibrates() {
        let buzzes = Rc::new(Cell::new(0));
        let mut g = Game::new(
            session(10),
            Box::new(SilentAudio::new(100)),
            Box::new(LogRenderer::default()),
        )
        .with_haptics(Box::new(CountingHaptics(buzzes.clone())));
        g.start();
        g.run(ticks(5));

        let wrong = (0..g.session.bubbles.len())
            .find(|&i| {
                i != g.session.target
                    && !g.session.target_bubble().contains(g.session.bubbles[i].center())
            })
            .unwrap();
        let tap = g.session.bubbles[wrong].center();
        g.run([Event::PointerDown(tap)]);
        assert_eq!(buzzes.get(), 1);
        assert_eq!(g.session.phase, Phase::Playing);

        // Empty space does not vibrate
        g.run([Event::PointerDown(Vec2::new(-50.0, -50.0))]);
        assert_eq!(buzzes.get(), 1);
    }

    #[test]
    fn test_missing_question_still_advances() {
        // Every question missing: fallback is 2000 ms, about 61 ticks
        let silent = ('a'..='z').fold(SilentAudio::new(100), |audio, c| {
            audio.without(SoundId::Question(c))
        });
        let mut g = Game::new(session(11), Box::new(silent), Box::new(LogRenderer::default()));
        g.start();
        g.run(ticks(60));
        assert_eq!(g.session.phase, Phase::Announcing);
        g.run(ticks(2));
        assert_eq!(g.session.phase, Phase::Playing);
    }
}
