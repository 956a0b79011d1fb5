//! Round timers
//!
//! One countdown slot per timer kind, clocked by simulation ticks. Arming a
//! kind replaces whatever deadline it had.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Question audio finished
    Announce,
    /// Celebration finished
    Bravo,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    announce: Option<u32>,
    bravo: Option<u32>,
}

impl Timers {
    fn slot(&mut self, kind: TimerKind) -> &mut Option<u32> {
        match kind {
            TimerKind::Announce => &mut self.announce,
            TimerKind::Bravo => &mut self.bravo,
        }
    }

    /// Fire `kind` after `ms` milliseconds
    pub fn arm(&mut self, kind: TimerKind, ms: u32) {
        log::debug!("Arming {:?} timer for {} ms", kind, ms);
        *self.slot(kind) = Some(ms);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        *self.slot(kind) = None;
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        match kind {
            TimerKind::Announce => self.announce.is_some(),
            TimerKind::Bravo => self.bravo.is_some(),
        }
    }

    /// Milliseconds until `kind` fires
    pub fn remaining(&self, kind: TimerKind) -> Option<u32> {
        match kind {
            TimerKind::Announce => self.announce,
            TimerKind::Bravo => self.bravo,
        }
    }

    /// Count down by `elapsed_ms`; returns the kinds that expired (and are now
    /// cleared), Announce before Bravo
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<TimerKind> {
        let mut expired = Vec::new();
        for kind in [TimerKind::Announce, TimerKind::Bravo] {
            let slot = self.slot(kind);
            match *slot {
                Some(left) if left <= elapsed_ms => {
                    *slot = None;
                    expired.push(kind);
                }
                Some(left) => *slot = Some(left - elapsed_ms),
                None => {}
            }
        }
        expired
    }
}
