//! Fixed timestep simulation tick
//!
//! Moves the bubbles; round progression is event-driven and lives in `round`.

use super::physics;
use super::state::Session;

/// Advance the bubbles by one fixed step
pub fn tick(session: &mut Session) {
    session.time_ticks += 1;
    let bounds = session.bounds();
    let speed = session.settings.bubble_speed();
    physics::step(&mut session.bubbles, bounds, speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::test_support::*;

    #[test]
    fn test_tick_moves_bubbles() {
        let mut s = session(12345);
        let before: Vec<_> = s.bubbles.iter().map(|b| b.position).collect();
        tick(&mut s);
        assert_eq!(s.time_ticks, 1);
        for (b, p) in s.bubbles.iter().zip(before) {
            assert!((b.position - p).length() > 0.0);
        }
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed stay identical
        let mut a = session(99999);
        let mut b = session(99999);
        for _ in 0..300 {
            tick(&mut a);
            tick(&mut b);
        }
        for (x, y) in a.bubbles.iter().zip(&b.bubbles) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.direction, y.direction);
        }
    }

    #[test]
    fn test_long_run_stays_in_arena() {
        let mut s = session(4242);
        let bounds = s.bounds();
        for _ in 0..3000 {
            tick(&mut s);
        }
        // Collisions near a wall can push a bubble past it for a while
        let slack = s.radius * 2.0;
        for b in &s.bubbles {
            assert!(b.position.is_finite());
            assert!(b.position.x > -slack && b.position.x < bounds.x - b.diameter() + slack);
            assert!(b.position.y > -slack && b.position.y < bounds.y - b.diameter() + slack);
        }
    }
}
