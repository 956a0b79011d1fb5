//! Bubble motion and collision response
//!
//! Walls reflect one-sidedly: an axis only flips while motion still pushes the
//! bubble further out, so a bubble straddling the edge does not flicker.
//! Bubble pairs swap the velocity component along their collision axis
//! (equal-mass elastic exchange). There is no positional correction, so
//! overlapping pairs may exchange again on later ticks until they separate.

use glam::Vec2;

use super::state::Bubble;

/// Move every bubble one step along its heading, then bounce off the walls
pub fn advance(bubbles: &mut [Bubble], bounds: Vec2, speed: f32) {
    for b in bubbles.iter_mut() {
        b.position += b.direction * speed;
        reflect_walls(b, bounds);
    }
}

/// Flip heading axes that are carrying the bubble further out of `bounds`
pub fn reflect_walls(b: &mut Bubble, bounds: Vec2) {
    let diameter = b.diameter();
    for axis in 0..2 {
        if b.position[axis] < 0.0 && b.direction[axis] < 0.0 {
            b.direction[axis] = -b.direction[axis];
        } else if b.position[axis] + diameter > bounds[axis] && b.direction[axis] > 0.0 {
            b.direction[axis] = -b.direction[axis];
        }
    }
}

/// Exchange collision-axis components of two headings.
///
/// `axis` must be the unit vector from the first bubble's center to the
/// second's.
#[inline]
pub fn exchange(axis: Vec2, dir_i: Vec2, dir_j: Vec2) -> (Vec2, Vec2) {
    let t_i = axis * axis.dot(dir_i);
    let t_j = axis * axis.dot(dir_j);
    (dir_i - t_i + t_j, dir_j + t_i - t_j)
}

/// Resolve every overlapping pair `(i, j)` with `i < j`, in index order
pub fn resolve_pairs(bubbles: &mut [Bubble]) {
    let n = bubbles.len();
    for i in 0..n {
        let ci = bubbles[i].center();
        for j in (i + 1)..n {
            let cj = bubbles[j].center();
            let d = ci.distance(cj);
            if d >= bubbles[i].radius + bubbles[j].radius {
                continue;
            }
            // Coincident centers have no collision axis
            if d <= f32::EPSILON {
                continue;
            }
            let axis = (cj - ci) / d;
            let (di, dj) = exchange(axis, bubbles[i].direction, bubbles[j].direction);
            bubbles[i].direction = di;
            bubbles[j].direction = dj;
        }
    }
}

/// One full physics step
pub fn step(bubbles: &mut [Bubble], bounds: Vec2, speed: f32) {
    advance(bubbles, bounds, speed);
    resolve_pairs(bubbles);
}
