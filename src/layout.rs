//! Screen layout
//!
//! Metrics are designed at 800 px on the long side and scale from there.
//! The mode and bubble-count indicators sit in the bottom-right corner; the
//! reminder banner sits bottom-left.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{MIN_BUBBLES, REFERENCE_EXTENT};

/// Axis-aligned rectangle, half-open on the far edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let rel = p - self.origin;
        rel.x >= 0.0 && rel.y >= 0.0 && rel.x < self.size.x && rel.y < self.size.y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub bounds: Vec2,
    /// Long side / 800
    pub scale: f32,
    /// Margin from screen edges
    pub pad: f32,
    pub announce_font_px: f32,
    pub reminder_font_px: f32,
    pub letter_font_px: f32,
    pub mode_indicator: Rect,
    pub count_indicator: Rect,
    min_count: usize,
    max_count: usize,
}

impl Layout {
    pub fn new(bounds: Vec2, max_count: usize) -> Self {
        Self::with_count_range(bounds, MIN_BUBBLES, max_count)
    }

    pub fn with_count_range(bounds: Vec2, min_count: usize, max_count: usize) -> Self {
        let scale = bounds.x.max(bounds.y) / REFERENCE_EXTENT;
        let pad = (10.0 * scale).floor();
        let cell = (40.0 * scale).round();
        let count_w = cell * max_count as f32;
        let count_indicator = Rect::new(
            bounds.x - pad - count_w,
            bounds.y - pad - cell,
            count_w,
            cell,
        );
        let mode_indicator = Rect::new(
            count_indicator.origin.x - pad - cell,
            count_indicator.origin.y,
            cell,
            cell,
        );
        Self {
            bounds,
            scale,
            pad,
            announce_font_px: (200.0 * scale).floor(),
            reminder_font_px: (40.0 * scale).floor(),
            letter_font_px: (60.0 * scale).floor(),
            mode_indicator,
            count_indicator,
            min_count,
            max_count,
        }
    }

    /// Center of the announce banner
    pub fn announce_anchor(&self) -> Vec2 {
        self.bounds / 2.0
    }

    /// Top-left of the reminder banner
    pub fn reminder_anchor(&self) -> Vec2 {
        Vec2::new(self.pad, self.bounds.y - self.reminder_font_px - self.pad)
    }

    /// Bubble count requested by a tap at `p` on the count indicator
    pub fn count_at(&self, p: Vec2) -> Option<usize> {
        if !self.count_indicator.contains(p) {
            return None;
        }
        let rect = self.count_indicator;
        let fraction = (p.x - rect.origin.x) / rect.size.x;
        let n = (fraction * self.max_count as f32).floor() as usize + 1;
        Some(n.clamp(self.min_count, self.max_count))
    }

    /// Centre of the count-indicator cell that represents `n` bubbles
    pub fn count_cell_center(&self, n: usize) -> Vec2 {
        let rect = self.count_indicator;
        let cell = rect.size.x / self.max_count as f32;
        Vec2::new(
            rect.origin.x + cell * (n.saturating_sub(1) as f32 + 0.5),
            rect.origin.y + rect.size.y / 2.0,
        )
    }

    pub fn on_mode_indicator(&self, p: Vec2) -> bool {
        self.mode_indicator.contains(p)
    }
}
