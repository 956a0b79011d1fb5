//! Rendering seam
//!
//! The simulation never draws. Each frame it hands a [`Frame`] (plain copies of
//! display data) to whatever [`Renderer`] the platform supplies.

pub mod frame;

pub use frame::{Banner, BannerKind, CountIndicator, Frame, Sprite};

/// Something that can put a frame on screen
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}

/// Renderer that only logs at trace level (headless runs)
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame) {
        self.frames += 1;
        log::trace!(
            "frame {}: bg={} sprites={} banner={:?}",
            self.frames,
            frame.background,
            frame.sprites.len(),
            frame.banner.as_ref().map(|b| b.text.as_str())
        );
    }
}
