//! Per-frame draw list

use glam::Vec2;
use serde::Serialize;

use crate::assets::{BackgroundHandle, GlyphHandle, ImageHandle};
use crate::layout::Rect;
use crate::sim::{Phase, Session};

/// One bubble to draw: sprite, letter glyph and placement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub image: ImageHandle,
    pub glyph: GlyphHandle,
    pub glyph_px: f32,
    /// Top-left of the bounding box
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BannerKind {
    /// Large letter centered on screen while the question plays
    Announce,
    /// Small letter in the corner while playing
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    pub font_px: f32,
    /// Center for `Announce`, top-left for `Reminder`
    pub anchor: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountIndicator {
    pub rect: Rect,
    pub current: usize,
    pub max: usize,
}

/// Everything the renderer needs for one frame, back to front
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub background: BackgroundHandle,
    pub sprites: Vec<Sprite>,
    pub banner: Option<Banner>,
    pub mode_label: &'static str,
    pub mode_rect: Rect,
    pub count: CountIndicator,
}

impl Frame {
    pub fn compose(session: &Session) -> Self {
        let layout = &session.layout;
        let sprites = session
            .bubbles
            .iter()
            .map(|b| Sprite {
                image: session.assets.bubble_image.clone(),
                glyph: session.assets.glyph(b.letter, &b.font),
                glyph_px: layout.letter_font_px,
                position: b.position,
                radius: b.radius,
            })
            .collect();

        let target = session
            .bubbles
            .get(session.target)
            .map(|b| b.letter.base().to_ascii_uppercase().to_string());
        let banner = match (session.phase, target) {
            (Phase::Announcing, Some(text)) => Some(Banner {
                kind: BannerKind::Announce,
                text,
                font_px: layout.announce_font_px,
                anchor: layout.announce_anchor(),
            }),
            (Phase::Playing, Some(text)) => Some(Banner {
                kind: BannerKind::Reminder,
                text,
                font_px: layout.reminder_font_px,
                anchor: layout.reminder_anchor(),
            }),
            _ => None,
        };

        Self {
            background: session.current_background().clone(),
            sprites,
            banner,
            mode_label: session.mode.mode().as_str(),
            mode_rect: layout.mode_indicator,
            count: CountIndicator {
                rect: layout.count_indicator,
                current: session.bubbles.len(),
                max: session.settings.max_bubbles,
            },
        }
    }
}
