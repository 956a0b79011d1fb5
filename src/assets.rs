//! Asset enumeration
//!
//! Fonts and backgrounds are enumerated once at session start and handed out
//! as shared, immutable handles. Decoding is the renderer's business.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;

use crate::error::AssetError;
use crate::sim::Letter;

/// Name used for the platform's default font
pub const SYSTEM_FONT: &str = "system";

/// Shared reference to a font
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FontHandle(Arc<str>);

/// Shared reference to a background image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BackgroundHandle(Arc<str>);

/// Shared reference to the bubble sprite every bubble is drawn with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageHandle(Arc<str>);

macro_rules! handle_impls {
    ($($ty:ident),*) => {$(
        impl $ty {
            pub fn new(name: impl Into<Arc<str>>) -> Self {
                Self(name.into())
            }

            pub fn name(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    )*};
}

handle_impls!(FontHandle, BackgroundHandle, ImageHandle);

/// A letter to render in a given font
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GlyphHandle {
    pub font: FontHandle,
    pub glyph: char,
}

impl GlyphHandle {
    pub fn new(letter: Letter, font: &FontHandle) -> Self {
        Self {
            font: font.clone(),
            glyph: letter.display(),
        }
    }
}

/// Source of fonts and backgrounds
pub trait AssetLoader {
    /// All fonts letters may be drawn in
    fn fonts(&self) -> Result<Vec<FontHandle>, AssetError>;

    /// All background images, in storage order
    fn backgrounds(&self) -> Result<Vec<BackgroundHandle>, AssetError>;

    /// Sprite shared by every bubble
    fn bubble_image(&self) -> ImageHandle {
        ImageHandle::new("bubble-large.png")
    }

    /// Renderable glyph for a letter in a font
    fn glyph(&self, letter: Letter, font: &FontHandle) -> GlyphHandle {
        GlyphHandle::new(letter, font)
    }
}

/// Everything the session needs from storage, resolved once
#[derive(Clone)]
pub struct AssetSet {
    pub fonts: Vec<FontHandle>,
    pub backgrounds: Vec<BackgroundHandle>,
    pub bubble_image: ImageHandle,
    loader: Rc<dyn AssetLoader>,
}

impl fmt::Debug for AssetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetSet")
            .field("fonts", &self.fonts)
            .field("backgrounds", &self.backgrounds)
            .field("bubble_image", &self.bubble_image)
            .finish_non_exhaustive()
    }
}

impl AssetSet {
    /// Enumerate assets; missing fonts or backgrounds are fatal
    pub fn load(loader: Rc<dyn AssetLoader>) -> Result<Self, AssetError> {
        let set = Self {
            fonts: loader.fonts()?,
            backgrounds: loader.backgrounds()?,
            bubble_image: loader.bubble_image(),
            loader,
        };
        set.check()?;
        log::info!(
            "Assets: {} fonts, {} backgrounds",
            set.fonts.len(),
            set.backgrounds.len()
        );
        Ok(set)
    }

    /// Both lists must be non-empty for a session to run
    pub fn check(&self) -> Result<(), AssetError> {
        if self.fonts.is_empty() {
            return Err(AssetError::NoFonts);
        }
        if self.backgrounds.is_empty() {
            return Err(AssetError::NoBackgrounds);
        }
        Ok(())
    }

    /// Glyph for `letter` in `font`, as the loader resolves it
    pub fn glyph(&self, letter: Letter, font: &FontHandle) -> GlyphHandle {
        self.loader.glyph(letter, font)
    }
}

/// Fixed in-memory asset list (headless runs and tests)
#[derive(Debug, Clone)]
pub struct BuiltinAssets {
    pub fonts: Vec<String>,
    pub backgrounds: Vec<String>,
}

impl Default for BuiltinAssets {
    fn default() -> Self {
        Self {
            fonts: vec![SYSTEM_FONT.to_string()],
            backgrounds: (1..=4).map(|i| format!("background-{i}.jpg")).collect(),
        }
    }
}

impl AssetLoader for BuiltinAssets {
    fn fonts(&self) -> Result<Vec<FontHandle>, AssetError> {
        Ok(self.fonts.iter().map(|f| FontHandle::new(f.as_str())).collect())
    }

    fn backgrounds(&self) -> Result<Vec<BackgroundHandle>, AssetError> {
        Ok(self
            .backgrounds
            .iter()
            .map(|b| BackgroundHandle::new(b.as_str()))
            .collect())
    }
}

/// Assets laid out on disk as `<root>/fonts/*.ttf` and `<root>/backgrounds/*.jpg`
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Files under `dir` (recursively) whose extension matches, sorted
    fn scan(&self, dir: &str, ext: &str) -> Result<Vec<PathBuf>, AssetError> {
        let mut found = Vec::new();
        let mut pending = vec![self.root.join(dir)];
        while let Some(path) = pending.pop() {
            let entries = std::fs::read_dir(&path).map_err(|e| AssetError::Unreadable {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_dir() {
                    pending.push(p);
                } else if has_extension(&p, ext) {
                    found.push(p);
                }
            }
        }
        found.sort();
        Ok(found)
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

impl AssetLoader for DirectoryAssets {
    fn fonts(&self) -> Result<Vec<FontHandle>, AssetError> {
        // A missing fonts directory just means only the system font
        let mut fonts: Vec<FontHandle> = match self.scan("fonts", "ttf") {
            Ok(files) => files
                .iter()
                .map(|p| FontHandle::new(p.to_string_lossy().as_ref()))
                .collect(),
            Err(e) => {
                log::warn!("{e}; using system font only");
                Vec::new()
            }
        };
        fonts.push(FontHandle::new(SYSTEM_FONT));
        Ok(fonts)
    }

    fn backgrounds(&self) -> Result<Vec<BackgroundHandle>, AssetError> {
        Ok(self
            .scan("backgrounds", "jpg")?
            .iter()
            .map(|p| BackgroundHandle::new(p.to_string_lossy().as_ref()))
            .collect())
    }

    fn bubble_image(&self) -> ImageHandle {
        ImageHandle::new(
            self.root
                .join("images")
                .join("bubble-large.png")
                .to_string_lossy()
                .as_ref(),
        )
    }
}
