//! Error types
//!
//! Gameplay faults never escape the round state machine; these cover the
//! recoverable spawn failures and the startup-time asset/config failures.

use std::fmt;
use std::path::PathBuf;

use glam::Vec2;

/// No clean spawn position could be found
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// The arena cannot hold even one bubble of this radius
    ArenaTooSmall { bounds: Vec2, radius: f32 },
    /// Retry budget spent; `best` is the least-overlapping sample seen
    Exhausted { attempts: u32, best: Vec2 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArenaTooSmall { bounds, radius } => write!(
                f,
                "arena {}x{} cannot fit a bubble of radius {radius}",
                bounds.x, bounds.y
            ),
            Self::Exhausted { attempts, best } => write!(
                f,
                "no free spawn position after {attempts} attempts (best ({}, {}))",
                best.x, best.y
            ),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Asset enumeration or lookup failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Directory could not be read
    Unreadable { path: PathBuf, reason: String },
    /// No background images available
    NoBackgrounds,
    /// No fonts available
    NoFonts,
    /// A named sound is not available
    MissingSound { key: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, reason } => {
                write!(f, "cannot read {}: {reason}", path.display())
            }
            Self::NoBackgrounds => write!(f, "no background images found"),
            Self::NoFonts => write!(f, "no fonts found"),
            Self::MissingSound { key } => write!(f, "missing sound: {key}"),
        }
    }
}

impl std::error::Error for AssetError {}

/// Settings file failure
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "invalid settings in {}: {source}", path.display())
            }
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

/// Session could not be started
#[derive(Debug)]
pub enum SessionError {
    Config(ConfigError),
    Asset(AssetError),
    Placement(PlacementError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Asset(e) => write!(f, "assets: {e}"),
            Self::Placement(e) => write!(f, "placement: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Asset(e) => Some(e),
            Self::Placement(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<AssetError> for SessionError {
    fn from(e: AssetError) -> Self {
        Self::Asset(e)
    }
}

impl From<PlacementError> for SessionError {
    fn from(e: PlacementError) -> Self {
        Self::Placement(e)
    }
}
