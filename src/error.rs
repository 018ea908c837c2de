//! Error types for the place matcher and the SDF rasterizer.

use thiserror::Error;

/// Coarse classification of a [`MapcoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller handed over a malformed place or coordinate
    InvalidInput,
    /// Rasterizer options are out of range
    InvalidParameters,
    /// The drawing callback failed
    RenderFailed,
    /// Configuration could not be loaded or validated
    Config,
}

#[derive(Error, Debug)]
pub enum MapcoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MapcoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Self::RenderFailed(_) => ErrorKind::RenderFailed,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<serde_json::Error> for MapcoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for MapcoreError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MapcoreError>;
