// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the overlay library.

use std::fmt;

/// Result type alias for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Main error type for the overlay library.
///
/// Unmatched render-catalog keys are not errors: the renderer falls back to a
/// placeholder asset and logs a warning instead.
#[derive(Debug)]
pub enum OverlayError {
    /// Name is not one of the 17 recognized body parts.
    UnknownPart(String),
    /// Keypoint list or model output does not have the expected shape or range.
    MalformedInput(String),
    /// A relation table violates its structural invariant.
    InvalidTopology(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Error decoding or encoding images.
    ImageError(String),
    /// Error parsing keypoint files.
    ParseError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPart(name) => write!(f, "Unknown body part: {name}"),
            Self::MalformedInput(msg) => write!(f, "Malformed input: {msg}"),
            Self::InvalidTopology(msg) => write!(f, "Invalid topology: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OverlayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

#[cfg(feature = "annotate")]
impl From<image::ImageError> for OverlayError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}
