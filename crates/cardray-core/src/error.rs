//! Error types for Cardray

use thiserror::Error;

/// Result type alias using Cardray's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the numeric core
///
/// Marching and shading never fail; only settings, camera setup and the
/// pixel sinks report errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Output path has no supported image extension
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Settings file could not be parsed
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
