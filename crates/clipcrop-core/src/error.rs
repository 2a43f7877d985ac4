//! Error types for cropping operations.

use thiserror::Error;

/// Error type for clip view operations.
#[derive(Debug, Error)]
pub enum ClipError {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The image source could not be decoded.
    #[error("Failed to decode image source: {0}")]
    Decode(#[from] image::ImageError),

    /// The supplied pixel buffer has zero width or height.
    #[error("Image source is empty")]
    EmptySource,

    /// A render frame was requested before the viewport was supplied.
    #[error("Viewport dimensions have not been set")]
    ViewportNotSet,

    /// A render frame was requested before any image was loaded.
    #[error("No image has been loaded")]
    NoImage,
}
