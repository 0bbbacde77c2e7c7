//! Error types for wmark-core operations.
//!
//! Raster construction is the only fallible operation in this crate. Pixel
//! access beyond the raster bounds is a programming error and panics instead.
//!
//! # Usage
//!
//! ```rust
//! use wmark_core::{Error, Pixel, Raster};
//!
//! let err = Raster::from_pixels(2, 2, vec![Pixel::BLACK; 3]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building core values.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid raster dimensions.
    ///
    /// Returned when width or height is zero, or when the supplied pixel
    /// buffer doesn't hold exactly `width * height` pixels.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Sample buffer cannot be interpreted as pixels.
    #[error("channel mismatch: expected 1-4 channels, got {got}")]
    ChannelMismatch {
        /// Actual channel count
        got: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
