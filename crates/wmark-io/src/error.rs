//! Error types for I/O operations.
//!
//! Provides unified error handling for PNG and JPEG reading and writing.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported input format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Output name doesn't end in `.jpg` or `.png`.
    #[error("unsupported output extension: {0} (expected .jpg or .png)")]
    UnsupportedOutputExtension(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoded samples don't form a valid raster.
    #[error("invalid image: {0}")]
    InvalidImage(#[from] wmark_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
