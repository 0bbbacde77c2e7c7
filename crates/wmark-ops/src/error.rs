//! Error types for compositing.

use std::fmt;
use thiserror::Error;

/// Which input image a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    /// The image being watermarked.
    Base,
    /// The watermark image.
    Watermark,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "image",
            Self::Watermark => "watermark",
        })
    }
}

/// Error type for compositing and its pre-flight validation.
#[derive(Error, Debug)]
pub enum CompositeError {
    /// Image doesn't have exactly 3 components.
    #[error("unsupported color model: the {role} has {components} components, expected 3")]
    UnsupportedColorModel {
        /// Offending image.
        role: ImageRole,
        /// Components including alpha.
        components: u32,
    },

    /// Image is neither 24 nor 32 bits per pixel.
    #[error("unsupported bit depth: the {role} is {bits}-bit, expected 24 or 32")]
    UnsupportedBitDepth {
        /// Offending image.
        role: ImageRole,
        /// Bits per pixel.
        bits: u32,
    },

    /// Watermark exceeds the base in at least one dimension.
    #[error("watermark {watermark_width}x{watermark_height} is larger than image {base_width}x{base_height}")]
    WatermarkTooLarge {
        /// Base width.
        base_width: u32,
        /// Base height.
        base_height: u32,
        /// Watermark width.
        watermark_width: u32,
        /// Watermark height.
        watermark_height: u32,
    },

    /// Overlay placement needs identical dimensions.
    #[error("overlay placement needs equal dimensions: image {base_width}x{base_height}, watermark {watermark_width}x{watermark_height}")]
    OverlayDimensionMismatch {
        /// Base width.
        base_width: u32,
        /// Base height.
        base_height: u32,
        /// Watermark width.
        watermark_width: u32,
        /// Watermark height.
        watermark_height: u32,
    },

    /// Transparency percentage outside [0, 100].
    #[error("transparency percentage {0} is out of range 0-100")]
    TransparencyOutOfRange(i32),

    /// Chroma-key color malformed or out of range.
    #[error("invalid transparency color: {0}")]
    InvalidColor(String),

    /// Position input is not an `x y` integer pair.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// Single placement offset outside the valid range.
    #[error("position ({x}, {y}) is out of range [0-{max_x}] x [0-{max_y}]")]
    PositionOutOfRange {
        /// Requested x offset.
        x: i32,
        /// Requested y offset.
        y: i32,
        /// Largest valid x offset.
        max_x: u32,
        /// Largest valid y offset.
        max_y: u32,
    },

    /// Rasters passed to the engine don't match the plan they were validated against.
    #[error("plan mismatch: planned {planned:?}, got {actual:?}")]
    PlanMismatch {
        /// Planned (base, watermark) dimensions.
        planned: ((u32, u32), (u32, u32)),
        /// Actual (base, watermark) dimensions.
        actual: ((u32, u32), (u32, u32)),
    },

    /// Raster construction failed.
    #[error(transparent)]
    Raster(#[from] wmark_core::Error),
}

/// Result type for compositing.
pub type OpsResult<T> = Result<T, CompositeError>;
