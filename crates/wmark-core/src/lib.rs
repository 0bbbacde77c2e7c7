//! # wmark-core
//!
//! Core types for watermark compositing.
//!
//! This crate provides the foundational types used throughout the wmark workspace:
//!
//! - [`Pixel`] - 8-bit RGBA value with RGB-only and full equality
//! - [`Raster`] - Owned row-major grid of pixels
//! - [`ColorModel`], [`Transparency`] - Stored layout of a decoded image file
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other crates build on it:
//!
//! ```text
//! wmark-core (this crate)
//!    ^
//!    |
//!    +-- wmark-ops (blend, placement, compositing, validation)
//!    +-- wmark-io (PNG/JPEG decode and encode)
//!    +-- wmark-cli (the `wmark` binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color_model;
pub mod error;
pub mod pixel;
pub mod raster;

// Re-exports for convenience
pub use color_model::{ColorModel, Transparency};
pub use error::{Error, Result};
pub use pixel::Pixel;
pub use raster::Raster;
