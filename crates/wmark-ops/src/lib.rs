//! # wmark-ops
//!
//! Watermark compositing engine.
//!
//! Takes a decoded base raster, a decoded watermark raster and a
//! [`CompositeConfig`], and produces a new opaque raster where each pixel is
//! either the base pixel or a linear blend of base and watermark.
//!
//! # Modules
//!
//! - [`blend`] - Per-pixel blend rule (alpha, chroma key, linear mix)
//! - [`placement`] - Overlay, single and grid coordinate mapping
//! - [`validate`] - Pre-flight checks producing a [`CompositePlan`]
//! - [`composite`] - Full-image traversal
//! - [`parallel`] - Row-parallel traversal (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use wmark_core::{Pixel, Raster};
//! use wmark_ops::{composite_checked, CompositeConfig, Placement};
//!
//! let base = Raster::filled(4, 4, Pixel::WHITE).unwrap();
//! let mark = Raster::filled(2, 2, Pixel::BLACK).unwrap();
//!
//! let config = CompositeConfig {
//!     transparency: 50,
//!     placement: Placement::Single { x: 1, y: 1 },
//!     ..Default::default()
//! };
//! let out = composite_checked(&base, &mark, &config).unwrap();
//! assert_eq!(out.pixel(1, 1), Pixel::rgb(127, 127, 127));
//! assert_eq!(out.pixel(0, 0), Pixel::WHITE);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blend;
pub mod composite;
pub mod config;
pub mod placement;
pub mod validate;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{CompositeError, ImageRole, OpsResult};
pub use blend::{blend_pixel, BlendParams};
pub use composite::{composite, composite_checked};
pub use config::{parse_color_triple, parse_position, CompositeConfig, Method, Placement};
pub use placement::Layout;
pub use validate::CompositePlan;

#[cfg(feature = "parallel")]
pub use parallel::composite_par;
