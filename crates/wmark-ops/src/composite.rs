//! Full-image compositing.
//!
//! [`composite`] walks the base raster row by row. For each coordinate the
//! plan's [`Layout`](crate::Layout) picks the contributing watermark pixel (if
//! any) and [`blend_pixel`] mixes it in. The output is a new raster with the
//! base's dimensions; every pixel is written exactly once.
//!
//! # Example
//!
//! ```rust
//! use wmark_core::{Pixel, Raster};
//! use wmark_ops::{composite, CompositeConfig, CompositePlan, Placement};
//!
//! let base = Raster::filled(3, 3, Pixel::BLACK).unwrap();
//! let mark = Raster::filled(2, 2, Pixel::WHITE).unwrap();
//! let config = CompositeConfig {
//!     transparency: 100,
//!     placement: Placement::Grid,
//!     ..Default::default()
//! };
//! let plan = CompositePlan::for_rasters(&config, &base, &mark).unwrap();
//! let out = composite(&base, &mark, &plan).unwrap();
//! assert_eq!(out.pixel(2, 2), Pixel::WHITE);
//! ```

use crate::blend::blend_pixel;
use crate::{CompositeConfig, CompositePlan, OpsResult};
use tracing::{debug, trace};
use wmark_core::{Pixel, Raster};

/// Computes the output pixel at base coordinate (x, y).
#[inline]
pub(crate) fn output_pixel(base: &Raster, watermark: &Raster, plan: &CompositePlan, x: u32, y: u32) -> Pixel {
    let base_px = base.pixel(x, y);
    match plan.layout().source(x, y) {
        Some((wx, wy)) => blend_pixel(base_px, watermark.pixel(wx, wy), plan.blend()),
        None => base_px.opaque(),
    }
}

/// Composites `watermark` onto `base` according to `plan`.
///
/// # Errors
///
/// Returns [`CompositeError::PlanMismatch`](crate::CompositeError::PlanMismatch)
/// if the rasters don't have the dimensions the plan was validated for.
pub fn composite(base: &Raster, watermark: &Raster, plan: &CompositePlan) -> OpsResult<Raster> {
    trace!(base = ?base.dimensions(), watermark = ?watermark.dimensions(), "composite::composite");
    plan.check_rasters(base, watermark)?;
    debug!(layout = ?plan.layout(), "Compositing watermark");

    let (width, height) = base.dimensions();
    let out = Raster::from_fn(width, height, |x, y| output_pixel(base, watermark, plan, x, y))?;
    Ok(out)
}

/// Validates `config` against the rasters, then composites.
///
/// Uses the row-parallel engine when the `parallel` feature is enabled.
pub fn composite_checked(base: &Raster, watermark: &Raster, config: &CompositeConfig) -> OpsResult<Raster> {
    let plan = CompositePlan::for_rasters(config, base, watermark)?;

    #[cfg(feature = "parallel")]
    {
        crate::parallel::composite_par(base, watermark, &plan)
    }
    #[cfg(not(feature = "parallel"))]
    {
        composite(base, watermark, &plan)
    }
}
