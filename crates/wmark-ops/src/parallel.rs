//! Row-parallel compositing using Rayon.
//!
//! Every output pixel depends only on the immutable inputs, so rows can be
//! produced independently. The result is identical to
//! [`composite`](crate::composite).
//!
//! # Example
//!
//! ```rust
//! use wmark_core::{Pixel, Raster};
//! use wmark_ops::{composite_par, CompositeConfig, CompositePlan, Placement};
//!
//! let base = Raster::filled(256, 256, Pixel::WHITE).unwrap();
//! let mark = Raster::filled(16, 16, Pixel::BLACK).unwrap();
//! let config = CompositeConfig {
//!     transparency: 25,
//!     placement: Placement::Grid,
//!     ..Default::default()
//! };
//! let plan = CompositePlan::for_rasters(&config, &base, &mark).unwrap();
//! let out = composite_par(&base, &mark, &plan).unwrap();
//! assert_eq!(out.dimensions(), (256, 256));
//! ```

use crate::composite::output_pixel;
use crate::{CompositePlan, OpsResult};
use rayon::prelude::*;
use tracing::{debug, trace};
use wmark_core::{Pixel, Raster};

/// Parallel [`composite`](crate::composite), one task per output row.
pub fn composite_par(base: &Raster, watermark: &Raster, plan: &CompositePlan) -> OpsResult<Raster> {
    trace!(base = ?base.dimensions(), watermark = ?watermark.dimensions(), "parallel::composite_par");
    plan.check_rasters(base, watermark)?;
    debug!(layout = ?plan.layout(), threads = rayon::current_num_threads(), "Compositing watermark");

    let (width, height) = base.dimensions();
    let mut pixels = vec![Pixel::default(); width as usize * height as usize];

    pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            if plan.layout().touches_row(y) {
                for (x, out) in row.iter_mut().enumerate() {
                    *out = output_pixel(base, watermark, plan, x as u32, y);
                }
            } else {
                for (out, src) in row.iter_mut().zip(base.row(y)) {
                    *out = src.opaque();
                }
            }
        });

    Ok(Raster::from_pixels(width, height, pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{composite, CompositeConfig, Placement};

    fn pattern(width: u32, height: u32, seed: u8) -> Raster {
        Raster::from_fn(width, height, |x, y| {
            Pixel::new(
                seed.wrapping_add((x * 13) as u8),
                seed.wrapping_add((y * 29) as u8),
                seed.wrapping_add((x ^ y) as u8),
                if (x + y) % 5 == 0 { 0 } else { 255 },
            )
        })
        .unwrap()
    }

    #[test]
    fn test_matches_sequential() {
        let base = pattern(64, 48, 1);
        let mark = pattern(7, 5, 120);
        let placements = [
            Placement::Grid,
            Placement::Single { x: 0, y: 0 },
            Placement::Single { x: 57, y: 43 },
            Placement::Single { x: 20, y: 11 },
        ];
        for placement in placements {
            let config = CompositeConfig {
                transparency: 63,
                use_alpha: true,
                chroma_key: Some([121, 120, 120]),
                placement,
            };
            let plan = CompositePlan::for_rasters(&config, &base, &mark).unwrap();
            assert_eq!(
                composite_par(&base, &mark, &plan).unwrap(),
                composite(&base, &mark, &plan).unwrap(),
                "{placement:?}"
            );
        }
    }

    #[test]
    fn test_matches_sequential_overlay() {
        let base = pattern(33, 17, 4);
        let mark = pattern(33, 17, 99);
        let config = CompositeConfig {
            transparency: 12,
            placement: Placement::Overlay,
            ..Default::default()
        };
        let plan = CompositePlan::for_rasters(&config, &base, &mark).unwrap();
        assert_eq!(
            composite_par(&base, &mark, &plan).unwrap(),
            composite(&base, &mark, &plan).unwrap()
        );
    }

    #[test]
    fn test_single_row() {
        let base = pattern(9, 1, 0);
        let mark = pattern(2, 1, 200);
        let config = CompositeConfig {
            transparency: 100,
            placement: Placement::Single { x: 7, y: 0 },
            ..Default::default()
        };
        let plan = CompositePlan::for_rasters(&config, &base, &mark).unwrap();
        let out = composite_par(&base, &mark, &plan).unwrap();
        assert_eq!(out.pixel(8, 0), mark.pixel(1, 0).opaque());
        assert_eq!(out.pixel(0, 0), base.pixel(0, 0).opaque());
    }
}
