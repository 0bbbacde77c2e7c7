//! Pre-flight validation.
//!
//! Every check here depends only on image metadata and configuration, never
//! on pixel values. A [`CompositePlan`] can only be built from a config that
//! passed all checks for a given pair of dimensions, so compositing with a
//! plan can't fail on the input data.
//!
//! The individual `check_*` functions are public so interactive callers can
//! reject an answer as soon as it is given.

use crate::blend::BlendParams;
use crate::placement::Layout;
use crate::{CompositeConfig, CompositeError, ImageRole, OpsResult, Placement};
use tracing::debug;
use wmark_core::{ColorModel, Raster, Transparency};

/// Checks component count and bit depth of a decoded image.
///
/// Images need exactly 3 components; a translucent watermark is exempt from
/// that rule. Bit depth must be 24 or 32 bits per pixel.
pub fn check_color_model(role: ImageRole, model: &ColorModel) -> OpsResult<()> {
    let translucent_watermark =
        role == ImageRole::Watermark && model.transparency == Transparency::Translucent;
    if model.num_components != 3 && !translucent_watermark {
        return Err(CompositeError::UnsupportedColorModel {
            role,
            components: model.num_components,
        });
    }
    if model.bits_per_pixel != 24 && model.bits_per_pixel != 32 {
        return Err(CompositeError::UnsupportedBitDepth {
            role,
            bits: model.bits_per_pixel,
        });
    }
    Ok(())
}

/// Checks that the watermark is not larger than the base in either dimension.
pub fn check_watermark_fits(base: (u32, u32), watermark: (u32, u32)) -> OpsResult<()> {
    if watermark.0 > base.0 || watermark.1 > base.1 {
        return Err(CompositeError::WatermarkTooLarge {
            base_width: base.0,
            base_height: base.1,
            watermark_width: watermark.0,
            watermark_height: watermark.1,
        });
    }
    Ok(())
}

/// Checks a transparency percentage.
pub fn check_transparency(transparency: i32) -> OpsResult<u8> {
    u8::try_from(transparency)
        .ok()
        .filter(|t| *t <= 100)
        .ok_or(CompositeError::TransparencyOutOfRange(transparency))
}

/// Checks chroma-key components.
pub fn check_chroma_key(key: [i32; 3]) -> OpsResult<[u8; 3]> {
    let component = |v: i32| {
        u8::try_from(v).map_err(|_| {
            CompositeError::InvalidColor(format!("component {v} is out of range 0-255"))
        })
    };
    Ok([component(key[0])?, component(key[1])?, component(key[2])?])
}

/// Largest valid single-placement offsets, `(base - watermark)` per axis.
///
/// Callers must have checked [`check_watermark_fits`] first.
pub fn position_range(base: (u32, u32), watermark: (u32, u32)) -> (u32, u32) {
    (
        base.0.saturating_sub(watermark.0),
        base.1.saturating_sub(watermark.1),
    )
}

/// Checks a single-placement offset against the inclusive valid range.
pub fn check_position(
    x: i32,
    y: i32,
    base: (u32, u32),
    watermark: (u32, u32),
) -> OpsResult<(u32, u32)> {
    let (max_x, max_y) = position_range(base, watermark);
    match (u32::try_from(x), u32::try_from(y)) {
        (Ok(ux), Ok(uy)) if ux <= max_x && uy <= max_y => Ok((ux, uy)),
        _ => Err(CompositeError::PositionOutOfRange { x, y, max_x, max_y }),
    }
}

/// A configuration validated against concrete base and watermark dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositePlan {
    blend: BlendParams,
    layout: Layout,
    base: (u32, u32),
    watermark: (u32, u32),
}

impl CompositePlan {
    /// Validates `config` for the given `(width, height)` pairs.
    ///
    /// Checks run in this order: dimensions non-zero, watermark fits,
    /// chroma key, transparency, placement.
    ///
    /// # Errors
    ///
    /// Returns the first failing check's error.
    pub fn new(
        config: &CompositeConfig,
        base: (u32, u32),
        watermark: (u32, u32),
    ) -> OpsResult<Self> {
        for (w, h) in [base, watermark] {
            if w == 0 || h == 0 {
                return Err(wmark_core::Error::invalid_dimensions(w, h, "width and height must be > 0").into());
            }
        }
        check_watermark_fits(base, watermark)?;
        let chroma_key = config.chroma_key.map(check_chroma_key).transpose()?;
        let transparency = check_transparency(config.transparency)?;

        let layout = match config.placement {
            Placement::Overlay => {
                if base != watermark {
                    return Err(CompositeError::OverlayDimensionMismatch {
                        base_width: base.0,
                        base_height: base.1,
                        watermark_width: watermark.0,
                        watermark_height: watermark.1,
                    });
                }
                Layout::Overlay
            }
            Placement::Single { x, y } => {
                let (x, y) = check_position(x, y, base, watermark)?;
                Layout::Single {
                    x,
                    y,
                    width: watermark.0,
                    height: watermark.1,
                }
            }
            Placement::Grid => Layout::Grid {
                width: watermark.0,
                height: watermark.1,
            },
        };

        let blend = BlendParams {
            transparency,
            use_alpha: config.use_alpha,
            chroma_key,
        };
        debug!(?base, ?watermark, ?layout, ?blend, "composite plan validated");

        Ok(Self {
            blend,
            layout,
            base,
            watermark,
        })
    }

    /// Validates `config` for two rasters.
    pub fn for_rasters(config: &CompositeConfig, base: &Raster, watermark: &Raster) -> OpsResult<Self> {
        Self::new(config, base.dimensions(), watermark.dimensions())
    }

    /// Blend parameters.
    pub fn blend(&self) -> &BlendParams {
        &self.blend
    }

    /// Resolved placement.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Ensures the rasters have the dimensions this plan was validated for.
    pub(crate) fn check_rasters(&self, base: &Raster, watermark: &Raster) -> OpsResult<()> {
        let actual = (base.dimensions(), watermark.dimensions());
        if actual != (self.base, self.watermark) {
            return Err(CompositeError::PlanMismatch {
                planned: (self.base, self.watermark),
                actual,
            });
        }
        Ok(())
    }
}
