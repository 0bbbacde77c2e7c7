//! CLI command implementations

pub mod apply;
pub mod info;
pub mod run;

use crate::error::InputError;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};
use wmark_core::Raster;
use wmark_io::ImageData;
use wmark_ops::{CompositeConfig, CompositePlan};

/// Load image from path
pub fn load_image(path: &Path) -> Result<ImageData> {
    if !path.is_file() {
        return Err(InputError::MissingFile(path.to_path_buf()).into());
    }
    wmark_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save raster to path
pub fn save_raster(path: &Path, raster: &Raster) -> Result<()> {
    wmark_io::write_raster(path, raster).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Decoded base and watermark, each already checked for a usable color model.
pub struct Inputs {
    pub base: Raster,
    pub watermark: Raster,
}

impl Inputs {
    pub fn base_dimensions(&self) -> (u32, u32) {
        self.base.dimensions()
    }

    pub fn watermark_dimensions(&self) -> (u32, u32) {
        self.watermark.dimensions()
    }
}

/// Validates, composites and writes the result.
pub fn finish(inputs: &Inputs, config: &CompositeConfig, output: &Path) -> Result<()> {
    // Reject the name before doing any pixel work
    wmark_io::Format::for_output(output)?;

    let plan = CompositePlan::for_rasters(config, &inputs.base, &inputs.watermark)?;
    let raster = composite(inputs, &plan)?;
    save_raster(output, &raster)?;
    info!(output = %output.display(), "Watermarked image written");
    Ok(())
}

fn composite(inputs: &Inputs, plan: &CompositePlan) -> Result<Raster> {
    debug!(threads = rayon::current_num_threads(), "Compositing");
    Ok(wmark_ops::composite_par(&inputs.base, &inputs.watermark, plan)?)
}
