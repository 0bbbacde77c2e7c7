//! Integration tests for wmark crates.
//!
//! Fixture helpers live here; the scenarios are in `tests/`.

use std::path::{Path, PathBuf};
use wmark_core::{Pixel, Raster};
use wmark_io::ImageData;

/// Non-uniform RGB pattern, so that coordinate mix-ups change the output.
pub fn pattern(width: u32, height: u32, seed: u8) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        Pixel::rgb(
            seed.wrapping_add((x * 31) as u8),
            seed.wrapping_add((y * 17) as u8),
            seed.wrapping_add((x * y) as u8),
        )
    })
    .expect("non-empty pattern")
}

/// Writes `raster` as an opaque RGB file and returns its path.
pub fn write_rgb(dir: &Path, name: &str, raster: &Raster) -> PathBuf {
    let path = dir.join(name);
    wmark_io::write_raster(&path, raster).expect("write fixture");
    path
}

/// Writes `raster` as an RGBA PNG, keeping its alpha channel.
pub fn write_rgba(dir: &Path, name: &str, raster: &Raster) -> PathBuf {
    let path = dir.join(name);
    let image = ImageData::from_u8(raster.width(), raster.height(), 4, raster.to_rgba_bytes());
    wmark_io::png::write(&path, &image).expect("write fixture");
    path
}

/// Reads a file back into a raster.
pub fn read_raster(path: &Path) -> Raster {
    wmark_io::read(path)
        .and_then(|image| image.to_raster())
        .expect("read back")
}
