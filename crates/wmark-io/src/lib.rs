//! # wmark-io
//!
//! Image I/O for watermark compositing.
//!
//! Decodes PNG and JPEG files into [`ImageData`]: 8-bit interleaved samples
//! plus the [`ColorModel`] the file was stored with. The samples are always
//! normalized to 8 bits per channel so that every decodable file can be
//! inspected; the color model keeps the stored layout (a 16-bit RGB PNG
//! reports 48 bits per pixel) so callers can reject what they don't support.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Stored layouts reported |
//! |--------|------|-------|-------------------------|
//! | PNG    | Yes  | Yes   | gray, gray+alpha, RGB, RGBA, indexed; 1-16 bit; tRNS |
//! | JPEG   | Yes  | Yes   | L8, L16, RGB24, CMYK32 |
//!
//! Writing always produces opaque 8-bit RGB (or RGBA if the
//! [`ImageData`] has four channels).
//!
//! # Example
//!
//! ```rust,ignore
//! use wmark_io::{read, write_raster};
//!
//! let image = read("photo.jpg")?;
//! println!("{}x{}, {} bpp", image.width, image.height, image.color_model.bits_per_pixel);
//! let raster = image.to_raster()?;
//! write_raster("copy.png", &raster)?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};

use std::path::Path;
use tracing::debug;
use wmark_core::{ColorModel, Raster};

/// Reads an image from a file, auto-detecting the format.
///
/// The format is detected by magic bytes, then by file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "Reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        _ => Err(IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}

/// Reads an image from memory, detecting the format by magic bytes.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    match Format::from_bytes(data) {
        #[cfg(feature = "png")]
        Format::Png => png::read_from_memory(data),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read_from_memory(data),

        _ => Err(IoError::UnsupportedFormat("unrecognized signature".into())),
    }
}

/// Writes an image to a file, choosing the format from the file name.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedOutputExtension`] unless the name ends in
/// `.jpg` or `.png`, and I/O or encoder errors otherwise.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::for_output(path)?;
    debug!(path = %path.display(), ?format, width = image.width, height = image.height, "Writing image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        _ => Err(IoError::UnsupportedFormat(format.name().to_string())),
    }
}

/// Writes a raster as opaque RGB.
pub fn write_raster<P: AsRef<Path>>(path: P, raster: &Raster) -> IoResult<()> {
    write(path, &ImageData::from_raster(raster))
}

/// Image data container for I/O operations.
///
/// Holds 8-bit interleaved samples with `channels` samples per pixel,
/// and the color model of the file they came from.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Samples per pixel in `data` (1-4).
    pub channels: u32,
    /// Interleaved 8-bit samples, row-major.
    pub data: Vec<u8>,
    /// Layout of the source file.
    pub color_model: ColorModel,
    /// Source file format.
    pub format: Format,
}

impl ImageData {
    /// Wraps a raster as 3-channel RGB data, dropping alpha.
    pub fn from_raster(raster: &Raster) -> Self {
        Self {
            width: raster.width(),
            height: raster.height(),
            channels: 3,
            data: raster.to_rgb_bytes(),
            color_model: ColorModel::rgb8(),
            format: Format::Unknown,
        }
    }

    /// Creates ImageData from u8 samples, deriving an 8-bit color model.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        let color_model = match channels {
            4 => ColorModel::rgba8(),
            2 => ColorModel::new(2, 1, 16, wmark_core::Transparency::Translucent),
            1 => ColorModel::new(1, 1, 8, wmark_core::Transparency::Opaque),
            _ => ColorModel::rgb8(),
        };
        Self {
            width,
            height,
            channels,
            data,
            color_model,
            format: Format::Unknown,
        }
    }

    /// Expands the samples into a [`Raster`].
    pub fn to_raster(&self) -> IoResult<Raster> {
        Ok(Raster::from_samples(self.width, self.height, self.channels, &self.data)?)
    }

    /// Returns the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the total number of samples (pixels * channels).
    pub fn sample_count(&self) -> usize {
        self.pixel_count() * self.channels as usize
    }
}
