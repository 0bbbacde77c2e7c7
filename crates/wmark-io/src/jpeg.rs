//! JPEG format support.
//!
//! Decoding goes through `jpeg-decoder`; grayscale stays single-channel,
//! CMYK is converted to RGB. The color model reports what the stream stores:
//!
//! - `RGB24` - 3 components, 24 bits per pixel
//! - `L8` - 1 component, 8 bits per pixel
//! - `L16` - 1 component, 16 bits per pixel (samples keep the high byte)
//! - `CMYK32` - 4 components, 32 bits per pixel
//!
//! Encoding always writes baseline RGB at quality 90 through `jpeg-encoder`.

use crate::{Format, ImageData, IoError, IoResult};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::debug;
use wmark_core::{ColorModel, Transparency};

/// Quality used for every JPEG written.
pub const QUALITY: u8 = 90;

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    read_impl(file)
}

/// Reads a JPEG from a byte slice.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    read_impl(data)
}

fn read_impl<R: Read>(reader: R) -> IoResult<ImageData> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let (channels, data, color_model) = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => (3, pixels, ColorModel::rgb8()),
        jpeg_decoder::PixelFormat::L8 => (1, pixels, ColorModel::new(1, 1, 8, Transparency::Opaque)),
        jpeg_decoder::PixelFormat::L16 => {
            // Big-endian samples, keep the high byte
            let gray: Vec<u8> = pixels.chunks_exact(2).map(|l16| l16[0]).collect();
            (1, gray, ColorModel::new(1, 1, 16, Transparency::Opaque))
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            let rgb: Vec<u8> = pixels.chunks_exact(4).flat_map(cmyk_to_rgb).collect();
            (3, rgb, ColorModel::new(4, 4, 32, Transparency::Opaque))
        }
    };

    debug!(width, height, pixel_format = ?info.pixel_format, "Decoded JPEG");

    Ok(ImageData {
        width,
        height,
        channels,
        data,
        color_model,
        format: Format::Jpeg,
    })
}

/// Approximate CMYK to RGB conversion.
fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let c = cmyk[0] as f32 / 255.0;
    let m = cmyk[1] as f32 / 255.0;
    let y = cmyk[2] as f32 / 255.0;
    let k = cmyk[3] as f32 / 255.0;

    [
        ((1.0 - c) * (1.0 - k) * 255.0) as u8,
        ((1.0 - m) * (1.0 - k) * 255.0) as u8,
        ((1.0 - y) * (1.0 - k) * 255.0) as u8,
    ]
}

/// Writes an image to a JPEG file.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let bytes = write_to_memory(image)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(&bytes)?;
    Ok(())
}

/// Encodes an image as JPEG bytes.
///
/// Alpha is dropped and grayscale is expanded to RGB.
pub fn write_to_memory(image: &ImageData) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    if image.width > u16::MAX as u32 || image.height > u16::MAX as u32 {
        return Err(IoError::EncodeError(format!(
            "{}x{} exceeds the JPEG size limit of {}",
            image.width,
            image.height,
            u16::MAX
        )));
    }
    if image.data.len() != image.sample_count() {
        return Err(IoError::EncodeError(format!(
            "expected {} samples, got {}",
            image.sample_count(),
            image.data.len()
        )));
    }

    let rgb: Vec<u8> = match image.channels {
        3 => image.data.clone(),
        4 => image.data.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect(),
        2 => image.data.chunks_exact(2).flat_map(|px| [px[0], px[0], px[0]]).collect(),
        1 => image.data.iter().flat_map(|&g| [g, g, g]).collect(),
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, QUALITY);
    encoder
        .encode(&rgb, image.width as u16, image.height as u16, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}
