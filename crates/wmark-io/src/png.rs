//! PNG format support.
//!
//! Reading expands palettes and tRNS keys and strips 16-bit samples to 8 bits,
//! so the decoded samples are always 8-bit gray, gray+alpha, RGB or RGBA.
//! The stored layout is reported separately in [`ColorModel`]:
//!
//! | Stored            | Components | Bits per pixel | Transparency  |
//! |-------------------|------------|----------------|---------------|
//! | Grayscale         | 1          | depth          | Opaque ¹      |
//! | Grayscale + alpha | 2          | 2 × depth      | Translucent   |
//! | RGB               | 3          | 3 × depth      | Opaque        |
//! | RGB + tRNS        | 4          | 4 × depth      | Bitmask       |
//! | RGBA              | 4          | 4 × depth      | Translucent   |
//! | Indexed           | 3 (4 ¹)    | depth          | Opaque ¹      |
//!
//! ¹ Bitmask (and one extra component for indexed) when a tRNS chunk is present.
//!
//! Writing produces 8-bit output with an sRGB chunk.
//!
//! # Example
//!
//! ```rust,ignore
//! use wmark_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{Format, ImageData, IoError, IoResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek, Write};
use std::path::Path;
use tracing::debug;
use wmark_core::{ColorModel, Transparency};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    read_impl(BufReader::new(file))
}

/// Reads a PNG from a byte slice.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    read_impl(Cursor::new(data))
}

fn read_impl<R: BufRead + Seek>(reader: R) -> IoResult<ImageData> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let color_model = stored_color_model(reader.info());

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::DecodeError(format!(
            "unexpected output bit depth {:?}",
            info.bit_depth
        )));
    }
    let channels = info.color_type.samples() as u32;
    buf.truncate(info.buffer_size());

    debug!(
        width = info.width,
        height = info.height,
        channels,
        ?color_model,
        "Decoded PNG"
    );

    Ok(ImageData {
        width: info.width,
        height: info.height,
        channels,
        data: buf,
        color_model,
        format: Format::Png,
    })
}

/// Describes the layout as stored in the file, before any expansion.
fn stored_color_model(info: &png::Info) -> ColorModel {
    let depth = info.bit_depth as u32;
    let keyed = info.trns.is_some();
    let key_kind = if keyed {
        Transparency::Bitmask
    } else {
        Transparency::Opaque
    };

    match info.color_type {
        png::ColorType::Grayscale => ColorModel::new(1, 1, depth, key_kind),
        png::ColorType::GrayscaleAlpha => ColorModel::new(2, 1, depth * 2, Transparency::Translucent),
        png::ColorType::Rgb if keyed => ColorModel::new(4, 3, depth * 4, Transparency::Bitmask),
        png::ColorType::Rgb => ColorModel::new(3, 3, depth * 3, Transparency::Opaque),
        png::ColorType::Rgba => ColorModel::new(4, 3, depth * 4, Transparency::Translucent),
        png::ColorType::Indexed => {
            let components = if keyed { 4 } else { 3 };
            ColorModel::new(components, 3, depth, key_kind)
        }
    }
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let bytes = write_to_memory(image)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(&bytes)?;
    Ok(())
}

/// Writes an image to a PNG byte vector.
pub fn write_to_memory(image: &ImageData) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_impl(&mut buffer, image)?;
    Ok(buffer)
}

fn write_impl<W: Write>(writer: W, image: &ImageData) -> IoResult<()> {
    let color_type = match image.channels {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };
    if image.data.len() != image.sample_count() {
        return Err(IoError::EncodeError(format!(
            "expected {} samples, got {}",
            image.sample_count(),
            image.data.len()
        )));
    }

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    // Add sRGB chunk
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&image.data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn test_roundtrip_rgb() {
        let width = 32;
        let height = 32;
        let mut data = Vec::with_capacity((width * height * 3) as usize);

        for y in 0..height {
            for x in 0..width {
                data.push((x * 8) as u8);
                data.push((y * 8) as u8);
                data.push(128);
            }
        }

        let image = ImageData::from_u8(width, height, 3, data.clone());
        let bytes = write_to_memory(&image).unwrap();
        let loaded = read_from_memory(&bytes).unwrap();

        assert_eq!(loaded.width, width);
        assert_eq!(loaded.height, height);
        assert_eq!(loaded.channels, 3);
        assert_eq!(loaded.data, data);
        assert_eq!(loaded.color_model, ColorModel::rgb8());
        assert_eq!(loaded.format, Format::Png);
    }

    #[test]
    fn test_roundtrip_rgba() {
        let data: Vec<u8> = (0..16 * 16).flat_map(|i| [i as u8, 0, 64, (i % 2 * 255) as u8]).collect();
        let image = ImageData::from_u8(16, 16, 4, data.clone());

        let temp_dir = tempfile::tempdir().unwrap();
        let temp_path = temp_dir.path().join("wmark_io_test_rgba.png");
        write(&temp_path, &image).expect("Failed to write PNG");
        let loaded = read(&temp_path).expect("Failed to read PNG");

        assert_eq!(loaded.channels, 4);
        assert_eq!(loaded.data, data);
        assert_eq!(loaded.color_model, ColorModel::rgba8());
    }

    #[test]
    fn test_grayscale_reports_one_component() {
        let bytes = encode_raw(2, 2, png::ColorType::Grayscale, png::BitDepth::Eight, &[0, 64, 128, 255]);
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.channels, 1);
        assert_eq!(loaded.color_model, ColorModel::new(1, 1, 8, Transparency::Opaque));
        assert_eq!(loaded.to_raster().unwrap().pixel(1, 0), wmark_core::Pixel::rgb(64, 64, 64));
    }

    #[test]
    fn test_sixteen_bit_rgb_is_stripped() {
        // One pixel, big-endian 16-bit samples
        let raw = [0x12, 0x34, 0xAB, 0xCD, 0xFF, 0x00];
        let bytes = encode_raw(1, 1, png::ColorType::Rgb, png::BitDepth::Sixteen, &raw);
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.color_model.bits_per_pixel, 48);
        assert_eq!(loaded.color_model.num_components, 3);
        assert_eq!(loaded.data, vec![0x12, 0xAB, 0xFF]);
    }

    #[test]
    fn test_write_rejects_bad_channel_count() {
        let image = ImageData::from_u8(1, 1, 5, vec![0; 5]);
        assert!(matches!(write_to_memory(&image), Err(IoError::EncodeError(_))));
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        let image = ImageData::from_u8(1, 1, 5, vec![0; 5]);
        assert!(matches!(write(&path, &image), Err(IoError::EncodeError(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_rejects_short_buffer() {
        let image = ImageData::from_u8(2, 2, 3, vec![0; 6]);
        assert!(matches!(write_to_memory(&image), Err(IoError::EncodeError(_))));
    }

    #[test]
    fn test_corrupt_data() {
        let mut bytes = encode_raw(1, 1, png::ColorType::Rgb, png::BitDepth::Eight, &[1, 2, 3]);
        bytes.truncate(20);
        assert!(matches!(read_from_memory(&bytes), Err(IoError::DecodeError(_))));
    }
}
