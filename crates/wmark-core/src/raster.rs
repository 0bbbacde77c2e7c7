//! Raster buffer type.
//!
//! [`Raster`] is an owned, row-major grid of [`Pixel`]s with non-zero width
//! and height:
//!
//! ```text
//! Memory: [P(0,0) P(1,0) P(2,0) ...]  ← Row 0
//!         [P(0,1) P(1,1) P(2,1) ...]  ← Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use wmark_core::{Pixel, Raster};
//!
//! let mut img = Raster::filled(4, 4, Pixel::WHITE).unwrap();
//! img.set_pixel(1, 1, Pixel::BLACK);
//! assert_eq!(img.pixel(1, 1), Pixel::BLACK);
//! assert_eq!(img.pixel(0, 0), Pixel::WHITE);
//! ```
//!
//! # Used By
//!
//! - `wmark-io` - decoded samples are expanded into a raster
//! - `wmark-ops` - base, watermark and output of compositing

use crate::{Error, Pixel, Result};

/// Owned row-major pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Pixel buffer, `width * height` entries
    pixels: Vec<Pixel>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

impl Raster {
    /// Creates a raster filled with one pixel value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            pixels: vec![pixel; width as usize * height as usize],
            width,
            height,
        })
    }

    /// Creates a raster from existing pixels in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or the
    /// pixel count doesn't match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Creates a raster by evaluating `f(x, y)` for every coordinate, row by row.
    ///
    /// ```rust
    /// use wmark_core::{Pixel, Raster};
    ///
    /// let ramp = Raster::from_fn(3, 1, |x, _| Pixel::rgb(x as u8, 0, 0)).unwrap();
    /// assert_eq!(ramp.pixel(2, 0).r, 2);
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Pixel,
    {
        check_dimensions(width, height)?;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Creates a raster from interleaved 8-bit samples.
    ///
    /// Accepted layouts: 1 (gray), 2 (gray + alpha), 3 (RGB), 4 (RGBA).
    /// Layouts without alpha get alpha 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] for other channel counts and
    /// [`Error::InvalidDimensions`] if the sample count doesn't match.
    pub fn from_samples(width: u32, height: u32, channels: u32, samples: &[u8]) -> Result<Self> {
        if !(1..=4).contains(&channels) {
            return Err(Error::ChannelMismatch { got: channels });
        }
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * channels as usize;
        if samples.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, samples.len()),
            ));
        }
        let pixels = samples
            .chunks_exact(channels as usize)
            .map(|px| match px {
                [g] => Pixel::rgb(*g, *g, *g),
                [g, a] => Pixel::new(*g, *g, *g, *a),
                [r, g, b] => Pixel::rgb(*r, *g, *b),
                [r, g, b, a] => Pixel::new(*r, *g, *b, *a),
                _ => unreachable!("chunks_exact yields 1-4 samples"),
            })
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Returns interleaved RGB samples, dropping alpha.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_rgb()).collect()
    }

    /// Returns interleaved RGBA samples.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_rgba()).collect()
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[self.offset(x, y)]
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        self.pixels[offset] = pixel;
    }

    /// Returns row `y` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if y >= height.
    #[inline]
    pub fn row(&self, y: u32) -> &[Pixel] {
        assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterates over all pixels with their coordinates.
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        let width = self.width as usize;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, px)| ((i % width) as u32, (i / width) as u32, *px))
    }

    /// Returns `true` if any pixel has alpha below 255.
    pub fn has_translucency(&self) -> bool {
        self.pixels.iter().any(|px| px.a != 255)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    Ok(())
}
