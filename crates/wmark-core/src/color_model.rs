//! Color model metadata of a decoded image file.
//!
//! A decoded [`Raster`](crate::Raster) always holds 8-bit RGBA pixels, so it
//! can't tell whether the file was RGB, RGBA, grayscale or 16-bit. The
//! [`ColorModel`] records that stored layout so callers can decide whether the
//! image is acceptable before using its pixels.
//!
//! ```
//! use wmark_core::{ColorModel, Transparency};
//!
//! let rgb = ColorModel::rgb8();
//! assert_eq!(rgb.num_components, 3);
//! assert_eq!(rgb.bits_per_pixel, 24);
//! assert_eq!(rgb.transparency, Transparency::Opaque);
//!
//! let rgba = ColorModel::rgba8();
//! assert!(rgba.has_alpha());
//! ```

use std::fmt;

/// How a color model represents transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transparency {
    /// Every pixel is fully opaque.
    #[default]
    Opaque,
    /// Pixels are either fully opaque or fully transparent (color key).
    Bitmask,
    /// Continuous alpha channel.
    Translucent,
}

impl Transparency {
    /// Upper-case label used in image info output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Opaque => "OPAQUE",
            Self::Bitmask => "BITMASK",
            Self::Translucent => "TRANSLUCENT",
        }
    }
}

impl fmt::Display for Transparency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stored layout of an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorModel {
    /// Channels including alpha.
    pub num_components: u32,
    /// Channels excluding alpha.
    pub num_color_components: u32,
    /// Bits per pixel over all components.
    pub bits_per_pixel: u32,
    /// Transparency kind.
    pub transparency: Transparency,
}

impl ColorModel {
    /// Creates a color model.
    pub const fn new(
        num_components: u32,
        num_color_components: u32,
        bits_per_pixel: u32,
        transparency: Transparency,
    ) -> Self {
        Self {
            num_components,
            num_color_components,
            bits_per_pixel,
            transparency,
        }
    }

    /// 8-bit RGB, 24 bits per pixel.
    pub const fn rgb8() -> Self {
        Self::new(3, 3, 24, Transparency::Opaque)
    }

    /// 8-bit RGBA, 32 bits per pixel.
    pub const fn rgba8() -> Self {
        Self::new(4, 3, 32, Transparency::Translucent)
    }

    /// Returns `true` if the model has an alpha component.
    pub fn has_alpha(&self) -> bool {
        self.num_components > self.num_color_components
    }
}

impl Default for ColorModel {
    fn default() -> Self {
        Self::rgb8()
    }
}
