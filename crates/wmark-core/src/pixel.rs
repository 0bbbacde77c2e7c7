//! Pixel type for 8-bit RGB images with optional alpha.
//!
//! A [`Pixel`] always carries four channels. Images without an alpha channel
//! store `255` there, so code that ignores alpha can treat every pixel as
//! opaque.
//!
//! # Equality
//!
//! - `==` compares all four channels.
//! - [`Pixel::rgb_eq`] compares the color channels only, which is what
//!   chroma-key matching needs.
//!
//! ```
//! use wmark_core::Pixel;
//!
//! let a = Pixel::new(10, 20, 30, 0);
//! let b = Pixel::rgb(10, 20, 30);
//! assert_ne!(a, b);
//! assert!(a.rgb_eq(&b));
//! ```

use std::fmt;

/// 8-bit RGBA pixel.
///
/// `#[repr(C)]` keeps the channel order stable for buffer conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Pixel {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Pixel {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates a pixel from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque pixel.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a pixel from an `[r, g, b]` array, alpha 255.
    #[inline]
    pub const fn from_rgb_array(rgb: [u8; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Returns the color channels as `[r, g, b]`.
    #[inline]
    pub const fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns all channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns the alpha channel.
    #[inline]
    pub const fn alpha(self) -> u8 {
        self.a
    }

    /// Returns the same color with alpha forced to 255.
    #[inline]
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// Returns `true` if alpha is zero.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Compares red, green and blue, ignoring alpha.
    #[inline]
    pub fn rgb_eq(&self, other: &Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(rgb: [u8; 3]) -> Self {
        Self::from_rgb_array(rgb)
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_is_opaque() {
        let px = Pixel::rgb(1, 2, 3);
        assert_eq!(px.alpha(), 255);
        assert!(!px.is_transparent());
    }

    #[test]
    fn test_equality_includes_alpha() {
        assert_ne!(Pixel::new(1, 2, 3, 128), Pixel::rgb(1, 2, 3));
        assert_eq!(Pixel::new(1, 2, 3, 128).opaque(), Pixel::rgb(1, 2, 3));
    }

    #[test]
    fn test_rgb_eq_ignores_alpha() {
        let a = Pixel::new(9, 8, 7, 0);
        assert!(a.rgb_eq(&Pixel::rgb(9, 8, 7)));
        assert!(!a.rgb_eq(&Pixel::rgb(9, 8, 6)));
    }

    #[test]
    fn test_array_conversions() {
        let px: Pixel = [10, 20, 30].into();
        assert_eq!(px.to_rgba(), [10, 20, 30, 255]);
        let px: Pixel = [10, 20, 30, 40].into();
        assert_eq!(px.to_rgb(), [10, 20, 30]);
        assert_eq!(px.alpha(), 40);
    }
}
