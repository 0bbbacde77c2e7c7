//! Per-pixel blend rule.
//!
//! Decision order for a base pixel `i` and watermark pixel `w`:
//!
//! 1. alpha in use and `w.alpha == 0`: keep `i`
//! 2. chroma key set and `w.rgb == key`: keep `i`
//! 3. otherwise mix each channel:
//!    `trunc(i.c * (1 - t/100) + (w.c * t) / 100)`
//!
//! The result is always opaque.
//!
//! # Example
//!
//! ```rust
//! use wmark_core::Pixel;
//! use wmark_ops::blend::{blend_pixel, BlendParams};
//!
//! let params = BlendParams::new(50);
//! let out = blend_pixel(Pixel::WHITE, Pixel::BLACK, &params);
//! assert_eq!(out, Pixel::rgb(127, 127, 127));
//! ```

use wmark_core::Pixel;

/// Validated blend parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlendParams {
    /// Watermark weight in percent, 0-100.
    pub transparency: u8,
    /// Skip watermark pixels with alpha 0.
    pub use_alpha: bool,
    /// Skip watermark pixels of this color.
    pub chroma_key: Option<[u8; 3]>,
}

impl BlendParams {
    /// Plain linear blend at `transparency` percent, no alpha, no key.
    ///
    /// Values above 100 are clamped.
    pub fn new(transparency: u8) -> Self {
        Self {
            transparency: transparency.min(100),
            use_alpha: false,
            chroma_key: None,
        }
    }

    /// Enables alpha handling.
    pub fn with_alpha(mut self, use_alpha: bool) -> Self {
        self.use_alpha = use_alpha;
        self
    }

    /// Sets the chroma key.
    pub fn with_chroma_key(mut self, key: Option<[u8; 3]>) -> Self {
        self.chroma_key = key;
        self
    }

    /// Returns `true` if the watermark pixel leaves the base untouched.
    #[inline]
    pub fn is_see_through(&self, watermark: Pixel) -> bool {
        if self.use_alpha && watermark.is_transparent() {
            return true;
        }
        matches!(self.chroma_key, Some(key) if watermark.to_rgb() == key)
    }
}

/// Blends one watermark pixel onto one base pixel.
#[inline]
pub fn blend_pixel(base: Pixel, watermark: Pixel, params: &BlendParams) -> Pixel {
    if params.is_see_through(watermark) {
        return base.opaque();
    }
    let t = params.transparency as u32;
    let keep = 1.0 - t as f64 / 100.0;
    // `as u8` truncates toward zero and saturates
    let mix = |i: u8, w: u8| (i as f64 * keep + (w as u32 * t) as f64 / 100.0) as u8;
    Pixel::rgb(
        mix(base.r, watermark.r),
        mix(base.g, watermark.g),
        mix(base.b, watermark.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_half_truncates() {
        let out = blend_pixel(Pixel::WHITE, Pixel::BLACK, &BlendParams::new(50));
        assert_eq!(out, Pixel::rgb(127, 127, 127));
    }

    #[test]
    fn test_blend_extremes() {
        let base = Pixel::rgb(10, 200, 33);
        let mark = Pixel::rgb(250, 1, 99);
        assert_eq!(blend_pixel(base, mark, &BlendParams::new(0)), base);
        assert_eq!(blend_pixel(base, mark, &BlendParams::new(100)), mark);
    }

    #[test]
    fn test_blend_truncation_not_rounding() {
        // 100 * 0.7 + 201 * 30 / 100 = 70 + 60.3 = 130.3
        let out = blend_pixel(Pixel::rgb(100, 0, 0), Pixel::rgb(201, 0, 0), &BlendParams::new(30));
        assert_eq!(out.r, 130);
        // 1 * 0.5 + 0 = 0.5 -> 0
        let out = blend_pixel(Pixel::rgb(1, 1, 1), Pixel::BLACK, &BlendParams::new(50));
        assert_eq!(out, Pixel::BLACK);
    }

    #[test]
    fn test_blend_channels_stay_in_range() {
        let samples = [0u8, 1, 127, 128, 254, 255];
        for t in 0..=100u8 {
            let params = BlendParams::new(t);
            for &i in &samples {
                for &w in &samples {
                    let out = blend_pixel(Pixel::rgb(i, i, i), Pixel::rgb(w, w, w), &params);
                    let lo = i.min(w);
                    let hi = i.max(w);
                    assert!(out.r >= lo.saturating_sub(1) && out.r <= hi, "t={t} i={i} w={w}");
                    assert_eq!(out.a, 255);
                }
            }
        }
    }

    #[test]
    fn test_transparent_watermark_pixel_with_alpha() {
        let base = Pixel::rgb(5, 6, 7);
        let params = BlendParams::new(100).with_alpha(true);
        assert_eq!(blend_pixel(base, Pixel::new(255, 0, 0, 0), &params), base);
        // Partial alpha is blended as if opaque
        assert_eq!(
            blend_pixel(base, Pixel::new(255, 0, 0, 1), &params),
            Pixel::rgb(255, 0, 0)
        );
    }

    #[test]
    fn test_alpha_ignored_when_not_in_use() {
        let params = BlendParams::new(100);
        assert_eq!(
            blend_pixel(Pixel::BLACK, Pixel::new(255, 0, 0, 0), &params),
            Pixel::rgb(255, 0, 0)
        );
    }

    #[test]
    fn test_chroma_key_skips_matching_rgb() {
        let base = Pixel::rgb(40, 50, 60);
        let params = BlendParams::new(80).with_chroma_key(Some([0, 255, 0]));
        assert_eq!(blend_pixel(base, Pixel::rgb(0, 255, 0), &params), base);
        // Alpha doesn't take part in key matching
        assert_eq!(blend_pixel(base, Pixel::new(0, 255, 0, 17), &params), base);
        assert_ne!(blend_pixel(base, Pixel::rgb(0, 254, 0), &params), base);
    }

    #[test]
    fn test_no_default_chroma_key() {
        // Black is an ordinary color unless keyed explicitly
        let out = blend_pixel(Pixel::WHITE, Pixel::BLACK, &BlendParams::new(100));
        assert_eq!(out, Pixel::BLACK);
    }

    #[test]
    fn test_see_through_output_is_opaque() {
        let base = Pixel::new(1, 2, 3, 9);
        let params = BlendParams::new(50).with_alpha(true);
        assert_eq!(blend_pixel(base, Pixel::new(0, 0, 0, 0), &params), Pixel::rgb(1, 2, 3));
    }
}
