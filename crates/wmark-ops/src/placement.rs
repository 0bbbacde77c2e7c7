//! Coordinate mapping for the placement strategies.
//!
//! A [`Layout`] is a [`Placement`](crate::Placement) resolved against concrete
//! watermark dimensions. For a base coordinate it returns the watermark
//! coordinate that contributes there, or `None` when the base pixel is kept.
//!
//! ```text
//! Single { x: 1, y: 1 } on 4x4 with 2x2     Grid on 5x3 with 2x2
//!
//!   . . . .                                   00 10 00 10 00
//!   . W W .                                   01 11 01 11 01
//!   . W W .                                   00 10 00 10 00
//!   . . . .
//! ```

/// Placement resolved against watermark dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One-to-one mapping; base and watermark have equal dimensions.
    Overlay,
    /// Watermark rectangle at (x, y).
    Single {
        /// Left edge in base coordinates.
        x: u32,
        /// Top edge in base coordinates.
        y: u32,
        /// Watermark width.
        width: u32,
        /// Watermark height.
        height: u32,
    },
    /// Watermark repeated with period (width, height).
    Grid {
        /// Watermark width.
        width: u32,
        /// Watermark height.
        height: u32,
    },
}

impl Layout {
    /// Returns the watermark coordinate for base coordinate (x, y).
    #[inline]
    pub fn source(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        match *self {
            Self::Overlay => Some((x, y)),
            Self::Single {
                x: left,
                y: top,
                width,
                height,
            } => {
                let inside = x >= left && x - left < width && y >= top && y - top < height;
                inside.then(|| (x - left, y - top))
            }
            Self::Grid { width, height } => Some((x % width, y % height)),
        }
    }

    /// Returns `true` if row `y` can receive any watermark contribution.
    #[inline]
    pub fn touches_row(&self, y: u32) -> bool {
        match *self {
            Self::Single { y: top, height, .. } => y >= top && y - top < height,
            Self::Overlay | Self::Grid { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_identity() {
        assert_eq!(Layout::Overlay.source(0, 0), Some((0, 0)));
        assert_eq!(Layout::Overlay.source(7, 3), Some((7, 3)));
    }

    #[test]
    fn test_single_inside_and_outside() {
        let layout = Layout::Single {
            x: 1,
            y: 1,
            width: 2,
            height: 2,
        };
        assert_eq!(layout.source(1, 1), Some((0, 0)));
        assert_eq!(layout.source(2, 1), Some((1, 0)));
        assert_eq!(layout.source(1, 2), Some((0, 1)));
        assert_eq!(layout.source(2, 2), Some((1, 1)));
        assert_eq!(layout.source(0, 0), None);
        assert_eq!(layout.source(3, 1), None);
        assert_eq!(layout.source(1, 3), None);
        assert_eq!(layout.source(0, 2), None);
    }

    #[test]
    fn test_single_at_origin() {
        let layout = Layout::Single {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        };
        assert_eq!(layout.source(0, 0), Some((0, 0)));
        assert_eq!(layout.source(1, 0), None);
    }

    #[test]
    fn test_grid_wraps() {
        let layout = Layout::Grid { width: 2, height: 3 };
        assert_eq!(layout.source(0, 0), Some((0, 0)));
        assert_eq!(layout.source(1, 2), Some((1, 2)));
        assert_eq!(layout.source(2, 3), Some((0, 0)));
        assert_eq!(layout.source(5, 7), Some((1, 1)));
    }

    #[test]
    fn test_touches_row() {
        let layout = Layout::Single {
            x: 0,
            y: 2,
            width: 3,
            height: 2,
        };
        assert!(!layout.touches_row(1));
        assert!(layout.touches_row(2));
        assert!(layout.touches_row(3));
        assert!(!layout.touches_row(4));
        assert!(Layout::Grid { width: 1, height: 1 }.touches_row(100));
    }
}
