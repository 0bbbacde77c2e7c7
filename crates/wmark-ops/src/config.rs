//! Composition configuration as supplied by the caller.
//!
//! Values here are unvalidated: transparency and chroma-key components are
//! plain integers so out-of-range input can be represented and reported.
//! [`CompositePlan::new`](crate::CompositePlan::new) turns a config into
//! something the engine can run.

use crate::{CompositeError, OpsResult};

/// Placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Watermark and base share coordinates one-to-one.
    #[default]
    Overlay,
    /// Watermark placed once with its top-left corner at (x, y).
    Single {
        /// Horizontal offset.
        x: i32,
        /// Vertical offset.
        y: i32,
    },
    /// Watermark tiled over the whole base.
    Grid,
}

/// Position method name as typed by a user.
///
/// Anything other than `single` or `grid` selects [`Method::Overlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `single`
    Single,
    /// `grid`
    Grid,
    /// any other name
    Overlay,
}

impl Method {
    /// Maps a method name to a method. Matching is exact.
    ///
    /// ```
    /// use wmark_ops::Method;
    ///
    /// assert_eq!(Method::from_name("grid"), Method::Grid);
    /// assert_eq!(Method::from_name("Grid"), Method::Overlay);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name {
            "single" => Self::Single,
            "grid" => Self::Grid,
            _ => Self::Overlay,
        }
    }
}

/// Caller-supplied composition settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompositeConfig {
    /// Watermark transparency percentage, valid range 0-100.
    pub transparency: i32,
    /// Honor the watermark alpha channel.
    pub use_alpha: bool,
    /// Watermark color treated as fully transparent, components 0-255.
    pub chroma_key: Option<[i32; 3]>,
    /// Placement strategy.
    pub placement: Placement,
}

/// Parses a `R G B` triple.
///
/// Only the shape is checked here; component ranges are checked by
/// [`validate::check_chroma_key`](crate::validate::check_chroma_key).
pub fn parse_color_triple(input: &str) -> OpsResult<[i32; 3]> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(CompositeError::InvalidColor(format!(
            "expected 3 components, got {}",
            parts.len()
        )));
    };
    let parse = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| CompositeError::InvalidColor(format!("'{s}' is not an integer")))
    };
    Ok([parse(*r)?, parse(*g)?, parse(*b)?])
}

/// Parses an `X Y` position pair.
pub fn parse_position(input: &str) -> OpsResult<(i32, i32)> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let [x, y] = parts.as_slice() else {
        return Err(CompositeError::InvalidPosition(format!(
            "expected 2 values, got {}",
            parts.len()
        )));
    };
    let parse = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| CompositeError::InvalidPosition(format!("'{s}' is not an integer")))
    };
    Ok((parse(*x)?, parse(*y)?))
}
