//! Format detection utilities.
//!
//! Detects image formats from file extensions and magic bytes.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (extension + magic bytes).
    ///
    /// First checks magic bytes, falls back to extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        // Try magic bytes first
        if let Ok(format) = Self::from_magic_bytes(path) {
            if format != Format::Unknown {
                return Ok(format);
            }
        }

        // Fall back to extension
        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only (case-insensitive).
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Format for an output file name.
    ///
    /// Only names ending exactly in `.jpg` or `.png` are accepted.
    ///
    /// ```
    /// use wmark_io::Format;
    ///
    /// assert_eq!(Format::for_output("out.png").unwrap(), Format::Png);
    /// assert!(Format::for_output("out.jpeg").is_err());
    /// assert!(Format::for_output("out.PNG").is_err());
    /// ```
    pub fn for_output<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let name = path.to_string_lossy();
        if name.ends_with(".png") {
            Ok(Format::Png)
        } else if name.ends_with(".jpg") {
            Ok(Format::Jpeg)
        } else {
            Err(IoError::UnsupportedOutputExtension(name.into_owned()))
        }
    }

    /// Detects format from file magic bytes.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];

        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // PNG: 0x89 0x50 0x4E 0x47 0x0D 0x0A 0x1A 0x0A
        if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }

        // JPEG: 0xFF 0xD8 0xFF
        if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
            return Format::Jpeg;
        }

        Format::Unknown
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpg",
            Format::Unknown => "unknown",
        }
    }
}
