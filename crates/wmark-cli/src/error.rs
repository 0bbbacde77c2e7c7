//! Input acquisition errors and process exit statuses.

use std::path::PathBuf;
use thiserror::Error;
use wmark_io::IoError;
use wmark_ops::CompositeError;

/// Failure to obtain a usable answer or file before compositing.
#[derive(Debug, Error)]
pub enum InputError {
    /// A named input file does not exist.
    #[error("The file {} doesn't exist.", .0.display())]
    MissingFile(PathBuf),

    /// A numeric answer could not be parsed.
    #[error("The {field} isn't an integer number: '{value}'")]
    NotAnInteger {
        /// What was being asked for.
        field: &'static str,
        /// The rejected answer.
        value: String,
    },

    /// The answer stream ended before a question was answered.
    #[error("input ended while waiting for: {0}")]
    EndOfInput(String),
}

/// Exit status for a failed run.
///
/// Validation failures get their own status; everything that happens while
/// acquiring inputs or writing the output exits with 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<CompositeError>() {
            return composite_code(err);
        }
        if cause.is::<InputError>() || cause.is::<IoError>() {
            return 1;
        }
    }
    1
}

fn composite_code(err: &CompositeError) -> u8 {
    match err {
        CompositeError::UnsupportedColorModel { .. } => 2,
        CompositeError::UnsupportedBitDepth { .. } => 3,
        CompositeError::OverlayDimensionMismatch { .. } => 4,
        CompositeError::InvalidColor(_) => 5,
        CompositeError::WatermarkTooLarge { .. } => 6,
        CompositeError::PositionOutOfRange { .. } | CompositeError::InvalidPosition(_) => 7,
        CompositeError::TransparencyOutOfRange(_) => 8,
        CompositeError::PlanMismatch { .. } | CompositeError::Raster(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use wmark_ops::ImageRole;

    fn code_of(err: impl std::error::Error + Send + Sync + 'static) -> u8 {
        exit_code(&anyhow::Error::new(err))
    }

    #[test]
    fn test_validation_codes() {
        assert_eq!(code_of(CompositeError::UnsupportedColorModel { role: ImageRole::Base, components: 1 }), 2);
        assert_eq!(code_of(CompositeError::UnsupportedBitDepth { role: ImageRole::Watermark, bits: 48 }), 3);
        assert_eq!(
            code_of(CompositeError::OverlayDimensionMismatch {
                base_width: 2,
                base_height: 2,
                watermark_width: 1,
                watermark_height: 1
            }),
            4
        );
        assert_eq!(code_of(CompositeError::InvalidColor("x".into())), 5);
        assert_eq!(
            code_of(CompositeError::WatermarkTooLarge {
                base_width: 1,
                base_height: 1,
                watermark_width: 2,
                watermark_height: 1
            }),
            6
        );
        assert_eq!(code_of(CompositeError::InvalidPosition("x".into())), 7);
        assert_eq!(code_of(CompositeError::PositionOutOfRange { x: 9, y: 0, max_x: 1, max_y: 1 }), 7);
        assert_eq!(code_of(CompositeError::TransparencyOutOfRange(101)), 8);
    }

    #[test]
    fn test_acquisition_codes() {
        assert_eq!(code_of(InputError::MissingFile("a.png".into())), 1);
        assert_eq!(code_of(IoError::UnsupportedOutputExtension("a.bmp".into())), 1);
        assert_eq!(code_of(IoError::DecodeError("bad".into())), 1);
    }

    #[test]
    fn test_code_survives_context() {
        let err = Err::<(), _>(CompositeError::TransparencyOutOfRange(-1))
            .context("while validating")
            .unwrap_err();
        assert_eq!(exit_code(&err), 8);
    }

    #[test]
    fn test_missing_file_message() {
        let err = InputError::MissingFile("photo.png".into());
        assert_eq!(err.to_string(), "The file photo.png doesn't exist.");
    }
}
