//! Error types for feature adapters.

use arfeat_data::PixelFormat;
use thiserror::Error;

/// Errors raised while building or filling features.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("AR image is invalid")]
    InvalidImage,

    #[error("AR image has invalid format: {0:?}")]
    InvalidFormat(PixelFormat),

    #[error("Feature has incorrect size: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("AR image layout does not fit the converter's 32-bit parameters")]
    LayoutOutOfRange,
}

pub type Result<T> = std::result::Result<T, FeatureError>;
