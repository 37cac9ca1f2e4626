//! Error types for the editor.

use std::fmt;

/// Result type alias using `EditorError`.
pub type EditorResult<T> = Result<T, EditorError>;

/// Failures raised by the filter engine and its loader/exporter collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Operation attempted before any image was loaded. Engine mutations
    /// treat this as a silent no-op; only the export path reports it.
    NoImageLoaded,
    /// Source bitmap has zero or otherwise unusable dimensions.
    InvalidSource { width: u32, height: u32 },
    /// Selected file could not be decoded as an image.
    UnsupportedFile(String),
    /// Rendered surface could not be encoded.
    Encode(String),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImageLoaded => write!(f, "No image loaded"),
            Self::InvalidSource { width, height } => {
                write!(f, "Invalid source image dimensions: {width}x{height}")
            }
            Self::UnsupportedFile(msg) => write!(f, "Unsupported image file: {msg}"),
            Self::Encode(msg) => write!(f, "Encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<image::ImageError> for EditorError {
    fn from(err: image::ImageError) -> Self {
        Self::Encode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_dimensions() {
        let err = EditorError::InvalidSource {
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "Invalid source image dimensions: 0x12");
    }
}
