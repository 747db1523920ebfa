//! Error types for the garment_colors library

use thiserror::Error;

/// Result type alias for garment_colors operations
pub type Result<T> = std::result::Result<T, ColorError>;

/// Failure modes of the color engine.
///
/// Only [`ColorError::InvalidColorFormat`] is meant to reach callers of the
/// naming API. The image pipelines absorb the other variants into empty
/// results and log them.
#[derive(Error, Debug)]
pub enum ColorError {
    /// Hex color string is not 3 or 6 hex digits with an optional `#`
    #[error("Invalid color format: {input:?}")]
    InvalidColorFormat { input: String },

    /// Image buffer could not be decoded
    #[error("Failed to decode image: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// Too few usable pixels left after background filtering
    #[error("Insufficient signal: {pixels} usable pixels (minimum {minimum})")]
    InsufficientSignal { pixels: usize, minimum: usize },

    /// Perceptual hash does not have 64 characters
    #[error("Invalid perceptual hash: expected 64 binary digits, got {len} characters")]
    HashLength { len: usize },

    /// Perceptual hash has the right length but a character other than `0`/`1`
    #[error("Invalid perceptual hash: {digit:?} at position {position} is not a binary digit")]
    HashDigit { digit: char, position: usize },
}

impl ColorError {
    /// Create an invalid color format error for the given input
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColorFormat {
            input: input.into(),
        }
    }

    /// Create a decode error wrapping the `image` crate failure
    pub fn decode(source: image::ImageError) -> Self {
        Self::Decode {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Whether the error was caused by bad caller input rather than image content
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ColorError::InvalidColorFormat { .. }
                | ColorError::HashLength { .. }
                | ColorError::HashDigit { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_color_message_quotes_input() {
        let err = ColorError::invalid_color("#12");
        assert_eq!(err.to_string(), "Invalid color format: \"#12\"");
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_insufficient_signal_is_not_caller_error() {
        let err = ColorError::InsufficientSignal {
            pixels: 3,
            minimum: 10,
        };
        assert!(!err.is_caller_error());
        assert!(err.to_string().contains("3 usable pixels"));
    }

    #[test]
    fn test_hash_errors_name_the_problem() {
        let short = ColorError::HashLength { len: 3 };
        assert_eq!(
            short.to_string(),
            "Invalid perceptual hash: expected 64 binary digits, got 3 characters"
        );

        let digit = ColorError::HashDigit {
            digit: '2',
            position: 0,
        };
        assert_eq!(
            digit.to_string(),
            "Invalid perceptual hash: '2' at position 0 is not a binary digit"
        );
        assert!(short.is_caller_error());
        assert!(digit.is_caller_error());
    }
}
