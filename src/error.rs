//! Error types for labeltext library.

use thiserror::Error;

/// Result type alias for labeltext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting or paginating styled text.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed JSON input (delta, style map or document).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A delta that parsed as JSON but carries invalid attribute values.
    #[error("Invalid delta: {0}")]
    InvalidDelta(String),

    /// The paginator received a different number of line heights than lines.
    #[error("Line height count mismatch: {lines} wrapped lines but {heights} heights")]
    LineHeightMismatch {
        /// Number of wrapped lines supplied
        lines: usize,
        /// Number of heights supplied
        heights: usize,
    },

    /// No converter registered under the requested name.
    #[error("No converter registered for format: {0}")]
    UnknownConverter(String),

    /// Error while serializing output.
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::LineHeightMismatch {
            lines: 3,
            heights: 2,
        };
        assert_eq!(
            err.to_string(),
            "Line height count mismatch: 3 wrapped lines but 2 heights"
        );

        let err = Error::UnknownConverter("rtf".into());
        assert_eq!(err.to_string(), "No converter registered for format: rtf");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
