//! Transient user-facing notices.

use std::fmt;

/// Short, non-blocking message shown to the user.
///
/// None of these are fatal; the pipeline stays re-enterable after each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The crop editor returned without a result.
    CropCancelled,
    /// The crop editor reported an error.
    CropError {
        /// Message supplied by the crop tool.
        message: String,
    },
    /// Analysis was requested before any image was cropped.
    NoImageReady,
    /// The analysis surface could not be started.
    HandoffFailed {
        /// Cause reported by the analysis surface.
        message: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CropCancelled => f.write_str("Failed to crop image"),
            Self::CropError { message } => write!(f, "Crop error: {message}"),
            Self::NoImageReady => f.write_str("No image ready for analysis"),
            Self::HandoffFailed { message } => write!(f, "Could not start analysis: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::CropCancelled.to_string(), "Failed to crop image");
        assert_eq!(
            Notice::CropError {
                message: "disk full".into()
            }
            .to_string(),
            "Crop error: disk full"
        );
        assert_eq!(Notice::NoImageReady.to_string(), "No image ready for analysis");
    }
}
