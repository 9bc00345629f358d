//! Completion outcomes reported by external tools.

use super::ImageRef;

/// Result of an image-selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user chose an image.
    Selected(ImageRef),
    /// The picker was dismissed or returned no image.
    Cancelled,
}

impl PickOutcome {
    /// Builds an outcome from a success flag and an optional reference.
    ///
    /// Anything short of a successful pick carrying a reference counts as
    /// a cancellation.
    #[must_use]
    pub fn from_result(success: bool, image: Option<ImageRef>) -> Self {
        match (success, image) {
            (true, Some(image)) => Self::Selected(image),
            _ => Self::Cancelled,
        }
    }
}

/// Result of a crop request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropOutcome {
    /// The crop tool wrote the edited image.
    Success(ImageRef),
    /// The user dismissed the editor, or it produced no output.
    Cancelled,
    /// The crop tool failed.
    Error(String),
}

/// Return signal from the analysis surface.
///
/// Received and logged; the pipeline does not act on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The analysis screen finished normally.
    Completed,
    /// The user backed out of the analysis screen.
    Cancelled,
}
