//! Pipeline state and its persisted snapshot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ImageRef;

/// Errors raised while restoring pipeline state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The snapshot holds a cropped image but no source image.
    #[error("snapshot has a cropped image ({0}) but no source image")]
    CroppedWithoutSource(ImageRef),
}

/// Persisted form of [`ResultHolder`].
///
/// An absent key means the corresponding reference was never set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// The untouched image chosen by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image_ref: Option<ImageRef>,
    /// The edited image ready for analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cropped_image_ref: Option<ImageRef>,
}

impl StateSnapshot {
    /// Returns true if neither reference is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.source_image_ref.is_none() && self.cropped_image_ref.is_none()
    }
}

/// The two references flowing through the pipeline.
///
/// A cropped reference can only be stored once a source reference exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultHolder {
    source: Option<ImageRef>,
    cropped: Option<ImageRef>,
}

impl ResultHolder {
    /// Creates an empty holder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source: None,
            cropped: None,
        }
    }

    /// The selected source image, if a pick has completed.
    #[must_use]
    pub const fn source(&self) -> Option<&ImageRef> {
        self.source.as_ref()
    }

    /// The cropped image, if a crop has completed.
    #[must_use]
    pub const fn cropped(&self) -> Option<&ImageRef> {
        self.cropped.as_ref()
    }

    /// Records a newly picked source image.
    ///
    /// Any earlier cropped image is kept.
    pub fn set_source(&mut self, source: ImageRef) {
        self.source = Some(source);
    }

    /// Records a cropped image.
    ///
    /// Returns `false` and leaves the holder untouched when no source is set.
    pub fn set_cropped(&mut self, cropped: ImageRef) -> bool {
        if self.source.is_none() {
            return false;
        }
        self.cropped = Some(cropped);
        true
    }

    /// Captures the holder as a persisted snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            source_image_ref: self.source.clone(),
            cropped_image_ref: self.cropped.clone(),
        }
    }

    /// Rebuilds a holder from a persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::CroppedWithoutSource`] if the snapshot carries a
    /// cropped reference without a source reference.
    pub fn restore(snapshot: StateSnapshot) -> Result<Self, StateError> {
        match snapshot {
            StateSnapshot {
                source_image_ref: None,
                cropped_image_ref: Some(cropped),
            } => Err(StateError::CroppedWithoutSource(cropped)),
            StateSnapshot {
                source_image_ref,
                cropped_image_ref,
            } => Ok(Self {
                source: source_image_ref,
                cropped: cropped_image_ref,
            }),
        }
    }
}
