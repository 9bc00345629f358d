//! Core domain types for the acquisition pipeline.

mod holder;
mod image_ref;
mod notice;
mod outcome;
mod request;

pub use holder::{ResultHolder, StateError, StateSnapshot};
pub use image_ref::ImageRef;
pub use notice::Notice;
pub use outcome::{AnalysisOutcome, CropOutcome, PickOutcome};
pub use request::{
    AnalysisRequest, CropRequest, PickRequest, CHOOSER_TITLE, EXTRA_IMAGE_URI, IMAGE_MIME_FILTER,
    REQUEST_RESULT,
};
