//! Test support utilities for asclepius.
//!
//! Provides mock ports, a pre-wired controller harness and synthetic image
//! builders for testing the acquisition pipeline.
//!
//! # Example
//!
//! ```
//! use asclepius_test_support::{Harness, MockImagePicker};
//!
//! let harness = Harness {
//!     picker: MockImagePicker::selecting("content://media/1"),
//!     ..Harness::new()
//! };
//! let (mut controller, events) = harness.controller();
//!
//! controller.request_image_selection();
//! controller.pump(&events);
//!
//! assert!(controller.state().cropped().is_some());
//! ```

mod builders;
mod harness;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use harness::Harness;
pub use mocks::{
    CropScript, MockAnalysisSurface, MockCropTool, MockImagePicker, MockPresenter,
    MemorySnapshotStore, SequentialDestinations, SharedBuffer,
};
