//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the pipeline and the external
//! tools it drives.

mod analysis_surface;
mod crop_tool;
mod picker;
mod presenter;
mod snapshot_store;

pub use analysis_surface::AnalysisSurface;
pub use crop_tool::{CropTool, DestinationAllocator};
pub use picker::ImagePicker;
pub use presenter::Presenter;
pub use snapshot_store::SnapshotStore;
