//! Asclepius Adapters - concrete tools for the acquisition pipeline.
//!
//! This crate provides adapters for:
//! - Picking images from the filesystem
//! - Cropping with the `image` crate into a cache directory
//! - Persisting pipeline state as JSON
//! - Handing requests to an analysis process as JSON lines

pub mod analysis;
pub mod crop;
pub mod destinations;
pub mod fs;
pub mod snapshot;

pub use analysis::JsonAnalysisSurface;
pub use crop::{AspectRatio, CropOptions, ImageCropTool, DEFAULT_QUALITY};
pub use destinations::CacheDestinations;
pub use fs::{path_to_ref, ref_to_path, FsImagePicker};
pub use snapshot::JsonSnapshotStore;
