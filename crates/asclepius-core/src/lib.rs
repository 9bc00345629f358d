//! Asclepius Core - image acquisition pipeline
//!
//! Sequences "pick an image → crop it → hand it off for analysis" over a set
//! of external tools described by port traits. Completions from those tools
//! arrive as events on a channel and are applied by a single controller.

pub mod controller;
pub mod domain;
pub mod events;
pub mod handoff;
pub mod ports;

pub use controller::{HandoffStatus, PipelineController, Ports};
pub use domain::{
    AnalysisOutcome, AnalysisRequest, CropOutcome, CropRequest, ImageRef, Notice, PickOutcome,
    PickRequest, ResultHolder, StateError, StateSnapshot, CHOOSER_TITLE, EXTRA_IMAGE_URI,
    IMAGE_MIME_FILTER, REQUEST_RESULT,
};
pub use events::{event_channel, EventReceiver, EventSender, PipelineEvent};
pub use handoff::AnalysisHandoff;
pub use ports::{
    AnalysisSurface, CropTool, DestinationAllocator, ImagePicker, Presenter, SnapshotStore,
};
