//! Crop editor port and destination allocation.

use crate::domain::{CropRequest, ImageRef};
use crate::events::EventSender;

/// Port for the external crop editor.
pub trait CropTool: Send + Sync {
    /// Starts a crop of `request.source` into `request.destination`.
    ///
    /// Must return without waiting for the user and post exactly one
    /// `CropCompleted` event through `events` once the editor finishes.
    fn launch(&self, request: &CropRequest, events: &EventSender);
}

/// Source of fresh crop destinations.
pub trait DestinationAllocator: Send + Sync {
    /// Returns a destination never handed out before in this session.
    fn allocate(&self) -> ImageRef;
}
