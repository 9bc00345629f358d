//! Image picker port.

use crate::domain::PickRequest;
use crate::events::EventSender;

/// Port for the external image-selection tool.
pub trait ImagePicker: Send + Sync {
    /// Starts a selection.
    ///
    /// Must return without waiting for the user and post exactly one
    /// `PickCompleted` event through `events` once the tool finishes.
    fn launch(&self, request: &PickRequest, events: &EventSender);
}
