//! Ready-wired controller for tests.

use asclepius_core::{
    event_channel, EventReceiver, PipelineController, Ports, StateError, StateSnapshot,
};

use crate::mocks::{
    MockAnalysisSurface, MockCropTool, MockImagePicker, MockPresenter, SequentialDestinations,
};

/// A set of mock ports plus the handles needed to inspect them.
///
/// Fields are public so a test can script a mock before building the
/// controller.
#[derive(Clone, Default)]
pub struct Harness {
    /// Picker handed to the controller.
    pub picker: MockImagePicker,
    /// Crop editor handed to the controller.
    pub crop_tool: MockCropTool,
    /// Destination allocator handed to the controller.
    pub destinations: SequentialDestinations,
    /// Analysis surface handed to the controller.
    pub analysis: MockAnalysisSurface,
    /// Presenter handed to the controller.
    pub presenter: MockPresenter,
}

impl Harness {
    /// Creates a harness with a cancelling picker and a succeeding crop tool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxes clones of every mock into a [`Ports`] bundle.
    #[must_use]
    pub fn ports(&self) -> Ports {
        Ports {
            picker: Box::new(self.picker.clone()),
            crop_tool: Box::new(self.crop_tool.clone()),
            destinations: Box::new(self.destinations.clone()),
            analysis: Box::new(self.analysis.clone()),
            presenter: Box::new(self.presenter.clone()),
        }
    }

    /// Builds an empty controller and the receiver it should pump.
    #[must_use]
    pub fn controller(&self) -> (PipelineController, EventReceiver) {
        let (tx, rx) = event_channel();
        (PipelineController::new(self.ports(), tx), rx)
    }

    /// Builds a controller restored from `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is invalid.
    pub fn restored(
        &self,
        snapshot: StateSnapshot,
    ) -> Result<(PipelineController, EventReceiver), StateError> {
        let (tx, rx) = event_channel();
        let controller = PipelineController::restore(self.ports(), tx, snapshot)?;
        Ok((controller, rx))
    }
}
