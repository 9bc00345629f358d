//! The acquisition pipeline: select, crop, hand off.
//!
//! [`PipelineController`] owns the [`ResultHolder`] and is the only thing
//! that mutates it. User actions call `request_*` methods; completions from
//! the external tools come back as [`PipelineEvent`]s and are applied by
//! [`PipelineController::handle`].

use tracing::{debug, info, warn};

use crate::domain::{
    AnalysisOutcome, AnalysisRequest, CropOutcome, CropRequest, ImageRef, Notice, PickOutcome,
    PickRequest, ResultHolder, StateError, StateSnapshot,
};
use crate::events::{EventReceiver, EventSender, PipelineEvent};
use crate::handoff::AnalysisHandoff;
use crate::ports::{AnalysisSurface, CropTool, DestinationAllocator, ImagePicker, Presenter};

/// The external collaborators a controller drives.
pub struct Ports {
    /// Image-selection tool.
    pub picker: Box<dyn ImagePicker>,
    /// Crop editor.
    pub crop_tool: Box<dyn CropTool>,
    /// Allocator for crop destinations.
    pub destinations: Box<dyn DestinationAllocator>,
    /// Analysis screen.
    pub analysis: Box<dyn AnalysisSurface>,
    /// Preview and notice sink.
    pub presenter: Box<dyn Presenter>,
}

/// What happened when analysis was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffStatus {
    /// The request was delivered to the analysis surface.
    Submitted(AnalysisRequest),
    /// No cropped image was available; nothing was handed off.
    NoImageReady,
    /// The analysis surface could not be started.
    Failed,
}

/// Drives the pick → crop → analysis sequence.
pub struct PipelineController {
    state: ResultHolder,
    picker: Box<dyn ImagePicker>,
    crop_tool: Box<dyn CropTool>,
    destinations: Box<dyn DestinationAllocator>,
    handoff: AnalysisHandoff,
    presenter: Box<dyn Presenter>,
    events: EventSender,
    pending: usize,
}

impl PipelineController {
    /// Creates a controller with empty state.
    ///
    /// `events` is the posting half of the channel the controller will later
    /// drain with [`pump`](Self::pump).
    #[must_use]
    pub fn new(ports: Ports, events: EventSender) -> Self {
        Self {
            state: ResultHolder::new(),
            picker: ports.picker,
            crop_tool: ports.crop_tool,
            destinations: ports.destinations,
            handoff: AnalysisHandoff::new(ports.analysis),
            presenter: ports.presenter,
            events,
            pending: 0,
        }
    }

    /// Creates a controller from a persisted snapshot.
    ///
    /// Previews every restored reference, source first.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot violates the holder invariant.
    pub fn restore(
        ports: Ports,
        events: EventSender,
        snapshot: StateSnapshot,
    ) -> Result<Self, StateError> {
        let mut controller = Self::new(ports, events);
        controller.state = ResultHolder::restore(snapshot)?;

        if let Some(source) = controller.state.source() {
            controller.presenter.show_preview(source);
        }
        if let Some(cropped) = controller.state.cropped() {
            controller.presenter.show_preview(cropped);
        }
        debug!("Restored pipeline state: {:?}", controller.state);

        Ok(controller)
    }

    /// Current pipeline state, read-only.
    #[must_use]
    pub const fn state(&self) -> &ResultHolder {
        &self.state
    }

    /// Captures the current state for persistence.
    #[must_use]
    pub fn save_state(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// Number of pick or crop requests still awaiting completion.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// Asks the picker for an image. The outcome arrives later as an event.
    pub fn request_image_selection(&mut self) {
        let request = PickRequest::any_image();
        info!("Requesting image selection ({})", request.mime_filter);
        self.pending += 1;
        self.picker.launch(&request, &self.events);
    }

    /// Applies a picker completion.
    ///
    /// A cancelled pick changes nothing and shows nothing. A successful pick
    /// stores the source, previews it and immediately starts a crop.
    pub fn on_pick_completed(&mut self, outcome: PickOutcome) {
        self.complete_one();
        match outcome {
            PickOutcome::Cancelled => {
                debug!("Image selection cancelled");
            }
            PickOutcome::Selected(source) => {
                info!("Selected image: {source}");
                self.state.set_source(source.clone());
                self.presenter.show_preview(&source);
                self.start_crop(source);
            }
        }
    }

    /// Applies a crop completion.
    pub fn on_crop_completed(&mut self, outcome: CropOutcome) {
        self.complete_one();
        match outcome {
            CropOutcome::Success(cropped) => {
                if self.state.set_cropped(cropped.clone()) {
                    info!("Cropped image ready: {cropped}");
                    self.presenter.show_preview(&cropped);
                } else {
                    warn!("Ignoring crop result {cropped}: no source image selected");
                }
            }
            CropOutcome::Cancelled => {
                debug!("Crop returned no result");
                self.presenter.notify(&Notice::CropCancelled);
            }
            CropOutcome::Error(message) => {
                warn!("Crop failed: {message}");
                self.presenter.notify(&Notice::CropError { message });
            }
        }
    }

    /// Hands the cropped image to the analysis surface.
    ///
    /// Without a cropped image this only shows [`Notice::NoImageReady`].
    pub fn request_analysis(&mut self) -> HandoffStatus {
        let Some(cropped) = self.state.cropped() else {
            info!("Analysis requested with no cropped image");
            self.presenter.notify(&Notice::NoImageReady);
            return HandoffStatus::NoImageReady;
        };

        match self.handoff.submit(cropped, &self.events) {
            Ok(request) => HandoffStatus::Submitted(request),
            Err(e) => {
                warn!("{e:#}");
                self.presenter.notify(&Notice::HandoffFailed {
                    message: format!("{e:#}"),
                });
                HandoffStatus::Failed
            }
        }
    }

    /// Records the analysis surface's return signal.
    #[allow(clippy::unused_self)]
    pub fn on_analysis_returned(&self, outcome: AnalysisOutcome) {
        debug!("Analysis surface returned: {outcome:?}");
    }

    /// Applies one completion event.
    pub fn handle(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::PickCompleted(outcome) => self.on_pick_completed(outcome),
            PipelineEvent::CropCompleted(outcome) => self.on_crop_completed(outcome),
            PipelineEvent::AnalysisReturned(outcome) => self.on_analysis_returned(outcome),
        }
    }

    /// Applies every queued event, in arrival order.
    ///
    /// Events posted while handling (a crop triggered by a pick, say) are
    /// applied in the same call. Returns the number of events handled.
    pub fn pump(&mut self, events: &EventReceiver) -> usize {
        let mut handled = 0;
        while let Some(event) = events.try_next() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    fn start_crop(&mut self, source: ImageRef) {
        let destination = self.destinations.allocate();
        debug!("Cropping {source} into {destination}");
        let request = CropRequest {
            source,
            destination,
        };
        self.pending += 1;
        self.crop_tool.launch(&request, &self.events);
    }

    fn complete_one(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }
}
