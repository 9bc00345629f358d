//! Packaging of the cropped image for the analysis surface.

use anyhow::Context;
use tracing::info;

use crate::domain::{AnalysisRequest, ImageRef};
use crate::events::EventSender;
use crate::ports::AnalysisSurface;

/// Hands a cropped image over to the analysis surface.
pub struct AnalysisHandoff {
    surface: Box<dyn AnalysisSurface>,
}

impl AnalysisHandoff {
    /// Wraps an analysis surface.
    #[must_use]
    pub fn new(surface: Box<dyn AnalysisSurface>) -> Self {
        Self { surface }
    }

    /// Builds the outbound request for `image` and launches the surface.
    ///
    /// The surface's return signal arrives later on `events`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface refuses the request.
    pub fn submit(
        &self,
        image: &ImageRef,
        events: &EventSender,
    ) -> anyhow::Result<AnalysisRequest> {
        let request = AnalysisRequest::for_image(image);
        self.surface
            .launch(&request, events)
            .with_context(|| format!("Failed to hand off {image} for analysis"))?;
        info!("Handed off {} (request {})", image, request.request_code);
        Ok(request)
    }
}
