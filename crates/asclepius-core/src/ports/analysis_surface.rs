//! Analysis handoff port.

use crate::domain::AnalysisRequest;
use crate::events::EventSender;

/// Port for the external analysis screen.
pub trait AnalysisSurface: Send + Sync {
    /// Transfers control to the analysis surface.
    ///
    /// Once the surface is done it posts its return signal through
    /// `events`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface could not be started.
    fn launch(&self, request: &AnalysisRequest, events: &EventSender) -> anyhow::Result<()>;
}
