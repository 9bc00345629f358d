//! JSON analysis surface.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use asclepius_core::{AnalysisOutcome, AnalysisRequest, AnalysisSurface, EventSender};

/// Emits each analysis request as one JSON line.
///
/// The downstream classifier reads these requests from the other end of
/// the writer. A request counts as completed once it is flushed.
pub struct JsonAnalysisSurface {
    writer: Mutex<Box<dyn Write + Send>>,
    pretty: bool,
}

impl JsonAnalysisSurface {
    /// Creates a surface writing to stdout.
    #[must_use]
    pub fn stdout(pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), pretty)
    }

    /// Creates a surface writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            pretty,
        }
    }
}

impl AnalysisSurface for JsonAnalysisSurface {
    #[allow(clippy::significant_drop_tightening)]
    fn launch(&self, request: &AnalysisRequest, events: &EventSender) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(request)?
        } else {
            serde_json::to_string(request)?
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        drop(writer);

        events.analysis_returned(AnalysisOutcome::Completed);
        Ok(())
    }
}
