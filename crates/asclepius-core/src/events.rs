//! Completion events and the channel that carries them.
//!
//! External tools never call back into the controller directly. They post a
//! [`PipelineEvent`] through an [`EventSender`]; the controller drains the
//! matching [`EventReceiver`] on its own thread, in arrival order.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::debug;

use crate::domain::{AnalysisOutcome, CropOutcome, PickOutcome};

/// A completion reported by one of the external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The image picker finished.
    PickCompleted(PickOutcome),
    /// The crop editor finished.
    CropCompleted(CropOutcome),
    /// The analysis surface returned.
    AnalysisReturned(AnalysisOutcome),
}

/// Creates a connected sender/receiver pair.
#[must_use]
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    (EventSender { tx }, EventReceiver { rx })
}

/// Posting half of the event channel, handed to adapters.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<PipelineEvent>,
}

impl EventSender {
    /// Posts an event. Dropped with a debug log if the receiver is gone.
    pub fn post(&self, event: PipelineEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!("Event dropped, pipeline no longer listening: {:?}", e.0);
        }
    }

    /// Posts a picker completion.
    pub fn pick_completed(&self, outcome: PickOutcome) {
        self.post(PipelineEvent::PickCompleted(outcome));
    }

    /// Posts a crop completion.
    pub fn crop_completed(&self, outcome: CropOutcome) {
        self.post(PipelineEvent::CropCompleted(outcome));
    }

    /// Posts the analysis surface's return signal.
    pub fn analysis_returned(&self, outcome: AnalysisOutcome) {
        self.post(PipelineEvent::AnalysisReturned(outcome));
    }
}

/// Receiving half of the event channel, drained by the controller.
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<PipelineEvent>,
}

impl EventReceiver {
    /// Returns the next queued event without blocking.
    #[must_use]
    pub fn try_next(&self) -> Option<PipelineEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}
