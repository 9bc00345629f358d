//! Mock implementations of core port traits.
//!
//! Every mock is cheap to clone and shares its recordings between clones,
//! so a test can hand one copy to the controller and assert on another.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use asclepius_core::{
    AnalysisOutcome, AnalysisRequest, AnalysisSurface, CropOutcome, CropRequest, CropTool, DestinationAllocator,
    EventSender, ImagePicker, ImageRef, Notice, PickOutcome, PickRequest, Presenter,
    SnapshotStore, StateSnapshot,
};

fn locked<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock picker that replays scripted outcomes.
///
/// Once the script runs out every launch reports a cancellation.
#[derive(Clone, Default)]
pub struct MockImagePicker {
    script: Arc<Mutex<VecDeque<PickOutcome>>>,
    requests: Arc<Mutex<Vec<PickRequest>>>,
}

impl MockImagePicker {
    /// Creates a picker that will report `outcomes` in order.
    #[must_use]
    pub fn new(outcomes: Vec<PickOutcome>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into())),
            requests: Arc::default(),
        }
    }

    /// Creates a picker that always selects `image`.
    #[must_use]
    pub fn selecting(image: &str) -> Self {
        Self::new(vec![PickOutcome::Selected(ImageRef::from(image))])
    }

    /// Creates a picker that is always dismissed.
    #[must_use]
    pub fn cancelling() -> Self {
        Self::default()
    }

    /// Queues another outcome.
    pub fn push(&self, outcome: PickOutcome) {
        locked(&self.script).push_back(outcome);
    }

    /// Returns all requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<PickRequest> {
        locked(&self.requests).clone()
    }
}

impl ImagePicker for MockImagePicker {
    fn launch(&self, request: &PickRequest, events: &EventSender) {
        locked(&self.requests).push(request.clone());
        let outcome = locked(&self.script)
            .pop_front()
            .unwrap_or(PickOutcome::Cancelled);
        events.pick_completed(outcome);
    }
}

/// Scripted behaviour for [`MockCropTool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropScript {
    /// Report success with the requested destination.
    Succeed,
    /// Report that the user dismissed the editor.
    Cancel,
    /// Report an error with this message.
    Fail(String),
}

/// Mock crop editor that replays scripted behaviour.
///
/// Once the script runs out every launch succeeds.
#[derive(Clone, Default)]
pub struct MockCropTool {
    script: Arc<Mutex<VecDeque<CropScript>>>,
    requests: Arc<Mutex<Vec<CropRequest>>>,
}

impl MockCropTool {
    /// Creates a crop tool that follows `script` in order.
    #[must_use]
    pub fn new(script: Vec<CropScript>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            requests: Arc::default(),
        }
    }

    /// Creates a crop tool that always succeeds.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Creates a crop tool whose next launch fails with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self::new(vec![CropScript::Fail(message.to_owned())])
    }

    /// Queues another behaviour.
    pub fn push(&self, step: CropScript) {
        locked(&self.script).push_back(step);
    }

    /// Returns all requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<CropRequest> {
        locked(&self.requests).clone()
    }
}

impl CropTool for MockCropTool {
    fn launch(&self, request: &CropRequest, events: &EventSender) {
        locked(&self.requests).push(request.clone());
        let step = locked(&self.script)
            .pop_front()
            .unwrap_or(CropScript::Succeed);
        let outcome = match step {
            CropScript::Succeed => CropOutcome::Success(request.destination.clone()),
            CropScript::Cancel => CropOutcome::Cancelled,
            CropScript::Fail(message) => CropOutcome::Error(message),
        };
        events.crop_completed(outcome);
    }
}

/// Allocator producing `mem://cropped/<n>` references from a counter.
#[derive(Clone, Default)]
pub struct SequentialDestinations {
    next: Arc<AtomicUsize>,
}

impl SequentialDestinations {
    /// Creates an allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of destinations handed out so far.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl DestinationAllocator for SequentialDestinations {
    fn allocate(&self) -> ImageRef {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        ImageRef::new(format!("mem://cropped/{n}"))
    }
}

/// Mock analysis surface capturing every handoff.
///
/// An accepted request is answered with the scripted return signal,
/// [`AnalysisOutcome::Completed`] unless told otherwise.
#[derive(Clone)]
pub struct MockAnalysisSurface {
    requests: Arc<Mutex<Vec<AnalysisRequest>>>,
    failure: Arc<Mutex<Option<String>>>,
    returns: Arc<Mutex<Option<AnalysisOutcome>>>,
}

impl Default for MockAnalysisSurface {
    fn default() -> Self {
        Self {
            requests: Arc::default(),
            failure: Arc::default(),
            returns: Arc::new(Mutex::new(Some(AnalysisOutcome::Completed))),
        }
    }
}

impl MockAnalysisSurface {
    /// Creates a surface that accepts every request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface that answers every request with `outcome`.
    #[must_use]
    pub fn returning(outcome: AnalysisOutcome) -> Self {
        let surface = Self::default();
        *locked(&surface.returns) = Some(outcome);
        surface
    }

    /// Creates a surface that never posts a return signal.
    #[must_use]
    pub fn silent() -> Self {
        let surface = Self::default();
        *locked(&surface.returns) = None;
        surface
    }

    /// Creates a surface that refuses every request with `message`.
    #[must_use]
    pub fn refusing(message: &str) -> Self {
        let surface = Self::default();
        *locked(&surface.failure) = Some(message.to_owned());
        surface
    }

    /// Returns all accepted requests.
    #[must_use]
    pub fn requests(&self) -> Vec<AnalysisRequest> {
        locked(&self.requests).clone()
    }
}

impl AnalysisSurface for MockAnalysisSurface {
    fn launch(&self, request: &AnalysisRequest, events: &EventSender) -> anyhow::Result<()> {
        if let Some(message) = locked(&self.failure).clone() {
            anyhow::bail!(message);
        }
        locked(&self.requests).push(request.clone());
        if let Some(outcome) = *locked(&self.returns) {
            events.analysis_returned(outcome);
        }
        Ok(())
    }
}

/// Mock presenter recording previews and notices.
#[derive(Clone, Default)]
pub struct MockPresenter {
    previews: Arc<Mutex<Vec<ImageRef>>>,
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MockPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every previewed image, in order.
    #[must_use]
    pub fn previews(&self) -> Vec<ImageRef> {
        locked(&self.previews).clone()
    }

    /// Returns every notice shown, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        locked(&self.notices).clone()
    }

    /// Returns the most recent preview, if any.
    #[must_use]
    pub fn last_preview(&self) -> Option<ImageRef> {
        locked(&self.previews).last().cloned()
    }
}

impl Presenter for MockPresenter {
    fn show_preview(&self, image: &ImageRef) {
        locked(&self.previews).push(image.clone());
    }

    fn notify(&self, notice: &Notice) {
        locked(&self.notices).push(notice.clone());
    }
}

/// In-memory snapshot store.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<StateSnapshot>>>,
    saves: Arc<AtomicUsize>,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `save()` was called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> anyhow::Result<Option<StateSnapshot>> {
        Ok(locked(&self.slot).clone())
    }

    fn save(&self, snapshot: &StateSnapshot) -> anyhow::Result<()> {
        *locked(&self.slot) = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *locked(&self.slot) = None;
        Ok(())
    }
}

/// In-memory writer whose contents stay readable after it is boxed away.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&locked(&self.bytes)).into_owned()
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        locked(&self.bytes).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use asclepius_core::{event_channel, PipelineEvent};

    #[test]
    fn test_mock_picker_replays_then_cancels() {
        let (tx, rx) = event_channel();
        let picker = MockImagePicker::selecting("content://a");

        picker.launch(&PickRequest::any_image(), &tx);
        picker.launch(&PickRequest::any_image(), &tx);

        assert_eq!(
            rx.try_next(),
            Some(PipelineEvent::PickCompleted(PickOutcome::Selected(
                ImageRef::from("content://a")
            )))
        );
        assert_eq!(
            rx.try_next(),
            Some(PipelineEvent::PickCompleted(PickOutcome::Cancelled))
        );
        assert_eq!(picker.requests().len(), 2);
    }

    #[test]
    fn test_mock_crop_tool_script() {
        let (tx, rx) = event_channel();
        let tool = MockCropTool::new(vec![CropScript::Fail("disk full".into())]);
        let request = CropRequest {
            source: ImageRef::from("content://a"),
            destination: ImageRef::from("mem://cropped/0"),
        };

        tool.launch(&request, &tx);
        tool.launch(&request, &tx);

        assert_eq!(
            rx.try_next(),
            Some(PipelineEvent::CropCompleted(CropOutcome::Error(
                "disk full".into()
            )))
        );
        assert_eq!(
            rx.try_next(),
            Some(PipelineEvent::CropCompleted(CropOutcome::Success(
                ImageRef::from("mem://cropped/0")
            )))
        );
    }

    #[test]
    fn test_sequential_destinations_are_distinct() {
        let dest = SequentialDestinations::new();
        let a = dest.allocate();
        let b = dest.allocate();
        assert_ne!(a, b);
        assert_eq!(dest.allocated(), 2);
    }

    #[test]
    fn test_refusing_surface() {
        let (tx, rx) = event_channel();
        let surface = MockAnalysisSurface::refusing("no activity");
        let request = AnalysisRequest::for_image(&ImageRef::from("x"));
        let err = surface.launch(&request, &tx).unwrap_err();
        assert_eq!(err.to_string(), "no activity");
        assert!(surface.requests().is_empty());
        assert_eq!(rx.try_next(), None);
    }

    #[test]
    fn test_surface_posts_scripted_return() {
        let (tx, rx) = event_channel();
        let request = AnalysisRequest::for_image(&ImageRef::from("x"));

        MockAnalysisSurface::returning(AnalysisOutcome::Cancelled)
            .launch(&request, &tx)
            .unwrap();
        assert_eq!(
            rx.try_next(),
            Some(PipelineEvent::AnalysisReturned(AnalysisOutcome::Cancelled))
        );

        MockAnalysisSurface::silent().launch(&request, &tx).unwrap();
        assert_eq!(rx.try_next(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySnapshotStore::new();
        assert!(store.load().unwrap().is_none());

        let snapshot = StateSnapshot {
            source_image_ref: Some(ImageRef::from("content://a")),
            cropped_image_ref: None,
        };
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
        assert_eq!(store.save_count(), 1);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
