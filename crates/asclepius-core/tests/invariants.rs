//! Property tests over arbitrary event sequences.

#![allow(clippy::unwrap_used)]

use asclepius_core::{CropOutcome, ImageRef, PickOutcome, PipelineEvent, ResultHolder};
use asclepius_test_support::Harness;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Select,
    Pump,
    Analyze,
    Inject(PipelineEvent),
}

fn image_ref() -> impl Strategy<Value = ImageRef> {
    (0u8..4).prop_map(|n| ImageRef::new(format!("content://r{n}")))
}

fn pick_outcome() -> impl Strategy<Value = PickOutcome> {
    prop_oneof![
        image_ref().prop_map(PickOutcome::Selected),
        Just(PickOutcome::Cancelled),
    ]
}

fn crop_outcome() -> impl Strategy<Value = CropOutcome> {
    prop_oneof![
        image_ref().prop_map(CropOutcome::Success),
        Just(CropOutcome::Cancelled),
        "[a-z ]{0,12}".prop_map(CropOutcome::Error),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Select),
        Just(Step::Pump),
        Just(Step::Analyze),
        pick_outcome().prop_map(|o| Step::Inject(PipelineEvent::PickCompleted(o))),
        crop_outcome().prop_map(|o| Step::Inject(PipelineEvent::CropCompleted(o))),
    ]
}

proptest! {
    #[test]
    fn cropped_never_set_without_source(
        picks in prop::collection::vec(pick_outcome(), 0..8),
        steps in prop::collection::vec(step(), 0..40),
    ) {
        let harness = Harness::new();
        for p in picks {
            harness.picker.push(p);
        }
        let (mut controller, events) = harness.controller();

        for s in steps {
            match s {
                Step::Select => controller.request_image_selection(),
                Step::Pump => { controller.pump(&events); }
                Step::Analyze => { controller.request_analysis(); }
                Step::Inject(event) => controller.handle(event),
            }
            let state = controller.state();
            prop_assert!(state.cropped().is_none() || state.source().is_some());
        }
    }

    #[test]
    fn snapshot_round_trips(source in image_ref(), cropped in proptest::option::of(image_ref())) {
        let mut holder = ResultHolder::new();
        holder.set_source(source);
        if let Some(c) = cropped {
            holder.set_cropped(c);
        }
        let restored = ResultHolder::restore(holder.snapshot()).unwrap();
        prop_assert_eq!(restored, holder);
    }

    #[test]
    fn destinations_unique_within_session(n in 1usize..20) {
        let harness = Harness::new();
        let (mut controller, events) = harness.controller();
        for i in 0..n {
            controller.on_pick_completed(PickOutcome::Selected(ImageRef::new(format!("content://{i}"))));
        }
        controller.pump(&events);

        let mut destinations: Vec<_> = harness
            .crop_tool
            .requests()
            .into_iter()
            .map(|c| c.destination)
            .collect();
        destinations.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        destinations.dedup();
        prop_assert_eq!(destinations.len(), n);
    }
}
