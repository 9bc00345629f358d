//! Integration tests for the image crop tool.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use asclepius_adapters::{
    path_to_ref, ref_to_path, AspectRatio, CacheDestinations, CropOptions, ImageCropTool,
};
use asclepius_core::{
    event_channel, CropOutcome, CropRequest, CropTool, DestinationAllocator, ImageRef,
    PipelineEvent,
};
use asclepius_test_support::SyntheticImageBuilder;
use image::GenericImageView;

fn run(tool: &ImageCropTool, request: &CropRequest) -> CropOutcome {
    let (tx, rx) = event_channel();
    tool.launch(request, &tx);
    let outcome = match rx.try_next() {
        Some(PipelineEvent::CropCompleted(outcome)) => outcome,
        other => panic!("expected a crop completion, got {other:?}"),
    };
    assert!(rx.try_next().is_none(), "exactly one completion expected");
    outcome
}

fn landscape_request(dir: &std::path::Path) -> CropRequest {
    let img = SyntheticImageBuilder::vertical_thirds(300, 100);
    let source = SyntheticImageBuilder::write(dir, "landscape.png", &img).unwrap();
    CropRequest {
        source: path_to_ref(&source),
        destination: CacheDestinations::new(dir.join("cache")).allocate(),
    }
}

#[test]
fn test_square_crop_keeps_center() {
    let dir = tempfile::tempdir().unwrap();
    let request = landscape_request(dir.path());
    let tool = ImageCropTool::new(CropOptions {
        aspect_ratio: AspectRatio::new(1, 1),
        ..CropOptions::default()
    });

    let outcome = run(&tool, &request);
    assert_eq!(outcome, CropOutcome::Success(request.destination.clone()));

    let written = image::open(ref_to_path(&request.destination).unwrap()).unwrap();
    assert_eq!(written.dimensions(), (100, 100));

    // Center column comes from the green middle third.
    let px = written.to_rgb8().get_pixel(50, 50).0;
    assert!(px[1] > 200 && px[0] < 60 && px[2] < 60, "got {px:?}");
}

#[test]
fn test_no_ratio_keeps_whole_frame() {
    let dir = tempfile::tempdir().unwrap();
    let request = landscape_request(dir.path());
    let tool = ImageCropTool::new(CropOptions::default());

    run(&tool, &request);

    let written = image::open(ref_to_path(&request.destination).unwrap()).unwrap();
    assert_eq!(written.dimensions(), (300, 100));
}

#[test]
fn test_max_size_downscales() {
    let dir = tempfile::tempdir().unwrap();
    let request = landscape_request(dir.path());
    let tool = ImageCropTool::new(CropOptions {
        max_size: Some((150, 150)),
        ..CropOptions::default()
    });

    run(&tool, &request);

    let written = image::open(ref_to_path(&request.destination).unwrap()).unwrap();
    assert_eq!(written.dimensions(), (150, 50));
}

#[test]
fn test_low_quality_keeps_flat_colour() {
    let dir = tempfile::tempdir().unwrap();
    let img = SyntheticImageBuilder::rgb_uniform(64, 32, 200, 40, 40);
    let source = SyntheticImageBuilder::write(dir.path(), "flat.png", &img).unwrap();
    let request = CropRequest {
        source: path_to_ref(&source),
        destination: path_to_ref(&dir.path().join("flat.jpg")),
    };
    let tool = ImageCropTool::new(CropOptions {
        aspect_ratio: AspectRatio::new(1, 1),
        quality: 30,
        ..CropOptions::default()
    });

    run(&tool, &request);

    let written = image::open(ref_to_path(&request.destination).unwrap()).unwrap();
    assert_eq!(written.dimensions(), (32, 32));
    let px = written.to_rgb8().get_pixel(16, 16).0;
    for (got, want) in px.iter().zip([200u8, 40, 40]) {
        assert!(got.abs_diff(want) < 16, "got {px:?}");
    }
}

#[test]
fn test_creates_cache_dir() {
    let dir = tempfile::tempdir().unwrap();
    let request = landscape_request(dir.path());
    assert!(!dir.path().join("cache").exists());

    run(&ImageCropTool::new(CropOptions::default()), &request);

    assert!(dir.path().join("cache").is_dir());
}

#[test]
fn test_dismissed_editor_is_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    let request = landscape_request(dir.path());
    let tool = ImageCropTool::new(CropOptions {
        confirm: false,
        ..CropOptions::default()
    });

    assert_eq!(run(&tool, &request), CropOutcome::Cancelled);
    assert!(!ref_to_path(&request.destination).unwrap().exists());
}

#[test]
fn test_undecodable_source_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("broken.jpg");
    std::fs::write(&source, b"definitely not a jpeg").unwrap();
    let request = CropRequest {
        source: path_to_ref(&source),
        destination: path_to_ref(&dir.path().join("out.jpg")),
    };

    let outcome = run(&ImageCropTool::new(CropOptions::default()), &request);
    let CropOutcome::Error(message) = outcome else {
        panic!("expected an error");
    };
    assert!(message.contains("broken.jpg"), "got {message}");
}

#[test]
fn test_foreign_source_reference_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let request = CropRequest {
        source: ImageRef::from("content://media/external/images/1"),
        destination: path_to_ref(&dir.path().join("out.jpg")),
    };

    let outcome = run(&ImageCropTool::new(CropOptions::default()), &request);
    assert!(
        matches!(outcome, CropOutcome::Error(ref m) if m.contains("Unsupported source reference"))
    );
}
