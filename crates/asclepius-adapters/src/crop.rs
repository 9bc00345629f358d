//! Image crop tool backed by the `image` crate.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use asclepius_core::{CropOutcome, CropRequest, CropTool, EventSender, ImageRef};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::fs::ref_to_path;

/// Default JPEG quality for cropped output.
pub const DEFAULT_QUALITY: u8 = 90;

/// Width-to-height ratio a crop is constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    /// Horizontal part of the ratio.
    pub width: u32,
    /// Vertical part of the ratio.
    pub height: u32,
}

impl AspectRatio {
    /// Creates a ratio, rejecting zero components.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    /// Parses `W:H`, e.g. `1:1` or `16:9`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| format!("'{s}' is not of the form W:H"))?;
        let w: u32 = w
            .trim()
            .parse()
            .map_err(|_| format!("'{w}' is not a valid ratio component"))?;
        let h: u32 = h
            .trim()
            .parse()
            .map_err(|_| format!("'{h}' is not a valid ratio component"))?;
        Self::new(w, h).ok_or_else(|| format!("ratio components must be positive, got {s}"))
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Options applied to every crop.
#[derive(Debug, Clone)]
pub struct CropOptions {
    /// Center-crop to this ratio; keep the whole frame if `None`.
    pub aspect_ratio: Option<AspectRatio>,
    /// Downscale so the result fits within `(width, height)`.
    pub max_size: Option<(u32, u32)>,
    /// JPEG quality, 1-100.
    pub quality: u8,
    /// Whether the user accepts the edit. `false` models dismissing the editor.
    pub confirm: bool,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: None,
            max_size: None,
            quality: DEFAULT_QUALITY,
            confirm: true,
        }
    }
}

/// Crop editor that works on local `file://` references.
pub struct ImageCropTool {
    options: CropOptions,
}

impl ImageCropTool {
    /// Creates a crop tool with the given options.
    #[must_use]
    pub const fn new(options: CropOptions) -> Self {
        Self { options }
    }

    /// Crops `request.source` and writes the JPEG result to
    /// `request.destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if either reference is not a local file, the source
    /// cannot be decoded, or the result cannot be written.
    pub fn crop(&self, request: &CropRequest) -> Result<ImageRef> {
        let source = ref_to_path(&request.source)
            .with_context(|| format!("Unsupported source reference: {}", request.source))?;
        let destination = ref_to_path(&request.destination).with_context(|| {
            format!("Unsupported destination reference: {}", request.destination)
        })?;

        let image = image::open(&source)
            .with_context(|| format!("Failed to open image: {}", source.display()))?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            anyhow::bail!("Image has no pixels: {}", source.display());
        }

        let cropped = self.apply(image);
        debug!(
            "Cropped {}x{} to {}x{}",
            width,
            height,
            cropped.width(),
            cropped.height()
        );

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = File::create(&destination)
            .with_context(|| format!("Failed to create {}", destination.display()))?;
        let mut writer = BufWriter::new(file);
        let encoder =
            JpegEncoder::new_with_quality(&mut writer, self.options.quality.clamp(1, 100));
        DynamicImage::ImageRgb8(cropped.to_rgb8())
            .write_with_encoder(encoder)
            .with_context(|| format!("Failed to encode {}", destination.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", destination.display()))?;

        info!("Wrote cropped image: {}", destination.display());
        Ok(request.destination.clone())
    }

    fn apply(&self, image: DynamicImage) -> DynamicImage {
        let image = match self.options.aspect_ratio {
            Some(ratio) => {
                let (x, y, w, h) = centered_region(image.width(), image.height(), ratio);
                image.crop_imm(x, y, w, h)
            }
            None => image,
        };

        match self.options.max_size {
            Some((max_w, max_h)) if image.width() > max_w || image.height() > max_h => {
                image.resize(max_w.max(1), max_h.max(1), FilterType::Lanczos3)
            }
            _ => image,
        }
    }
}

impl CropTool for ImageCropTool {
    fn launch(&self, request: &CropRequest, events: &EventSender) {
        if !self.options.confirm {
            debug!("Crop of {} dismissed", request.source);
            events.crop_completed(CropOutcome::Cancelled);
            return;
        }

        let outcome = match self.crop(request) {
            Ok(image) => CropOutcome::Success(image),
            Err(e) => CropOutcome::Error(format!("{e:#}")),
        };
        events.crop_completed(outcome);
    }
}

/// Largest region of the given ratio centered in a `width`x`height` frame.
///
/// Returns `(x, y, w, h)`; both sides are at least one pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn centered_region(width: u32, height: u32, ratio: AspectRatio) -> (u32, u32, u32, u32) {
    let (w, h) = (u64::from(width), u64::from(height));
    let (rw, rh) = (u64::from(ratio.width), u64::from(ratio.height));

    // Fits within u32: each side is bounded by the original side.
    let (cw, ch) = if w * rh > h * rw {
        ((h * rw / rh).max(1) as u32, height)
    } else {
        (width, (w * rh / rw).max(1) as u32)
    };

    ((width - cw) / 2, (height - ch) / 2, cw, ch)
}
