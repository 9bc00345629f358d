//! Pick command - select an image and crop it.

use std::path::PathBuf;

use anyhow::Result;
use asclepius_adapters::{AspectRatio, CropOptions, DEFAULT_QUALITY};
use clap::Args;
use tracing::info;

use super::session::{Session, SessionArgs, Tools};
use super::ExitCode;
use crate::config::AppConfig;

/// Parse a maximum result size given as `WxH`.
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("'{s}' is not of the form WxH"))?;
    let w: u32 = w.parse().map_err(|_| format!("'{w}' is not a valid width"))?;
    let h: u32 = h.parse().map_err(|_| format!("'{h}' is not a valid height"))?;
    if w == 0 || h == 0 {
        return Err(format!("{s} must have positive sides"));
    }
    Ok((w, h))
}

/// Parse and validate a JPEG quality (1-100).
fn parse_quality(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (1..=100).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 1..=100"))
    }
}

/// Arguments for the pick command.
#[derive(Args, Clone)]
pub struct PickArgs {
    /// Image to select
    pub image: PathBuf,

    /// Crop to this aspect ratio, e.g. 1:1
    #[arg(long, value_name = "W:H")]
    pub aspect: Option<AspectRatio>,

    /// Downscale the crop to fit within this size, e.g. 1080x1080
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub max_size: Option<(u32, u32)>,

    /// JPEG quality for the cropped image (1-100)
    #[arg(long, value_parser = parse_quality)]
    pub quality: Option<u8>,

    /// Dismiss the crop editor instead of accepting the crop
    #[arg(long)]
    pub cancel_crop: bool,
}

impl PickArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.aspect = self.aspect.or_else(|| config.aspect_ratio());
        if self.max_size.is_none() {
            self.max_size = match (config.crop.max_width, config.crop.max_height) {
                (Some(w), Some(h)) => Some((w, h)),
                (Some(w), None) => Some((w, u32::MAX)),
                (None, Some(h)) => Some((u32::MAX, h)),
                (None, None) => None,
            };
        }
        self.quality = self.quality.or(config.crop.quality);
        self
    }

    fn crop_options(&self) -> CropOptions {
        CropOptions {
            aspect_ratio: self.aspect,
            max_size: self.max_size,
            quality: self.quality.unwrap_or(DEFAULT_QUALITY),
            confirm: !self.cancel_crop,
        }
    }
}

/// Run the pick command.
///
/// Exits with `NotReady` when the pick or the crop did not produce a new
/// cropped image.
pub fn run(args: &PickArgs, session: &SessionArgs) -> Result<ExitCode> {
    info!("Picking {}", args.image.display());

    let tools = Tools {
        candidate: Some(args.image.clone()),
        crop: args.crop_options(),
        ..Tools::default()
    };
    let mut session = Session::open(session, tools)?;
    let before = session.controller.save_state();

    session.controller.request_image_selection();
    session.pump();
    session.save()?;

    let after = session.controller.save_state();
    match after.cropped_image_ref {
        Some(cropped) if before.cropped_image_ref.as_ref() != Some(&cropped) => {
            println!("{cropped}");
            Ok(ExitCode::Success)
        }
        _ => Ok(ExitCode::NotReady),
    }
}
