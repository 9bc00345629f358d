//! Configuration file support for asclepius.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/asclepius/config.toml` (lowest priority)
//! - Project-local: `.asclepius.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use asclepius_adapters::AspectRatio;
use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Crop editor settings.
    pub crop: CropConfig,
    /// Where session state and crops are kept.
    pub session: SessionConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Crop editor configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Aspect ratio as `W:H`.
    pub aspect_ratio: Option<String>,
    /// Maximum result width in pixels.
    pub max_width: Option<u32>,
    /// Maximum result height in pixels.
    pub max_height: Option<u32>,
    /// JPEG quality (1-100).
    pub quality: Option<u8>,
}

/// Session storage configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Path of the persisted state file.
    pub state_file: Option<PathBuf>,
    /// Directory receiving cropped images.
    pub cache_dir: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/asclepius/config.toml`
    /// 2. Project-local: `.asclepius.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are reported as
    /// warnings and dropped, so the built-in defaults apply instead.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.validate() {
            eprintln!("warning: {problem}, ignoring it");
        }

        config
    }

    /// Parsed aspect ratio, if configured and valid.
    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.crop.aspect_ratio.as_deref()?.parse().ok()
    }

    /// Drops values outside their acceptable ranges.
    ///
    /// Returns one message per dropped value.
    fn validate(&mut self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(r) = self.crop.aspect_ratio.take() {
            match r.parse::<AspectRatio>() {
                Ok(_) => self.crop.aspect_ratio = Some(r),
                Err(e) => problems.push(format!("crop.aspect_ratio: {e}")),
            }
        }
        if let Some(q) = self.crop.quality {
            if !(1..=100).contains(&q) {
                problems.push(format!("crop.quality must be 1-100, got {q}"));
                self.crop.quality = None;
            }
        }
        if self.crop.max_width == Some(0) {
            problems.push("crop.max_width must be positive".to_string());
            self.crop.max_width = None;
        }
        if self.crop.max_height == Some(0) {
            problems.push("crop.max_height must be positive".to_string());
            self.crop.max_height = None;
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Crop
        self.crop.aspect_ratio = other
            .crop
            .aspect_ratio
            .or_else(|| self.crop.aspect_ratio.take());
        self.crop.max_width = other.crop.max_width.or(self.crop.max_width);
        self.crop.max_height = other.crop.max_height.or(self.crop.max_height);
        self.crop.quality = other.crop.quality.or(self.crop.quality);

        // Session
        self.session.state_file = other
            .session
            .state_file
            .or_else(|| self.session.state_file.take());
        self.session.cache_dir = other
            .session
            .cache_dir
            .or_else(|| self.session.cache_dir.take());

        // Output
        self.output.pretty = other.output.pretty.or(self.output.pretty);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("asclepius").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.asclepius.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".asclepius.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
