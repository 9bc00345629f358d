//! Wiring of adapters into a pipeline session.

use std::path::PathBuf;

use anyhow::{Context, Result};
use asclepius_adapters::{
    CacheDestinations, CropOptions, FsImagePicker, ImageCropTool, JsonAnalysisSurface,
    JsonSnapshotStore,
};
use asclepius_core::{event_channel, EventReceiver, PipelineController, Ports, SnapshotStore};
use clap::Args;
use tracing::debug;

use crate::config::AppConfig;
use crate::output::TerminalPresenter;

/// Session storage arguments.
#[derive(Args, Clone, Default)]
pub struct SessionArgs {
    /// State file kept between runs (overrides config)
    #[arg(long, value_name = "FILE", global = true)]
    pub state_file: Option<PathBuf>,

    /// Directory for cropped images (overrides config)
    #[arg(long, value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,
}

impl SessionArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        if self.state_file.is_none() {
            self.state_file.clone_from(&config.session.state_file);
        }
        if self.cache_dir.is_none() {
            self.cache_dir.clone_from(&config.session.cache_dir);
        }
        self
    }

    /// State file with fallback to the user data directory.
    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("asclepius")
                .join("state.json")
        })
    }

    /// Cache directory with fallback to the user cache directory.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("asclepius")
        })
    }

    /// Opens the snapshot store for this session.
    #[must_use]
    pub fn store(&self) -> JsonSnapshotStore {
        JsonSnapshotStore::new(self.state_file())
    }
}

/// A controller restored from disk, plus what is needed to persist it again.
pub struct Session {
    /// The pipeline controller.
    pub controller: PipelineController,
    /// Receiver the controller pumps.
    pub events: EventReceiver,
    store: JsonSnapshotStore,
}

/// Tool choices that vary between commands.
#[derive(Default)]
pub struct Tools {
    /// Image the picker will return, if any.
    pub candidate: Option<PathBuf>,
    /// Crop editor options.
    pub crop: CropOptions,
    /// Pretty-print analysis requests.
    pub pretty: bool,
}

impl Session {
    /// Restores the saved session, or starts an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved state cannot be read or is invalid.
    pub fn open(args: &SessionArgs, tools: Tools) -> Result<Self> {
        let store = args.store();
        let ports = Ports {
            picker: Box::new(FsImagePicker::new(tools.candidate)),
            crop_tool: Box::new(ImageCropTool::new(tools.crop)),
            destinations: Box::new(CacheDestinations::new(args.cache_dir())),
            analysis: Box::new(JsonAnalysisSurface::stdout(tools.pretty)),
            presenter: Box::new(TerminalPresenter::new()),
        };

        let (tx, rx) = event_channel();
        let controller = match store.load()? {
            Some(snapshot) => PipelineController::restore(ports, tx, snapshot).with_context(
                || format!("Invalid state file: {}", store.path().display()),
            )?,
            None => PipelineController::new(ports, tx),
        };
        debug!("Session opened from {}", store.path().display());

        Ok(Self {
            controller,
            events: rx,
            store,
        })
    }

    /// Applies every pending completion.
    pub fn pump(&mut self) {
        self.controller.pump(&self.events);
    }

    /// Persists the controller's state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.controller.save_state())
    }
}
