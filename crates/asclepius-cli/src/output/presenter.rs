//! Terminal presenter writing previews and notices to stderr.

use asclepius_core::{ImageRef, Notice, Presenter};
use tracing::debug;

/// Presenter for CLI output.
///
/// Stdout is reserved for machine-readable results, so everything here
/// goes to stderr.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    /// Creates a terminal presenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Presenter for TerminalPresenter {
    fn show_preview(&self, image: &ImageRef) {
        debug!("Preview: {image}");
        eprintln!("preview: {image}");
    }

    fn notify(&self, notice: &Notice) {
        eprintln!("{notice}");
    }
}
