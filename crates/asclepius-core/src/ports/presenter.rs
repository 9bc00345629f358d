//! Presentation port for previews and notices.

use crate::domain::{ImageRef, Notice};

/// Port for the surrounding presentation layer.
pub trait Presenter: Send + Sync {
    /// Displays a preview of the given image.
    fn show_preview(&self, image: &ImageRef);

    /// Shows a transient notice.
    fn notify(&self, notice: &Notice);
}
