//! Filesystem picker and `file://` references.

use std::path::{Path, PathBuf};

use asclepius_core::{EventSender, ImagePicker, ImageRef, PickOutcome, PickRequest};
use tracing::{debug, warn};

/// Scheme prefix for references minted by the filesystem adapters.
pub const FILE_SCHEME: &str = "file://";

/// Known image extensions and their MIME types.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// Encodes a filesystem path as a `file://` reference.
#[must_use]
pub fn path_to_ref(path: &Path) -> ImageRef {
    ImageRef::new(format!("{FILE_SCHEME}{}", path.to_string_lossy()))
}

/// Decodes a `file://` reference back into a path.
///
/// Returns `None` for references with any other scheme.
#[must_use]
pub fn ref_to_path(image: &ImageRef) -> Option<PathBuf> {
    image
        .as_str()
        .strip_prefix(FILE_SCHEME)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Guesses the MIME type of a file from its extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Picker that "chooses" a path supplied up front.
///
/// Stands in for an interactive chooser: the user's choice is the
/// configured candidate, or a dismissal if there is none.
pub struct FsImagePicker {
    candidate: Option<PathBuf>,
}

impl FsImagePicker {
    /// Creates a picker that will select `candidate` when launched.
    #[must_use]
    pub const fn new(candidate: Option<PathBuf>) -> Self {
        Self { candidate }
    }

    fn resolve(&self, request: &PickRequest) -> PickOutcome {
        let Some(path) = &self.candidate else {
            debug!("No image chosen");
            return PickOutcome::Cancelled;
        };

        if !path.is_file() {
            warn!("Path does not exist or is not a file: {}", path.display());
            return PickOutcome::Cancelled;
        }

        match mime_for_path(path) {
            Some(mime) if request.accepts(mime) => {}
            Some(mime) => {
                warn!(
                    "{} ({mime}) does not match filter {}",
                    path.display(),
                    request.mime_filter
                );
                return PickOutcome::Cancelled;
            }
            None => {
                warn!("Unsupported file type: {}", path.display());
                return PickOutcome::Cancelled;
            }
        }

        let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
        PickOutcome::Selected(path_to_ref(&absolute))
    }
}

impl ImagePicker for FsImagePicker {
    fn launch(&self, request: &PickRequest, events: &EventSender) {
        debug!("{}: {}", request.title, request.mime_filter);
        events.pick_completed(self.resolve(request));
    }
}
