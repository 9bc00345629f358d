//! JSON file persistence for pipeline state.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asclepius_core::{SnapshotStore, StateSnapshot};
use tempfile::NamedTempFile;
use tracing::debug;

/// Keeps the snapshot in a single JSON file.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Creates a store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<StateSnapshot>> {
        if !self.path.exists() {
            debug!("No saved state at {}", self.path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file: {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    /// Writes a sibling temp file and renames it over the state file, so an
    /// interrupted save leaves the previous state intact.
    fn save(&self, snapshot: &StateSnapshot) -> Result<()> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
                parent
            }
            None => Path::new("."),
        };
        let json = serde_json::to_string_pretty(snapshot)?;

        let mut staged = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to stage state file in {}", parent.display()))?;
        staged
            .write_all(json.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))?;
        staged
            .persist(&self.path)
            .with_context(|| format!("Failed to replace state file: {}", self.path.display()))?;

        debug!("Saved state to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use asclepius_core::ImageRef;

    fn snapshot(source: &str) -> StateSnapshot {
        StateSnapshot {
            source_image_ref: Some(ImageRef::new(source)),
            cropped_image_ref: None,
        }
    }

    #[test]
    fn test_save_replaces_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("nested/state.json"));

        store.save(&snapshot("file:///a.png")).unwrap();
        store.save(&snapshot("file:///b.png")).unwrap();

        assert_eq!(store.load().unwrap(), Some(snapshot("file:///b.png")));
        let entries: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("state.json")]);
    }

    #[test]
    fn test_corrupt_file_keeps_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{\"sourceImageRef\": ").unwrap();

        let err = JsonSnapshotStore::new(&path).load().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse state file"));
    }
}
