//! Persistence port for pipeline state.

use crate::domain::StateSnapshot;

/// Port for keeping a [`StateSnapshot`] across an interruption.
pub trait SnapshotStore: Send + Sync {
    /// Loads the last saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored snapshot exists but cannot be read.
    fn load(&self) -> anyhow::Result<Option<StateSnapshot>>;

    /// Saves a snapshot, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, snapshot: &StateSnapshot) -> anyhow::Result<()>;

    /// Removes any saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing snapshot cannot be removed.
    fn clear(&self) -> anyhow::Result<()>;
}
