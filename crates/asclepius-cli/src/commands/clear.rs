//! Clear command - forget the saved session.

use anyhow::Result;
use asclepius_core::SnapshotStore;
use tracing::info;

use super::session::SessionArgs;

/// Run the clear command.
pub fn run(session: &SessionArgs) -> Result<()> {
    let store = session.store();
    store.clear()?;
    info!("Cleared session state at {}", store.path().display());
    Ok(())
}
