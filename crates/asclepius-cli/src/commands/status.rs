//! Status command - show the saved session.

use anyhow::{Context, Result};
use asclepius_core::{ImageRef, ResultHolder, SnapshotStore};
use clap::Args;

use super::session::SessionArgs;

/// Arguments for the status command.
#[derive(Args, Clone)]
pub struct StatusArgs {
    /// Print the raw snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the status command.
pub fn run(args: &StatusArgs, session: &SessionArgs) -> Result<()> {
    let store = session.store();
    let snapshot = store.load()?.unwrap_or_default();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let holder = ResultHolder::restore(snapshot)
        .with_context(|| format!("Invalid state file: {}", store.path().display()))?;
    let show = |r: Option<&ImageRef>| {
        r.map_or_else(|| String::from("(none)"), ToString::to_string)
    };
    println!("source:  {}", show(holder.source()));
    println!("cropped: {}", show(holder.cropped()));
    Ok(())
}
