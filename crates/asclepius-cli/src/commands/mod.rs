//! CLI command definitions and handlers.

pub mod analyze;
pub mod clear;
pub mod pick;
pub mod session;
pub mod status;

use clap::{Parser, Subcommand};

/// Asclepius - pick a photo, crop it and submit it for classification
#[derive(Parser)]
#[command(name = "asclepius")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Session storage options shared by every command.
    #[command(flatten)]
    pub session: session::SessionArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Select an image and crop it
    Pick(pick::PickArgs),
    /// Submit the cropped image for analysis
    Analyze(analyze::AnalyzeArgs),
    /// Show the current session state
    Status(status::StatusArgs),
    /// Forget the current session state
    Clear,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The requested step completed.
    Success,
    /// The step was cancelled or had nothing to work on; state is intact.
    NotReady,
    /// An unexpected error occurred.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::NotReady => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
