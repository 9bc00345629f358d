//! Analyze command - hand the cropped image to the classifier.

use anyhow::Result;
use asclepius_core::HandoffStatus;
use clap::Args;

use super::session::{Session, SessionArgs, Tools};
use super::ExitCode;
use crate::config::AppConfig;

/// Arguments for the analyze command.
#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Pretty-print the analysis request
    #[arg(long)]
    pub pretty: bool,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        if !self.pretty {
            self.pretty = config.output.pretty.unwrap_or(false);
        }
        self
    }
}

/// Run the analyze command.
///
/// The request goes to stdout; notices go to stderr.
pub fn run(args: &AnalyzeArgs, session: &SessionArgs) -> Result<ExitCode> {
    let tools = Tools {
        pretty: args.pretty,
        ..Tools::default()
    };
    let mut session = Session::open(session, tools)?;

    let code = match session.controller.request_analysis() {
        HandoffStatus::Submitted(_) => ExitCode::Success,
        HandoffStatus::NoImageReady => ExitCode::NotReady,
        HandoffStatus::Failed => ExitCode::Error,
    };

    session.pump();
    Ok(code)
}
