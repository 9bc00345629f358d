//! Asclepius CLI - pick, crop and submit a photo for classification.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();
    let session = cli.session.clone().with_config(&config);

    let result = match cli.command {
        Commands::Pick(args) => commands::pick::run(&args.with_config(&config), &session),
        Commands::Analyze(args) => commands::analyze::run(&args.with_config(&config), &session),
        Commands::Status(args) => {
            commands::status::run(&args, &session).map(|()| ExitCode::Success)
        }
        Commands::Clear => commands::clear::run(&session).map(|()| ExitCode::Success),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    };

    exit_code.into()
}
