//! Command-line interface for zonebuild
//!
//! Provides `build` and `info` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::diagnostics::{Diagnostics, TracingDiagnostics};

mod build;
mod info;
mod utils;

/// Compile per-zone DNS record trees into octoDNS zone files
#[derive(Parser)]
#[command(name = "zonebuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile all zones and write the octoDNS sync configuration
    Build(build::BuildArgs),

    /// Show discovered zones and their compiled digests without writing
    Info(info::InfoArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Build(args) => build::run(args),
        Commands::Info(args) => info::run(args),
    };
    // The single place a fatal error reaches stderr; `main` only sets the exit code.
    if let Err(err) = &result {
        TracingDiagnostics.error(&format!("{err:#}"));
    }
    result
}
