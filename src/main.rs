//! zonebuild: compile per-zone DNS record trees into octoDNS zone files
//!
//! Discovers apex zones under a zones directory, folds subdomain files into
//! their apex, and writes deterministic zone files plus a sync configuration.

use std::process::ExitCode;

fn main() -> ExitCode {
    match zonebuild::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
