//! Shared CLI utilities.

use anyhow::Result;
use std::path::Path;

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::Config;

/// Load the config file (explicit or discovered in the working directory)
/// and apply command-line overrides on top.
pub fn effective_config(config_path: Option<&Path>, overrides: CliOverrides) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, config_path)?;
    Ok(merge_cli_with_config(file_config, overrides))
}
