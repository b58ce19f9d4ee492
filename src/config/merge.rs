//! CLI override merging

use crate::domain::Config;
use std::path::PathBuf;

/// Values given on the command line. `None` leaves the file/default value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub zones_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub sync_config: Option<PathBuf>,
    pub default_ttl: Option<u32>,
    pub token_env: Option<String>,
    pub pagerules: Option<bool>,
    pub follow_symlinks: Option<bool>,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(zones_dir) = cli.zones_dir {
        config.zones_dir = zones_dir;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(sync_config) = cli.sync_config {
        config.sync_config = sync_config;
    }
    if let Some(ttl) = cli.default_ttl {
        config.default_ttl = ttl;
    }
    if let Some(token_env) = cli.token_env {
        config.token_env = token_env;
    }
    if let Some(pagerules) = cli.pagerules {
        config.pagerules = pagerules;
    }
    if let Some(follow) = cli.follow_symlinks {
        config.follow_symlinks = follow;
    }
    config
}
