//! Build command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::effective_config;
use crate::config::CliOverrides;
use crate::diagnostics::TracingDiagnostics;
use crate::pipeline::discover_and_build;

#[derive(Args)]
pub struct BuildArgs {
    /// Path to config file (zonebuild.toml or .zonebuild.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding one subdirectory per apex zone
    #[arg(short = 'z', long = "zones", value_name = "DIR")]
    pub zones_dir: Option<PathBuf>,

    /// Directory for compiled zone files (cleared on every run)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Where to write the octoDNS sync configuration
    #[arg(long, value_name = "FILE")]
    pub sync_config: Option<PathBuf>,

    /// Default TTL for the YAML provider
    #[arg(long, value_name = "SECS")]
    pub default_ttl: Option<u32>,

    /// Environment variable holding the Cloudflare API token
    #[arg(long, value_name = "NAME")]
    pub token_env: Option<String>,

    /// Let octoDNS manage Cloudflare page rules
    #[arg(long)]
    pub pagerules: bool,

    /// Do not follow symlinked zone directories or documents
    #[arg(long)]
    pub no_follow_symlinks: bool,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let overrides = CliOverrides {
        zones_dir: args.zones_dir,
        output_dir: args.output_dir,
        sync_config: args.sync_config,
        default_ttl: args.default_ttl,
        token_env: args.token_env,
        pagerules: if args.pagerules { Some(true) } else { None },
        follow_symlinks: if args.no_follow_symlinks { Some(false) } else { None },
    };
    let config = effective_config(args.config.as_deref(), overrides)?;

    let summary = discover_and_build(&config, &mut TracingDiagnostics)?;

    for zone in &summary.zones {
        println!(
            "{}: {} names, {} records -> {}",
            zone.apex,
            zone.names,
            zone.records,
            zone.path.display()
        );
    }
    println!(
        "Compiled {} zone(s); sync configuration written to {}",
        summary.zones.len(),
        summary.sync_config.display()
    );

    Ok(())
}
