//! Info command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::utils::effective_config;
use crate::config::CliOverrides;
use crate::diagnostics::TracingDiagnostics;
use crate::pipeline::compile_group;
use crate::render::render_zone;
use crate::scan::scan_zones;
use crate::utils::content_digest;

#[derive(Args)]
pub struct InfoArgs {
    /// Path to config file (zonebuild.toml or .zonebuild.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding one subdirectory per apex zone
    #[arg(short = 'z', long = "zones", value_name = "DIR")]
    pub zones_dir: Option<PathBuf>,

    /// Do not follow symlinked zone directories or documents
    #[arg(long)]
    pub no_follow_symlinks: bool,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let overrides = CliOverrides {
        zones_dir: args.zones_dir,
        follow_symlinks: if args.no_follow_symlinks { Some(false) } else { None },
        ..CliOverrides::default()
    };
    let config = effective_config(args.config.as_deref(), overrides)?;

    let mut diagnostics = TracingDiagnostics;
    let (groups, stats) = scan_zones(&config, &mut diagnostics)?;

    println!("Zones root: {}", config.zones_dir.display());
    for group in &groups {
        let zone = compile_group(group, &mut diagnostics)
            .with_context(|| format!("Failed to compile zone {}", group.apex))?;
        let digest = content_digest(&render_zone(&zone)?);

        println!("{}", group.apex);
        println!("  Directory: {}", group.zone_dir.display());
        println!("  Apex file: {}", group.apex_file.display());
        println!("  Subdomain files: {}", group.sub_files.len());
        println!("  Names: {}", zone.name_count());
        println!("  Records: {}", zone.record_count());
        println!("  Digest: {}", digest);
    }

    println!("Statistics:");
    println!("  Candidate directories: {}", stats.candidates);
    println!("  Zones: {}", stats.groups);
    println!("  Subdomain files: {}", stats.sub_files);
    println!("  Missing apex file: {}", stats.missing_apex);
    println!("  Hidden directories skipped: {}", stats.hidden_skipped);

    Ok(())
}
