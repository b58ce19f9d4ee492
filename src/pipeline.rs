//! Build orchestration: discover zone groups, merge each one, write outputs.
//!
//! A run is a single synchronous pass. The first fatal error aborts it and
//! leaves the output directory partially populated.

use crate::diagnostics::Diagnostics;
use crate::domain::{CompiledZone, Config, SubZone};
use crate::error::{Warning, ZoneError};
use crate::load::load_document;
use crate::render::{
    build_sync_config, render_document, render_zone, write_document, zone_file_path,
};
use crate::scan::{scan_zones, ScanStats, ZoneGroup};
use crate::utils::content_digest;
use crate::zone::{merge_zone, relative_label};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One compiled zone file written by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneOutput {
    pub apex: String,
    pub path: PathBuf,
    pub names: usize,
    pub records: usize,
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub zones: Vec<ZoneOutput>,
    pub sync_config: PathBuf,
    pub stats: ScanStats,
}

/// Run a full build.
///
/// The output directory is removed and recreated before anything else is
/// written; a run whose output directory is, or contains, the zones
/// directory fails before touching the disk. Zones are processed in name order; the sync configuration is
/// written last, even when no zones were found.
pub fn discover_and_build(
    config: &Config,
    diagnostics: &mut dyn Diagnostics,
) -> Result<BuildSummary> {
    if !config.zones_dir.is_dir() {
        anyhow::bail!("Zones directory does not exist: {}", config.zones_dir.display());
    }

    ensure_output_outside_zones(&config.zones_dir, &config.output_dir)?;
    reset_output_dir(&config.output_dir)?;

    let (groups, stats) = scan_zones(config, diagnostics)?;
    if stats.candidates == 0 {
        diagnostics.warn(&Warning::EmptyZoneSet { zones_dir: config.zones_dir.clone() });
    }

    let mut zones = Vec::with_capacity(groups.len());
    for group in &groups {
        let compiled = compile_group(group, diagnostics)
            .with_context(|| format!("Failed to compile zone {}", group.apex))?;
        zones.push(write_zone(&config.output_dir, &compiled)?);
    }

    let sync = build_sync_config(config);
    let rendered = render_document(&sync)?;
    write_document(&config.sync_config, &rendered)?;
    tracing::info!("Wrote sync configuration {}", config.sync_config.display());

    Ok(BuildSummary { zones, sync_config: config.sync_config.clone(), stats })
}

/// Load and merge one zone group without writing anything.
///
/// Subdomain files whose names do not extend the apex are reported and never
/// read, so a broken unrelated file cannot fail the zone.
pub fn compile_group(
    group: &ZoneGroup,
    diagnostics: &mut dyn Diagnostics,
) -> Result<CompiledZone, ZoneError> {
    let apex_document = load_document(&group.apex_file)?;

    let mut sub_zones = Vec::with_capacity(group.sub_files.len());
    for path in &group.sub_files {
        let stem = file_stem(path);
        if relative_label(&stem, &group.apex).is_none() {
            diagnostics.warn(&Warning::SkippedSubdomainFile {
                apex: group.apex.clone(),
                source: path.display().to_string(),
            });
            continue;
        }
        sub_zones.push(SubZone::new(stem, load_document(path)?));
    }

    merge_zone(&group.apex, &apex_document, &sub_zones, diagnostics)
}

/// Fail when clearing `output_dir` would also remove `zones_dir`, i.e. the two
/// are the same directory or the zones live somewhere below the output.
fn ensure_output_outside_zones(zones_dir: &Path, output_dir: &Path) -> Result<()> {
    let zones = zones_dir
        .canonicalize()
        .with_context(|| format!("Failed resolving zones directory {}", zones_dir.display()))?;
    let output = resolve_path(output_dir)?;
    if zones.starts_with(&output) {
        anyhow::bail!(
            "Refusing to clear output directory {}: it would delete the zones directory {}",
            output_dir.display(),
            zones_dir.display()
        );
    }
    Ok(())
}

/// Canonical form of a path that may not exist yet: the nearest existing
/// ancestor is canonicalized and the missing tail appended to it.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().context("Failed reading current directory")?.join(path)
    };

    let mut missing = Vec::new();
    let mut current = absolute.as_path();
    loop {
        if let Ok(resolved) = current.canonicalize() {
            return Ok(missing.iter().rev().fold(resolved, |acc, part| acc.join(part)));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                current = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

/// Remove `dir` and recreate it empty. Irreversible.
pub fn reset_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        tracing::info!("Clearing output directory {}", dir.display());
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed clearing output directory {}", dir.display()))?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed creating output directory {}", dir.display()))?;
    Ok(())
}

fn write_zone(output_dir: &Path, zone: &CompiledZone) -> Result<ZoneOutput> {
    let rendered = render_zone(zone)?;
    let path = zone_file_path(output_dir, zone.apex());
    write_document(&path, &rendered)?;

    let output = ZoneOutput {
        apex: zone.apex().to_string(),
        path,
        names: zone.name_count(),
        records: zone.record_count(),
        digest: content_digest(&rendered),
    };
    tracing::info!(
        apex = %output.apex,
        names = output.names,
        records = output.records,
        digest = %output.digest,
        "Wrote zone {}",
        output.path.display()
    );
    Ok(output)
}

fn file_stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}
