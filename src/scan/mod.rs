//! Zone discovery

use crate::diagnostics::Diagnostics;
use crate::domain::Config;
use anyhow::Result;

pub mod scanner;

pub use scanner::{ScanStats, ZoneGroup, ZoneScanner};

/// Scan `config.zones_dir` with the configured symlink policy.
pub fn scan_zones(
    config: &Config,
    diagnostics: &mut dyn Diagnostics,
) -> Result<(Vec<ZoneGroup>, ScanStats)> {
    let mut scanner =
        ZoneScanner::new(config.zones_dir.clone()).follow_symlinks(config.follow_symlinks);
    let groups = scanner.scan(diagnostics)?;
    let stats = scanner.stats().clone();
    Ok((groups, stats))
}
