//! Zone directory scanner

use crate::diagnostics::Diagnostics;
use crate::domain::DOCUMENT_EXTENSIONS;
use crate::error::Warning;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One apex zone found on disk: its authoritative file plus subdomain files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneGroup {
    pub apex: String,
    pub zone_dir: PathBuf,
    pub apex_file: PathBuf,
    /// Sorted by file name.
    pub sub_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub candidates: usize,
    pub hidden_skipped: usize,
    pub missing_apex: usize,
    pub groups: usize,
    pub sub_files: usize,
}

/// Discovers apex zone groups below a zones root.
///
/// Every immediate, non-hidden subdirectory is a candidate apex. Directory
/// and file listings are sorted by name so results are independent of the
/// host filesystem's listing order.
pub struct ZoneScanner {
    root_path: PathBuf,
    extensions: Vec<String>,
    follow_symlinks: bool,
    stats: ScanStats,
}

impl ZoneScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            extensions: DOCUMENT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            follow_symlinks: true,
            stats: ScanStats::default(),
        }
    }

    /// Set accepted document extensions (without the leading dot), in the
    /// order apex files are probed.
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Set whether symlinked zone directories and files are followed
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Scan the zones root. Candidates without an apex file are reported to
    /// `diagnostics` and left out of the result.
    pub fn scan(&mut self, diagnostics: &mut dyn Diagnostics) -> Result<Vec<ZoneGroup>> {
        self.stats = ScanStats::default();

        if !self.root_path.is_dir() {
            anyhow::bail!("Zones directory does not exist: {}", self.root_path.display());
        }

        let mut groups = Vec::new();
        for zone_dir in self.list(&self.root_path, true) {
            let Some(apex) = zone_dir.file_name().and_then(|n| n.to_str()).map(str::to_string)
            else {
                tracing::debug!("Skipping non UTF-8 zone directory {}", zone_dir.display());
                continue;
            };

            if apex.starts_with('.') {
                self.stats.hidden_skipped += 1;
                continue;
            }
            self.stats.candidates += 1;

            let Some(apex_file) = self.find_apex_file(&zone_dir, &apex) else {
                self.stats.missing_apex += 1;
                diagnostics.warn(&Warning::MissingApexFile { apex, zone_dir });
                continue;
            };

            let sub_files: Vec<PathBuf> = self
                .list(&zone_dir, false)
                .into_iter()
                .filter(|p| p != &apex_file && self.is_document(p))
                .collect();

            tracing::debug!(
                apex = %apex,
                sub_files = sub_files.len(),
                "Discovered zone {}",
                apex_file.display()
            );
            self.stats.groups += 1;
            self.stats.sub_files += sub_files.len();
            groups.push(ZoneGroup { apex, zone_dir, apex_file, sub_files });
        }

        Ok(groups)
    }

    fn find_apex_file(&self, zone_dir: &Path, apex: &str) -> Option<PathBuf> {
        self.extensions
            .iter()
            .map(|ext| zone_dir.join(format!("{}.{}", apex, ext)))
            .find(|candidate| {
                if self.follow_symlinks {
                    candidate.is_file()
                } else {
                    fs::symlink_metadata(candidate).map(|m| m.is_file()).unwrap_or(false)
                }
            })
    }

    fn is_document(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        self.extensions.contains(&ext)
    }

    /// Immediate children of `dir` that are directories (or files), by name.
    fn list(&self, dir: &Path, dirs: bool) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(err) => {
                    tracing::debug!("Skipping unreadable entry under {}: {}", dir.display(), err);
                    None
                }
            })
            .filter(|e| if dirs { e.file_type().is_dir() } else { e.file_type().is_file() })
            .map(|e| e.into_path())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "'': {type: A, value: 10.0.0.1}\n").unwrap();
    }

    #[test]
    fn test_scan_finds_apex_and_subdomains() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("example.com/example.com.yml"));
        touch(&root.join("example.com/www.example.com.yaml"));
        touch(&root.join("example.com/api.example.com.yml"));
        fs::write(root.join("example.com/README.md"), "notes").unwrap();

        let mut diag = CollectingDiagnostics::new();
        let mut scanner = ZoneScanner::new(root.to_path_buf());
        let groups = scanner.scan(&mut diag).unwrap();

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.apex, "example.com");
        assert!(group.apex_file.ends_with("example.com.yml"));
        let names: Vec<_> =
            group.sub_files.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, vec!["api.example.com.yml", "www.example.com.yaml"]);
        assert_eq!(group.zone_dir, root.join("example.com"));
        assert_eq!(scanner.stats().sub_files, 2);
        assert!(diag.warnings.is_empty());
    }

    #[test]
    fn test_yml_is_preferred_and_yaml_twin_becomes_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("example.com/example.com.yml"));
        touch(&root.join("example.com/example.com.yaml"));

        let mut scanner = ZoneScanner::new(root.to_path_buf());
        let groups = scanner.scan(&mut CollectingDiagnostics::new()).unwrap();

        assert!(groups[0].apex_file.ends_with("example.com.yml"));
        assert_eq!(groups[0].sub_files.len(), 1);
        assert!(groups[0].sub_files[0].ends_with("example.com.yaml"));
    }

    #[test]
    fn test_yaml_apex_file_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("example.org/example.org.yaml"));

        let mut scanner = ZoneScanner::new(root.to_path_buf());
        let groups = scanner.scan(&mut CollectingDiagnostics::new()).unwrap();
        assert!(groups[0].apex_file.ends_with("example.org.yaml"));
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("example.com/example.com.yml"));
        touch(&root.join("example.com/mail.example.com.YML"));

        let mut scanner = ZoneScanner::new(root.to_path_buf());
        let groups = scanner.scan(&mut CollectingDiagnostics::new()).unwrap();
        assert_eq!(groups[0].sub_files.len(), 1);
    }

    #[test]
    fn test_hidden_dirs_and_loose_files_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join(".git/.git.yml"));
        touch(&root.join(".cache/.cache.yml"));
        touch(&root.join("stray.yml"));
        touch(&root.join("example.com/example.com.yml"));

        let mut scanner = ZoneScanner::new(root.to_path_buf());
        let groups = scanner.scan(&mut CollectingDiagnostics::new()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(scanner.stats().hidden_skipped, 2);
        assert_eq!(scanner.stats().candidates, 1);
    }

    #[test]
    fn test_missing_apex_file_warns_and_skips() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("example.net/www.example.net.yml"));
        touch(&root.join("example.com/example.com.yml"));

        let mut diag = CollectingDiagnostics::new();
        let mut scanner = ZoneScanner::new(root.to_path_buf());
        let groups = scanner.scan(&mut diag).unwrap();

        assert_eq!(groups.iter().map(|g| g.apex.as_str()).collect::<Vec<_>>(), vec!["example.com"]);
        assert_eq!(diag.warnings.len(), 1);
        assert!(diag.has_warning("missing_apex_file"));
        assert_eq!(scanner.stats().missing_apex, 1);
    }

    #[test]
    fn test_groups_are_sorted_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for apex in ["zeta.io", "alpha.dev", "middle.org"] {
            touch(&root.join(apex).join(format!("{apex}.yml")));
        }

        let mut scanner = ZoneScanner::new(root.to_path_buf());
        let groups = scanner.scan(&mut CollectingDiagnostics::new()).unwrap();
        let apexes: Vec<_> = groups.iter().map(|g| g.apex.as_str()).collect();
        assert_eq!(apexes, vec!["alpha.dev", "middle.org", "zeta.io"]);
    }

    #[test]
    fn test_custom_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("example.com/example.com.yaml"));
        touch(&root.join("example.com/api.example.com.yml"));

        let mut scanner =
            ZoneScanner::new(root.to_path_buf()).extensions(vec![".YAML".to_string()]);
        let groups = scanner.scan(&mut CollectingDiagnostics::new()).unwrap();
        assert!(groups[0].sub_files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_followed_unless_disabled() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let shared = temp_dir.path().join("shared");
        touch(&shared.join("example.org/example.org.yml"));
        touch(&shared.join("api.example.com.yml"));

        let root = temp_dir.path().join("zones");
        touch(&root.join("example.com/example.com.yml"));
        symlink(shared.join("example.org"), root.join("example.org")).unwrap();
        symlink(shared.join("api.example.com.yml"), root.join("example.com/api.example.com.yml"))
            .unwrap();

        let mut following = ZoneScanner::new(root.clone());
        let groups = following.scan(&mut CollectingDiagnostics::new()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].sub_files.len(), 1);

        let mut strict = ZoneScanner::new(root).follow_symlinks(false);
        let groups = strict.scan(&mut CollectingDiagnostics::new()).unwrap();
        assert_eq!(groups.iter().map(|g| g.apex.as_str()).collect::<Vec<_>>(), vec!["example.com"]);
        assert!(groups[0].sub_files.is_empty());
        assert_eq!(strict.stats().candidates, 1);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut scanner = ZoneScanner::new(temp_dir.path().join("zones"));
        assert!(scanner.scan(&mut CollectingDiagnostics::new()).is_err());
    }
}
