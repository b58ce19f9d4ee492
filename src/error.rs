//! Error and warning taxonomy
//!
//! [`ZoneError`] is fatal: it aborts the run. [`Warning`] never aborts; it is
//! handed to a [`crate::Diagnostics`] sink and processing continues.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("malformed zone document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error(
        "invalid record shape for name '{name}' in zone {apex}: \
         expected a mapping or a list of mappings, found {found}"
    )]
    InvalidRecordShape { apex: String, name: String, found: &'static str },

    #[error("failed reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed writing {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed serializing document")]
    Serialize {
        #[from]
        source: serde_yaml::Error,
    },
}

/// Non-fatal conditions raised while discovering or merging zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A candidate subdomain file whose stem does not extend the apex domain,
    /// or is exactly the apex domain.
    SkippedSubdomainFile { apex: String, source: String },
    /// A zone directory without `<apex>.yml` or `<apex>.yaml`.
    MissingApexFile { apex: String, zone_dir: PathBuf },
    /// The zones root has no candidate directories at all.
    EmptyZoneSet { zones_dir: PathBuf },
}

impl Warning {
    /// Short machine-friendly tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Warning::SkippedSubdomainFile { .. } => "skipped_subdomain_file",
            Warning::MissingApexFile { .. } => "missing_apex_file",
            Warning::EmptyZoneSet { .. } => "empty_zone_set",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::SkippedSubdomainFile { apex, source } => {
                write!(f, "Skipping non-subdomain file for {}: {}", apex, source)
            }
            Warning::MissingApexFile { apex, zone_dir } => write!(
                f,
                "No apex file found for {} in {} (expected {}.{{yml,yaml}})",
                apex,
                zone_dir.display(),
                apex
            ),
            Warning::EmptyZoneSet { zones_dir } => {
                write!(f, "No zones found under {}", zones_dir.display())
            }
        }
    }
}
