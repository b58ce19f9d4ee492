//! Library surface for zonebuild.
//!
//! The [`zone`] module holds the merge algorithm; [`scan`] and [`pipeline`]
//! feed it from a directory tree and write the results.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod utils;
pub mod zone;

pub use diagnostics::{CollectingDiagnostics, Diagnostics, TracingDiagnostics};
pub use domain::{CompiledZone, Config, Record, RecordSet, RecordValue, SubZone, ZoneDocument};
pub use error::{Warning, ZoneError};
pub use pipeline::{discover_and_build, BuildSummary};
pub use zone::merge_zone;
