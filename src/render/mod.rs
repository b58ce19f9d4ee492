//! Output rendering (compiled zones, sync configuration)

pub mod sync_config;
pub mod zone_file;

pub use sync_config::{build_sync_config, SyncConfig};
pub use zone_file::{render_document, render_zone, write_document, zone_file_path};
