//! Compiled zone file rendering

use crate::domain::{CompiledZone, OUTPUT_EXTENSION};
use crate::error::ZoneError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Render a compiled zone as YAML. Names keep their compiled order and record
/// fields keep their source order.
pub fn render_zone(zone: &CompiledZone) -> Result<String, ZoneError> {
    render_document(zone)
}

pub fn render_document<T: Serialize + ?Sized>(document: &T) -> Result<String, ZoneError> {
    Ok(serde_yaml::to_string(document)?)
}

/// Output location for `apex` inside `output_dir`.
pub fn zone_file_path(output_dir: &Path, apex: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", apex, OUTPUT_EXTENSION))
}

/// Write rendered content, creating parent directories as needed.
pub fn write_document(path: &Path, content: &str) -> Result<(), ZoneError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| ZoneError::Write { path: parent.to_path_buf(), source })?;
    }
    fs::write(path, content).map_err(|source| ZoneError::Write { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::domain::{SubZone, ZoneDocument};
    use crate::zone::merge_zone;
    use serde_yaml::Value;
    use tempfile::TempDir;

    fn zone(src: &str) -> CompiledZone {
        let value: Value = serde_yaml::from_str(src).expect("yaml");
        let doc: ZoneDocument = value
            .as_mapping()
            .expect("mapping")
            .iter()
            .map(|(k, v)| (k.as_str().expect("key").to_string(), v.clone()))
            .collect();
        let subs: Vec<SubZone> = Vec::new();
        merge_zone("example.com", &doc, &subs, &mut CollectingDiagnostics::new()).expect("merge")
    }

    #[test]
    fn rendered_zone_collapses_singletons_and_keeps_field_order() {
        let compiled =
            zone("{www: [{value: 1.1.1.1, type: A}], '': [{type: NS, value: ns1.example.net.}]}");
        let rendered = render_zone(&compiled).expect("render");
        similar_asserts::assert_eq!(
            rendered,
            "'':\n  type: NS\n  value: ns1.example.net.\nwww:\n  value: 1.1.1.1\n  type: A\n"
        );
    }

    #[test]
    fn empty_apex_renders_as_empty_list() {
        let rendered = render_zone(&zone("{}")).expect("render");
        assert_eq!(rendered, "'': []\n");
    }

    #[test]
    fn write_document_creates_parents() {
        let tmp = TempDir::new().expect("tmp");
        let path = zone_file_path(&tmp.path().join("nested/out"), "example.com");
        write_document(&path, "'': []\n").expect("write");
        assert!(path.ends_with("example.com.yaml"));
        assert_eq!(fs::read_to_string(path).expect("read"), "'': []\n");
    }
}
