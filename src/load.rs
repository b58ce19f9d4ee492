//! Zone document loading

use crate::domain::ZoneDocument;
use crate::error::ZoneError;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Read and parse a zone document.
///
/// An empty file loads as an empty document. Any other top level that is not
/// a mapping is a [`ZoneError::MalformedDocument`].
pub fn load_document(path: &Path) -> Result<ZoneDocument, ZoneError> {
    let content = fs::read_to_string(path)
        .map_err(|source| ZoneError::Read { path: path.to_path_buf(), source })?;
    parse_document(&content, path)
}

pub fn parse_document(content: &str, path: &Path) -> Result<ZoneDocument, ZoneError> {
    if is_blank(content) {
        return Ok(ZoneDocument::new());
    }

    let mut raw: Value = serde_yaml::from_str(content)
        .map_err(|source| ZoneError::Parse { path: path.to_path_buf(), source })?;
    // Resolve `<<: *anchor` merge keys before records are classified.
    raw.apply_merge().map_err(|source| ZoneError::Parse { path: path.to_path_buf(), source })?;

    let mapping = match raw {
        Value::Null => return Ok(ZoneDocument::new()),
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(ZoneError::MalformedDocument {
                path: path.to_path_buf(),
                reason: "top-level structure must be a mapping".to_string(),
            })
        }
    };

    let mut document = ZoneDocument::new();
    for (key, value) in mapping {
        let name = match key {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(ZoneError::MalformedDocument {
                    path: path.to_path_buf(),
                    reason: format!("zone names must be strings, found {:?}", other),
                })
            }
        };
        document.insert(name, value);
    }
    Ok(document)
}

fn is_blank(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| line.is_empty() || line.starts_with('#'))
}
