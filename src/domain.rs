//! Core types shared by discovery, merging and rendering.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_TTL: u32 = 300;
pub const DEFAULT_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

/// Extensions recognised as zone documents, in apex-file probe order.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["yml", "yaml"];
pub const OUTPUT_EXTENSION: &str = "yaml";

/// Effective build settings after merging file config and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub zones_dir: PathBuf,
    pub output_dir: PathBuf,
    pub sync_config: PathBuf,
    pub default_ttl: u32,
    pub token_env: String,
    pub pagerules: bool,
    /// Follow symlinked zone directories and documents while scanning.
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zones_dir: PathBuf::from("zones"),
            output_dir: PathBuf::from("compiled"),
            sync_config: PathBuf::from("compiled.config.yml"),
            default_ttl: DEFAULT_TTL,
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            pagerules: false,
            follow_symlinks: true,
        }
    }
}

/// One DNS record. Opaque apart from the optional `type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Mapping);

impl Record {
    pub fn new(fields: Mapping) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Mapping {
        &self.0
    }

    pub fn record_type(&self) -> Option<&Value> {
        self.0.get("type")
    }
}

/// A raw record-set value as it appears in a zone document.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Absent,
    Single(Record),
    Many(Vec<Record>),
}

impl RecordValue {
    pub fn into_records(self) -> Vec<Record> {
        match self {
            RecordValue::Absent => Vec::new(),
            RecordValue::Single(record) => vec![record],
            RecordValue::Many(records) => records,
        }
    }
}

/// Name to raw record-set value, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneDocument {
    entries: Vec<(String, Value)>,
}

impl ZoneDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((name.into(), value));
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Value)> for ZoneDocument {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(n, v)| (n.into(), v)).collect() }
    }
}

/// A subdomain document tagged with its file stem, e.g. `api.v1.example.com`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubZone {
    pub stem: String,
    pub document: ZoneDocument,
}

impl SubZone {
    pub fn new(stem: impl Into<String>, document: ZoneDocument) -> Self {
        Self { stem: stem.into(), document }
    }
}

/// Output shape of one name: a lone record is emitted bare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordSet<'a> {
    Single(&'a Record),
    Many(&'a [Record]),
}

impl Serialize for RecordSet<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordSet::Single(record) => record.serialize(serializer),
            RecordSet::Many(records) => records.serialize(serializer),
        }
    }
}

/// Merged, deduplicated and sorted records for one apex domain.
///
/// Names iterate with the apex (`""`) first and the rest in ascending lexical
/// order. The apex key is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledZone {
    apex: String,
    names: BTreeMap<String, Vec<Record>>,
}

impl CompiledZone {
    pub(crate) fn new(apex: String, mut names: BTreeMap<String, Vec<Record>>) -> Self {
        names.entry(String::new()).or_default();
        Self { apex, names }
    }

    pub fn apex(&self) -> &str {
        &self.apex
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn records(&self, name: &str) -> Option<&[Record]> {
        self.names.get(name).map(Vec::as_slice)
    }

    pub fn record_set(&self, name: &str) -> Option<RecordSet<'_>> {
        self.names.get(name).map(|records| to_record_set(records))
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    pub fn record_count(&self) -> usize {
        self.names.values().map(Vec::len).sum()
    }
}

fn to_record_set(records: &[Record]) -> RecordSet<'_> {
    match records {
        [single] => RecordSet::Single(single),
        many => RecordSet::Many(many),
    }
}

impl Serialize for CompiledZone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        // BTreeMap order already puts "" first: it sorts below every other string.
        for (name, records) in &self.names {
            map.serialize_entry(name, &to_record_set(records))?;
        }
        map.end()
    }
}
