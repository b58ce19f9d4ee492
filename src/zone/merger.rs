//! Apex and subdomain document merging

use crate::diagnostics::Diagnostics;
use crate::domain::{CompiledZone, Record, SubZone, ZoneDocument};
use crate::error::{Warning, ZoneError};
use crate::zone::fingerprint::{fingerprint, type_key, KeyCollision};
use crate::zone::label::{relative_label, remap_name};
use crate::zone::normalize::normalize_records;
use std::collections::{BTreeMap, HashSet};

/// Merge an apex document and its subdomain documents into one zone.
///
/// Apex records come first for any name, followed by subdomain records in
/// the order `sub_zones` yields them. Subdomain stems that do not extend
/// `apex` are reported through `diagnostics` and ignored.
///
/// Each name's records are deduplicated by fingerprint (first occurrence
/// wins) and sorted by `(type, fingerprint)`, so the result does not depend
/// on input order. A record whose field names collide once stringified
/// (`1` and `'1'`) cannot be fingerprinted and fails the merge.
pub fn merge_zone<'a, I>(
    apex: &str,
    apex_document: &ZoneDocument,
    sub_zones: I,
    diagnostics: &mut dyn Diagnostics,
) -> Result<CompiledZone, ZoneError>
where
    I: IntoIterator<Item = &'a SubZone>,
{
    let mut merged: BTreeMap<String, Vec<Record>> = BTreeMap::new();

    for (name, value) in apex_document.entries() {
        let records = normalize_records(apex, name, value)?;
        merged.entry(name.to_string()).or_default().extend(records);
    }

    for sub in sub_zones {
        let Some(label) = relative_label(&sub.stem, apex) else {
            diagnostics.warn(&Warning::SkippedSubdomainFile {
                apex: apex.to_string(),
                source: sub.stem.clone(),
            });
            continue;
        };

        for (name, value) in sub.document.entries() {
            let remapped = remap_name(name, &label);
            let records = normalize_records(apex, &remapped, value)?;
            merged.entry(remapped).or_default().extend(records);
        }
    }

    let names = merged
        .into_iter()
        .map(|(name, records)| -> Result<(String, Vec<Record>), ZoneError> {
            let records = dedup_and_sort(records).map_err(|_| ZoneError::InvalidRecordShape {
                apex: apex.to_string(),
                name: name.clone(),
                found: "a record whose field names collide once stringified",
            })?;
            Ok((name, records))
        })
        .collect::<Result<_, ZoneError>>()?;

    Ok(CompiledZone::new(apex.to_string(), names))
}

fn dedup_and_sort(records: Vec<Record>) -> Result<Vec<Record>, KeyCollision> {
    let mut seen = HashSet::new();
    let mut keyed: Vec<(String, String, Record)> = Vec::with_capacity(records.len());

    for record in records {
        let fp = fingerprint(&record)?;
        if seen.insert(fp.clone()) {
            keyed.push((type_key(&record)?, fp, record));
        }
    }

    keyed.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    Ok(keyed.into_iter().map(|(_, _, record)| record).collect())
}
