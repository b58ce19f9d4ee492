//! Canonical record fingerprints
//!
//! A fingerprint is compact JSON with object keys in sorted order, so two
//! records with the same content but different field order compare equal.
//! Scalar keys are stringified the way JSON does it; a mapping where two keys
//! stringify to the same text (`1` and `'1'`) has no fingerprint.

use crate::domain::Record;
use serde_json::{Map, Number, Value as JsonValue};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Two keys of one mapping that share a canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
}

pub fn fingerprint(record: &Record) -> Result<String, KeyCollision> {
    Ok(canonical_string(&canonical_mapping(record.fields())?))
}

/// Primary sort key of a record: its `type` field.
///
/// Missing or null types sort as the empty string; non-string types sort by
/// their canonical JSON text.
pub fn type_key(record: &Record) -> Result<String, KeyCollision> {
    Ok(match record.record_type() {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => canonical_string(&canonical(other)?),
    })
}

fn canonical_string(value: &JsonValue) -> String {
    // Serializing a serde_json::Value only fails for non-string map keys,
    // which `canonical` never produces.
    serde_json::to_string(value).unwrap_or_default()
}

fn canonical(value: &Value) -> Result<JsonValue, KeyCollision> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => canonical_number(n),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Sequence(items) => {
            JsonValue::Array(items.iter().map(canonical).collect::<Result<_, _>>()?)
        }
        Value::Mapping(fields) => canonical_mapping(fields)?,
        Value::Tagged(tagged) => {
            let mut map = Map::new();
            map.insert(tagged.tag.to_string(), canonical(&tagged.value)?);
            JsonValue::Object(map)
        }
    })
}

fn canonical_mapping(fields: &Mapping) -> Result<JsonValue, KeyCollision> {
    // Sort explicitly so the result does not depend on serde_json's map backing.
    let mut sorted: BTreeMap<String, JsonValue> = BTreeMap::new();
    for (k, v) in fields {
        let key = canonical_key(k)?;
        if sorted.contains_key(&key) {
            return Err(KeyCollision { key });
        }
        sorted.insert(key, canonical(v)?);
    }
    Ok(JsonValue::Object(sorted.into_iter().collect()))
}

fn canonical_key(key: &Value) -> Result<String, KeyCollision> {
    Ok(match key {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => canonical_string(&canonical(other)?),
    })
}

fn canonical_number(n: &serde_yaml::Number) -> JsonValue {
    if let Some(i) = n.as_i64() {
        JsonValue::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        JsonValue::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(n.to_string()))
    }
}
