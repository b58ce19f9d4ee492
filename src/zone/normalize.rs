//! Record-set normalization

use crate::domain::{Record, RecordValue};
use crate::error::ZoneError;
use serde_yaml::Value;

/// Classify a raw document value.
///
/// Non-mapping elements inside a sequence are dropped. Scalars and tagged
/// values are rejected; the `Err` carries a description of what was found.
pub fn classify(value: &Value) -> Result<RecordValue, &'static str> {
    match value {
        Value::Null => Ok(RecordValue::Absent),
        Value::Mapping(fields) => Ok(RecordValue::Single(Record::new(fields.clone()))),
        Value::Sequence(items) => Ok(RecordValue::Many(
            items
                .iter()
                .filter_map(Value::as_mapping)
                .map(|fields| Record::new(fields.clone()))
                .collect(),
        )),
        other => Err(describe(other)),
    }
}

/// Normalize the value stored under `name` into a list of records.
pub fn normalize_records(apex: &str, name: &str, value: &Value) -> Result<Vec<Record>, ZoneError> {
    classify(value).map(RecordValue::into_records).map_err(|found| ZoneError::InvalidRecordShape {
        apex: apex.to_string(),
        name: name.to_string(),
        found,
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
