//! Normalizing raw taxonomy payloads
//!
//! The taxonomy endpoint answers with either a bare array of categories or
//! an object wrapping that array in `data`. Records identify themselves with
//! `id` or, on some backends, `_id`; both strings and numbers are accepted.
//! Subcategories carry their leaves in `recordTypes`.
//!
//! Ids must be unique among siblings, since a node is addressed by the ids
//! on its path.

use super::error::LoadFailure;
use crate::taxonomy::{Category, RecordType, Subcategory, Taxonomy};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> Option<String> {
        match self {
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(text),
            Self::Number(number) => Some(number.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecordType {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(default, rename = "_id")]
    alt_id: Option<RawId>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawSubcategory {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(default, rename = "_id")]
    alt_id: Option<RawId>,
    name: String,
    #[serde(default, rename = "recordTypes")]
    record_types: Option<Vec<RawRecordType>>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(default, rename = "_id")]
    alt_id: Option<RawId>,
    name: String,
    #[serde(default)]
    subcategories: Option<Vec<RawSubcategory>>,
}

/// Prefer `id`, fall back to `_id`
fn resolve_id(
    id: Option<RawId>,
    alt_id: Option<RawId>,
    kind: &'static str,
    name: &str,
) -> Result<String, LoadFailure> {
    id.and_then(RawId::into_string)
        .or_else(|| alt_id.and_then(RawId::into_string))
        .ok_or_else(|| LoadFailure::MissingId {
            kind,
            name: name.to_string(),
        })
}

/// Reject the first id that appears twice among siblings
fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), LoadFailure> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LoadFailure::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

impl TryFrom<RawRecordType> for RecordType {
    type Error = LoadFailure;

    fn try_from(raw: RawRecordType) -> Result<Self, Self::Error> {
        let id = resolve_id(raw.id, raw.alt_id, "record type", &raw.name)?;
        Ok(Self::new(id, raw.name))
    }
}

impl TryFrom<RawSubcategory> for Subcategory {
    type Error = LoadFailure;

    fn try_from(raw: RawSubcategory) -> Result<Self, Self::Error> {
        let id = resolve_id(raw.id, raw.alt_id, "subcategory", &raw.name)?;
        let record_types: Vec<RecordType> = raw
            .record_types
            .unwrap_or_default()
            .into_iter()
            .map(RecordType::try_from)
            .collect::<Result<_, _>>()?;
        ensure_unique("record type", record_types.iter().map(|r| r.id.as_str()))?;
        Ok(Self::new(id, raw.name, record_types))
    }
}

impl TryFrom<RawCategory> for Category {
    type Error = LoadFailure;

    fn try_from(raw: RawCategory) -> Result<Self, Self::Error> {
        let id = resolve_id(raw.id, raw.alt_id, "category", &raw.name)?;
        let subcategories: Vec<Subcategory> = raw
            .subcategories
            .unwrap_or_default()
            .into_iter()
            .map(Subcategory::try_from)
            .collect::<Result<_, _>>()?;
        ensure_unique("subcategory", subcategories.iter().map(|s| s.id.as_str()))?;
        Ok(Self::new(id, raw.name, subcategories))
    }
}

/// Unwrap `{ "data": ... }` when present and non-null
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize an already parsed JSON payload
///
/// # Errors
///
/// Returns `LoadFailure::InvalidFormat` if the payload is not an array after
/// unwrapping `data`, `LoadFailure::Json` if a record has the wrong shape and
/// `LoadFailure::MissingId` if a record has neither `id` nor `_id` and
/// `LoadFailure::DuplicateId` if two siblings share an id.
pub fn ingest_value(value: Value) -> Result<Taxonomy, LoadFailure> {
    let payload = unwrap_data(value);
    let Value::Array(items) = payload else {
        return Err(LoadFailure::InvalidFormat(format!(
            "expected an array of categories, got {}",
            type_name(&payload)
        )));
    };

    let categories: Vec<Category> = items
        .into_iter()
        .map(|item| {
            let raw: RawCategory = serde_json::from_value(item)?;
            Category::try_from(raw)
        })
        .collect::<Result<_, _>>()?;
    ensure_unique("category", categories.iter().map(|c| c.id.as_str()))?;

    Ok(Taxonomy::new(categories))
}

/// Parse and normalize a JSON body
///
/// # Errors
///
/// Returns `LoadFailure::Json` for malformed JSON, otherwise see
/// [`ingest_value`].
pub fn parse_taxonomy(body: &str) -> Result<Taxonomy, LoadFailure> {
    let value: Value = serde_json::from_str(body)?;
    ingest_value(value)
}
