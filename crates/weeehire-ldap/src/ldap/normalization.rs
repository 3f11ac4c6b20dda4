//! Directory record normalization
//!
//! Raw records as handed out by directory clients carry bookkeeping next to
//! the attributes: a `count` field, integer keys indexing the attribute
//! names, a `dn` key that is always null. Attribute values may themselves be
//! `{count, 0, 1, ...}` maps. All of it is flattened into a
//! [`DirectoryEntry`] as soon as the record is received.

use crate::ldap::types::{is_multivalued, AttributeValue, DirectoryEntry};
use ldap3::SearchEntry;
use serde_json::{Map, Value};

/// Normalize a raw directory record.
///
/// Keys are lower-cased, `count`, `dn` and integer keys are dropped, and
/// every attribute keeps only its first value unless it is registered as
/// multivalued. Attributes without values are dropped.
pub fn normalize(raw: &Map<String, Value>) -> DirectoryEntry {
    let mut entry = DirectoryEntry::new();

    for (key, value) in raw {
        if is_bookkeeping_key(key) {
            continue;
        }
        if let Some(value) = normalize_values(key, raw_values(value)) {
            entry.insert(key, value);
        }
    }

    entry
}

/// Normalize an entry returned by an `ldap3` search
pub fn normalize_search_entry(raw: &SearchEntry) -> DirectoryEntry {
    let mut entry = DirectoryEntry::new();

    for (key, values) in &raw.attrs {
        if is_bookkeeping_key(key) {
            continue;
        }
        if let Some(value) = normalize_values(key, values.clone()) {
            entry.insert(key, value);
        }
    }

    entry
}

fn is_bookkeeping_key(key: &str) -> bool {
    key == "count" || key.eq_ignore_ascii_case("dn") || key.parse::<i64>().is_ok()
}

fn normalize_values(key: &str, mut values: Vec<String>) -> Option<AttributeValue> {
    if values.is_empty() {
        return None;
    }

    if is_multivalued(&key.to_lowercase()) {
        Some(AttributeValue::Multi(values))
    } else {
        Some(AttributeValue::Single(values.swap_remove(0)))
    }
}

/// Values of a raw attribute, in order
fn raw_values(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar).collect(),
        Value::Object(indexed) => {
            let mut items: Vec<(u64, String)> = indexed
                .iter()
                .filter_map(|(k, v)| Some((k.parse().ok()?, scalar(v)?)))
                .collect();
            items.sort_by_key(|(index, _)| *index);
            items.into_iter().map(|(_, v)| v).collect()
        }
        other => scalar(other).into_iter().collect(),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
