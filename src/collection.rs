use serde_json::Map;
use serde_json::Value;

/// One entity row within a collection document. The remote store enforces no
/// schema, so records stay as raw JSON objects.
pub(crate) type Record = Map<String, Value>;

/// Locates the record array inside a fetched collection payload. The store
/// returns the same data under several shapes depending on how the document
/// was last written: an object keyed by the field name, a one-element array
/// wrapping such an object, or the bare array itself. Anything else counts
/// as an empty collection, never an error.
pub(crate) fn extract_records(payload: &Value, field_key: &str) -> Vec<Record> {
    match payload {
        Value::Object(document) => records_from(document.get(field_key)),
        Value::Array(elements) => {
            if let Some(Value::Object(first)) = elements.first()
                && first.contains_key(field_key)
            {
                return records_from(first.get(field_key));
            }
            elements.iter().filter_map(as_record).collect()
        }
        _ => Vec::new(),
    }
}

fn records_from(value: Option<&Value>) -> Vec<Record> {
    match value {
        Some(Value::Array(elements)) => elements.iter().filter_map(as_record).collect(),
        _ => Vec::new(),
    }
}

fn as_record(value: &Value) -> Option<Record> {
    match value {
        Value::Object(fields) => Some(fields.clone()),
        _ => None,
    }
}

/// Re-wraps the in-memory list into the full-document shape the store
/// accepts on PUT: `{ "id": <collectionId>, "<fieldKey>": [Record, ...] }`.
pub(crate) fn wrap_document(collection_id: u64, field_key: &str, records: &[Record]) -> Value {
    let mut document = Map::new();
    document.insert("id".to_string(), Value::from(collection_id));
    document.insert(
        field_key.to_string(),
        Value::Array(records.iter().cloned().map(Value::Object).collect()),
    );
    Value::Object(document)
}

/// The record id, tolerating both numeric and stringified-number values.
pub(crate) fn record_id(record: &Record) -> Option<u64> {
    match record.get("id") {
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(raw)) => raw.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn find_record<'a>(records: &'a [Record], id: u64) -> Option<&'a Record> {
    records.iter().find(|record| record_id(record) == Some(id))
}

/// Ids are assigned client-side as `max(existing ids) + 1`. Not safe against
/// two clients inserting concurrently; the store offers nothing better.
pub(crate) fn next_id(records: &[Record]) -> u64 {
    records.iter().filter_map(record_id).max().unwrap_or(0) + 1
}

/// Assigns the next id and appends. Returns the assigned id.
pub(crate) fn insert(records: &mut Vec<Record>, mut record: Record) -> u64 {
    let id = next_id(records);
    record.insert("id".to_string(), Value::from(id));
    records.push(record);
    id
}

/// Shallow-merges `patch` into the record with the given id. An unknown id
/// is logged and ignored; the caller must not resync in that case since the
/// list did not change.
pub(crate) fn update(records: &mut [Record], id: u64, patch: Record) -> bool {
    let Some(record) = records
        .iter_mut()
        .find(|record| record_id(record) == Some(id))
    else {
        eprintln!("update for unknown record id {id} ignored");
        return false;
    };
    for (field, value) in patch {
        record.insert(field, value);
    }
    true
}

/// Filters the record with the given id out of the list.
pub(crate) fn remove(records: &mut Vec<Record>, id: u64) -> bool {
    let len_before = records.len();
    records.retain(|record| record_id(record) != Some(id));
    records.len() != len_before
}

/// Case-insensitive substring search across the named fields. An empty or
/// whitespace-only query returns the full list unfiltered.
pub(crate) fn filter_records(records: &[Record], query: &str, fields: &[&str]) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| {
            fields.iter().any(|field| {
                record
                    .get(*field)
                    .is_some_and(|value| search_text(value).to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

/// The string representation a field is matched against.
pub(crate) fn search_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The field value as display-ready raw text, without any formatting rules
/// applied. Missing and null fields come back empty.
pub(crate) fn field_str(record: &Record, field: &str) -> String {
    record.get(field).map(search_text).unwrap_or_default()
}
