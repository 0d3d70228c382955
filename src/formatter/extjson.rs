//! MongoDB Extended JSON conversion
//!
//! Renders BSON values as relaxed Extended JSON so types without a JSON
//! counterpart (ObjectId, DateTime, Binary, Decimal128, ...) survive in
//! textual form: `{"$oid": "..."}`, `{"$date": "..."}`, `{"$binary": {...}}`.

use bson::{Bson, DateTime, Document};
use chrono::SecondsFormat;
use serde_json::{Map, Value as JsonValue};

/// Last millisecond of year 9999; later dates have no ISO-8601 form.
const MAX_ISO_DATE_MILLIS: i64 = 253_402_300_799_999;

/// Converter producing relaxed Extended JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedJsonConverter;

impl ExtendedJsonConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert a single BSON value
    pub fn convert(&self, value: &Bson) -> JsonValue {
        match value {
            Bson::DateTime(dt) => convert_date(dt)
                .unwrap_or_else(|| value.clone().into_relaxed_extjson()),
            Bson::Document(doc) => self.convert_document(doc),
            Bson::Array(items) => {
                JsonValue::Array(items.iter().map(|item| self.convert(item)).collect())
            }
            other => other.clone().into_relaxed_extjson(),
        }
    }

    /// Convert a document, keeping its key order
    pub fn convert_document(&self, doc: &Document) -> JsonValue {
        let map: Map<String, JsonValue> = doc
            .iter()
            .map(|(key, value)| (key.clone(), self.convert(value)))
            .collect();
        JsonValue::Object(map)
    }
}

/// ISO-8601 `$date` with millisecond precision for dates between 1970 and 9999
///
/// Other dates fall back to the `$numberLong` form.
fn convert_date(dt: &DateTime) -> Option<JsonValue> {
    let millis = dt.timestamp_millis();
    if !(0..=MAX_ISO_DATE_MILLIS).contains(&millis) {
        return None;
    }

    let iso = dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true);
    Some(serde_json::json!({ "$date": iso }))
}
