//! JSON formatting for export results
//!
//! Serializes the collection-to-documents mapping as indented JSON, with
//! BSON types rendered through the Extended JSON converter.

use mongodb::bson::Document;
use serde_json::{Map, Value as JsonValue};

use super::extjson::ExtendedJsonConverter;
use crate::config::OUTPUT_INDENT;
use crate::error::Result;
use crate::export::ExportResult;

/// JSON formatter with configurable indentation
pub struct JsonFormatter {
    /// Indentation width
    indent: usize,

    /// Converter for BSON to Extended JSON
    converter: ExtendedJsonConverter,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    ///
    /// # Arguments
    /// * `indent` - Number of spaces per indentation level
    pub fn new(indent: usize) -> Self {
        Self {
            indent,
            converter: ExtendedJsonConverter::new(),
        }
    }

    /// Format the whole export result as one JSON object
    ///
    /// Collections keep the order in which they were enumerated.
    pub fn format_export(&self, result: &ExportResult) -> Result<Vec<u8>> {
        let mut root = Map::new();
        for sample in result.collections() {
            root.insert(sample.name.clone(), self.documents_to_json(&sample.documents));
        }

        self.to_pretty_bytes(&JsonValue::Object(root))
    }

    fn documents_to_json(&self, docs: &[Document]) -> JsonValue {
        JsonValue::Array(
            docs.iter()
                .map(|doc| self.converter.convert_document(doc))
                .collect(),
        )
    }

    /// Serialize a value with the configured indentation
    fn to_pretty_bytes<T: serde::Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(OUTPUT_INDENT)
    }
}
