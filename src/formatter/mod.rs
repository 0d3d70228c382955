//! Output formatting for exported documents
//!
//! - `extjson`: relaxed Extended JSON conversion
//! - `json`: indented serialization of the export result

mod extjson;
mod json;

pub use extjson::ExtendedJsonConverter;
pub use json::JsonFormatter;
