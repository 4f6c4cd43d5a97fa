//! JSON import and export of review batches.
//!
//! The input document is an array of objects. Each object may carry `filePath`,
//! `response`, `usage`, and a prior `status`; any other fields are carried
//! through untouched. The exported document is the same array, in the same
//! order, with `status` set on every element, pretty-printed with two-space
//! indentation so successive exports diff cleanly.
//!
//! # Example
//!
//! ```rust
//! use verdict_core::codec;
//! use verdict_core::RecordStore;
//!
//! let items = codec::import(r#"[{"filePath": "a.txt", "response": "hi"}]"#)?;
//! let mut store = RecordStore::default();
//! store.load(items);
//! let text = codec::export(&store)?;
//! assert!(text.contains(r#""status": "none""#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

use serde_json::Value;

use crate::error::{ExportError, ImportError};
use crate::store::RecordStore;
use crate::types::RawItem;

/// Conventional file name for an exported batch.
pub const DEFAULT_EXPORT_FILE: &str = "reviewed.json";

/// Parses `text` into a batch of raw items.
///
/// # Errors
///
/// - [`ImportError::MalformedDocument`] if `text` is not valid JSON.
/// - [`ImportError::NotAnArray`] if the root value is not an array.
pub fn import(text: &str) -> Result<Vec<RawItem>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::MalformedDocument)?;
    items_from_value(value)
}

/// Converts an already-parsed document into a batch.
///
/// Array elements that are not objects become empty records, so the batch keeps
/// one entry per element.
///
/// # Errors
///
/// Returns [`ImportError::NotAnArray`] if `value` is not an array.
pub fn items_from_value(value: Value) -> Result<Vec<RawItem>, ImportError> {
    let Value::Array(elements) = value else {
        return Err(ImportError::NotAnArray);
    };
    Ok(elements
        .into_iter()
        .map(|element| match element {
            Value::Object(map) => map,
            other => {
                tracing::debug!(kind = json_kind(&other), "non-object element imported as empty record");
                RawItem::new()
            }
        })
        .collect())
}

/// Renders the store, decisions merged in, as a pretty-printed JSON array.
///
/// The active filter and search play no part: every record is exported.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if serialization fails.
pub fn export(store: &RecordStore) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&store.serialize())?)
}

/// Writes the export document to `path`, followed by a newline.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be written.
pub fn write_export(path: &Path, store: &RecordStore) -> Result<usize, ExportError> {
    let mut text = export(store)?;
    text.push('\n');
    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), records = store.len(), "exported reviewed batch");
    Ok(store.len())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Decision;
    use pretty_assertions::assert_eq;

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(import("{not json"), Err(ImportError::MalformedDocument(_))));
        assert!(matches!(import(""), Err(ImportError::MalformedDocument(_))));
    }

    #[test]
    fn non_array_root_is_rejected() {
        assert!(matches!(import(r#"{"filePath": "a"}"#), Err(ImportError::NotAnArray)));
        assert!(matches!(import("42"), Err(ImportError::NotAnArray)));
    }

    #[test]
    fn non_object_elements_become_empty_records() {
        let items = import(r#"[1, {"filePath": "a"}, "x"]"#).unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_empty());
        assert_eq!(items[1]["filePath"], "a");
        assert!(items[2].is_empty());
    }

    #[test]
    fn export_is_two_space_pretty_printed() {
        let mut store = RecordStore::default();
        store.load(import(r#"[{"filePath":"a.txt","response":"hi"}]"#).unwrap());
        store.set(0, Decision::Accepted);
        let expected = "[\n  {\n    \"filePath\": \"a.txt\",\n    \"response\": \"hi\",\n    \"status\": \"accepted\"\n  }\n]";
        assert_eq!(export(&store).unwrap(), expected);
    }

    #[test]
    fn empty_store_exports_empty_array() {
        assert_eq!(export(&RecordStore::default()).unwrap(), "[]");
    }

    #[test]
    fn write_export_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let mut store = RecordStore::default();
        store.load(import(r#"[{"filePath":"a"},{"filePath":"b","status":"rejected"}]"#).unwrap());

        let written = write_export(&path, &store).unwrap();
        assert_eq!(written, 2);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("]\n"));
        let reread = import(&text).unwrap();
        assert_eq!(reread[0]["status"], "none");
        assert_eq!(reread[1]["status"], "rejected");
    }

    #[test]
    fn write_export_reports_io_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("reviewed.json");
        let result = write_export(&path, &RecordStore::default());
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
