//! Error types for importing and exporting review batches.
//!
//! Both enums use `thiserror`. Navigation, filtering, searching and decisions are
//! total operations and have no error type.

use thiserror::Error;

/// Why a batch could not be imported.
///
/// Either variant aborts the import as a whole: no partial batch is loaded and
/// an already-loaded session is left exactly as it was.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The content is not a parseable JSON document.
    #[error("invalid JSON document: {0}")]
    MalformedDocument(#[source] serde_json::Error),

    /// The document parsed, but its root is not an array of records.
    #[error("document root must be an array of objects")]
    NotAnArray,
}

/// Why a reviewed batch could not be written out.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize reviewed batch: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write reviewed batch: {0}")]
    Io(#[from] std::io::Error),
}
