use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::errors::LoadError;

/// Reads `path` in full and parses it as a JSON document.
///
/// The file handle is released before returning on every path. No shape
/// checks happen here; callers interpret the returned document.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::MissingFile { path: path.to_path_buf() },
        _ => LoadError::Unreadable { path: path.to_path_buf(), source },
    })?;

    let document = serde_json::from_str::<Value>(&raw)
        .map_err(|source| LoadError::MalformedJson { path: path.to_path_buf(), source })?;

    tracing::debug!(
        event_name = "sales.load.document",
        path = %path.display(),
        bytes = raw.len(),
        "input document parsed"
    );

    Ok(document)
}
