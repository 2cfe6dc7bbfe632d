use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::error::OutputError;
use crate::extract::DocumentRecord;
use crate::sanitize;

/// Pretty JSON with four-space indentation. Non-ASCII text is written as-is.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, OutputError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');

    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes the whole batch as one JSON array, creating parent directories.
pub fn write_records(path: &Path, records: &[DocumentRecord]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let content = to_pretty_json(records)?;
    std::fs::write(path, content).map_err(|e| OutputError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(
        file = %sanitize::redact_path(path),
        records = records.len(),
        "Results written"
    );
    Ok(())
}
