use std::path::Path;

use crate::config::schema::DocumentFormat;
use crate::error::ProcessError;
use crate::processor::DocumentProcessor;

/// Text that was already recognized, e.g. an OCR transcript saved earlier.
#[derive(Debug, Default)]
pub struct TextProcessor;

impl TextProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentProcessor for TextProcessor {
    fn process(&self, path: &Path) -> Result<String, ProcessError> {
        std::fs::read_to_string(path).map_err(|e| ProcessError::ReadDocument {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        matches!(format, DocumentFormat::Text)
    }
}
