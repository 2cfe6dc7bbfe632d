//! Deterministic collaborators for the pipeline.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use gazette::config::ExtractionConfig;
use gazette::extract::{DetectionError, LanguageDetector, UnicodeSentences};
use gazette::{FieldExtractor, ProcessError, Summarizer, TextSource};

/// Reports the same detection outcome for every input.
pub struct FixedLanguage(pub Option<&'static str>);

impl LanguageDetector for FixedLanguage {
    fn detect(&self, _text: &str) -> Result<String, DetectionError> {
        self.0
            .map(str::to_string)
            .ok_or(DetectionError::Undetermined)
    }
}

/// Text keyed by file name. Missing names fail the way an OCR crash would.
#[derive(Default)]
pub struct ScriptedSource {
    pages: HashMap<String, String>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file_name: &str, text: &str) -> Self {
        self.pages.insert(file_name.to_string(), text.to_string());
        self
    }
}

impl TextSource for ScriptedSource {
    fn recognize(&self, path: &Path) -> Result<String, ProcessError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.pages
            .get(name)
            .cloned()
            .ok_or_else(|| ProcessError::OcrFailed(format!("tesseract exited on {}", name)))
    }
}

/// Extractor with default vocabulary and a detector pinned to `language`.
pub fn extractor_detecting(language: Option<&'static str>) -> FieldExtractor {
    let config = ExtractionConfig::default();
    let summarizer = Summarizer::new(
        Arc::new(FixedLanguage(language)),
        Arc::new(UnicodeSentences::new()),
        config.supported_languages.clone(),
    );
    FieldExtractor::new(&config, summarizer)
}
