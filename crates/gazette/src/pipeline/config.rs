use crate::config::schema::{ExtractionConfig, OcrConfig};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub ocr: OcrConfig,
    pub extraction: ExtractionConfig,
    pub workers: usize,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ocr: config.ocr.clone(),
            extraction: config.extraction.clone(),
            workers: config.workers,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
