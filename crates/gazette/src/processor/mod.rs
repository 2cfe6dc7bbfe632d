//! Adapters turning a document on disk into recognized text.

pub mod image;
pub mod ocr;
pub mod pdf;
pub mod text;

use std::path::Path;
use std::sync::Arc;

use crate::config::schema::{DocumentFormat, OcrConfig};
use crate::error::ProcessError;

pub use ocr::{OcrEngine, TesseractOcr};
pub use pdf::{PdfProcessor, PdftoppmRasterizer, Rasterizer};

/// Anything that can produce the raw text of a document.
pub trait TextSource: Send + Sync {
    fn recognize(&self, path: &Path) -> Result<String, ProcessError>;
}

pub trait DocumentProcessor: Send + Sync {
    fn process(&self, path: &Path) -> Result<String, ProcessError>;
    fn supports(&self, format: DocumentFormat) -> bool;
}

/// Routes a path to the processor for its extension.
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn DocumentProcessor>>,
}

impl ProcessorRegistry {
    /// Tesseract + poppler for PDFs and images, plain reads for text.
    pub fn new(ocr_config: &OcrConfig) -> Self {
        let tesseract = TesseractOcr::new(&ocr_config.languages);
        tracing::debug!(
            languages = tesseract.languages(),
            dpi = ocr_config.dpi,
            "Configured OCR"
        );
        let ocr: Arc<dyn OcrEngine> = Arc::new(tesseract);
        let rasterizer = Box::new(PdftoppmRasterizer::new(ocr_config.dpi));

        Self::with_processors(vec![
            Box::new(PdfProcessor::new(rasterizer, Arc::clone(&ocr))),
            Box::new(image::ImageProcessor::new(ocr)),
            Box::new(text::TextProcessor::new()),
        ])
    }

    pub fn with_processors(processors: Vec<Box<dyn DocumentProcessor>>) -> Self {
        Self { processors }
    }

    pub fn process(&self, path: &Path) -> Result<String, ProcessError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let format = DocumentFormat::from_extension(extension)
            .ok_or_else(|| ProcessError::UnsupportedFormat(extension.to_string()))?;

        self.processors
            .iter()
            .find(|p| p.supports(format))
            .ok_or_else(|| ProcessError::UnsupportedFormat(extension.to_string()))?
            .process(path)
    }
}

impl TextSource for ProcessorRegistry {
    fn recognize(&self, path: &Path) -> Result<String, ProcessError> {
        self.process(path)
    }
}
