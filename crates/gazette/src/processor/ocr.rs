use std::io::Cursor;

use crate::error::ProcessError;

/// Image bytes in, recognized text out.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image_data: &[u8]) -> Result<String, ProcessError>;
}

/// Tesseract through `leptess`, one engine instance per image.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    languages: String,
}

impl TesseractOcr {
    pub fn new(languages: &[String]) -> Self {
        let languages = if languages.is_empty() {
            "eng".to_string()
        } else {
            languages.join("+")
        };

        Self { languages }
    }

    /// Tesseract language hint, e.g. `eng+fra+deu+nld`.
    pub fn languages(&self) -> &str {
        &self.languages
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image_data: &[u8]) -> Result<String, ProcessError> {
        let _span = tracing::info_span!("processor.ocr", languages = %self.languages).entered();

        let img = image::load_from_memory(image_data)
            .map_err(|e| ProcessError::OcrFailed(format!("Failed to load image: {}", e)))?;

        // leptess reads PNG reliably regardless of the source encoding
        let mut png_data = Vec::new();
        img.write_to(&mut Cursor::new(&mut png_data), image::ImageFormat::Png)
            .map_err(|e| ProcessError::OcrFailed(format!("Failed to convert image: {}", e)))?;

        let mut lt = leptess::LepTess::new(None, &self.languages).map_err(|e| {
            ProcessError::OcrFailed(format!("Failed to initialize Tesseract: {}", e))
        })?;

        lt.set_image_from_mem(&png_data)
            .map_err(|e| ProcessError::OcrFailed(format!("Failed to set image for OCR: {}", e)))?;

        lt.get_utf8_text()
            .map_err(|e| ProcessError::OcrFailed(format!("Failed to read text: {}", e)))
    }
}
