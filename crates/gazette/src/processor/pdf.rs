use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::schema::DocumentFormat;
use crate::error::ProcessError;
use crate::processor::ocr::OcrEngine;
use crate::processor::DocumentProcessor;

/// Renders every page of a PDF to PNG bytes, in page order.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<Vec<u8>>, ProcessError>;
}

/// Poppler based rasterizer (`pdftoppm`, `pdfinfo`).
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<Vec<u8>>, ProcessError> {
        let _span = tracing::info_span!("processor.rasterize", dpi = self.dpi).entered();

        let pdf_bytes = std::fs::read(pdf_path).map_err(|e| ProcessError::ReadDocument {
            path: pdf_path.to_path_buf(),
            source: e,
        })?;

        let page_count = count_pages(&pdf_bytes, pdf_path)?;
        debug!("Rendering {} page(s)", page_count);

        let scratch = ScratchDir::create()?;
        let mut pages = Vec::with_capacity(page_count);
        for page_num in 1..=page_count {
            pages.push(render_page(pdf_path, page_num, self.dpi, scratch.path())?);
        }

        Ok(pages)
    }
}

/// Per-document working directory, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn create() -> Result<Self, ProcessError> {
        let path = std::env::temp_dir().join(format!("gazette_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path).map_err(|e| {
            ProcessError::Rasterize(format!("Failed to create scratch directory: {}", e))
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            warn!("Failed to remove scratch directory: {}", e);
        }
    }
}

/// Page count from the PDF structure, or from `pdfinfo` when lopdf cannot
/// parse the file (broken cross-reference tables are common in scans).
fn count_pages(pdf_bytes: &[u8], pdf_path: &Path) -> Result<usize, ProcessError> {
    match lopdf::Document::load_mem(pdf_bytes) {
        Ok(doc) => Ok(doc.get_pages().len()),
        Err(e) => {
            warn!("lopdf failed to parse PDF: {}. Asking pdfinfo.", e);
            count_pages_with_pdfinfo(pdf_path)
        }
    }
}

fn count_pages_with_pdfinfo(pdf_path: &Path) -> Result<usize, ProcessError> {
    let output = Command::new("pdfinfo").arg(pdf_path).output().map_err(|e| {
        ProcessError::PdfProcessing(format!(
            "Failed to run pdfinfo: {}. Make sure poppler-utils is installed.",
            e
        ))
    })?;

    if !output.status.success() {
        return Err(ProcessError::PdfProcessing(format!(
            "pdfinfo failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(parse_pdfinfo_pages(&String::from_utf8_lossy(&output.stdout)).unwrap_or(1))
}

fn parse_pdfinfo_pages(stdout: &str) -> Option<usize> {
    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("Pages:"))
        .find_map(|count| count.trim().parse::<usize>().ok())
}

fn render_page(
    pdf_path: &Path,
    page_num: usize,
    dpi: u32,
    scratch: &Path,
) -> Result<Vec<u8>, ProcessError> {
    let output_prefix = scratch.join(format!("page_{}", page_num));
    let page = page_num.to_string();

    let output = Command::new("pdftoppm")
        .args(["-png", "-r", &dpi.to_string(), "-f", &page, "-l", &page])
        .arg(pdf_path)
        .arg(&output_prefix)
        .output()
        .map_err(|e| {
            ProcessError::Rasterize(format!(
                "Failed to run pdftoppm: {}. Make sure poppler-utils is installed.",
                e
            ))
        })?;

    if !output.status.success() {
        return Err(ProcessError::Rasterize(format!(
            "pdftoppm failed on page {}: {}",
            page_num,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    // pdftoppm zero-pads the page suffix to the width of the page count
    let candidates = [
        format!("{}-{}.png", output_prefix.display(), page_num),
        format!("{}-{:02}.png", output_prefix.display(), page_num),
        format!("{}-{:03}.png", output_prefix.display(), page_num),
    ];
    let image_path = candidates
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .ok_or_else(|| {
            ProcessError::Rasterize(format!("Rendered image for page {} not found", page_num))
        })?;

    std::fs::read(image_path).map_err(|e| {
        ProcessError::Rasterize(format!("Failed to read rendered page {}: {}", page_num, e))
    })
}

/// Rasterizes a PDF and OCRs each page; any failing page fails the document.
pub struct PdfProcessor {
    rasterizer: Box<dyn Rasterizer>,
    ocr: Arc<dyn OcrEngine>,
}

impl PdfProcessor {
    pub fn new(rasterizer: Box<dyn Rasterizer>, ocr: Arc<dyn OcrEngine>) -> Self {
        Self { rasterizer, ocr }
    }
}

impl DocumentProcessor for PdfProcessor {
    fn process(&self, path: &Path) -> Result<String, ProcessError> {
        let _span = tracing::info_span!("processor.pdf").entered();

        let pages = self.rasterizer.rasterize(path)?;

        let mut texts = Vec::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            let text = self.ocr.recognize(page)?;
            debug!(page = index + 1, chars = text.len(), "Page recognized");
            texts.push(text);
        }

        Ok(texts.join("\n"))
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        matches!(format, DocumentFormat::Pdf)
    }
}
