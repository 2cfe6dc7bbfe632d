use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span, warn};

use crate::extract::{DocumentRecord, ExtractionRecord, FieldExtractor};
use crate::output::write_records;
use crate::processor::{ProcessorRegistry, TextSource};
use crate::sanitize;
use crate::worker::WorkerPool;

use super::config::PipelineConfig;
use super::error::PipelineError;

pub struct Pipeline {
    source: Box<dyn TextSource>,
    extractor: FieldExtractor,
    workers: usize,
}

/// Outcome counts for a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[DocumentRecord]) -> Self {
        let failed = records.iter().filter(|r| r.is_failure()).count();
        Self {
            total: records.len(),
            succeeded: records.len() - failed,
            failed,
        }
    }
}

impl Pipeline {
    /// Production constructor: Tesseract/poppler OCR and default text analysis.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let source = ProcessorRegistry::new(&config.ocr);
        let extractor = FieldExtractor::from_config(&config.extraction);

        Self::new(Box::new(source), extractor).with_workers(config.workers)
    }

    /// Sequential pipeline over an arbitrary text source.
    pub fn new(source: Box<dyn TextSource>, extractor: FieldExtractor) -> Self {
        Self {
            source,
            extractor,
            workers: 1,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Recognizes and extracts one document. Never fails: problems become an
    /// error record carrying the file name.
    pub fn process_document(&self, path: &Path) -> DocumentRecord {
        let filename = sanitize::redact_path(path);
        let _span = info_span!("document", file = %filename).entered();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(path)))
            .unwrap_or_else(|payload| Err(PipelineError::Aborted(panic_message(&payload))));

        match outcome {
            Ok(record) => {
                debug!("Document extracted");
                DocumentRecord::Extracted(record)
            }
            Err(e) => {
                warn!("Document failed: {}", e);
                DocumentRecord::failed(e.to_string(), filename)
            }
        }
    }

    /// One record per path, in input order.
    pub fn process_all(&self, paths: &[PathBuf]) -> Vec<DocumentRecord> {
        info!(
            documents = paths.len(),
            workers = self.workers,
            "Processing batch"
        );

        let records = if self.workers > 1 && paths.len() > 1 {
            WorkerPool::new(self, self.workers).run(paths)
        } else {
            paths.iter().map(|p| self.process_document(p)).collect()
        };

        let summary = BatchSummary::from_records(&records);
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch complete"
        );

        records
    }

    /// Processes the batch and writes every record to `output`. Only a failed
    /// write fails the run; per-document problems are in the file.
    pub fn run_to_file(&self, paths: &[PathBuf], output: &Path) -> crate::Result<BatchSummary> {
        let records = self.process_all(paths);
        write_records(output, &records)?;
        Ok(BatchSummary::from_records(&records))
    }

    fn run(&self, path: &Path) -> Result<ExtractionRecord, PipelineError> {
        let text = {
            let _step = info_span!("recognize").entered();
            self.step_recognize(path)?
        };

        Ok(self.extractor.extract(&text))
    }

    fn step_recognize(&self, path: &Path) -> Result<String, PipelineError> {
        let text = self.source.recognize(path)?;
        debug!(chars = text.len(), "Text recognized");
        Ok(text)
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ExtractionConfig;
    use crate::error::ProcessError;
    use crate::extract::language::{DetectionError, LanguageDetector};
    use crate::extract::segment::UnicodeSentences;
    use crate::extract::Summarizer;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Serves text from memory keyed by file name; unknown names fail like a
    /// missing file, names starting with "panic" panic.
    struct MemorySource {
        documents: HashMap<String, String>,
    }

    impl MemorySource {
        fn new(documents: &[(&str, &str)]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(name, text)| (name.to_string(), text.to_string()))
                    .collect(),
            }
        }
    }

    impl TextSource for MemorySource {
        fn recognize(&self, path: &Path) -> Result<String, ProcessError> {
            let name = sanitize::redact_path(path);
            if name.starts_with("panic") {
                panic!("tesseract crashed");
            }
            self.documents
                .get(&name)
                .cloned()
                .ok_or_else(|| ProcessError::OcrFailed(format!("cannot read {}", name)))
        }
    }

    struct AlwaysFrench;

    impl LanguageDetector for AlwaysFrench {
        fn detect(&self, _text: &str) -> Result<String, DetectionError> {
            Ok("fr".to_string())
        }
    }

    fn pipeline(documents: &[(&str, &str)]) -> Pipeline {
        let config = ExtractionConfig::default();
        let summarizer = Summarizer::new(
            Arc::new(AlwaysFrench),
            Arc::new(UnicodeSentences::new()),
            config.supported_languages.clone(),
        );
        Pipeline::new(
            Box::new(MemorySource::new(documents)),
            FieldExtractor::new(&config, summarizer),
        )
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/scans").join(n)).collect()
    }

    #[test]
    fn test_process_document_success() {
        let pipeline = pipeline(&[(
            "a.pdf",
            "Dénomination (en entier) : ACME\nN° d'entreprise : 0123.456.789",
        )]);

        let record = pipeline.process_document(Path::new("/scans/a.pdf"));
        let extracted = record.as_extracted().expect("extracted record");
        assert_eq!(extracted.company_name.as_deref(), Some("ACME"));
        assert_eq!(extracted.company_identifier.as_deref(), Some("0123 456 789"));
        assert_eq!(extracted.document_purpose, None);
    }

    #[test]
    fn test_process_document_failure_records_basename() {
        let pipeline = pipeline(&[]);

        let record = pipeline.process_document(Path::new("/scans/missing.pdf"));
        let error = record.as_error().expect("error record");
        assert_eq!(error.file, "missing.pdf");
        assert_eq!(error.message, "OCR failed: cannot read missing.pdf");
    }

    #[test]
    fn test_panic_is_isolated_to_document() {
        let pipeline = pipeline(&[("ok.pdf", "N° d'entreprise : 111")]);

        let records = pipeline.process_all(&paths(&["panic.pdf", "ok.pdf"]));
        assert_eq!(records.len(), 2);

        let error = records[0].as_error().expect("error record");
        assert_eq!(error.file, "panic.pdf");
        assert!(error.message.contains("tesseract crashed"));
        assert!(records[1].as_extracted().is_some());
    }

    #[test]
    fn test_process_all_preserves_order_sequentially() {
        let pipeline = pipeline(&[
            ("1.pdf", "N° d'entreprise : 111"),
            ("3.pdf", "N° d'entreprise : 333"),
        ]);

        let records = pipeline.process_all(&paths(&["1.pdf", "2.pdf", "3.pdf"]));

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].as_extracted().unwrap().company_identifier.as_deref(),
            Some("111")
        );
        assert_eq!(records[1].as_error().unwrap().file, "2.pdf");
        assert_eq!(
            records[2].as_extracted().unwrap().company_identifier.as_deref(),
            Some("333")
        );
    }

    #[test]
    fn test_process_all_preserves_order_with_workers() {
        let names: Vec<String> = (0..40).map(|i| format!("{:02}.pdf", i)).collect();
        let texts: Vec<String> = (0..40)
            .map(|i| format!("N° d'entreprise : {}", 100 + i))
            .collect();
        let documents: Vec<(&str, &str)> = names
            .iter()
            .zip(&texts)
            .filter(|(name, _)| !name.starts_with("13"))
            .map(|(n, t)| (n.as_str(), t.as_str()))
            .collect();

        let pipeline = pipeline(&documents).with_workers(4);
        let inputs: Vec<&str> = names.iter().map(String::as_str).collect();
        let records = pipeline.process_all(&paths(&inputs));

        assert_eq!(records.len(), 40);
        for (i, record) in records.iter().enumerate() {
            if i == 13 {
                assert_eq!(record.as_error().unwrap().file, "13.pdf");
            } else {
                let expected = (100 + i).to_string();
                assert_eq!(
                    record.as_extracted().unwrap().company_identifier.as_deref(),
                    Some(expected.as_str())
                );
            }
        }
    }

    #[test]
    fn test_empty_batch() {
        let pipeline = pipeline(&[]).with_workers(3);
        assert!(pipeline.process_all(&[]).is_empty());
    }

    #[test]
    fn test_with_workers_clamps_to_one() {
        assert_eq!(pipeline(&[]).with_workers(0).workers(), 1);
    }

    #[test]
    fn test_batch_summary() {
        let records = vec![
            DocumentRecord::Extracted(ExtractionRecord::default()),
            DocumentRecord::failed("boom", "b.pdf"),
            DocumentRecord::Extracted(ExtractionRecord::default()),
        ];

        assert_eq!(
            BatchSummary::from_records(&records),
            BatchSummary {
                total: 3,
                succeeded: 2,
                failed: 1,
            }
        );
    }

    #[test]
    fn test_run_to_file_writes_records_and_summarizes() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("out").join("results.json");
        let pipeline = pipeline(&[("a.pdf", "N° d'entreprise : 111")]);

        let summary = pipeline
            .run_to_file(&paths(&["a.pdf", "b.pdf"]), &output)
            .unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                total: 2,
                succeeded: 1,
                failed: 1,
            }
        );
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written[0]["Company Identifier"], "111");
        assert_eq!(written[1]["File"], "b.pdf");
    }

    #[test]
    fn test_run_to_file_reports_unwritable_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let pipeline = pipeline(&[("a.pdf", "N° d'entreprise : 111")]);

        let result = pipeline.run_to_file(&paths(&["a.pdf"]), &blocker.join("results.json"));

        assert!(matches!(result, Err(crate::GazetteError::Output(_))));
    }

    #[test]
    fn test_from_config_builds_pipeline() {
        let config = PipelineConfig {
            workers: 2,
            ..PipelineConfig::default()
        };
        assert_eq!(Pipeline::from_config(&config).workers(), 2);
    }
}
