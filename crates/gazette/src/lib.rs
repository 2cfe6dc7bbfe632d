pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod processor;
pub mod sanitize;
pub mod worker;

pub use config::{load_config, validate_config, Config, DocumentFormat};
pub use error::{ConfigError, GazetteError, OutputError, ProcessError, Result, WorkerError};
pub use extract::{DocumentRecord, ErrorRecord, ExtractionRecord, FieldExtractor, Summarizer};
pub use output::write_records;
pub use pipeline::{BatchSummary, Pipeline, PipelineConfig, PipelineError};
pub use processor::{ProcessorRegistry, TextSource};

/// Worker count matching the machine's logical CPUs.
pub fn available_workers() -> usize {
    num_cpus::get().max(1)
}
