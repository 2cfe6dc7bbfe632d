use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use gazette::config::{load_config, validate_config, Config};
use gazette::{Pipeline, PipelineConfig};

const DEFAULT_OUTPUT: &str = "extracted_information_final.json";

/// Extracts company facts from scanned legal-gazette publications.
#[derive(Parser, Debug)]
#[command(name = "gazette", version, about)]
struct Cli {
    /// Documents to process, in output order
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// JSON file receiving one record per document
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Extraction config (JSON); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worker threads; 0 uses every logical CPU
    #[arg(short, long)]
    workers: Option<usize>,

    /// Tesseract language packs, e.g. "fra,nld"
    #[arg(long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Rasterization resolution for PDF pages
    #[arg(long)]
    dpi: Option<u32>,
}

impl Cli {
    fn resolve_config(&self) -> gazette::Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(workers) = self.workers {
            config.workers = if workers == 0 {
                gazette::available_workers()
            } else {
                workers
            };
        }
        if let Some(languages) = &self.languages {
            config.ocr.languages = languages.clone();
        }
        if let Some(dpi) = self.dpi {
            config.ocr.dpi = dpi;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    info!("Starting gazette v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.resolve_config().context("Failed to load configuration")?;
    let pipeline = Pipeline::from_config(&PipelineConfig::from_config(&config));
    info!(
        documents = cli.paths.len(),
        workers = pipeline.workers(),
        "Extracting"
    );

    let summary = pipeline
        .run_to_file(&cli.paths, &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    if summary.failed > 0 {
        warn!(
            "{} of {} documents could not be processed",
            summary.failed, summary.total
        );
    }
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        "Wrote {}",
        cli.output.display()
    );

    Ok(())
}
