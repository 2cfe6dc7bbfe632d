//! Test harness for isolated batch runs.
//!
//! Documents are written as `.txt` files so the real processor registry can
//! read them without Tesseract or poppler installed.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_fs::TempDir;

use gazette::config::{Config, OcrConfig};
use gazette::{FieldExtractor, Pipeline, ProcessorRegistry};

pub struct TestHarness {
    temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let input_dir = temp_dir.path().join("input");
        std::fs::create_dir_all(&input_dir).expect("Failed to create input directory");
        let output_path = temp_dir.path().join("output").join("results.json");

        Self {
            temp_dir,
            input_dir,
            output_path,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes a document into the input directory and returns its path.
    pub fn add_document(&self, name: &str, content: &str) -> PathBuf {
        let path = self.input_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write document");
        path
    }

    /// Copies a file from `tests/fixtures/` into the input directory.
    pub fn add_fixture(&self, name: &str) -> PathBuf {
        let source = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name);
        let target = self.input_dir.join(name);
        std::fs::copy(&source, &target)
            .unwrap_or_else(|e| panic!("Failed to copy fixture {}: {}", name, e));
        target
    }

    /// Real registry for reading files, the given extractor for analysis.
    pub fn pipeline(&self, extractor: FieldExtractor, workers: usize) -> Pipeline {
        let registry = ProcessorRegistry::new(&OcrConfig::default());
        Pipeline::new(Box::new(registry), extractor).with_workers(workers)
    }

    /// Runs the batch, writes the output file and returns the parsed JSON.
    pub fn run(&self, pipeline: &Pipeline, paths: &[PathBuf]) -> serde_json::Value {
        pipeline
            .run_to_file(paths, &self.output_path)
            .expect("Failed to write results");
        self.read_output()
    }

    pub fn read_output(&self) -> serde_json::Value {
        let content =
            std::fs::read_to_string(&self.output_path).expect("Failed to read results file");
        serde_json::from_str(&content).expect("Results are not valid JSON")
    }

    pub fn default_config() -> Config {
        Config::default()
    }
}
