pub mod config;
pub mod error;
pub mod runner;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use runner::{BatchSummary, Pipeline};
