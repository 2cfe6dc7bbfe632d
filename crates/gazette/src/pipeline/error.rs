use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Processing(#[from] crate::error::ProcessError),

    #[error("Extraction aborted: {0}")]
    Aborted(String),
}
