use std::path::PathBuf;

use crate::extract::DocumentRecord;

/// A document queued for a worker, tagged with its position in the batch.
#[derive(Debug, Clone)]
pub struct Job {
    pub index: usize,
    pub source_path: PathBuf,
}

impl Job {
    pub fn new(index: usize, source_path: PathBuf) -> Self {
        Self { index, source_path }
    }
}

#[derive(Debug)]
pub struct JobResult {
    pub index: usize,
    pub record: DocumentRecord,
}

impl JobResult {
    pub fn new(job: &Job, record: DocumentRecord) -> Self {
        Self {
            index: job.index,
            record,
        }
    }

    pub fn success(&self) -> bool {
        !self.record.is_failure()
    }
}
