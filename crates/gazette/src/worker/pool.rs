use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::error::WorkerError;
use crate::extract::DocumentRecord;
use crate::pipeline::Pipeline;
use crate::sanitize;
use crate::worker::job::{Job, JobResult};

/// Fans one batch out over scoped worker threads sharing a pipeline.
///
/// Results come back in completion order and are slotted by job index, so
/// the returned records line up with the input paths.
pub struct WorkerPool<'a> {
    pipeline: &'a Pipeline,
    worker_count: usize,
}

impl<'a> WorkerPool<'a> {
    pub fn new(pipeline: &'a Pipeline, worker_count: usize) -> Self {
        Self {
            pipeline,
            worker_count: worker_count.max(1),
        }
    }

    pub fn run(&self, paths: &[PathBuf]) -> Vec<DocumentRecord> {
        let worker_count = self.worker_count.min(paths.len().max(1));
        let mut slots: Vec<Option<DocumentRecord>> = vec![None; paths.len()];

        thread::scope(|scope| {
            let (job_sender, job_receiver) = bounded::<Job>(worker_count * 2);
            let (result_sender, result_receiver) = unbounded::<JobResult>();

            let mut workers = Vec::with_capacity(worker_count);
            for worker_id in 0..worker_count {
                let job_rx = job_receiver.clone();
                let result_tx = result_sender.clone();
                let pipeline = self.pipeline;

                let spawned = thread::Builder::new()
                    .name(format!("gazette-worker-{}", worker_id))
                    .spawn_scoped(scope, move || {
                        run_worker(worker_id, pipeline, job_rx, result_tx)
                    });

                match spawned {
                    Ok(handle) => workers.push(handle),
                    Err(e) => {
                        let err = WorkerError::SpawnFailed(e.to_string());
                        warn!("{}", err);
                    }
                }
            }

            // Workers hold the only remaining ends.
            drop(job_receiver);
            drop(result_sender);

            info!("Started {} workers", workers.len());

            let mut pending = paths.iter().enumerate();
            for (index, path) in pending.by_ref() {
                if let Err(e) = job_sender.send(Job::new(index, path.clone())) {
                    warn!("No worker accepted jobs, finishing on the calling thread");
                    let job = e.into_inner();
                    slots[job.index] = Some(self.pipeline.process_document(&job.source_path));
                    break;
                }
            }
            for (index, path) in pending {
                slots[index] = Some(self.pipeline.process_document(path));
            }
            drop(job_sender);

            collect_results(&result_receiver, &mut slots);

            for (i, worker) in workers.into_iter().enumerate() {
                if let Err(e) = worker.join() {
                    error!("Worker {} panicked: {:?}", i, e);
                } else {
                    debug!("Worker {} finished", i);
                }
            }
        });

        fill_slots(slots, paths)
    }
}

/// Turns slots no worker reported back into error records for their path.
fn fill_slots(slots: Vec<Option<DocumentRecord>>, paths: &[PathBuf]) -> Vec<DocumentRecord> {
    slots
        .into_iter()
        .zip(paths)
        .map(|(slot, path)| {
            slot.unwrap_or_else(|| {
                let file = sanitize::redact_path(path);
                warn!("No result for {}", file);
                DocumentRecord::failed(WorkerError::ChannelClosed.to_string(), file)
            })
        })
        .collect()
}

fn collect_results(results: &Receiver<JobResult>, slots: &mut [Option<DocumentRecord>]) {
    for result in results.iter() {
        if let Some(slot) = slots.get_mut(result.index) {
            *slot = Some(result.record);
        }
    }
}

fn run_worker(
    worker_id: usize,
    pipeline: &Pipeline,
    job_receiver: Receiver<Job>,
    result_sender: Sender<JobResult>,
) {
    debug!("Worker {} started", worker_id);

    for job in job_receiver.iter() {
        debug!(
            "Worker {} processing job {}: {}",
            worker_id,
            job.index,
            sanitize::redact_path(&job.source_path)
        );

        let result = JobResult::new(&job, pipeline.process_document(&job.source_path));
        debug!(
            "Worker {} finished job {} (success: {})",
            worker_id,
            result.index,
            result.success()
        );

        if let Err(e) = result_sender.send(result) {
            error!("Worker {} failed to send result: {}", worker_id, e);
            break;
        }
    }

    debug!("Worker {} stopped", worker_id);
}
