//! Bounded-concurrency generation scheduler.
//!
//! Every record becomes a [`Job`] before any work starts. A fixed pool of
//! scoped worker threads drains the job list through a shared atomic cursor,
//! so each job is claimed by exactly one worker. Workers send one
//! [`GenerationOutcome`] per job over a channel; the calling thread collects
//! them as they arrive. The scope end joins every worker before the outcomes
//! are returned.
//!
//! There is no fail-fast: a failed job never stops the others. Outcome order
//! follows completion, not submission.

use crate::invoker::{InvokeError, ToolInvoker};
use crate::naming::NamingPolicy;
use crate::record::Record;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use tracing::{debug, warn};

/// Lower bound for the worker pool.
pub const MIN_WORKERS: usize = 1;

/// Upper bound for the worker pool.
pub const MAX_WORKERS: usize = 32;

/// Clamp a requested worker count into `[MIN_WORKERS, MAX_WORKERS]`.
///
/// Zero and negative requests become one worker.
pub fn clamp_workers(requested: i64) -> usize {
    requested.clamp(MIN_WORKERS as i64, MAX_WORKERS as i64) as usize
}

/// Worker count derived from host parallelism, clamped.
pub fn default_worker_count() -> usize {
    let available = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(MIN_WORKERS);
    available.clamp(MIN_WORKERS, MAX_WORKERS)
}

/// One record bound to its output path and tool arguments.
#[derive(Debug, Clone)]
pub struct Job<'a> {
    pub record: &'a Record,
    pub filename: String,
    pub output_path: PathBuf,
    pub arguments: Vec<String>,
}

impl<'a> Job<'a> {
    pub fn new(record: &'a Record, naming: &NamingPolicy, output_dir: &Path) -> Self {
        let filename = naming.filename(record);
        Self {
            record,
            output_path: output_dir.join(&filename),
            arguments: naming.tool_arguments(record),
            filename,
        }
    }
}

/// Result of one job. Produced exactly once per submitted job.
#[derive(Debug, Clone)]
pub struct GenerationOutcome<'a> {
    pub record: &'a Record,
    pub filename: String,
    pub error: Option<InvokeError>,
}

impl GenerationOutcome<'_> {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Fixed-size worker pool for generation jobs.
#[derive(Debug, Clone, Copy)]
pub struct GenerationScheduler {
    worker_count: usize,
}

impl Default for GenerationScheduler {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
        }
    }
}

impl GenerationScheduler {
    /// Create a scheduler; `worker_count` is clamped to `[1, 32]`.
    pub fn new(worker_count: i64) -> Self {
        Self {
            worker_count: clamp_workers(worker_count),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Build one job per record and run them all.
    ///
    /// `output_dir` must already exist.
    pub fn run<'a>(
        &self,
        records: &'a [Record],
        naming: &NamingPolicy,
        output_dir: &Path,
        invoker: &dyn ToolInvoker,
    ) -> Vec<GenerationOutcome<'a>> {
        let jobs = records
            .iter()
            .map(|record| Job::new(record, naming, output_dir))
            .collect();

        self.execute(jobs, invoker)
    }

    /// Run prepared jobs to completion and return every outcome.
    pub fn execute<'a>(
        &self,
        jobs: Vec<Job<'a>>,
        invoker: &dyn ToolInvoker,
    ) -> Vec<GenerationOutcome<'a>> {
        let total = jobs.len();
        let cursor = AtomicUsize::new(0);
        let (sender, receiver) = mpsc::channel::<GenerationOutcome<'a>>();
        let mut outcomes = Vec::with_capacity(total);

        debug!(
            jobs = total,
            workers = self.worker_count,
            "starting generation workers"
        );

        thread::scope(|scope| {
            for worker in 0..self.worker_count {
                let sender = sender.clone();
                let jobs = &jobs;
                let cursor = &cursor;

                scope.spawn(move || {
                    while let Some(job) = jobs.get(cursor.fetch_add(1, Ordering::Relaxed)) {
                        let outcome = run_job(worker, job, invoker);
                        if sender.send(outcome).is_err() {
                            break;
                        }
                    }
                });
            }

            // Only worker-held senders remain, so the receiver ends when the
            // last worker exits.
            drop(sender);

            for outcome in receiver {
                let done = outcomes.len() + 1;
                match &outcome.error {
                    None => debug!(
                        file = %outcome.filename,
                        progress = %format!("{}/{}", done, total),
                        "generated"
                    ),
                    Some(err) => warn!(
                        file = %outcome.filename,
                        progress = %format!("{}/{}", done, total),
                        error = %err,
                        "generation failed"
                    ),
                }
                outcomes.push(outcome);
            }
        });

        outcomes
    }
}

fn run_job<'a>(worker: usize, job: &Job<'a>, invoker: &dyn ToolInvoker) -> GenerationOutcome<'a> {
    debug!(worker, file = %job.filename, "generating");

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        invoker.generate(&job.output_path, &job.arguments)
    }))
    .unwrap_or_else(|payload| Err(InvokeError::Panicked(panic_message(payload.as_ref()))));

    GenerationOutcome {
        record: job.record,
        filename: job.filename.clone(),
        error: result.err(),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
