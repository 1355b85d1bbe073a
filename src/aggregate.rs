//! Outcome aggregation.
//!
//! Counts successes and failures over a finished run and keeps the per-file
//! failure causes as detail. Aggregation is read-only: it never influences
//! which jobs ran.

use crate::invoker::InvokeError;
use crate::scheduler::GenerationOutcome;
use serde::Serialize;
use thiserror::Error;

/// One failed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    pub filename: String,
    #[serde(serialize_with = "serialize_display")]
    pub cause: InvokeError,
}

/// Counts for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Sorted by filename.
    pub failures: Vec<JobFailure>,
}

impl GenerationSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// `Ok(self)` when nothing failed, otherwise a [`GenerationError`] carrying
    /// the failure count and every cause.
    pub fn into_result(self) -> Result<Self, GenerationError> {
        if self.is_success() {
            return Ok(self);
        }

        Err(GenerationError {
            failed: self.failed,
            total: self.total(),
            failures: self.failures,
        })
    }
}

/// A run finished with at least one failed job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("generation completed with {failed} of {total} jobs failed")]
pub struct GenerationError {
    pub failed: usize,
    pub total: usize,
    pub failures: Vec<JobFailure>,
}

/// Folds outcomes into a [`GenerationSummary`].
#[derive(Debug, Default)]
pub struct ResultAggregator {
    summary: GenerationSummary,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: GenerationOutcome<'_>) {
        match outcome.error {
            None => self.summary.succeeded += 1,
            Some(cause) => {
                self.summary.failed += 1;
                self.summary.failures.push(JobFailure {
                    filename: outcome.filename,
                    cause,
                });
            }
        }
    }

    pub fn finish(mut self) -> GenerationSummary {
        self.summary
            .failures
            .sort_by(|a, b| a.filename.cmp(&b.filename));
        self.summary
    }

    /// Aggregate a complete outcome sequence.
    pub fn aggregate<'a, I>(outcomes: I) -> GenerationSummary
    where
        I: IntoIterator<Item = GenerationOutcome<'a>>,
    {
        let mut aggregator = Self::new();
        for outcome in outcomes {
            aggregator.record(outcome);
        }
        aggregator.finish()
    }
}

fn serialize_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
