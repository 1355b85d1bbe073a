//! Generation pipeline.
//!
//! [`RunContext`] carries everything a run needs (config, parser, invoker,
//! naming) and is built explicitly by the caller; nothing is global. The
//! [`Generator`] runs the phases in order:
//!
//! 1. confirm OpenSCAD is available (fatal)
//! 2. log the OpenSCAD version (verbose only, informational)
//! 3. parse the CSV catalog (fatal, all-or-nothing)
//! 4. create the output directory (fatal)
//! 5. dry run: report planned file names; otherwise schedule every job and
//!    aggregate the outcomes
//!
//! Phases 1, 3 and 4 abort before any job is dispatched. Job failures in
//! phase 5 never stop other jobs; they surface as a summary error afterwards.

use crate::aggregate::{GenerationSummary, ResultAggregator};
use crate::config::Config;
use crate::error::{Result, SamplesError};
use crate::invoker::{OpenScadInvoker, ToolInvoker};
use crate::naming::NamingPolicy;
use crate::parser::{CsvRecordParser, RecordParser};
use crate::record::Record;
use crate::scheduler::{GenerationScheduler, Job};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Everything a run depends on.
pub struct RunContext {
    pub config: Config,
    parser: Box<dyn RecordParser>,
    invoker: Box<dyn ToolInvoker>,
    naming: NamingPolicy,
}

impl RunContext {
    pub fn new(config: Config, parser: Box<dyn RecordParser>, invoker: Box<dyn ToolInvoker>) -> Self {
        let naming = NamingPolicy::new(config.output_extension.clone());
        Self {
            config,
            parser,
            invoker,
            naming,
        }
    }

    /// Production context: CSV parser and a discovered OpenSCAD.
    ///
    /// A missing OpenSCAD is an environment error.
    pub fn from_config(config: Config) -> Result<Self> {
        let invoker = OpenScadInvoker::discover(config.openscad_path.as_deref(), config.template_path())
            .map_err(|e| SamplesError::Environment(e.to_string()))?;
        let parser = CsvRecordParser::new(config.detect_header);

        Ok(Self::new(config, Box::new(parser), Box::new(invoker)))
    }
}

/// A job as reported by a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedJob {
    pub filename: String,
    pub output_path: PathBuf,
    pub arguments: Vec<String>,
}

impl From<&Job<'_>> for PlannedJob {
    fn from(job: &Job<'_>) -> Self {
        Self {
            filename: job.filename.clone(),
            output_path: job.output_path.clone(),
            arguments: job.arguments.clone(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// Nothing was generated; these files would have been, in input order.
    DryRun { planned: Vec<PlannedJob> },
    /// Every job succeeded.
    Generated(GenerationSummary),
}

/// Runs the generation pipeline for one context.
pub struct Generator {
    ctx: RunContext,
}

impl Generator {
    pub fn new(ctx: RunContext) -> Self {
        Self { ctx }
    }

    /// Run every phase.
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - Dry run, or every job succeeded
    /// * `Err(SamplesError::Environment)` - OpenSCAD unavailable; nothing parsed
    /// * `Err(SamplesError::Format)` - Malformed CSV; no jobs run
    /// * `Err(SamplesError::Resource)` - Output directory could not be created
    /// * `Err(SamplesError::Generation)` - All jobs ran, at least one failed
    pub fn run(&self) -> Result<RunReport> {
        let config = &self.ctx.config;

        self.ctx
            .invoker
            .check_available()
            .map_err(|e| SamplesError::Environment(e.to_string()))?;

        if config.verbose {
            match self.ctx.invoker.version() {
                Ok(version) => info!(version = %version, "using OpenSCAD"),
                Err(e) => warn!(error = %e, "could not determine OpenSCAD version"),
            }
        }

        let records = self.ctx.parser.parse_file(&config.csv_file)?;
        info!(
            count = records.len(),
            csv = %config.csv_file.display(),
            "found filament samples to process"
        );

        let output_dir = config.output_dir();
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            SamplesError::Resource(format!(
                "failed to create output directory '{}': {}",
                output_dir.display(),
                e
            ))
        })?;

        if config.dry_run {
            info!("dry run mode - no files will be generated");
            let planned = self.plan(&records);
            for job in &planned {
                info!(file = %job.filename, "would generate");
            }
            return Ok(RunReport::DryRun { planned });
        }

        let scheduler = GenerationScheduler::new(config.max_workers);
        debug!(workers = scheduler.worker_count(), "dispatching jobs");
        let outcomes = scheduler.run(&records, &self.ctx.naming, &output_dir, self.ctx.invoker.as_ref());
        let summary = ResultAggregator::aggregate(outcomes);

        for failure in &summary.failures {
            warn!(file = %failure.filename, error = %failure.cause, "failed to generate");
        }

        let summary = summary.into_result()?;
        info!(count = summary.succeeded, "successfully generated all files");
        Ok(RunReport::Generated(summary))
    }

    /// Planned jobs for `records`, in input order. Performs no I/O.
    pub fn plan(&self, records: &[Record]) -> Vec<PlannedJob> {
        let output_dir = self.ctx.config.output_dir();
        records
            .iter()
            .map(|record| PlannedJob::from(&Job::new(record, &self.ctx.naming, &output_dir)))
            .collect()
    }
}
