//! Parallel batch conversion
//!
//! Each job is an independent read/write pair, so jobs are spread over a
//! rayon pool without any coordination beyond collecting the results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::config::Config;
use crate::error::{DxxError, Result};
use crate::processing::common::{swap_extension, Endpoint};
use crate::processing::processor::{ConversionResult, DxxProcessor};

#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ConversionJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), output: output.into() }
    }
}

#[derive(Debug)]
pub struct JobOutcome {
    pub job: ConversionJob,
    pub result: Result<ConversionResult>,
}

#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
    pub processing_time_secs: f64,
    pub worker_count: usize,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ConversionJob, &DxxError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.job, e)))
    }

    pub fn total_samples(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|r| r.sample_count)
            .sum()
    }
}

pub struct ParallelConverter {
    processor: DxxProcessor,
    pool: rayon::ThreadPool,
    worker_count: usize,
}

impl ParallelConverter {
    pub fn new(config: Config) -> Result<Self> {
        let worker_count = config.workers().max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .build()
            .map_err(|e| DxxError::config(format!("Failed to build worker pool: {}", e)))?;

        Ok(Self {
            processor: DxxProcessor::new(config),
            pool,
            worker_count,
        })
    }

    /// Build one job per input, deriving each output by swapping the
    /// extension for `target`.
    pub fn plan(inputs: &[PathBuf], target: Endpoint, out_dir: Option<&Path>) -> Result<Vec<ConversionJob>> {
        inputs
            .iter()
            .map(|input| {
                let output = swap_extension(input, target, out_dir)?;
                Ok(ConversionJob::new(input.clone(), output))
            })
            .collect()
    }

    /// Run every job; a failing job does not stop the others.
    pub fn process_batch(&self, jobs: Vec<ConversionJob>) -> BatchReport {
        let start = Instant::now();
        log::info!("Converting {} files with {} workers", jobs.len(), self.worker_count);

        let outcomes: Vec<JobOutcome> = self.pool.install(|| {
            jobs.into_par_iter()
                .map(|job| {
                    let result = self.processor.process_file(&job.input, &job.output);
                    if let Err(e) = &result {
                        log::debug!("{} -> {} failed: {}", job.input.display(), job.output.display(), e);
                    }
                    JobOutcome { job, result }
                })
                .collect()
        });

        BatchReport {
            outcomes,
            processing_time_secs: start.elapsed().as_secs_f64(),
            worker_count: self.worker_count,
        }
    }
}
