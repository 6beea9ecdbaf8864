//! Batch runs over an input table.
//!
//! [`BatchRunner::run_all`] returns exactly one row per input record, in
//! input order, no matter how many articles fail. Articles are started in
//! input order with at most `concurrency` in flight; each slot pauses for
//! `delay` after its request so remote servers are not hammered. With the
//! default concurrency of 1 this is a plain sequential run.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use lexis_core::BatchConfig;
//!
//! let config = BatchConfig::builder()
//!     .delay(Duration::from_millis(250))
//!     .concurrency(4)
//!     .progress_every(25)
//!     .build();
//! assert_eq!(config.concurrency, 4);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{error, info, warn};

use crate::LexisError;
use crate::pipeline::ArticlePipeline;
use crate::table::{InputRecord, OutputRow, write_csv};

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Pause after each request, per concurrency slot (default: 500ms).
    pub delay: Duration,

    /// Maximum number of articles in flight (default: 1).
    pub concurrency: usize,

    /// Log a progress line every this many completed rows (default: 10, 0 = never).
    pub progress_every: usize,

    /// Write intermediate results every this many completed rows.
    pub checkpoint_every: Option<usize>,

    /// Directory for intermediate result files.
    pub checkpoint_dir: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            concurrency: 1,
            progress_every: 10,
            checkpoint_every: None,
            checkpoint_dir: None,
        }
    }
}

impl BatchConfig {
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::new()
    }
}

/// Builder for BatchConfig.
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: BatchConfig::default() }
    }

    /// Sets the inter-request pause.
    pub fn delay(mut self, value: Duration) -> Self {
        self.config.delay = value;
        self
    }

    /// Sets the concurrency bound; values below 1 are raised to 1.
    pub fn concurrency(mut self, value: usize) -> Self {
        self.config.concurrency = value.max(1);
        self
    }

    /// Sets the progress logging interval.
    pub fn progress_every(mut self, value: usize) -> Self {
        self.config.progress_every = value;
        self
    }

    /// Enables intermediate result files in `dir` every `every` rows.
    pub fn checkpoint<P: AsRef<Path>>(mut self, dir: P, every: usize) -> Self {
        if every > 0 {
            self.config.checkpoint_dir = Some(dir.as_ref().to_path_buf());
            self.config.checkpoint_every = Some(every);
        }
        self
    }

    /// Builds the config.
    pub fn build(self) -> BatchConfig {
        self.config
    }
}

impl Default for BatchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the article pipeline over many input records.
pub struct BatchRunner {
    pipeline: ArticlePipeline,
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(pipeline: ArticlePipeline, config: BatchConfig) -> Self {
        Self { pipeline, config }
    }

    /// Processes every record and returns one row per record, in input order.
    pub async fn run_all(&self, records: &[InputRecord]) -> Vec<OutputRow> {
        let total = records.len();
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks: JoinSet<(usize, OutputRow)> = JoinSet::new();
        let mut task_index: HashMap<Id, usize> = HashMap::new();
        let mut progress = Progress::new(total);

        for (index, record) in records.iter().enumerate() {
            while let Some(joined) = tasks.try_join_next() {
                self.settle(joined, &task_index, records, &mut progress);
            }

            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!(error = %e, "batch semaphore closed, remaining rows are zero");
                    break;
                }
            };

            let pipeline = self.pipeline.clone();
            let record = record.clone();
            let pause = if index + 1 < total { self.config.delay } else { Duration::ZERO };

            let handle = tasks.spawn(async move {
                let row = pipeline.run_one(&record).await;
                if !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }
                drop(permit);
                (index, row)
            });
            task_index.insert(handle.id(), index);
        }

        while let Some(joined) = tasks.join_next().await {
            self.settle(joined, &task_index, records, &mut progress);
        }

        progress
            .slots
            .into_iter()
            .zip(records)
            .map(|(slot, record)| slot.unwrap_or_else(|| OutputRow::zero(record)))
            .collect()
    }

    fn settle(
        &self, joined: Result<(usize, OutputRow), JoinError>, task_index: &HashMap<Id, usize>,
        records: &[InputRecord], progress: &mut Progress,
    ) {
        let (index, row) = match joined {
            Ok(done) => done,
            Err(e) => {
                let index = task_index.get(&e.id()).copied();
                let e = LexisError::from(e);
                let Some(index) = index else {
                    error!(error = %e, "unknown article task failed");
                    return;
                };
                let record = &records[index];
                warn!(url_id = %record.url_id, url = %record.url, error = %e, "recording zero row");
                (index, OutputRow::zero(record))
            }
        };

        progress.slots[index] = Some(row);
        progress.completed += 1;

        if self.config.progress_every > 0 && progress.completed % self.config.progress_every == 0 {
            info!("Completed {}/{} articles", progress.completed, progress.total);
        }

        if let (Some(every), Some(dir)) = (self.config.checkpoint_every, &self.config.checkpoint_dir)
            && every > 0
            && progress.completed % every == 0
        {
            write_checkpoint(dir, progress.completed / every, &progress.finished_rows());
        }
    }
}

struct Progress {
    slots: Vec<Option<OutputRow>>,
    completed: usize,
    total: usize,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self { slots: vec![None; total], completed: 0, total }
    }

    fn finished_rows(&self) -> Vec<OutputRow> {
        self.slots.iter().flatten().cloned().collect()
    }
}

/// Path of the `batch`-th intermediate result file in `dir`.
pub fn checkpoint_path(dir: &Path, batch: usize) -> PathBuf {
    dir.join(format!("intermediate_results_batch_{}.csv", batch))
}

fn write_checkpoint(dir: &Path, batch: usize, rows: &[OutputRow]) {
    let path = checkpoint_path(dir, batch);
    let result = std::fs::create_dir_all(dir)
        .map_err(LexisError::from)
        .and_then(|_| std::fs::File::create(&path).map_err(LexisError::from))
        .and_then(|file| write_csv(rows, file));

    match result {
        Ok(()) => info!(path = %path.display(), rows = rows.len(), "wrote intermediate results"),
        Err(e) => warn!(path = %path.display(), error = %e, "could not write intermediate results"),
    }
}
