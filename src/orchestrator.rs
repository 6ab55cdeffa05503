// Fan-out of one worker per source, join barrier, final ranking.

use futures::future::join_all;
use indicatif::ProgressBar;
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tracing::{debug, info, warn};

use crate::accumulator::SpeakerAccumulator;
use crate::error::{Result, TallyError};
use crate::ranking::{rank, RankedResult};
use crate::source::{Source, DEFAULT_BUFFER_SIZE};
use crate::stats::RunStats;
use crate::worker::{tally_source, SourceReport, WorkerSummary};

/// Configuration for a tally run
#[derive(Debug, Clone)]
pub struct TallyConfig {
    /// Read buffer per file source
    pub buffer_size: usize,
    /// Fail the run if any source fails instead of reporting it
    pub require_all: bool,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            require_all: false,
        }
    }
}

/// A source that did not contribute fully
#[derive(Debug)]
pub struct SourceFailure {
    pub source: String,
    pub error: TallyError,
}

/// Everything a run produces
#[derive(Debug)]
pub struct TallyOutcome {
    pub ranked: RankedResult,
    /// Failed sources, in input order
    pub failures: Vec<SourceFailure>,
    pub stats: RunStats,
}

impl TallyOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Orchestrator {
    config: TallyConfig,
    progress: Option<ProgressBar>,
}

impl Orchestrator {
    pub fn new(config: TallyConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Tick `progress` once per finished source
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    /// Tally every source concurrently and rank the result.
    ///
    /// Each source gets its own tokio task on the multi-threaded runtime.
    /// The snapshot is taken only after every task has been joined, so no
    /// writer is active when the tallies are read. Per-source failures are
    /// returned in the outcome; with `require_all` they fail the run.
    pub async fn run<I>(&self, sources: I) -> Result<TallyOutcome>
    where
        I: IntoIterator<Item = Source>,
    {
        let run_start = SystemTime::now();
        let start_time = Instant::now();
        let tally = Arc::new(SpeakerAccumulator::new());

        let (labels, handles): (Vec<String>, Vec<_>) = sources
            .into_iter()
            .map(|source| {
                let label = source.label();
                let tally = Arc::clone(&tally);
                let progress = self.progress.clone();
                let buffer_size = self.config.buffer_size;

                let handle = tokio::spawn(async move {
                    let report = tally_source(source, buffer_size, &tally).await;
                    if let Some(progress) = progress {
                        progress.inc(1);
                    }
                    report
                });
                (label, handle)
            })
            .unzip();

        info!("Spawned {} source workers", handles.len());

        // Join barrier: every worker has finished (or died) past this point
        let joined = join_all(handles).await;

        let reports: Vec<SourceReport> = labels
            .into_iter()
            .zip(joined)
            .map(|(label, result)| {
                result.unwrap_or_else(|join_error| {
                    warn!("Worker for {} aborted: {}", label, join_error);
                    SourceReport {
                        error: Some(TallyError::WorkerAborted {
                            label: label.clone(),
                            message: join_error.to_string(),
                        }),
                        label,
                        summary: WorkerSummary::default(),
                        duration: start_time.elapsed(),
                    }
                })
            })
            .collect();

        let tallies = match Arc::try_unwrap(tally) {
            Ok(tally) => tally.into_tallies(),
            Err(shared) => {
                debug!(
                    "Accumulator still referenced after join, copying {} speakers",
                    shared.len()
                );
                shared.snapshot()
            }
        };
        let stats = RunStats::from_reports(run_start, start_time.elapsed(), &reports, tallies.len());
        let ranked = rank(tallies);

        let failures: Vec<SourceFailure> = reports
            .into_iter()
            .filter_map(|report| {
                report.error.map(|error| SourceFailure {
                    source: report.label,
                    error,
                })
            })
            .collect();

        info!(
            "Tally complete: {} sources, {} failed, {} speakers, {} words in {}ms",
            stats.source_stats.len(),
            failures.len(),
            ranked.len(),
            stats.total_words,
            stats.total_processing_time_ms
        );

        if self.config.require_all && !failures.is_empty() {
            for failure in &failures {
                warn!("Required source failed: {}", failure.error);
            }
            return Err(TallyError::IncompleteRun {
                failed: failures.len(),
                total: stats.source_stats.len(),
            });
        }

        Ok(TallyOutcome {
            ranked,
            failures,
            stats,
        })
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(TallyConfig::default())
    }
}
