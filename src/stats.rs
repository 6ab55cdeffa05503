// Run statistics, written as JSON when --stats-out is given

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::worker::SourceReport;

/// Per-source processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SourceStats {
    /// Source label (file path or in-memory label)
    pub source: String,
    pub lines_read: u64,
    pub dialogue_lines: u64,
    pub words_counted: u64,
    pub processing_time_ms: u64,
    /// "success" or "failed"
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl From<&SourceReport> for SourceStats {
    fn from(report: &SourceReport) -> Self {
        Self {
            source: report.label.clone(),
            lines_read: report.summary.lines_read,
            dialogue_lines: report.summary.dialogue_lines,
            words_counted: report.summary.words_counted,
            processing_time_ms: millis(report.duration),
            status: if report.is_success() { "success" } else { "failed" }.to_string(),
            error: report.error.as_ref().map(ToString::to_string),
        }
    }
}

/// Whole-run statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Unix timestamp (seconds) at which the run started
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub sources_processed: usize,
    pub sources_failed: usize,
    pub total_lines_read: u64,
    pub total_dialogue_lines: u64,
    pub total_words: u64,
    /// Distinct speakers in the final tally
    pub speakers: usize,
    pub source_stats: Vec<SourceStats>,
}

impl RunStats {
    pub fn from_reports(
        run_start: SystemTime,
        elapsed: Duration,
        reports: &[SourceReport],
        speakers: usize,
    ) -> Self {
        let source_stats: Vec<SourceStats> = reports.iter().map(SourceStats::from).collect();
        let sources_failed = source_stats.iter().filter(|s| s.error.is_some()).count();

        Self {
            run_start: run_start
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            total_processing_time_ms: millis(elapsed),
            sources_processed: source_stats.len() - sources_failed,
            sources_failed,
            total_lines_read: source_stats.iter().map(|s| s.lines_read).sum(),
            total_dialogue_lines: source_stats.iter().map(|s| s.dialogue_lines).sum(),
            total_words: source_stats.iter().map(|s| s.words_counted).sum(),
            speakers,
            source_stats,
        }
    }
}

/// Write `stats` as pretty JSON to `path`
pub async fn write_stats_file(path: &Path, stats: &RunStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;

    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
