// Per-source parsing state machine.
// Each worker owns its ParseState; only SpeakerAccumulator::add_or_create
// crosses the thread boundary.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::accumulator::SpeakerAccumulator;
use crate::classifier::{classify, LineClass};
use crate::error::TallyError;
use crate::source::Source;
use crate::word_count::count_words;

/// Worker-local parsing state. Never shared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    NoActiveSpeaker,
    InDialogue(String),
}

impl ParseState {
    pub fn speaker(&self) -> Option<&str> {
        match self {
            ParseState::NoActiveSpeaker => None,
            ParseState::InDialogue(name) => Some(name.as_str()),
        }
    }
}

/// Line and word counters for one worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub lines_read: u64,
    /// Lines that produced a contribution
    pub dialogue_lines: u64,
    pub words_counted: u64,
}

/// Outcome of running one worker over one source
#[derive(Debug)]
pub struct SourceReport {
    pub label: String,
    pub summary: WorkerSummary,
    pub duration: Duration,
    pub error: Option<TallyError>,
}

impl SourceReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives the speaker state machine over one source's lines
#[derive(Debug, Default)]
pub struct FileWorker {
    state: ParseState,
    summary: WorkerSummary,
}

impl FileWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ParseState {
        &self.state
    }

    pub fn summary(&self) -> WorkerSummary {
        self.summary
    }

    /// Apply one line: fold its contribution (if any) into `tally` and
    /// advance the state. Returns the words contributed.
    pub fn feed_line(&mut self, line: &str, tally: &SpeakerAccumulator) -> Option<u64> {
        self.summary.lines_read += 1;

        let (words, opened) = match classify(line, self.state.speaker()) {
            LineClass::NewSpeaker { name, dialogue_start } => {
                let words = count_words(line, dialogue_start);
                tally.add_or_create(name, words);
                (words, Some(name.to_owned()))
            }
            LineClass::Continuation {
                speaker: Some(speaker),
                dialogue_start,
            } => {
                let words = count_words(line, dialogue_start);
                tally.add_or_create(speaker, words);
                (words, None)
            }
            // Nothing to attribute to; state is already NoActiveSpeaker
            LineClass::Continuation { speaker: None, .. } => return None,
            LineClass::NonDialogue => {
                self.state = ParseState::NoActiveSpeaker;
                return None;
            }
        };

        if let Some(name) = opened {
            self.state = ParseState::InDialogue(name);
        }
        self.summary.dialogue_lines += 1;
        self.summary.words_counted += words;
        Some(words)
    }

    /// Run over an in-memory sequence of lines
    pub fn process_lines<I, S>(&mut self, lines: I, tally: &SpeakerAccumulator) -> WorkerSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed_line(line.as_ref(), tally);
        }
        self.summary
    }

    /// Run over an async line reader until it is exhausted.
    ///
    /// Lines are split on `\n` with a trailing `\r` removed. Bytes that are
    /// not valid UTF-8 are replaced, never rejected: classification only looks
    /// at ASCII spaces and the name terminator.
    ///
    /// An I/O error stops the worker; contributions from earlier lines stay
    /// in `tally`. The error is returned with the 1-based line it occurred on.
    pub async fn process_reader<R>(
        &mut self,
        mut reader: R,
        tally: &SpeakerAccumulator,
    ) -> Result<WorkerSummary, (u64, std::io::Error)>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => return Ok(self.summary),
                Ok(_) => {
                    let line = String::from_utf8_lossy(trim_line_ending(&buf));
                    self.feed_line(&line, tally);
                }
                Err(e) => return Err((self.summary.lines_read + 1, e)),
            }
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Open `source` and tally it into `tally`. Never panics on I/O failure:
/// the failure is carried in the report.
pub async fn tally_source(source: Source, buffer_size: usize, tally: &SpeakerAccumulator) -> SourceReport {
    let start_time = Instant::now();
    let label = source.label();
    debug!("Starting worker for {}", label);

    let reader = match source.open(buffer_size).await {
        Ok(reader) => reader,
        Err(error) => {
            warn!("{}", error);
            return SourceReport {
                label,
                summary: WorkerSummary::default(),
                duration: start_time.elapsed(),
                error: Some(error),
            };
        }
    };

    let mut worker = FileWorker::new();
    let error = match worker.process_reader(reader, tally).await {
        Ok(summary) => {
            info!(
                "Tallied {}: {} lines, {} dialogue lines, {} words in {}ms",
                label,
                summary.lines_read,
                summary.dialogue_lines,
                summary.words_counted,
                start_time.elapsed().as_millis()
            );
            None
        }
        Err((line, source)) => {
            let error = TallyError::SourceRead {
                label: label.clone(),
                line,
                source,
            };
            warn!("{}", error);
            Some(error)
        }
    };

    SourceReport {
        label,
        summary: worker.summary(),
        duration: start_time.elapsed(),
        error,
    }
}
