pub mod accumulator;
pub mod classifier;
pub mod discovery;
pub mod error;
pub mod orchestrator;
pub mod ranking;
pub mod source;
pub mod stats;
pub mod word_count;
pub mod worker;

// Re-export main types for convenient access
pub use accumulator::SpeakerAccumulator;
pub use classifier::{classify, LineClass, LineKind};
pub use error::{Result, TallyError};
pub use orchestrator::{Orchestrator, SourceFailure, TallyConfig, TallyOutcome};
pub use ranking::{rank, to_tsv, RankedResult, SpeakerCount};
pub use source::Source;
pub use word_count::count_words;
pub use worker::{FileWorker, ParseState, WorkerSummary};

// Re-export stats and discovery for the CLI and benchmarks
pub use discovery::{discover_sources, expand_inputs, DiscoveryConfig};
pub use stats::{write_stats_file, RunStats, SourceStats};
