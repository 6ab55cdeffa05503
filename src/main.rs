use anyhow::Result;
use bardtally::{
    discovery::{self, DiscoveryConfig},
    orchestrator::{Orchestrator, TallyConfig},
    ranking::{to_tsv, SpeakerCount},
    source::{Source, DEFAULT_BUFFER_SIZE},
    stats,
};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `name<TAB>count` per line
    Tsv,
    /// JSON array of {speaker, words}
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "bardtally")]
#[command(about = "Count the words each speaker says across a set of play scripts")]
#[command(version)]
struct Args {
    /// Script files, or directories to search for files matching --pattern
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// File name pattern used when an input is a directory
    #[arg(long, default_value = discovery::DEFAULT_PATTERN)]
    pattern: String,

    /// Exit with an error if any source cannot be read
    #[arg(long)]
    require_all: bool,

    /// Read buffer size per file in bytes
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Output format for the ranked tally
    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,

    /// Print only the first N speakers
    #[arg(long)]
    top: Option<usize>,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Suppress the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: stdout carries the tally, so structured logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let discovery_config = DiscoveryConfig {
        pattern: args.pattern.clone(),
    };
    let paths = discovery::expand_inputs(&args.inputs, &discovery_config)?;
    if paths.is_empty() {
        info!("No script files matched; nothing to tally");
    }

    let tally_config = TallyConfig {
        buffer_size: args.buffer_size,
        require_all: args.require_all,
    };
    let mut orchestrator = Orchestrator::new(tally_config);
    let progress = if args.no_progress {
        None
    } else {
        Some(progress_bar(paths.len() as u64)?)
    };
    if let Some(ref progress) = progress {
        orchestrator = orchestrator.with_progress(progress.clone());
    }

    let outcome = orchestrator.run(paths.into_iter().map(Source::from)).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let outcome = outcome?;

    for failure in &outcome.failures {
        eprintln!("warning: {}", failure.error);
    }

    if let Some(ref stats_path) = args.stats_out {
        stats::write_stats_file(stats_path, &outcome.stats).await?;
        info!("Wrote run statistics to {}", stats_path.display());
    }

    let shown: &[SpeakerCount] = match args.top {
        Some(n) => &outcome.ranked[..n.min(outcome.ranked.len())],
        None => &outcome.ranked,
    };
    match args.format {
        OutputFormat::Tsv => print!("{}", to_tsv(shown)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(shown)?),
    }

    Ok(())
}

fn progress_bar(len: u64) -> Result<ProgressBar> {
    let progress = ProgressBar::new(len);
    progress.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} sources",
    )?);
    Ok(progress)
}
