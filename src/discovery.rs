use anyhow::Result;
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default file pattern for script discovery
pub const DEFAULT_PATTERN: &str = "*.txt";

/// Configuration for file discovery behavior
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Glob matched against file names at any depth under the root
    pub pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// Discovers all files matching `<root>/**/<pattern>`.
///
/// # Arguments
/// * `root_dir` - Root directory to search recursively
/// * `config` - Discovery configuration (file name pattern)
///
/// # Returns
/// Sorted list of regular files. Entries the glob walker cannot read are
/// logged and skipped; only an invalid pattern is an error.
pub fn discover_sources(root_dir: impl AsRef<Path>, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let root_dir = root_dir.as_ref();
    let root = glob::Pattern::escape(&root_dir.display().to_string());
    let pattern = format!("{root}/**/{}", config.pattern);
    debug!("Starting file discovery with pattern: {}", pattern);

    let entries = glob(&pattern)
        .map_err(|e| anyhow::anyhow!("Failed to create glob pattern {pattern}: {e}"))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => {
                debug!("Found file: {}", path.display());
                files.push(path);
            }
            Ok(path) => debug!("Skipping non-file match: {}", path.display()),
            Err(e) => warn!("Glob iteration error: {e}"),
        }
    }

    files.sort();
    info!("Discovered {} files under {}", files.len(), root_dir.display());
    Ok(files)
}

/// Expand command-line inputs into a list of script paths.
///
/// Directories are searched with [`discover_sources`]; anything else is
/// passed through untouched, so a missing file surfaces later as an
/// unavailable source instead of aborting discovery.
pub fn expand_inputs(inputs: &[PathBuf], config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            paths.extend(discover_sources(input, config)?);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}
