use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::debug;

use crate::error::{Result, TallyError};

/// Default read buffer for file sources (8KB)
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Buffered line reader produced by [`Source::open`]
pub type SourceReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// A handle that yields one ordered, finite sequence of text lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Script file on disk, opened when the worker starts
    File(PathBuf),
    /// In-memory script text with a label for logs and stats
    Text { label: String, content: String },
}

impl Source {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File(path.into())
    }

    pub fn text(label: impl Into<String>, content: impl Into<String>) -> Self {
        Source::Text {
            label: label.into(),
            content: content.into(),
        }
    }

    /// Name used in logs, failures and statistics
    pub fn label(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Text { label, .. } => label.clone(),
        }
    }

    /// Backing file, if any. Helper for callers and tests; workers go through [`Source::open`]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Source::File(path) => Some(path),
            Source::Text { .. } => None,
        }
    }

    /// Open the source for line-by-line reading
    pub async fn open(self, buffer_size: usize) -> Result<SourceReader> {
        match self {
            Source::File(path) => {
                debug!("Opening script file: {}", path.display());
                let file = File::open(&path)
                    .await
                    .map_err(|source| TallyError::SourceUnavailable {
                        label: path.display().to_string(),
                        source,
                    })?;
                Ok(Box::new(BufReader::with_capacity(buffer_size.max(1), file)))
            }
            Source::Text { content, .. } => Ok(Box::new(Cursor::new(content.into_bytes()))),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::File(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::File(path.to_path_buf())
    }
}
