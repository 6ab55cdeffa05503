// Integration test utilities and common code
#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for creating temporary directories of play scripts
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a script file with given content
    pub fn create_script_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        self.create_raw_file(relative_path, content.as_bytes())
    }

    /// Create a file with arbitrary bytes (e.g. invalid UTF-8)
    pub fn create_raw_file<P: AsRef<Path>>(&self, relative_path: P, bytes: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, bytes).expect("Failed to write test file");
        file_path
    }

    /// Path inside the fixture that is never created
    pub fn missing_path(&self, name: &str) -> PathBuf {
        self.root_path.join("does-not-exist").join(name)
    }
}

/// Parse `name<TAB>count` output into pairs, panicking on malformed rows
pub fn parse_tsv(output: &str) -> Vec<(String, u64)> {
    output
        .lines()
        .map(|line| {
            let (name, count) = line
                .split_once('\t')
                .unwrap_or_else(|| panic!("Malformed output row: {line:?}"));
            let count = count
                .parse()
                .unwrap_or_else(|_| panic!("Non-numeric count in row: {line:?}"));
            (name.to_string(), count)
        })
        .collect()
}
