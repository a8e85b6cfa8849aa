//! Common test utilities for schelm integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helm-style stream used by most tests
#[allow(dead_code)]
pub const TWO_FILE_STREAM: &str =
    "preamble\n---\n# Source: a.yaml\nfoo: 1\n---\n# Source: b/c.yaml\nbar: 2\n";

/// A scratch directory holding an output tree and input files
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Output directory path (not created)
    pub fn out(&self) -> PathBuf {
        self.path.join("out")
    }

    /// Write a file in workspace
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file from the output directory
    #[allow(dead_code)]
    pub fn read_output(&self, path: &str) -> String {
        std::fs::read_to_string(self.out().join(path)).expect("Failed to read output file")
    }

    /// Check if a file exists in the output directory
    #[allow(dead_code)]
    pub fn output_exists(&self, path: &str) -> bool {
        self.out().join(path).exists()
    }

    /// Count regular files below the output directory
    #[allow(dead_code)]
    pub fn output_file_count(&self) -> usize {
        count_files(&self.out())
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| {
            let path = entry.expect("Failed to read entry").path();
            if path.is_dir() { count_files(&path) } else { 1 }
        })
        .sum()
}

/// Command for the schelm binary with a clean configuration environment
#[allow(deprecated)]
pub fn schelm_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("schelm").expect("schelm binary");
    cmd.env_remove("SCHELM_LOG")
        .env_remove("SCHELM_LOG_FORMAT")
        .env_remove("SCHELM_MAX_SPEC_SIZE");
    cmd
}
