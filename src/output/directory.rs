//! Output directory setup
//!
//! Runs once before the stream is read, so the spec writer can assume an
//! existing, writable root.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use super::create_dir_all;
use crate::error::{Result, SchelmError};

/// What to do when the output directory already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Refuse to touch an existing directory
    #[default]
    Fail,
    /// Remove the existing directory and start from scratch
    Replace,
    /// Keep the existing directory and append to files already in it
    Append,
}

/// Make sure `path` is an existing directory ready to receive specs
pub fn prepare(path: &Path, policy: OutputPolicy) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) => {
            if !meta.is_dir() {
                return Err(SchelmError::OutputNotDirectory {
                    path: path.display().to_string(),
                });
            }
            match policy {
                OutputPolicy::Fail => {
                    return Err(SchelmError::OutputExists {
                        path: path.display().to_string(),
                    });
                }
                OutputPolicy::Append => {
                    info!("Appending to existing output directory {}", path.display());
                    return Ok(());
                }
                OutputPolicy::Replace => {
                    info!(
                        "Removing existing output directory {} (-f specified)",
                        path.display()
                    );
                    fs::remove_dir_all(path).map_err(|e| setup_failed(path, &e))?;
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(setup_failed(path, &e)),
    }

    info!("Creating output directory {}", path.display());
    create_dir_all(path).map_err(|e| setup_failed(path, &e))
}

fn setup_failed(path: &Path, e: &std::io::Error) -> SchelmError {
    SchelmError::OutputSetupFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}
