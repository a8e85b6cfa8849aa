//! Run configuration resolved from the command line
//!
//! Everything a run needs is decided here, once, and passed down explicitly.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{Result, SchelmError};
use crate::output::OutputPolicy;

/// Where the rendered stream is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Open the input for a single forward pass
    pub fn open(&self) -> Result<Box<dyn Read>> {
        match self {
            Input::Stdin => Ok(Box::new(io::stdin().lock())),
            Input::File(path) => {
                let file = File::open(path).map_err(|e| SchelmError::InputOpenFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                Ok(Box::new(file))
            }
        }
    }
}

/// Settings for one split run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub policy: OutputPolicy,
    pub input: Input,
    pub max_spec_size: usize,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let policy = if cli.force {
            OutputPolicy::Replace
        } else if cli.append {
            OutputPolicy::Append
        } else {
            OutputPolicy::Fail
        };

        let input = match cli.input.as_deref() {
            None => Input::Stdin,
            Some(path) if path == Path::new("-") => Input::Stdin,
            Some(path) => Input::File(path.to_path_buf()),
        };

        Self {
            output_dir: cli.output_dir.clone(),
            policy,
            input,
            max_spec_size: cli.max_spec_size,
        }
    }
}
