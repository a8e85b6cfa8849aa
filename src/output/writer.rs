//! Spec writer
//!
//! Writes each spec to `<root>/<source>`. The first spec for a path creates the
//! file; every later spec for the same path is appended after a YAML document
//! separator. Files are opened and closed per spec, nothing is held open
//! between writes.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::path::resolve_destination;
use super::{create_dir_all, file_options};
use crate::error::{Result, SchelmError};
use crate::stream::Spec;

/// What happened to the destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Appended,
}

/// Writes specs below a fixed output root
#[derive(Debug, Clone)]
pub struct SpecWriter {
    root: PathBuf,
}

impl SpecWriter {
    /// Create a writer for an existing, writable output root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root all destinations are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `spec` at its destination, creating or appending as needed
    pub fn write(&self, spec: &Spec<'_>) -> Result<WriteOutcome> {
        let destination = resolve_destination(&self.root, spec.source)?;

        if let Some(parent) = destination.parent() {
            create_dir_all(parent).map_err(|e| SchelmError::DirectoryCreateFailed {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        match fs::metadata(&destination) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Creating {}", destination.display());
                create(&destination, spec.content)?;
                Ok(WriteOutcome::Created)
            }
            Ok(meta) if meta.is_file() => {
                info!("Appending to {}", destination.display());
                append(&destination, spec)?;
                Ok(WriteOutcome::Appended)
            }
            Ok(_) => Err(SchelmError::DestinationConflict {
                path: destination.display().to_string(),
            }),
            Err(e) => Err(SchelmError::FileStatFailed {
                path: destination.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Separator written before appended content.
///
/// Only the incoming content is inspected: content without a trailing newline
/// gets one extra leading newline, whatever the file currently ends with.
pub fn separator_for(content: &[u8]) -> &'static [u8] {
    if content.ends_with(b"\n") {
        b"\n---\n"
    } else {
        b"\n\n---\n"
    }
}

fn create(destination: &Path, content: &[u8]) -> Result<()> {
    let write_error = |e: std::io::Error| SchelmError::FileWriteFailed {
        path: destination.display().to_string(),
        reason: e.to_string(),
    };

    let mut file = file_options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(destination)
        .map_err(write_error)?;
    file.write_all(content).map_err(write_error)
}

fn append(destination: &Path, spec: &Spec<'_>) -> Result<()> {
    let append_error = |e: std::io::Error| SchelmError::FileAppendFailed {
        path: destination.display().to_string(),
        reason: e.to_string(),
    };

    let mut file = file_options()
        .append(true)
        .open(destination)
        .map_err(append_error)?;
    let payload = [separator_for(spec.content), spec.content].concat();
    file.write_all(&payload).map_err(append_error)
}
