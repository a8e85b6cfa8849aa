//! Split command implementation
//!
//! Drives one pass over the input: the preamble before the first delimiter is
//! dropped, every following record becomes a spec and is handed to the
//! [`SpecWriter`]. The first fatal error stops the run; files written before it
//! stay on disk.

use std::io::Read;

use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::error::{Result, SchelmError};
use crate::output::{self, SpecWriter, WriteOutcome};
use crate::stream::{Spec, Tokenizer};

/// Counters reported at the end of a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records after the preamble
    pub records: usize,
    pub created: usize,
    pub appended: usize,
    /// Records skipped for having no source path
    pub skipped: usize,
}

/// Run split command
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    // A failed open must leave the output tree untouched
    let reader = config.input.open()?;
    output::prepare(&config.output_dir, config.policy)?;

    let writer = SpecWriter::new(&config.output_dir);
    let summary = process_stream(reader, &writer, config.max_spec_size)?;

    info!(
        "Processing complete: {} specs, {} files created, {} appended, {} skipped",
        summary.records, summary.created, summary.appended, summary.skipped
    );
    Ok(summary)
}

/// Split `reader` into specs and write each one with `writer`
pub fn process_stream<R: Read>(
    reader: R,
    writer: &SpecWriter,
    max_spec_size: usize,
) -> Result<RunSummary> {
    let mut records = Tokenizer::with_max_record_size(reader, max_spec_size);
    let mut summary = RunSummary::default();
    debug!("Writing specs below {}", writer.root().display());

    match records.next() {
        Some(preamble) => {
            let preamble = preamble?;
            debug!("Discarded {} byte preamble", preamble.len());
        }
        None => {
            warn_no_separators();
            return Ok(summary);
        }
    }

    for record in records.by_ref() {
        let record = record?;
        summary.records += 1;

        let spec = Spec::parse(&record)?;
        if spec.has_empty_source() {
            warn!("Skipping empty source path in input");
            summary.skipped += 1;
            continue;
        }

        match writer
            .write(&spec)
            .map_err(|e| SchelmError::spec_failed(spec.source, e))?
        {
            WriteOutcome::Created => summary.created += 1,
            WriteOutcome::Appended => summary.appended += 1,
        }
    }

    if records.boundaries() == 0 {
        warn_no_separators();
    }

    Ok(summary)
}

fn warn_no_separators() {
    warn!("Input stream is empty or contains no separators");
}
