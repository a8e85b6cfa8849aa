//! Error types and handling for schelm
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostic codes and help.
//!
//! Every variant here is fatal: it aborts the run. Non-fatal conditions (empty
//! input, a spec without a source path) never become errors, they are logged as
//! warnings by the driving loop.

use miette::Diagnostic;
use thiserror::Error;


/// Main error type for schelm operations
#[derive(Error, Diagnostic, Debug)]
pub enum SchelmError {
    // Input errors
    #[error("Failed to read input stream: {reason}")]
    #[diagnostic(code(schelm::input::read_failed))]
    InputReadFailed { reason: String },

    #[error("Failed to open input file: {path}: {reason}")]
    #[diagnostic(code(schelm::input::open_failed))]
    InputOpenFailed { path: String, reason: String },

    #[error("Spec exceeds maximum size of {limit} bytes")]
    #[diagnostic(
        code(schelm::input::spec_too_large),
        help("Raise the limit with --max-spec-size (or SCHELM_MAX_SPEC_SIZE)")
    )]
    SpecTooLarge { limit: usize },

    #[error("Source path is not valid UTF-8: {path}")]
    #[diagnostic(code(schelm::input::invalid_source_path))]
    InvalidSourcePath { path: String },

    // Output directory errors
    #[error("\"{path}\" exists but is not a directory")]
    #[diagnostic(code(schelm::output::not_directory))]
    OutputNotDirectory { path: String },

    #[error("Output directory \"{path}\" already exists")]
    #[diagnostic(
        code(schelm::output::exists),
        help("Use -f to overwrite it, or -a to append to the files already in it")
    )]
    OutputExists { path: String },

    #[error("Failed to prepare output directory {path}: {reason}")]
    #[diagnostic(code(schelm::output::setup_failed))]
    OutputSetupFailed { path: String, reason: String },

    // Spec writer errors
    #[error("Source path escapes the output directory: {path}")]
    #[diagnostic(
        code(schelm::fs::outside_output),
        help("Source paths must stay inside the output directory")
    )]
    PathOutsideOutput { path: String },

    #[error("Destination exists and is not a regular file: {path}")]
    #[diagnostic(code(schelm::fs::destination_conflict))]
    DestinationConflict { path: String },

    #[error("Failed to create directory {path}: {reason}")]
    #[diagnostic(code(schelm::fs::create_dir_failed))]
    DirectoryCreateFailed { path: String, reason: String },

    #[error("Failed to write file {path}: {reason}")]
    #[diagnostic(code(schelm::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to append to file {path}: {reason}")]
    #[diagnostic(code(schelm::fs::append_failed))]
    FileAppendFailed { path: String, reason: String },

    #[error("Failed to check file {path}: {reason}")]
    #[diagnostic(code(schelm::fs::stat_failed))]
    FileStatFailed { path: String, reason: String },

    // Driving loop
    #[error("Failed to process spec for source {source_path}: {cause}")]
    #[diagnostic(code(schelm::split::spec_failed))]
    SpecFailed {
        source_path: String,
        cause: Box<SchelmError>,
    },

    // Logging
    #[error("Failed to initialize logging: {message}")]
    #[diagnostic(code(schelm::logging::init_failed))]
    LoggingInitFailed { message: String },
}

impl SchelmError {
    /// Wrap a writer error with the source path of the spec that caused it
    pub fn spec_failed(source_path: &str, cause: SchelmError) -> Self {
        SchelmError::SpecFailed {
            source_path: source_path.to_string(),
            cause: Box::new(cause),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SchelmError>;
