//! Splitting of a rendered template stream into specs
//!
//! - [`tokenizer`]: pulls records out of any [`std::io::Read`] at each [`DELIMITER`]
//! - [`spec`]: separates a record into its source path and content body

pub mod spec;
pub mod tokenizer;

pub use spec::Spec;
pub use tokenizer::Tokenizer;

/// Marker that starts every document in the stream, followed by the source path
pub const DELIMITER: &[u8] = b"---\n# Source: ";

/// Default upper bound for a single record (1 MiB)
pub const DEFAULT_MAX_SPEC_SIZE: usize = 1024 * 1024;
