//! Materialization of specs into the output directory
//!
//! - [`directory`]: prepares the output root according to an [`OutputPolicy`]
//! - [`path`]: resolves a source path below the root
//! - [`writer`]: creates or appends the file for one spec

pub mod directory;
pub mod path;
pub mod writer;

pub use directory::{OutputPolicy, prepare};
pub use writer::{SpecWriter, WriteOutcome};

use std::fs::{DirBuilder, OpenOptions};
use std::io;
use std::path::Path;

/// Mode for every file written (owner/group read-write)
pub const FILE_MODE: u32 = 0o640;

/// Mode for every directory created (owner/group read-write-execute)
pub const DIR_MODE: u32 = 0o750;

/// Create `path` and any missing parents with [`DIR_MODE`]
pub(crate) fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}

/// Open options that create new files with [`FILE_MODE`]
pub(crate) fn file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options
}
