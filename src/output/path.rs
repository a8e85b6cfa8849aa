//! Destination path resolution
//!
//! Source paths come straight from the input stream, so they are joined to the
//! output root lexically instead of with [`Path::join`]: a leading `/` must not
//! replace the root, and `..` must not leave it.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SchelmError};

/// Resolve `source` below `root`.
///
/// `.` components and any root or prefix component are dropped, `..` removes
/// the previously pushed component. Climbing above `root` is an error.
pub fn resolve_destination(root: &Path, source: &str) -> Result<PathBuf> {
    let mut relative = PathBuf::new();

    for component in Path::new(source).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(SchelmError::PathOutsideOutput {
                        path: source.to_string(),
                    });
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if relative.as_os_str().is_empty() {
        return Ok(root.to_path_buf());
    }

    Ok(root.join(relative))
}
