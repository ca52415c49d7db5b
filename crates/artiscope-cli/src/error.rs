//! Error conversion utilities for CLI.
//!
//! The core degrades unreadable input to absent results instead of errors.
//! When a command gets nothing back, these helpers re-derive why from the
//! filesystem and turn it into a user-facing anyhow error with guidance.

use anyhow::anyhow;
use artiscope_core::InspectError;
use std::io::ErrorKind;
use std::path::Path;

/// Converts `InspectError` to user-friendly anyhow error with context
pub fn convert_inspect_error(err: InspectError, path: &Path) -> anyhow::Error {
    match err {
        InspectError::Unreadable { source, .. } | InspectError::Io(source)
            if source.kind() == ErrorKind::NotFound =>
        {
            anyhow!(
                "No such file or directory: '{}'\n\
                 HINT: Check the path for typos.",
                path.display()
            )
        }
        InspectError::Unreadable { source, .. } | InspectError::Io(source)
            if source.kind() == ErrorKind::PermissionDenied =>
        {
            anyhow!(
                "Permission denied reading '{}'\n\
                 HINT: Check the file permissions or run with sufficient privileges.",
                path.display()
            )
        }
        InspectError::CapabilityUnavailable { tool } => {
            anyhow!(
                "'{tool}' is not available on this system\n\
                 HINT: Results that depend on it are reported as defaults."
            )
        }
        _ => anyhow::Error::from(err).context(format!("Error inspecting '{}'", path.display())),
    }
}

/// Explains why the core produced no result for `path`.
pub fn unreadable(path: &Path) -> anyhow::Error {
    let err = match std::fs::File::open(path) {
        Err(source) => InspectError::unreadable(path, source),
        Ok(_) => InspectError::Undecodable("content could not be read".to_string()),
    };
    convert_inspect_error(err, path)
}
