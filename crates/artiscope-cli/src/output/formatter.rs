//! Output formatter trait for CLI results.

use anyhow::Result;
use artiscope_core::Comparison;
use artiscope_core::ContainerRecord;
use artiscope_core::DigestSet;
use artiscope_core::FileKind;
use artiscope_core::FileRecord;
use artiscope_core::PackageRecord;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format metadata for a single path
    fn format_file_record(&self, record: &FileRecord) -> Result<()>;

    /// Format classification results
    fn format_classification(&self, results: &[(PathBuf, FileKind)]) -> Result<()>;

    /// Format a directory listing
    fn format_scan(&self, root: &Path, records: &[FileRecord]) -> Result<()>;

    /// Format a digest set
    fn format_digests(&self, path: &Path, digests: &DigestSet) -> Result<()>;

    /// Format executable container facts
    fn format_container(&self, path: &Path, record: &ContainerRecord) -> Result<()>;

    /// Format application package facts
    fn format_package(&self, path: &Path, record: &PackageRecord) -> Result<()>;

    /// Format a file comparison
    fn format_comparison(&self, a: &Path, b: &Path, result: &Comparison) -> Result<()>;

    /// Format an integrity check
    fn format_verification(&self, path: &Path, expected: &str, matched: bool) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Reports a completed operation whose outcome is negative, such as a
    /// digest mismatch.
    pub fn failure(operation: impl Into<String>, data: T, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Failure,
            data: Some(data),
            error: Some(error.into()),
        }
    }
}
