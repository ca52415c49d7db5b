//! Per-path metadata record.

use serde::Serialize;
use std::path::PathBuf;

use super::FileKind;

/// Filesystem and content facts about a single path.
///
/// Produced by the metadata probe. When `is_directory` is `true`, `kind` is
/// always [`FileKind::Unknown`] and `magic` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path as given to (or discovered by) the probe.
    pub path: PathBuf,

    /// Final path component.
    pub name: String,

    /// Semantic kind derived from content and extension.
    pub kind: FileKind,

    /// Size in bytes.
    pub size: u64,

    /// First (up to) eight bytes as uppercase hex octets, space separated.
    pub magic: String,

    /// Whether the path is a directory.
    pub is_directory: bool,

    /// Whether any POSIX execute bit is set.
    pub is_executable: bool,

    /// Whether the signature-check collaborator reported a valid signature.
    pub is_signed: bool,

    /// Raw POSIX mode bits, when the platform exposes them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
}
