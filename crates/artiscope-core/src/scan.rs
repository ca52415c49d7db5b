//! Directory enumeration.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;
use tracing::trace;
use walkdir::DirEntry;
use walkdir::WalkDir;

use crate::probe::probe_path;
use crate::tools::SignatureChecker;
use crate::types::FileRecord;

/// How deep [`scan_directory`] descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Immediate children of the root only.
    #[default]
    Shallow,
    /// The full subtree.
    Recursive,
}

/// Lists the entries under `root` as [`FileRecord`]s, sorted by path.
///
/// Entries whose name starts with `.` are skipped, and hidden directories are
/// not descended into. The root itself is never reported. Symlinks are not
/// followed. Entries that cannot be probed are omitted.
///
/// Returns an empty list if `root` cannot be enumerated.
///
/// # Examples
///
/// ```no_run
/// use artiscope_core::scan::ScanMode;
/// use artiscope_core::scan::scan_directory;
/// use artiscope_core::tools::NoSignatureChecker;
///
/// for record in scan_directory("Downloads", ScanMode::Shallow, &NoSignatureChecker) {
///     println!("{:>10} {}", record.size, record.name);
/// }
/// ```
pub fn scan_directory<P: AsRef<Path>>(
    root: P,
    mode: ScanMode,
    signature: &dyn SignatureChecker,
) -> Vec<FileRecord> {
    let root = root.as_ref();

    if let Err(e) = fs::read_dir(root) {
        debug!(root = %root.display(), error = %e, "cannot enumerate scan root");
        return Vec::new();
    }

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    if mode == ScanMode::Shallow {
        walker = walker.max_depth(1);
    }

    let mut records: Vec<FileRecord> = walker
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => {
                trace!(path = %entry.path().display(), "scanning entry");
                probe_path(entry.path(), signature)
            }
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .collect();

    records.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(root = %root.display(), ?mode, entries = records.len(), "scan complete");
    records
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tools::NoSignatureChecker;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("file1.txt"), b"one").unwrap();
        fs::write(root.join("file2.json"), b"{}").unwrap();
        fs::create_dir(root.join("subdir")).unwrap();
        fs::write(root.join("subdir/nested.txt"), b"nested").unwrap();
        fs::write(root.join(".hidden"), b"secret").unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git/config"), b"x").unwrap();
        temp
    }

    fn names(records: &[FileRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_shallow_scan() {
        let temp = fixture();
        let records = scan_directory(temp.path(), ScanMode::Shallow, &NoSignatureChecker);
        assert_eq!(names(&records), vec!["file1.txt", "file2.json", "subdir"]);
        assert!(records[2].is_directory);
    }

    #[test]
    fn test_recursive_scan() {
        let temp = fixture();
        let records = scan_directory(temp.path(), ScanMode::Recursive, &NoSignatureChecker);
        assert_eq!(
            names(&records),
            vec!["file1.txt", "file2.json", "subdir", "nested.txt"]
        );
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let records = scan_directory(
            temp.path().join("missing"),
            ScanMode::Recursive,
            &NoSignatureChecker,
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_file_root_is_empty() {
        let temp = fixture();
        let records = scan_directory(
            temp.path().join("file1.txt"),
            ScanMode::Shallow,
            &NoSignatureChecker,
        );
        assert!(records.is_empty());
    }
}
