//! Byte-exact file comparison.

use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::io::{self};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

/// Window size for lock-step comparison (8 KiB).
pub const WINDOW_SIZE: usize = 8 * 1024;

/// Outcome of comparing two files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Whether both files have the same size and content.
    pub identical: bool,

    /// Size delta when sizes differ, else the number of differing bytes.
    pub diff_size: u64,
}

impl Comparison {
    const fn unreadable() -> Self {
        Self {
            identical: false,
            diff_size: 0,
        }
    }
}

/// Compares two files byte for byte.
///
/// When sizes differ the result is returned immediately with
/// `diff_size = |size_a - size_b|` and no bytes are read. Otherwise both
/// files are read in [`WINDOW_SIZE`] windows in lock-step and differing
/// byte positions are counted.
///
/// Never fails: if either file cannot be opened or read, the result is
/// not identical with `diff_size` 0.
///
/// # Examples
///
/// ```no_run
/// use artiscope_core::compare::compare_files;
///
/// let result = compare_files("before.dylib", "after.dylib");
/// if !result.identical {
///     println!("{} bytes differ", result.diff_size);
/// }
/// ```
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(a: P, b: Q) -> Comparison {
    let (a, b) = (a.as_ref(), b.as_ref());

    match try_compare(a, b) {
        Ok(result) => result,
        Err(e) => {
            debug!(a = %a.display(), b = %b.display(), error = %e, "comparison failed");
            Comparison::unreadable()
        }
    }
}

fn try_compare(a: &Path, b: &Path) -> io::Result<Comparison> {
    let mut file_a = File::open(a)?;
    let mut file_b = File::open(b)?;

    let size_a = file_a.metadata()?.len();
    let size_b = file_b.metadata()?.len();

    if size_a != size_b {
        return Ok(Comparison {
            identical: false,
            diff_size: size_a.abs_diff(size_b),
        });
    }

    let diff_size = compare_readers(&mut file_a, &mut file_b)?;
    Ok(Comparison {
        identical: diff_size == 0,
        diff_size,
    })
}

/// Counts differing bytes between two readers in lock-step windows.
///
/// If a pair of windows comes back with different lengths, the length
/// difference is added to the count and comparison stops there.
///
/// # Errors
///
/// Returns the first read error from either side.
pub fn compare_readers<A: Read, B: Read>(a: &mut A, b: &mut B) -> io::Result<u64> {
    let mut buf_a = [0u8; WINDOW_SIZE];
    let mut buf_b = [0u8; WINDOW_SIZE];
    let mut diff: u64 = 0;

    loop {
        let len_a = fill_window(a, &mut buf_a)?;
        let len_b = fill_window(b, &mut buf_b)?;

        if len_a != len_b {
            diff += len_a.abs_diff(len_b) as u64;
            break;
        }
        if len_a == 0 {
            break;
        }

        diff += buf_a[..len_a]
            .iter()
            .zip(&buf_b[..len_b])
            .filter(|(x, y)| x != y)
            .count() as u64;
    }

    Ok(diff)
}

/// Reads until `buf` is full or the reader is exhausted.
fn fill_window<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn pair(a: &[u8], b: &[u8]) -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let path_a = temp.path().join("a.bin");
        let path_b = temp.path().join("b.bin");
        fs::write(&path_a, a).unwrap();
        fs::write(&path_b, b).unwrap();
        (temp, path_a, path_b)
    }

    #[test]
    fn test_same_file_is_identical() {
        let (_temp, a, _) = pair(b"some content", b"");
        let result = compare_files(&a, &a);
        assert!(result.identical);
        assert_eq!(result.diff_size, 0);
    }

    #[test]
    fn test_size_mismatch_short_circuits() {
        let (_temp, a, b) = pair(b"Short", b"This is much longer content");
        let result = compare_files(&a, &b);
        assert!(!result.identical);
        assert_eq!(result.diff_size, 22);
    }

    #[test]
    fn test_equal_length_counts_bytes() {
        let (_temp, a, b) = pair(b"Content A", b"Content B");
        let result = compare_files(&a, &b);
        assert!(!result.identical);
        assert_eq!(result.diff_size, 1);
    }

    #[test]
    fn test_differences_across_windows() {
        let mut left = vec![0u8; WINDOW_SIZE * 2 + 10];
        let mut right = left.clone();
        right[3] = 1;
        right[WINDOW_SIZE + 1] = 1;
        right[WINDOW_SIZE * 2 + 9] = 1;
        left[0] = 7;

        let (_temp, a, b) = pair(&left, &right);
        assert_eq!(compare_files(&a, &b).diff_size, 4);
    }

    #[test]
    fn test_window_length_mismatch_stops() {
        let mut a = Cursor::new(vec![1u8; WINDOW_SIZE + 100]);
        let mut b = Cursor::new(vec![2u8; WINDOW_SIZE + 40]);
        // First window: every byte differs. Second: 100 vs 40 bytes, so the
        // delta (60) is added and the rest is never compared.
        let diff = compare_readers(&mut a, &mut b).unwrap();
        assert_eq!(diff, WINDOW_SIZE as u64 + 60);
    }

    #[test]
    fn test_missing_file_is_not_identical() {
        let (temp, a, _) = pair(b"x", b"x");
        let result = compare_files(&a, temp.path().join("missing"));
        assert!(!result.identical);
        assert_eq!(result.diff_size, 0);
    }

    #[test]
    fn test_empty_files_identical() {
        let (_temp, a, b) = pair(b"", b"");
        let result = compare_files(&a, &b);
        assert!(result.identical);
        assert_eq!(result.diff_size, 0);
    }
}
