//! File integrity verification against an expected digest.

use std::path::Path;

use tracing::debug;

use crate::digest::sha256_file;

/// Checks a file's SHA-256 against `expected`.
///
/// The comparison ignores ASCII case and surrounding whitespace. Returns
/// `false` (never an error) when the file cannot be hashed.
///
/// # Examples
///
/// ```no_run
/// use artiscope_core::integrity::verify_file_integrity;
///
/// let ok = verify_file_integrity(
///     "App.ipa",
///     "B94D27B9934D3E08A52E52D7DA7DABFAC484EFE37A5380EE9088F7ACE2EFCDE9",
/// );
/// println!("intact: {ok}");
/// ```
pub fn verify_file_integrity<P: AsRef<Path>>(path: P, expected: &str) -> bool {
    let path = path.as_ref();
    let Some(actual) = sha256_file(path) else {
        debug!(path = %path.display(), "integrity check skipped: file not hashable");
        return false;
    };

    let matched = actual.eq_ignore_ascii_case(expected.trim());
    debug!(path = %path.display(), matched, "integrity check");
    matched
}
