//! Single-pass multi-algorithm digest pipeline.
//!
//! Each chunk read from the source is fed to MD5, SHA-1 and SHA-256 contexts
//! at once, so a file is read from disk exactly once no matter how many
//! digests the caller uses.

use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::io::{self};
use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::Digest;
use sha2::Sha256;
use tracing::debug;

use crate::types::DigestSet;

/// Read size for streaming digests (8 KiB).
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Incremental MD5 + SHA-1 + SHA-256 context.
#[derive(Debug, Clone, Default)]
pub struct MultiHasher {
    md5: Md5,
    sha1: Sha1,
    sha256: Sha256,
}

impl MultiHasher {
    /// Creates a fresh set of digest contexts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds `data` to all three contexts.
    pub fn update(&mut self, data: &[u8]) {
        self.md5.update(data);
        self.sha1.update(data);
        self.sha256.update(data);
    }

    /// Finalizes all contexts into lowercase hex digests.
    #[must_use]
    pub fn finish(self) -> DigestSet {
        DigestSet {
            md5: hex::encode(self.md5.finalize()),
            sha1: hex::encode(self.sha1.finalize()),
            sha256: hex::encode(self.sha256.finalize()),
        }
    }
}

/// Digests everything `reader` yields in [`CHUNK_SIZE`] chunks.
///
/// # Errors
///
/// Returns the first read error other than `Interrupted`. No partial digest
/// is produced.
pub fn digest_reader<R: Read>(reader: &mut R) -> io::Result<DigestSet> {
    let mut hasher = MultiHasher::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    Ok(hasher.finish())
}

/// Computes MD5, SHA-1 and SHA-256 of a file in one pass.
///
/// Returns `None` if the file cannot be opened or read.
///
/// # Examples
///
/// ```no_run
/// use artiscope_core::digest::compute_digests;
///
/// if let Some(digests) = compute_digests("App.ipa") {
///     println!("sha256 {}", digests.sha256);
/// }
/// ```
pub fn compute_digests<P: AsRef<Path>>(path: P) -> Option<DigestSet> {
    let path = path.as_ref();
    let result = File::open(path).and_then(|mut file| digest_reader(&mut file));

    match result {
        Ok(digests) => Some(digests),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot hash file");
            None
        }
    }
}

/// Computes the lowercase hex SHA-256 of a file.
///
/// Returns `None` if the file cannot be hashed.
pub fn sha256_file<P: AsRef<Path>>(path: P) -> Option<String> {
    compute_digests(path).map(|digests| digests.sha256)
}
