//! Digest triple computed in a single pass.

use serde::Serialize;

/// MD5, SHA-1 and SHA-256 digests of one byte stream, lowercase hex.
///
/// All three fields are always populated together; a `DigestSet` is never
/// partially computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DigestSet {
    /// 32 hex characters.
    pub md5: String,

    /// 40 hex characters.
    pub sha1: String,

    /// 64 hex characters.
    pub sha256: String,
}

impl DigestSet {
    /// Computes the digest triple of an in-memory buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use artiscope_core::types::DigestSet;
    ///
    /// let digests = DigestSet::of_bytes(b"hello world");
    /// assert_eq!(
    ///     digests.sha256,
    ///     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    /// );
    /// ```
    #[must_use]
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut hasher = crate::digest::MultiHasher::new();
        hasher.update(data);
        hasher.finish()
    }

    /// Compares `expected` against the digest of matching length,
    /// ignoring ASCII case and surrounding whitespace.
    ///
    /// Returns `false` when `expected` has no matching digest length.
    #[must_use]
    pub fn matches(&self, expected: &str) -> bool {
        let expected = expected.trim();
        let candidate = match expected.len() {
            32 => &self.md5,
            40 => &self.sha1,
            64 => &self.sha256,
            _ => return false,
        };
        candidate.eq_ignore_ascii_case(expected)
    }
}
