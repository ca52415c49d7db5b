//! Extraction quota tracking.

use crate::InspectError;
use crate::Result;
use crate::config::ExtractionLimits;

/// Tracks what one extraction has written so far.
#[derive(Debug, Default)]
pub struct QuotaTracker {
    files_extracted: usize,
    bytes_written: u64,
}

impl QuotaTracker {
    /// Creates a new quota tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more file entry.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Extraction`] once the entry count exceeds
    /// `limits.max_file_count`.
    pub fn record_entry(&mut self, limits: &ExtractionLimits) -> Result<()> {
        self.files_extracted += 1;

        if self.files_extracted > limits.max_file_count {
            return Err(quota_exceeded(format!(
                "file count ({} > {})",
                self.files_extracted, limits.max_file_count
            )));
        }
        Ok(())
    }

    /// Most bytes the next entry may write without breaking a limit: the
    /// remaining total budget, further capped by the compression ratio when
    /// the compressed size is known.
    #[must_use]
    pub fn entry_budget(&self, compressed_size: u64, limits: &ExtractionLimits) -> u64 {
        let remaining = limits.max_total_size.saturating_sub(self.bytes_written);
        if compressed_size == 0 {
            return remaining;
        }
        remaining.min(ratio_cap(compressed_size, limits.max_compression_ratio))
    }

    /// Records `written` bytes for an entry stored in `compressed_size`
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Extraction`] if the total size or the entry's
    /// compression ratio is over its limit.
    pub fn record_bytes(
        &mut self,
        written: u64,
        compressed_size: u64,
        limits: &ExtractionLimits,
    ) -> Result<()> {
        self.bytes_written = self.bytes_written.saturating_add(written);

        if self.bytes_written > limits.max_total_size {
            return Err(quota_exceeded(format!(
                "total size ({} > {})",
                self.bytes_written, limits.max_total_size
            )));
        }

        validate_compression_ratio(compressed_size, written, limits)
    }

    /// Returns the number of file entries recorded.
    #[must_use]
    pub const fn files_extracted(&self) -> usize {
        self.files_extracted
    }

    /// Returns the total bytes recorded.
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

/// Rejects an entry whose uncompressed size is more than
/// `limits.max_compression_ratio` times its compressed size.
///
/// # Errors
///
/// Returns [`InspectError::Extraction`] when the ratio is exceeded.
pub fn validate_compression_ratio(
    compressed_size: u64,
    uncompressed_size: u64,
    limits: &ExtractionLimits,
) -> Result<()> {
    if compressed_size == 0 {
        return Ok(());
    }

    let ratio = uncompressed_size as f64 / compressed_size as f64;

    if ratio > limits.max_compression_ratio {
        return Err(quota_exceeded(format!(
            "compression ratio {ratio:.1} ({uncompressed_size} from {compressed_size} bytes)"
        )));
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ratio_cap(compressed_size: u64, max_ratio: f64) -> u64 {
    (compressed_size as f64 * max_ratio) as u64
}

fn quota_exceeded(resource: String) -> InspectError {
    InspectError::Extraction(format!("quota exceeded: {resource}"))
}
