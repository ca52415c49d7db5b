//! Package archive unpacking.

use std::ffi::OsStr;
use std::fs::File;
use std::fs::{self};
use std::io::BufReader;
use std::io::Read;
use std::io::{self};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use super::process::ProcessRunner;
use super::quota::QuotaTracker;
use super::quota::validate_compression_ratio;
use crate::InspectError;
use crate::Result;
use crate::config::ExtractionLimits;

/// Extracts a zip-based package into a destination directory.
pub trait Unpacker: Send + Sync {
    /// Extracts `archive` into `dest`, which must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Extraction`] if the archive cannot be read or
    /// written out, or [`InspectError::CapabilityUnavailable`] if no unpacking
    /// capability exists.
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<()>;

    /// Returns `false` if this unpacker can never extract anything.
    fn is_available(&self) -> bool {
        true
    }
}

/// Unpacker for configurations without any extraction capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnpacker;

impl Unpacker for NoUnpacker {
    fn unpack(&self, _archive: &Path, _dest: &Path) -> Result<()> {
        Err(InspectError::unavailable("unpack"))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// In-process unpacker backed by the `zip` crate.
///
/// Entry names that would escape `dest` (absolute paths, `..` components)
/// are skipped. On Unix the permission bits stored in the archive are
/// restored, masked to `0o777`.
///
/// Every file entry is checked against [`ExtractionLimits`] before and
/// while it is written. The copy reads at most one byte past the entry's
/// budget, so a header that understates the uncompressed size cannot push
/// the output past the limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipUnpacker {
    limits: ExtractionLimits,
}

impl ZipUnpacker {
    /// Creates an unpacker enforcing `limits`.
    #[must_use]
    pub const fn new(limits: ExtractionLimits) -> Self {
        Self { limits }
    }
}

impl Unpacker for ZipUnpacker {
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<()> {
        let file = File::open(archive).map_err(|e| InspectError::unreadable(archive, e))?;
        let mut zip = zip::ZipArchive::new(BufReader::new(file))
            .map_err(|e| InspectError::Extraction(format!("failed to open ZIP archive: {e}")))?;
        let mut quota = QuotaTracker::new();

        for i in 0..zip.len() {
            let mut entry = zip.by_index(i).map_err(|e| {
                InspectError::Extraction(format!("failed to read ZIP entry: {e}"))
            })?;

            let Some(relative) = entry.enclosed_name() else {
                warn!(entry = entry.name(), "skipping entry outside destination");
                continue;
            };
            let target = dest.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }

            quota.record_entry(&self.limits)?;
            let compressed = entry.compressed_size();
            validate_compression_ratio(compressed, entry.size(), &self.limits)?;
            let budget = quota.entry_budget(compressed, &self.limits);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)?;
            let written = io::copy(
                &mut entry.by_ref().take(budget.saturating_add(1)),
                &mut out,
            )?;
            quota.record_bytes(written, compressed, &self.limits)?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o777))?;
            }
        }

        debug!(
            archive = %archive.display(),
            files = quota.files_extracted(),
            bytes = quota.bytes_written(),
            "unpacked in process"
        );
        Ok(())
    }
}

/// Runs `unzip -qq -o <archive> -d <dest>` through a process runner.
#[derive(Clone)]
pub struct CommandUnpacker {
    runner: Arc<dyn ProcessRunner>,
    program: String,
}

impl CommandUnpacker {
    /// Creates an unpacker that invokes `program` through `runner`.
    pub fn new(runner: Arc<dyn ProcessRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }
}

impl Unpacker for CommandUnpacker {
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<()> {
        let args = [
            OsStr::new("-qq"),
            OsStr::new("-o"),
            archive.as_os_str(),
            OsStr::new("-d"),
            dest.as_os_str(),
        ];
        let output = self.runner.run(&self.program, &args)?;

        if output.success() {
            Ok(())
        } else {
            Err(InspectError::Extraction(format!(
                "{} exited with {:?}",
                self.program, output.exit_code
            )))
        }
    }
}
