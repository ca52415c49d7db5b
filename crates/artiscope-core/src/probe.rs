//! Filesystem metadata probe.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::detect::SNIFF_LEN;
use crate::detect::classify::read_sample;
use crate::detect::classify_bytes;
use crate::tools::SignatureChecker;
use crate::types::FileKind;
use crate::types::FileRecord;

/// Number of leading bytes rendered in [`FileRecord::magic`].
pub const MAGIC_DISPLAY_LEN: usize = 8;

/// Builds a [`FileRecord`] for `path`.
///
/// Directories get kind `Unknown` and an empty magic sample. Regular files
/// have their first [`SNIFF_LEN`] bytes read once; that sample feeds both the
/// classifier and the magic rendering. The signature checker is consulted for
/// every entry, since application bundles are directories.
///
/// Returns `None` if the metadata of `path` cannot be read.
///
/// # Examples
///
/// ```no_run
/// use artiscope_core::probe::probe_path;
/// use artiscope_core::tools::NoSignatureChecker;
///
/// if let Some(record) = probe_path("App.ipa", &NoSignatureChecker) {
///     println!("{} {} {}", record.name, record.kind, record.magic);
/// }
/// ```
pub fn probe_path<P: AsRef<Path>>(path: P, signature: &dyn SignatureChecker) -> Option<FileRecord> {
    let path = path.as_ref();
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "probe failed");
            return None;
        }
    };

    let mode = file_mode(&metadata);
    let is_directory = metadata.is_dir();

    let (kind, magic) = if is_directory {
        (FileKind::Unknown, String::new())
    } else {
        let sample = read_sample(path, SNIFF_LEN).unwrap_or_else(|e| {
            debug!(path = %path.display(), error = %e, "sample read failed");
            Vec::new()
        });
        let extension = path.extension().and_then(|e| e.to_str());
        (classify_bytes(&sample, extension), magic_hex(&sample))
    };

    Some(FileRecord {
        path: path.to_path_buf(),
        name: display_name(path),
        kind,
        size: metadata.len(),
        magic,
        is_directory,
        is_executable: mode.is_some_and(|m| m & 0o111 != 0),
        is_signed: signature.is_signed(path),
        mode,
    })
}

/// Renders up to the first eight bytes as uppercase, space-separated hex.
///
/// # Examples
///
/// ```
/// use artiscope_core::probe::magic_hex;
///
/// assert_eq!(magic_hex(&[0xCF, 0xFA, 0xED, 0xFE, 0x0C]), "CF FA ED FE 0C");
/// assert_eq!(magic_hex(b""), "");
/// ```
#[must_use]
pub fn magic_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(MAGIC_DISPLAY_LEN * 3);
    for (i, byte) in bytes.iter().take(MAGIC_DISPLAY_LEN).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02X}");
    }
    out
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(unix)]
fn file_mode(metadata: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn file_mode(_metadata: &fs::Metadata) -> Option<u32> {
    None
}
