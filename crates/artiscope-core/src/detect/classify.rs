//! Content-first file type classification.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::extension::is_package_extension;
use super::extension::kind_for_extension;
use super::magic::match_signature;
use crate::types::FileKind;

/// Number of leading bytes sniffed for classification.
pub const SNIFF_LEN: usize = 32;

const ISO_BMFF_BRAND: &[u8; 4] = b"ftyp";
const XML_DECLARATION: &[u8; 5] = b"<?xml";

/// Classifies a file on disk by content, falling back to its extension.
///
/// Reads at most [`SNIFF_LEN`] bytes once. If the read fails the
/// classification is made from the extension alone.
///
/// # Examples
///
/// ```no_run
/// use artiscope_core::detect::classify_path;
/// use artiscope_core::types::FileKind;
///
/// let kind = classify_path("Payload/App.app/App");
/// assert_eq!(kind, FileKind::ExecutableContainer);
/// ```
pub fn classify_path<P: AsRef<Path>>(path: P) -> FileKind {
    let path = path.as_ref();
    let extension = path.extension().and_then(|e| e.to_str());

    let sample = match read_sample(path, SNIFF_LEN) {
        Ok(sample) => sample,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "sniff failed, using extension");
            Vec::new()
        }
    };

    classify_bytes(&sample, extension)
}

/// Classifies a content sample with an optional extension hint.
///
/// Priority cascade:
/// 1. magic signature table (zip + `.ipa`/`.tipa` becomes a package)
/// 2. ISO base media `ftyp` box at offset 4
/// 3. `<?xml` declaration
/// 4. printable-text heuristic, refined by extension
/// 5. extension alone
///
/// # Examples
///
/// ```
/// use artiscope_core::detect::classify_bytes;
/// use artiscope_core::types::FileKind;
///
/// assert_eq!(classify_bytes(b"PK\x03\x04", Some("zip")), FileKind::Archive);
/// assert_eq!(classify_bytes(b"PK\x03\x04", Some("ipa")), FileKind::Package);
/// assert_eq!(classify_bytes(b"{\"a\": 1}", Some("json")), FileKind::Json);
/// ```
#[must_use]
pub fn classify_bytes(sample: &[u8], extension: Option<&str>) -> FileKind {
    let sample = &sample[..sample.len().min(SNIFF_LEN)];

    if let Some(kind) = match_signature(sample) {
        if kind == FileKind::Archive && extension.is_some_and(is_package_extension) {
            return FileKind::Package;
        }
        return kind;
    }

    if sample.get(4..8) == Some(&ISO_BMFF_BRAND[..]) {
        return FileKind::Video;
    }

    if sample.starts_with(XML_DECLARATION) {
        return FileKind::Xml;
    }

    let from_extension = extension.and_then(kind_for_extension);

    if looks_like_text(sample) {
        return from_extension.unwrap_or(FileKind::Text);
    }

    from_extension.unwrap_or(FileKind::Unknown)
}

/// Returns `true` if every byte is printable ASCII-or-above, tab, LF or CR.
///
/// An empty sample is not text.
#[must_use]
pub fn looks_like_text(sample: &[u8]) -> bool {
    !sample.is_empty()
        && sample
            .iter()
            .all(|&b| b >= 0x20 || matches!(b, b'\t' | b'\n' | b'\r'))
}

/// Reads up to `limit` bytes from the start of `path`.
pub(crate) fn read_sample(path: &Path, limit: usize) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut sample = Vec::with_capacity(limit);
    file.take(limit as u64).read_to_end(&mut sample)?;
    Ok(sample)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detect::magic::SIGNATURES;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tempfile::TempDir;

    fn write_temp(suffix: &str, data: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_every_table_entry_classifies() {
        for signature in SIGNATURES.iter() {
            let mut data = signature.prefix.to_vec();
            data.extend_from_slice(&[0u8; 16]);
            let file = write_temp(".bin", &data);
            assert_eq!(classify_path(file.path()), signature.kind);
        }
    }

    #[test]
    fn test_zip_with_ipa_extension_is_package() {
        let file = write_temp(".ipa", b"PK\x03\x04\x14\x00\x00\x00");
        assert_eq!(classify_path(file.path()), FileKind::Package);

        let file = write_temp(".TIPA", b"PK\x03\x04\x14\x00\x00\x00");
        assert_eq!(classify_path(file.path()), FileKind::Package);
    }

    #[test]
    fn test_content_beats_extension() {
        let file = write_temp(".txt", b"%PDF-1.7\n");
        assert_eq!(classify_path(file.path()), FileKind::Pdf);

        let file = write_temp(".json", &[0xCF, 0xFA, 0xED, 0xFE, 0x0C, 0x00, 0x00, 0x01]);
        assert_eq!(classify_path(file.path()), FileKind::ExecutableContainer);
    }

    #[test]
    fn test_ftyp_box_is_video() {
        let data = b"\x00\x00\x00\x20ftypisom\x00\x00\x02\x00";
        assert_eq!(classify_bytes(data, None), FileKind::Video);
    }

    #[test]
    fn test_xml_declaration() {
        let data = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>";
        assert_eq!(classify_bytes(data, Some("plist")), FileKind::Xml);
    }

    #[test]
    fn test_text_refined_by_extension() {
        assert_eq!(classify_bytes(b"{\"key\": true}\n", Some("json")), FileKind::Json);
        assert_eq!(classify_bytes(b"# Title\n", Some("md")), FileKind::Text);
        assert_eq!(classify_bytes(b"plain words", None), FileKind::Text);
        assert_eq!(classify_bytes(b"fn main() {}", Some("rs")), FileKind::Text);
    }

    #[test]
    fn test_binary_falls_back_to_extension() {
        let data = [0x30, 0x82, 0x0A, 0x01, 0x02, 0x00];
        assert_eq!(classify_bytes(&data, Some("p12")), FileKind::Certificate);
        assert_eq!(
            classify_bytes(&data, Some("mobileprovision")),
            FileKind::ProvisioningProfile
        );
        assert_eq!(classify_bytes(&data, Some("bin")), FileKind::Unknown);
        assert_eq!(classify_bytes(&data, None), FileKind::Unknown);
    }

    #[test]
    fn test_empty_file_uses_extension() {
        let file = write_temp(".dylib", b"");
        assert_eq!(classify_path(file.path()), FileKind::DynamicLibrary);

        let file = write_temp(".dat", b"");
        assert_eq!(classify_path(file.path()), FileKind::Unknown);
    }

    #[test]
    fn test_unreadable_path_uses_extension() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.pdf");
        assert_eq!(classify_path(&missing), FileKind::Pdf);
    }

    #[test]
    fn test_only_sniff_window_is_considered() {
        let mut data = vec![b'a'; SNIFF_LEN];
        data.push(0x00);
        assert_eq!(classify_bytes(&data, None), FileKind::Text);
    }

    #[test]
    fn test_looks_like_text() {
        assert!(looks_like_text(b"line one\r\n\tline two"));
        assert!(!looks_like_text(b"nul\x00byte"));
        assert!(!looks_like_text(b""));
    }
}
