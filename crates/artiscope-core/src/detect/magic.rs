//! Magic signature table.
//!
//! Ordered list of byte prefixes tried first-match-wins against the start of
//! a file. Built once and never mutated.

use std::sync::LazyLock;

use crate::types::FileKind;

/// 32-bit single-architecture container, big-endian byte order.
pub const MH_MAGIC: [u8; 4] = [0xFE, 0xED, 0xFA, 0xCE];
/// 32-bit single-architecture container, little-endian byte order.
pub const MH_CIGAM: [u8; 4] = [0xCE, 0xFA, 0xED, 0xFE];
/// 64-bit single-architecture container, big-endian byte order.
pub const MH_MAGIC_64: [u8; 4] = [0xFE, 0xED, 0xFA, 0xCF];
/// 64-bit single-architecture container, little-endian byte order.
pub const MH_CIGAM_64: [u8; 4] = [0xCF, 0xFA, 0xED, 0xFE];
/// Fat/universal container, big-endian byte order.
pub const FAT_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];
/// Fat/universal container, little-endian byte order.
pub const FAT_CIGAM: [u8; 4] = [0xBE, 0xBA, 0xFE, 0xCA];
/// Fat/universal container with 64-bit offsets, big-endian byte order.
pub const FAT_MAGIC_64: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBF];
/// Fat/universal container with 64-bit offsets, little-endian byte order.
pub const FAT_CIGAM_64: [u8; 4] = [0xBF, 0xBA, 0xFE, 0xCA];

/// Local file header of a zip archive.
pub const ZIP_LOCAL: [u8; 4] = *b"PK\x03\x04";
/// End-of-central-directory record of an empty zip archive.
pub const ZIP_EMPTY: [u8; 4] = *b"PK\x05\x06";
/// Spanned zip archive marker.
pub const ZIP_SPANNED: [u8; 4] = *b"PK\x07\x08";

const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const PDF_MAGIC: [u8; 4] = *b"%PDF";
const BPLIST_MAGIC: [u8; 6] = *b"bplist";

/// A byte prefix paired with the kind it identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicSignature {
    /// Bytes the file must start with.
    pub prefix: &'static [u8],
    /// Kind assigned on match.
    pub kind: FileKind,
}

impl MagicSignature {
    const fn new(prefix: &'static [u8], kind: FileKind) -> Self {
        Self { prefix, kind }
    }

    /// Returns `true` if `sample` starts with this signature.
    #[must_use]
    pub fn matches(&self, sample: &[u8]) -> bool {
        sample.starts_with(self.prefix)
    }
}

/// Process-wide signature table, in priority order.
pub static SIGNATURES: LazyLock<Vec<MagicSignature>> = LazyLock::new(|| {
    vec![
        MagicSignature::new(&MH_MAGIC, FileKind::ExecutableContainer),
        MagicSignature::new(&MH_CIGAM, FileKind::ExecutableContainer),
        MagicSignature::new(&MH_MAGIC_64, FileKind::ExecutableContainer),
        MagicSignature::new(&MH_CIGAM_64, FileKind::ExecutableContainer),
        MagicSignature::new(&FAT_MAGIC, FileKind::ExecutableContainer),
        MagicSignature::new(&FAT_CIGAM, FileKind::ExecutableContainer),
        MagicSignature::new(&FAT_MAGIC_64, FileKind::ExecutableContainer),
        MagicSignature::new(&FAT_CIGAM_64, FileKind::ExecutableContainer),
        MagicSignature::new(&ZIP_LOCAL, FileKind::Archive),
        MagicSignature::new(&ZIP_EMPTY, FileKind::Archive),
        MagicSignature::new(&ZIP_SPANNED, FileKind::Archive),
        MagicSignature::new(&JPEG_SOI, FileKind::Image),
        MagicSignature::new(&PNG_SIGNATURE, FileKind::Image),
        MagicSignature::new(&PDF_MAGIC, FileKind::Pdf),
        MagicSignature::new(&BPLIST_MAGIC, FileKind::PropertyList),
    ]
});

/// Returns the kind of the first signature `sample` starts with.
#[must_use]
pub fn match_signature(sample: &[u8]) -> Option<FileKind> {
    SIGNATURES
        .iter()
        .find(|signature| signature.matches(sample))
        .map(|signature| signature.kind)
}
