//! File type detection.
//!
//! Content sniffing against an ordered magic-signature table, with an
//! extension table as fallback. Both tables are immutable process-wide
//! statics.

pub mod classify;
pub mod extension;
pub mod magic;

pub use classify::SNIFF_LEN;
pub use classify::classify_bytes;
pub use classify::classify_path;
pub use extension::kind_for_extension;
pub use magic::MagicSignature;
pub use magic::SIGNATURES;
