//! Extension lookup table.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::FileKind;

static EXTENSIONS: LazyLock<HashMap<&'static str, FileKind>> = LazyLock::new(|| {
    let groups: [(&[&'static str], FileKind); 14] = [
        (&["json"], FileKind::Json),
        (&["plist"], FileKind::PropertyList),
        (&["xml"], FileKind::Xml),
        (&["txt", "text", "md", "log"], FileKind::Text),
        (&["p12", "pfx", "cer", "crt", "der", "pem"], FileKind::Certificate),
        (&["mobileprovision"], FileKind::ProvisioningProfile),
        (&["dylib"], FileKind::DynamicLibrary),
        (
            &["mp3", "m4a", "aac", "wav", "flac", "aiff", "caf"],
            FileKind::Audio,
        ),
        (&["mp4", "m4v", "mov", "avi", "mkv"], FileKind::Video),
        (
            &["jpg", "jpeg", "png", "gif", "heic", "bmp", "tiff", "webp"],
            FileKind::Image,
        ),
        (&["pdf"], FileKind::Pdf),
        (&["zip"], FileKind::Archive),
        (&["deb"], FileKind::Archive),
        (&["ipa", "tipa"], FileKind::Package),
    ];

    groups
        .into_iter()
        .flat_map(|(extensions, kind)| extensions.iter().map(move |ext| (*ext, kind)))
        .collect()
});

/// Looks up the kind associated with a file extension.
///
/// Matching is ASCII case-insensitive. Returns `None` when the table has no
/// opinion.
///
/// # Examples
///
/// ```
/// use artiscope_core::detect::kind_for_extension;
/// use artiscope_core::types::FileKind;
///
/// assert_eq!(kind_for_extension("IPA"), Some(FileKind::Package));
/// assert_eq!(kind_for_extension("xyz"), None);
/// ```
#[must_use]
pub fn kind_for_extension(extension: &str) -> Option<FileKind> {
    let lower = extension.to_ascii_lowercase();
    EXTENSIONS.get(lower.as_str()).copied()
}

/// Returns `true` for extensions that mark a zip archive as an app package.
#[must_use]
pub fn is_package_extension(extension: &str) -> bool {
    extension.eq_ignore_ascii_case("ipa") || extension.eq_ignore_ascii_case("tipa")
}
