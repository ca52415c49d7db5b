//! Semantic file kind enumeration.

use serde::Serialize;
use std::fmt;

/// Semantic type of a file, derived from its content and extension.
///
/// Exactly one variant describes any given file. The kind is always derived
/// on demand and never persisted.
///
/// # Examples
///
/// ```
/// use artiscope_core::types::FileKind;
///
/// assert_eq!(FileKind::ExecutableContainer.label(), "executable");
/// assert_eq!(FileKind::Package.to_string(), "package");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Nothing could be determined.
    #[default]
    Unknown,
    /// Plain text.
    Text,
    /// Raster image (JPEG, PNG, ...).
    Image,
    /// Video container, including ISO base media files.
    Video,
    /// Audio file.
    Audio,
    /// Generic archive (zip, deb, ...).
    Archive,
    /// Installable application package (zip-based app bundle).
    Package,
    /// Native executable container (thin or fat/universal).
    ExecutableContainer,
    /// Property list, binary or XML.
    PropertyList,
    /// JSON document.
    Json,
    /// XML document.
    Xml,
    /// PDF document.
    Pdf,
    /// Certificate or key container.
    Certificate,
    /// Provisioning profile.
    ProvisioningProfile,
    /// Dynamic library.
    DynamicLibrary,
}

impl FileKind {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Unknown,
        Self::Text,
        Self::Image,
        Self::Video,
        Self::Audio,
        Self::Archive,
        Self::Package,
        Self::ExecutableContainer,
        Self::PropertyList,
        Self::Json,
        Self::Xml,
        Self::Pdf,
        Self::Certificate,
        Self::ProvisioningProfile,
        Self::DynamicLibrary,
    ];

    /// Returns a stable lowercase label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Archive => "archive",
            Self::Package => "package",
            Self::ExecutableContainer => "executable",
            Self::PropertyList => "plist",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Pdf => "pdf",
            Self::Certificate => "certificate",
            Self::ProvisioningProfile => "provisioning-profile",
            Self::DynamicLibrary => "dylib",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
