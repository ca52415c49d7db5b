//! Application package facts.

use serde::Serialize;

/// Sentinel bundle identifier used by the stub record.
pub const UNKNOWN_BUNDLE_ID: &str = "unknown.bundle.id";

/// Placeholder version used by the stub record.
pub const PLACEHOLDER_VERSION: &str = "1.0";

/// Placeholder minimum platform version used by the stub record.
pub const PLACEHOLDER_MIN_VERSION: &str = "0.0";

/// Placeholder display name used by the stub record.
pub const PLACEHOLDER_NAME: &str = "Unknown";

/// Structural facts about a zip-based application package.
///
/// Always structurally complete. When real data cannot be obtained, the
/// analyzer returns [`PackageRecord::stub`] instead of an absent result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    /// Bundle identifier (`CFBundleIdentifier`).
    pub bundle_id: String,

    /// Short version string (`CFBundleShortVersionString`).
    pub version: String,

    /// Minimum platform version (`MinimumOSVersion`).
    pub minimum_platform_version: String,

    /// Display name, falling back to the bundle name.
    pub display_name: String,

    /// Whether `embedded.mobileprovision` is present in the bundle.
    pub has_embedded_provisioning: bool,

    /// Whether the bundle carries a valid code signature.
    pub is_signed: bool,

    /// 1 when the declared main executable exists, else 0.
    pub executable_count: u8,
}

impl PackageRecord {
    /// Returns the placeholder record used when the package cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use artiscope_core::types::PackageRecord;
    ///
    /// let stub = PackageRecord::stub();
    /// assert_eq!(stub.version, "1.0");
    /// assert!(stub.is_stub());
    /// ```
    #[must_use]
    pub fn stub() -> Self {
        Self {
            bundle_id: UNKNOWN_BUNDLE_ID.to_string(),
            version: PLACEHOLDER_VERSION.to_string(),
            minimum_platform_version: PLACEHOLDER_MIN_VERSION.to_string(),
            display_name: PLACEHOLDER_NAME.to_string(),
            has_embedded_provisioning: false,
            is_signed: false,
            executable_count: 0,
        }
    }

    /// Returns `true` if this record carries only placeholder values.
    #[must_use]
    pub fn is_stub(&self) -> bool {
        *self == Self::stub()
    }
}

impl Default for PackageRecord {
    fn default() -> Self {
        Self::stub()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_values() {
        let stub = PackageRecord::stub();
        assert_eq!(stub.bundle_id, UNKNOWN_BUNDLE_ID);
        assert_eq!(stub.display_name, PLACEHOLDER_NAME);
        assert_eq!(stub.executable_count, 0);
        assert!(!stub.is_signed);
    }

    #[test]
    fn test_real_record_is_not_stub() {
        let record = PackageRecord {
            bundle_id: "com.example.app".to_string(),
            ..PackageRecord::stub()
        };
        assert!(!record.is_stub());
    }
}
