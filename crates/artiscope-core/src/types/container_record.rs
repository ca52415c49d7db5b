//! Executable container facts.

use serde::Serialize;

/// Architecture label for 32-bit single-architecture containers.
pub const ARCH_ARM: &str = "arm";

/// Architecture label for 64-bit single-architecture containers.
pub const ARCH_ARM64: &str = "arm64";

/// Architecture label for fat/universal containers.
pub const ARCH_UNIVERSAL: &str = "universal";

/// Architecture label for unrecognized content.
pub const ARCH_UNKNOWN: &str = "unknown";

/// Structural facts about a native executable container.
///
/// Constructed once per analysis call and never mutated afterwards.
/// `architecture_count` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerRecord {
    /// Whether a known container magic was found.
    pub is_valid: bool,

    /// 64-bit single-architecture or fat/universal.
    pub is_64_bit: bool,

    /// Pointer-authentication (arm64e) subtype reported by the dump tool.
    pub is_arm64e: bool,

    /// Number of architecture slices (at least 1).
    pub architecture_count: u32,

    /// Short label: "arm", "arm64", "universal" or "unknown".
    pub architecture_summary: String,

    /// Encryption-info load command present.
    pub has_encryption: bool,

    /// Position-independent executable flag set.
    pub is_position_independent: bool,

    /// Number of load commands reported by the dump tool.
    pub load_command_count: u32,
}

impl ContainerRecord {
    /// Returns the record for content with no recognized container magic.
    ///
    /// # Examples
    ///
    /// ```
    /// use artiscope_core::types::ContainerRecord;
    ///
    /// let record = ContainerRecord::invalid();
    /// assert!(!record.is_valid);
    /// assert_eq!(record.architecture_count, 1);
    /// assert_eq!(record.architecture_summary, "unknown");
    /// ```
    #[must_use]
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            is_64_bit: false,
            is_arm64e: false,
            architecture_count: 1,
            architecture_summary: ARCH_UNKNOWN.to_string(),
            has_encryption: false,
            is_position_independent: false,
            load_command_count: 0,
        }
    }
}
