//! Inspection configuration.

/// Default signature-check program.
pub const DEFAULT_SIGNATURE_TOOL: &str = "codesign";
/// Default structure dump program.
pub const DEFAULT_DUMP_TOOL: &str = "otool";
/// Default external unpack program.
pub const DEFAULT_UNPACK_TOOL: &str = "unzip";

/// Default cap on bytes written while unpacking one package (2 GiB).
pub const DEFAULT_MAX_TOTAL_SIZE: u64 = 2 * 1024 * 1024 * 1024;
/// Default cap on file entries written while unpacking one package.
pub const DEFAULT_MAX_FILE_COUNT: usize = 50_000;
/// Default cap on a single entry's uncompressed/compressed size ratio.
pub const DEFAULT_MAX_COMPRESSION_RATIO: f64 = 100.0;

/// How packages are extracted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnpackStrategy {
    /// Extract with the in-process zip reader. Available on every target.
    #[default]
    InProcess,
    /// Run the configured unpack program.
    External,
    /// Never extract; package analysis always yields the stub.
    Disabled,
}

/// Bounds on what in-process package extraction may write to disk.
///
/// Packages are untrusted input. Exceeding any limit aborts the extraction
/// with [`InspectError::Extraction`](crate::InspectError::Extraction), which
/// the package analyzer turns into the stub record.
///
/// # Examples
///
/// ```
/// use artiscope_core::config::ExtractionLimits;
///
/// let strict = ExtractionLimits {
///     max_total_size: 64 * 1024 * 1024,
///     ..ExtractionLimits::default()
/// };
/// assert_eq!(strict.max_file_count, 50_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionLimits {
    /// Maximum total bytes written across all entries.
    pub max_total_size: u64,

    /// Maximum number of file entries written.
    pub max_file_count: usize,

    /// Maximum uncompressed/compressed ratio of any single entry.
    pub max_compression_ratio: f64,
}

impl ExtractionLimits {
    /// The default limits, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_total_size: DEFAULT_MAX_TOTAL_SIZE,
        max_file_count: DEFAULT_MAX_FILE_COUNT,
        max_compression_ratio: DEFAULT_MAX_COMPRESSION_RATIO,
    };
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Selects which collaborators an [`Inspector`](crate::Inspector) wires up.
///
/// # Examples
///
/// ```
/// use artiscope_core::InspectConfig;
/// use artiscope_core::UnpackStrategy;
///
/// // Platform defaults
/// let config = InspectConfig::default();
///
/// // No child processes at all
/// let offline = InspectConfig::offline();
/// assert!(!offline.enable_external_tools);
///
/// // Custom tool location
/// let custom = InspectConfig {
///     dump_tool: "/usr/local/bin/otool".to_string(),
///     unpack_strategy: UnpackStrategy::External,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InspectConfig {
    /// Program used for signature checks.
    pub signature_tool: String,

    /// Program used for structure dumps.
    pub dump_tool: String,

    /// Program used when `unpack_strategy` is `External`.
    pub unpack_tool: String,

    /// Package extraction strategy.
    pub unpack_strategy: UnpackStrategy,

    /// Allow spawning external programs. Defaults to `true` on Apple targets
    /// only, where the signature and dump tools exist.
    pub enable_external_tools: bool,

    /// Limits applied by the in-process unpacker.
    pub limits: ExtractionLimits,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            signature_tool: DEFAULT_SIGNATURE_TOOL.to_string(),
            dump_tool: DEFAULT_DUMP_TOOL.to_string(),
            unpack_tool: DEFAULT_UNPACK_TOOL.to_string(),
            unpack_strategy: UnpackStrategy::InProcess,
            enable_external_tools: cfg!(any(target_os = "macos", target_os = "ios")),
            limits: ExtractionLimits::default(),
        }
    }
}

impl InspectConfig {
    /// Creates a configuration that never spawns external programs.
    ///
    /// Package extraction still works through the in-process unpacker.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            enable_external_tools: false,
            ..Default::default()
        }
    }
}
