//! Inspector facade and builder.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::InspectConfig;
use crate::UnpackStrategy;
use crate::analysis::PackageTools;
use crate::analysis::analyze_container;
use crate::analysis::analyze_package;
use crate::compare::Comparison;
use crate::compare::compare_files;
use crate::detect::classify_path;
use crate::digest::compute_digests;
use crate::integrity::verify_file_integrity;
use crate::probe::probe_path;
use crate::scan::ScanMode;
use crate::scan::scan_directory;
use crate::tools::CodesignChecker;
use crate::tools::CommandUnpacker;
use crate::tools::NoSignatureChecker;
use crate::tools::NoStructureDumper;
use crate::tools::NoUnpacker;
use crate::tools::OtoolDumper;
use crate::tools::PlistParser;
use crate::tools::ProcessRunner;
use crate::tools::PropertyListParser;
use crate::tools::SignatureChecker;
use crate::tools::StructureDumper;
use crate::tools::SystemProcessRunner;
use crate::tools::Unpacker;
use crate::tools::ZipUnpacker;
use crate::types::ContainerRecord;
use crate::types::DigestSet;
use crate::types::FileKind;
use crate::types::FileRecord;
use crate::types::PackageRecord;

/// Which collaborator capabilities an [`Inspector`] has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Signature checks can report `true`.
    pub signature_check: bool,
    /// Structure dumps are produced.
    pub structure_dump: bool,
    /// Packages can be extracted.
    pub unpack: bool,
}

/// Entry point bundling the configured collaborators.
///
/// Holds no per-call state; share it across threads with `Arc`.
///
/// # Examples
///
/// ```no_run
/// use artiscope_core::InspectConfig;
/// use artiscope_core::Inspector;
/// use artiscope_core::scan::ScanMode;
///
/// let inspector = Inspector::new(&InspectConfig::default());
/// for record in inspector.scan("Downloads", ScanMode::Shallow) {
///     println!("{} {}", record.kind, record.path.display());
/// }
/// ```
#[derive(Clone)]
pub struct Inspector {
    signature: Arc<dyn SignatureChecker>,
    dumper: Arc<dyn StructureDumper>,
    unpacker: Arc<dyn Unpacker>,
    plist: Arc<dyn PropertyListParser>,
}

impl Inspector {
    /// Creates an inspector wired according to `config`.
    #[must_use]
    pub fn new(config: &InspectConfig) -> Self {
        InspectorBuilder::new().config(config.clone()).build()
    }

    /// Returns a builder for custom collaborator wiring.
    #[must_use]
    pub fn builder() -> InspectorBuilder {
        InspectorBuilder::new()
    }

    /// Reports which collaborators are available.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            signature_check: self.signature.is_available(),
            structure_dump: self.dumper.is_available(),
            unpack: self.unpacker.is_available(),
        }
    }

    /// Classifies a file by content, then extension.
    pub fn classify<P: AsRef<Path>>(&self, path: P) -> FileKind {
        classify_path(path)
    }

    /// Probes filesystem metadata. See [`probe_path`].
    pub fn probe<P: AsRef<Path>>(&self, path: P) -> Option<FileRecord> {
        probe_path(path, self.signature.as_ref())
    }

    /// Lists the non-hidden entries under `root`. See [`scan_directory`].
    pub fn scan<P: AsRef<Path>>(&self, root: P, mode: ScanMode) -> Vec<FileRecord> {
        scan_directory(root, mode, self.signature.as_ref())
    }

    /// Computes MD5, SHA-1 and SHA-256 in one pass.
    pub fn digests<P: AsRef<Path>>(&self, path: P) -> Option<DigestSet> {
        compute_digests(path)
    }

    /// Analyzes an executable container.
    pub fn analyze_container<P: AsRef<Path>>(&self, path: P) -> ContainerRecord {
        analyze_container(path, self.dumper.as_ref())
    }

    /// Analyzes a zip-based application package.
    pub fn analyze_package<P: AsRef<Path>>(&self, path: P) -> PackageRecord {
        let tools = PackageTools {
            unpacker: self.unpacker.as_ref(),
            plist: self.plist.as_ref(),
            signature: self.signature.as_ref(),
        };
        analyze_package(path, &tools)
    }

    /// Compares two files byte for byte.
    pub fn compare<P: AsRef<Path>, Q: AsRef<Path>>(&self, a: P, b: Q) -> Comparison {
        compare_files(a, b)
    }

    /// Checks a file's SHA-256 against `expected`.
    pub fn verify_integrity<P: AsRef<Path>>(&self, path: P, expected: &str) -> bool {
        verify_file_integrity(path, expected)
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(&InspectConfig::default())
    }
}

impl fmt::Debug for Inspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}

/// Builder for an [`Inspector`].
///
/// Collaborators that are not set explicitly are derived from the
/// configuration: external tools are wired only when
/// `enable_external_tools` is set, otherwise their no-op fallbacks are used.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use artiscope_core::InspectConfig;
/// use artiscope_core::Inspector;
/// use artiscope_core::tools::NoUnpacker;
///
/// let inspector = Inspector::builder()
///     .config(InspectConfig::offline())
///     .unpacker(Arc::new(NoUnpacker))
///     .build();
/// assert!(!inspector.capabilities().unpack);
/// ```
#[derive(Default)]
pub struct InspectorBuilder {
    config: Option<InspectConfig>,
    runner: Option<Arc<dyn ProcessRunner>>,
    signature: Option<Arc<dyn SignatureChecker>>,
    dumper: Option<Arc<dyn StructureDumper>>,
    unpacker: Option<Arc<dyn Unpacker>>,
    plist: Option<Arc<dyn PropertyListParser>>,
}

impl InspectorBuilder {
    /// Creates a new `InspectorBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: InspectConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the process runner used by tool-backed collaborators.
    #[must_use]
    pub fn process_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Overrides the signature checker.
    #[must_use]
    pub fn signature_checker(mut self, checker: Arc<dyn SignatureChecker>) -> Self {
        self.signature = Some(checker);
        self
    }

    /// Overrides the structure dumper.
    #[must_use]
    pub fn structure_dumper(mut self, dumper: Arc<dyn StructureDumper>) -> Self {
        self.dumper = Some(dumper);
        self
    }

    /// Overrides the unpacker.
    #[must_use]
    pub fn unpacker(mut self, unpacker: Arc<dyn Unpacker>) -> Self {
        self.unpacker = Some(unpacker);
        self
    }

    /// Overrides the property-list parser.
    #[must_use]
    pub fn plist_parser(mut self, parser: Arc<dyn PropertyListParser>) -> Self {
        self.plist = Some(parser);
        self
    }

    /// Builds the inspector.
    #[must_use]
    pub fn build(self) -> Inspector {
        let config = self.config.unwrap_or_default();
        let runner: Arc<dyn ProcessRunner> =
            self.runner.unwrap_or_else(|| Arc::new(SystemProcessRunner));
        let external = config.enable_external_tools;

        let signature = self.signature.unwrap_or_else(|| -> Arc<dyn SignatureChecker> {
            if external {
                Arc::new(CodesignChecker::new(
                    Arc::clone(&runner),
                    config.signature_tool.clone(),
                ))
            } else {
                Arc::new(NoSignatureChecker)
            }
        });

        let dumper = self.dumper.unwrap_or_else(|| -> Arc<dyn StructureDumper> {
            if external {
                Arc::new(OtoolDumper::new(Arc::clone(&runner), config.dump_tool.clone()))
            } else {
                Arc::new(NoStructureDumper)
            }
        });

        let unpacker = self.unpacker.unwrap_or_else(|| -> Arc<dyn Unpacker> {
            match config.unpack_strategy {
                UnpackStrategy::InProcess => Arc::new(ZipUnpacker::new(config.limits)),
                UnpackStrategy::External if external => Arc::new(CommandUnpacker::new(
                    Arc::clone(&runner),
                    config.unpack_tool.clone(),
                )),
                UnpackStrategy::External | UnpackStrategy::Disabled => Arc::new(NoUnpacker),
            }
        });

        let plist = self.plist.unwrap_or_else(|| Arc::new(PlistParser));

        Inspector {
            signature,
            dumper,
            unpacker,
            plist,
        }
    }
}
