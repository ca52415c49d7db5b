//! Application package analysis.

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::InspectError;
use crate::Result;
use crate::tools::PropertyListParser;
use crate::tools::PropertyMap;
use crate::tools::SignatureChecker;
use crate::tools::Unpacker;
use crate::types::PackageRecord;
use crate::types::package_record::PLACEHOLDER_MIN_VERSION;
use crate::types::package_record::PLACEHOLDER_NAME;
use crate::types::package_record::PLACEHOLDER_VERSION;
use crate::types::package_record::UNKNOWN_BUNDLE_ID;

const PAYLOAD_DIR: &str = "Payload";
const BUNDLE_SUFFIX: &str = ".app";
const MANIFEST_NAME: &str = "Info.plist";
const PROVISIONING_NAME: &str = "embedded.mobileprovision";
const WORK_DIR_PREFIX: &str = "artiscope-pkg-";

const KEY_BUNDLE_ID: &str = "CFBundleIdentifier";
const KEY_VERSION: &str = "CFBundleShortVersionString";
const KEY_MIN_VERSION: &str = "MinimumOSVersion";
const KEY_DISPLAY_NAME: &str = "CFBundleDisplayName";
const KEY_NAME: &str = "CFBundleName";
const KEY_EXECUTABLE: &str = "CFBundleExecutable";

/// Collaborators the package analyzer delegates to.
#[derive(Clone, Copy)]
pub struct PackageTools<'a> {
    /// Extracts the package into a working directory.
    pub unpacker: &'a dyn Unpacker,
    /// Parses the bundle's `Info.plist`.
    pub plist: &'a dyn PropertyListParser,
    /// Reports whether the extracted bundle is signed.
    pub signature: &'a dyn SignatureChecker,
}

/// Analyzes the zip-based application package at `path`.
///
/// The package is extracted into a private temporary directory that is
/// removed before returning. Any failure (no unpacker, extraction error, no
/// `Payload/*.app` bundle, unreadable manifest) yields
/// [`PackageRecord::stub`]. Individual missing manifest keys take the stub's
/// placeholder for that field.
///
/// # Examples
///
/// ```no_run
/// use artiscope_core::analysis::PackageTools;
/// use artiscope_core::analysis::analyze_package;
/// use artiscope_core::tools::NoSignatureChecker;
/// use artiscope_core::tools::PlistParser;
/// use artiscope_core::tools::ZipUnpacker;
///
/// let unpacker = ZipUnpacker::default();
/// let tools = PackageTools {
///     unpacker: &unpacker,
///     plist: &PlistParser,
///     signature: &NoSignatureChecker,
/// };
/// let record = analyze_package("Demo.ipa", &tools);
/// println!("{} {}", record.bundle_id, record.version);
/// ```
pub fn analyze_package<P: AsRef<Path>>(path: P, tools: &PackageTools<'_>) -> PackageRecord {
    let path = path.as_ref();

    if !tools.unpacker.is_available() {
        debug!(path = %path.display(), "no unpacker, returning stub package record");
        return PackageRecord::stub();
    }

    match try_analyze(path, tools) {
        Ok(record) => record,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "package analysis failed");
            PackageRecord::stub()
        }
    }
}

fn try_analyze(path: &Path, tools: &PackageTools<'_>) -> Result<PackageRecord> {
    let work_dir = tempfile::Builder::new()
        .prefix(WORK_DIR_PREFIX)
        .tempdir()?;

    tools.unpacker.unpack(path, work_dir.path())?;

    let bundle = locate_bundle(work_dir.path())?;
    let manifest_path = bundle.join(MANIFEST_NAME);
    let manifest_bytes =
        fs::read(&manifest_path).map_err(|e| InspectError::unreadable(&manifest_path, e))?;
    let manifest = tools.plist.parse(&manifest_bytes)?;

    let record = PackageRecord {
        bundle_id: string_or(&manifest, &[KEY_BUNDLE_ID], UNKNOWN_BUNDLE_ID),
        version: string_or(&manifest, &[KEY_VERSION], PLACEHOLDER_VERSION),
        minimum_platform_version: string_or(
            &manifest,
            &[KEY_MIN_VERSION],
            PLACEHOLDER_MIN_VERSION,
        ),
        display_name: string_or(&manifest, &[KEY_DISPLAY_NAME, KEY_NAME], PLACEHOLDER_NAME),
        has_embedded_provisioning: bundle.join(PROVISIONING_NAME).is_file(),
        is_signed: tools.signature.is_signed(&bundle),
        executable_count: u8::from(has_main_executable(&bundle, &manifest)),
    };

    debug!(
        path = %path.display(),
        bundle_id = %record.bundle_id,
        version = %record.version,
        "package analyzed"
    );

    Ok(record)
}

/// Finds the first `*.app` directory under `Payload/`, by name order.
fn locate_bundle(root: &Path) -> Result<PathBuf> {
    let payload = root.join(PAYLOAD_DIR);
    let entries = fs::read_dir(&payload)
        .map_err(|_| InspectError::Extraction(format!("no {PAYLOAD_DIR} directory")))?;

    let mut bundles: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|p| {
            p.is_dir()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(BUNDLE_SUFFIX))
        })
        .collect();
    bundles.sort();

    bundles.into_iter().next().ok_or_else(|| {
        InspectError::Extraction(format!("no {BUNDLE_SUFFIX} bundle in {PAYLOAD_DIR}"))
    })
}

fn string_or(manifest: &PropertyMap, keys: &[&str], placeholder: &str) -> String {
    keys.iter()
        .filter_map(|key| manifest.get(*key))
        .find(|value| !value.is_empty())
        .map_or_else(|| placeholder.to_string(), Clone::clone)
}

fn has_main_executable(bundle: &Path, manifest: &PropertyMap) -> bool {
    let Some(name) = manifest.get(KEY_EXECUTABLE) else {
        return false;
    };

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => bundle.join(name).is_file(),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::IpaTestBuilder;
    use crate::tools::NoSignatureChecker;
    use crate::tools::NoUnpacker;
    use crate::tools::PlistParser;
    use crate::config::ExtractionLimits;
    use crate::test_utils::ZipTestBuilder;
    use crate::tools::ZipUnpacker;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static UNPACKER: ZipUnpacker = ZipUnpacker::new(ExtractionLimits::DEFAULT);

    struct BundlesSigned;

    impl SignatureChecker for BundlesSigned {
        fn is_signed(&self, path: &Path) -> bool {
            path.extension().is_some_and(|e| e == "app")
        }
    }

    /// Remembers the work directory it was asked to unpack into.
    #[derive(Default)]
    struct RecordingUnpacker {
        dest: Mutex<Option<PathBuf>>,
    }

    impl RecordingUnpacker {
        fn dest(&self) -> PathBuf {
            self.dest.lock().unwrap().clone().unwrap()
        }
    }

    impl Unpacker for RecordingUnpacker {
        fn unpack(&self, archive: &Path, dest: &Path) -> Result<()> {
            *self.dest.lock().unwrap() = Some(dest.to_path_buf());
            UNPACKER.unpack(archive, dest)
        }
    }

    fn tools() -> PackageTools<'static> {
        PackageTools {
            unpacker: &UNPACKER,
            plist: &PlistParser,
            signature: &NoSignatureChecker,
        }
    }

    fn write_ipa(temp: &TempDir, data: &[u8]) -> PathBuf {
        let path = temp.path().join("Demo.ipa");
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_full_package() {
        let temp = TempDir::new().unwrap();
        let ipa = IpaTestBuilder::new("Demo")
            .info(&[
                ("CFBundleIdentifier", "com.example.demo"),
                ("CFBundleShortVersionString", "2.1.0"),
                ("MinimumOSVersion", "15.0"),
                ("CFBundleDisplayName", "Demo App"),
                ("CFBundleName", "Demo"),
                ("CFBundleExecutable", "Demo"),
            ])
            .executable("Demo")
            .provisioning()
            .build();
        let path = write_ipa(&temp, &ipa);

        let record = analyze_package(
            &path,
            &PackageTools {
                signature: &BundlesSigned,
                ..tools()
            },
        );
        assert_eq!(record.bundle_id, "com.example.demo");
        assert_eq!(record.version, "2.1.0");
        assert_eq!(record.minimum_platform_version, "15.0");
        assert_eq!(record.display_name, "Demo App");
        assert!(record.has_embedded_provisioning);
        assert!(record.is_signed);
        assert_eq!(record.executable_count, 1);
    }

    #[test]
    fn test_missing_keys_take_placeholders() {
        let temp = TempDir::new().unwrap();
        let ipa = IpaTestBuilder::new("Demo")
            .info(&[
                ("CFBundleIdentifier", "com.example.sparse"),
                ("CFBundleName", "Sparse"),
                ("CFBundleExecutable", "Missing"),
            ])
            .build();
        let path = write_ipa(&temp, &ipa);

        let record = analyze_package(&path, &tools());
        assert_eq!(record.bundle_id, "com.example.sparse");
        assert_eq!(record.version, PLACEHOLDER_VERSION);
        assert_eq!(record.minimum_platform_version, PLACEHOLDER_MIN_VERSION);
        assert_eq!(record.display_name, "Sparse");
        assert!(!record.has_embedded_provisioning);
        assert_eq!(record.executable_count, 0);
        assert!(!record.is_stub());
    }

    #[test]
    fn test_no_payload_is_stub() {
        let temp = TempDir::new().unwrap();
        let data = crate::test_utils::create_test_zip(vec![("readme.txt", b"hi")]);
        let path = write_ipa(&temp, &data);
        assert!(analyze_package(&path, &tools()).is_stub());
    }

    #[test]
    fn test_missing_manifest_is_stub() {
        let temp = TempDir::new().unwrap();
        let path = write_ipa(&temp, &IpaTestBuilder::new("Demo").build());
        assert!(analyze_package(&path, &tools()).is_stub());
    }

    #[test]
    fn test_corrupt_manifest_is_stub() {
        let temp = TempDir::new().unwrap();
        let ipa = IpaTestBuilder::new("Demo").raw_info("garbage").build();
        let path = write_ipa(&temp, &ipa);
        assert!(analyze_package(&path, &tools()).is_stub());
    }

    #[test]
    fn test_not_a_zip_is_stub() {
        let temp = TempDir::new().unwrap();
        let path = write_ipa(&temp, b"plain text pretending to be a package");
        assert!(analyze_package(&path, &tools()).is_stub());
    }

    #[test]
    fn test_no_unpacker_is_stub() {
        let temp = TempDir::new().unwrap();
        let ipa = IpaTestBuilder::new("Demo")
            .info(&[("CFBundleIdentifier", "com.example.demo")])
            .build();
        let path = write_ipa(&temp, &ipa);

        let record = analyze_package(
            &path,
            &PackageTools {
                unpacker: &NoUnpacker,
                ..tools()
            },
        );
        assert!(record.is_stub());
    }

    #[test]
    fn test_work_dir_removed_after_success() {
        let temp = TempDir::new().unwrap();
        let ipa = IpaTestBuilder::new("Demo")
            .info(&[("CFBundleIdentifier", "com.example.demo")])
            .build();
        let path = write_ipa(&temp, &ipa);
        let unpacker = RecordingUnpacker::default();

        let record = analyze_package(
            &path,
            &PackageTools {
                unpacker: &unpacker,
                ..tools()
            },
        );

        assert_eq!(record.bundle_id, "com.example.demo");
        let dest = unpacker.dest();
        assert!(
            dest.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(WORK_DIR_PREFIX))
        );
        assert!(!dest.exists());
    }

    #[test]
    fn test_work_dir_removed_after_stub() {
        let temp = TempDir::new().unwrap();
        let data = crate::test_utils::create_test_zip(vec![("readme.txt", b"hi")]);
        let path = write_ipa(&temp, &data);
        let unpacker = RecordingUnpacker::default();

        let record = analyze_package(
            &path,
            &PackageTools {
                unpacker: &unpacker,
                ..tools()
            },
        );

        assert!(record.is_stub());
        assert!(!unpacker.dest().exists());
    }

    #[test]
    fn test_compression_bomb_is_stub() {
        let temp = TempDir::new().unwrap();
        let info =
            crate::test_utils::info_plist_xml(&[("CFBundleIdentifier", "com.example.bomb")]);
        let zeros = vec![0u8; 8 * 1024 * 1024];
        let ipa = ZipTestBuilder::new()
            .add_file("Payload/Bomb.app/Info.plist", info.as_bytes())
            .add_deflated_file("Payload/Bomb.app/filler.bin", &zeros)
            .build();
        let path = write_ipa(&temp, &ipa);
        let unpacker = RecordingUnpacker::default();

        let record = analyze_package(
            &path,
            &PackageTools {
                unpacker: &unpacker,
                ..tools()
            },
        );

        assert!(record.is_stub());
        assert!(!unpacker.dest().exists());
    }

    #[test]
    fn test_executable_name_must_stay_in_bundle() {
        let temp = TempDir::new().unwrap();
        let bundle = temp.path().join("Demo.app");
        fs::create_dir(&bundle).unwrap();
        fs::write(temp.path().join("outside"), b"x").unwrap();

        let mut manifest = PropertyMap::new();
        manifest.insert(KEY_EXECUTABLE.to_string(), "../outside".to_string());
        assert!(!has_main_executable(&bundle, &manifest));
    }
}
