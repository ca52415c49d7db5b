//! Integration tests for artiscope-core.
//!
//! These tests drive the `Inspector` end to end against real files, with
//! fake collaborators standing in for platform tools.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use artiscope_core::ExtractionLimits;
use artiscope_core::FileKind;
use artiscope_core::InspectConfig;
use artiscope_core::Inspector;
use artiscope_core::ScanMode;
use artiscope_core::UnpackStrategy;
use artiscope_core::test_utils::IpaTestBuilder;
use artiscope_core::tools::ProcessOutput;
use artiscope_core::tools::ProcessRunner;
use artiscope_core::tools::SignatureChecker;
use tempfile::TempDir;

const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

/// Process runner that answers `codesign` and `otool` with canned output and
/// records every invocation.
#[derive(Default)]
struct FakeTools {
    calls: Mutex<Vec<String>>,
}

impl ProcessRunner for FakeTools {
    fn run(&self, program: &str, _args: &[&OsStr]) -> artiscope_core::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(program.to_string());
        let stdout = match program {
            "otool" => "MH_MAGIC_64 ARM64 E 0x00 EXECUTE 2 400 NOUNDEFS PIE\n\
                        Load command 0\n cmd LC_SEGMENT_64\n\
                        Load command 1\n cmd LC_ENCRYPTION_INFO_64\n"
                .to_string(),
            _ => String::new(),
        };
        Ok(ProcessOutput {
            exit_code: Some(0),
            stdout,
        })
    }
}

struct BundlesSigned;

impl SignatureChecker for BundlesSigned {
    fn is_signed(&self, path: &Path) -> bool {
        path.extension().is_some_and(|e| e == "app")
    }
}

fn tool_backed_inspector(runner: Arc<FakeTools>) -> Inspector {
    Inspector::builder()
        .config(InspectConfig {
            enable_external_tools: true,
            ..InspectConfig::default()
        })
        .process_runner(runner)
        .build()
}

#[test]
fn test_scan_shallow_and_recursive() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("file1.txt"), "Test content 1").unwrap();
    fs::write(root.join("file2.json"), "{\"test\": true}").unwrap();
    fs::create_dir(root.join("subdir")).unwrap();
    fs::write(root.join("subdir/file3.txt"), "Test content 3").unwrap();
    fs::write(root.join(".hidden"), "hidden").unwrap();

    let inspector = Inspector::new(&InspectConfig::offline());

    let shallow = inspector.scan(root, ScanMode::Shallow);
    assert_eq!(shallow.len(), 3);
    assert!(shallow.iter().all(|r| r.name != ".hidden"));

    let kinds: Vec<FileKind> = shallow.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![FileKind::Text, FileKind::Json, FileKind::Unknown]
    );

    let recursive = inspector.scan(root, ScanMode::Recursive);
    assert_eq!(recursive.len(), 4);
    assert!(recursive.iter().any(|r| r.name == "file3.txt"));
    assert!(recursive.iter().all(|r| r.name != ".hidden"));
}

#[test]
fn test_package_end_to_end() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Demo.ipa");
    let ipa = IpaTestBuilder::new("Demo")
        .info(&[
            ("CFBundleIdentifier", "com.example.demo"),
            ("CFBundleShortVersionString", "3.0"),
            ("MinimumOSVersion", "16.0"),
            ("CFBundleName", "Demo"),
            ("CFBundleExecutable", "Demo"),
        ])
        .executable("Demo")
        .build();
    fs::write(&path, ipa).unwrap();

    let inspector = Inspector::builder()
        .config(InspectConfig::offline())
        .signature_checker(Arc::new(BundlesSigned))
        .build();

    assert_eq!(inspector.classify(&path), FileKind::Package);

    let record = inspector.analyze_package(&path);
    assert_eq!(record.bundle_id, "com.example.demo");
    assert_eq!(record.version, "3.0");
    assert_eq!(record.minimum_platform_version, "16.0");
    assert_eq!(record.display_name, "Demo");
    assert!(record.is_signed);
    assert!(!record.has_embedded_provisioning);
    assert_eq!(record.executable_count, 1);
}

#[test]
fn test_package_without_bundle_is_stub() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Broken.ipa");
    fs::write(
        &path,
        artiscope_core::test_utils::create_test_zip(vec![("Payload/readme.txt", b"no app")]),
    )
    .unwrap();

    let inspector = Inspector::new(&InspectConfig::offline());
    assert!(inspector.analyze_package(&path).is_stub());
}

#[test]
fn test_package_over_extraction_limits_is_stub() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Large.ipa");
    let ipa = IpaTestBuilder::new("Large")
        .info(&[("CFBundleIdentifier", "com.example.large")])
        .build();
    fs::write(&path, ipa).unwrap();

    let relaxed = Inspector::new(&InspectConfig::offline());
    assert_eq!(relaxed.analyze_package(&path).bundle_id, "com.example.large");

    let strict = Inspector::new(&InspectConfig {
        limits: ExtractionLimits {
            max_total_size: 64,
            ..ExtractionLimits::default()
        },
        ..InspectConfig::offline()
    });
    assert!(strict.analyze_package(&path).is_stub());
}

#[test]
fn test_container_with_tool_output() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Demo");
    fs::write(&path, [0xCF, 0xFA, 0xED, 0xFE, 0x0C, 0x00, 0x00, 0x01]).unwrap();

    let runner = Arc::new(FakeTools::default());
    let inspector = tool_backed_inspector(Arc::clone(&runner));

    let record = inspector.analyze_container(&path);
    assert!(record.is_valid);
    assert!(record.is_64_bit);
    assert!(record.is_arm64e);
    assert!(record.has_encryption);
    assert!(record.is_position_independent);
    assert_eq!(record.load_command_count, 2);
    assert_eq!(record.architecture_summary, "arm64");

    let calls = runner.calls.lock().unwrap().clone();
    assert_eq!(calls, vec!["otool"]);
}

#[test]
fn test_non_container_skips_dump_tool() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    fs::write(&path, "plain notes").unwrap();

    let runner = Arc::new(FakeTools::default());
    let record = tool_backed_inspector(Arc::clone(&runner)).analyze_container(&path);

    assert!(!record.is_valid);
    assert!(runner.calls.lock().unwrap().is_empty());
}

#[test]
fn test_probe_uses_signature_tool() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Demo");
    fs::write(&path, [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x02]).unwrap();

    let runner = Arc::new(FakeTools::default());
    let record = tool_backed_inspector(Arc::clone(&runner))
        .probe(&path)
        .unwrap();

    assert!(record.is_signed);
    assert_eq!(record.kind, FileKind::ExecutableContainer);
    assert_eq!(record.magic, "CA FE BA BE 00 00 00 02");
    assert_eq!(runner.calls.lock().unwrap().clone(), vec!["codesign"]);
}

#[test]
fn test_external_unpack_strategy_uses_runner() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Demo.ipa");
    fs::write(&path, IpaTestBuilder::new("Demo").build()).unwrap();

    let runner = Arc::new(FakeTools::default());
    let inspector = Inspector::builder()
        .config(InspectConfig {
            enable_external_tools: true,
            unpack_strategy: UnpackStrategy::External,
            ..InspectConfig::default()
        })
        .process_runner(Arc::clone(&runner) as Arc<dyn ProcessRunner>)
        .build();

    // The fake unzip extracts nothing, so no bundle is found.
    assert!(inspector.analyze_package(&path).is_stub());
    assert_eq!(runner.calls.lock().unwrap().clone(), vec!["unzip"]);
}

#[test]
fn test_digests_and_integrity() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hello.txt");
    fs::write(&path, "hello world").unwrap();

    let inspector = Inspector::new(&InspectConfig::offline());
    let digests = inspector.digests(&path).unwrap();
    assert_eq!(digests.sha256, HELLO_SHA256);
    assert_eq!(digests.md5.len(), 32);
    assert_eq!(digests.sha1.len(), 40);
    assert!(digests.matches(&digests.sha1.to_ascii_uppercase()));

    assert!(inspector.verify_integrity(&path, &HELLO_SHA256.to_ascii_uppercase()));
    assert!(!inspector.verify_integrity(&path, "deadbeef"));
    assert!(inspector.digests(temp.path().join("missing")).is_none());
}

#[test]
fn test_compare_scenarios() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.txt");
    let b = temp.path().join("b.txt");
    let c = temp.path().join("c.txt");
    fs::write(&a, "Content A").unwrap();
    fs::write(&b, "Content B").unwrap();
    fs::write(&c, "This is much longer content").unwrap();

    let inspector = Inspector::default();
    assert!(inspector.compare(&a, &a).identical);

    let ab = inspector.compare(&a, &b);
    assert!(!ab.identical);
    assert_eq!(ab.diff_size, 1);

    let ac = inspector.compare(&a, &c);
    assert!(!ac.identical);
    assert_eq!(ac.diff_size, 18);
}
