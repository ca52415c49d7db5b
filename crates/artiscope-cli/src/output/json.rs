//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use artiscope_core::Comparison;
use artiscope_core::ContainerRecord;
use artiscope_core::DigestSet;
use artiscope_core::FileKind;
use artiscope_core::FileRecord;
use artiscope_core::PackageRecord;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PathData<'a, T: Serialize> {
    path: &'a Path,
    #[serde(flatten)]
    record: &'a T,
}

impl OutputFormatter for JsonFormatter {
    fn format_file_record(&self, record: &FileRecord) -> Result<()> {
        Self::output(&JsonOutput::success("info", record))
    }

    fn format_classification(&self, results: &[(PathBuf, FileKind)]) -> Result<()> {
        #[derive(Serialize)]
        struct Classified<'a> {
            path: &'a Path,
            kind: FileKind,
        }

        let data: Vec<Classified<'_>> = results
            .iter()
            .map(|(path, kind)| Classified { path, kind: *kind })
            .collect();
        Self::output(&JsonOutput::success("classify", data))
    }

    fn format_scan(&self, root: &Path, records: &[FileRecord]) -> Result<()> {
        #[derive(Serialize)]
        struct ScanOutput<'a> {
            root: &'a Path,
            total_entries: usize,
            entries: &'a [FileRecord],
        }

        let data = ScanOutput {
            root,
            total_entries: records.len(),
            entries: records,
        };
        Self::output(&JsonOutput::success("scan", data))
    }

    fn format_digests(&self, path: &Path, digests: &DigestSet) -> Result<()> {
        let data = PathData {
            path,
            record: digests,
        };
        Self::output(&JsonOutput::success("hash", data))
    }

    fn format_container(&self, path: &Path, record: &ContainerRecord) -> Result<()> {
        Self::output(&JsonOutput::success("container", PathData { path, record }))
    }

    fn format_package(&self, path: &Path, record: &PackageRecord) -> Result<()> {
        #[derive(Serialize)]
        struct PackageOutput<'a> {
            path: &'a Path,
            is_stub: bool,
            #[serde(flatten)]
            record: &'a PackageRecord,
        }

        let data = PackageOutput {
            path,
            is_stub: record.is_stub(),
            record,
        };
        Self::output(&JsonOutput::success("package", data))
    }

    fn format_comparison(&self, a: &Path, b: &Path, result: &Comparison) -> Result<()> {
        #[derive(Serialize)]
        struct CompareOutput<'a> {
            a: &'a Path,
            b: &'a Path,
            #[serde(flatten)]
            result: &'a Comparison,
        }

        Self::output(&JsonOutput::success(
            "compare",
            CompareOutput { a, b, result },
        ))
    }

    fn format_verification(&self, path: &Path, expected: &str, matched: bool) -> Result<()> {
        #[derive(Serialize)]
        struct VerifyOutput<'a> {
            path: &'a Path,
            expected: &'a str,
            matched: bool,
        }

        let data = VerifyOutput {
            path,
            expected,
            matched,
        };
        let output = if matched {
            JsonOutput::success("verify", data)
        } else {
            JsonOutput::failure("verify", data, "SHA-256 digest mismatch")
        };
        Self::output(&output)
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        // stderr: stdout carries exactly one JSON document per run.
        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        if let Ok(json) = serde_json::to_string(&output) {
            let _ = writeln!(io::stderr(), "{json}");
        }
    }
}
