//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use artiscope_core::Comparison;
use artiscope_core::ContainerRecord;
use artiscope_core::DigestSet;
use artiscope_core::FileKind;
use artiscope_core::FileRecord;
use artiscope_core::PackageRecord;
use console::Term;
use console::style;
use std::path::Path;
use std::path::PathBuf;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn yes_no(flag: bool) -> &'static str {
        if flag { "yes" } else { "no" }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn field(&self, label: &str, value: impl std::fmt::Display) {
        self.line(&format!("  {label:<18}{value}"));
    }

    fn heading(&self, mark: &str, text: &str, ok: bool) {
        if self.use_colors {
            let mark = if ok {
                style(mark).green().bold()
            } else {
                style(mark).red().bold()
            };
            self.line(&format!("{mark} {text}"));
        } else {
            self.line(text);
        }
    }

    fn styled_kind(&self, kind: FileKind) -> String {
        if !self.use_colors {
            return kind.label().to_string();
        }
        let styled = style(kind.label());
        match kind {
            FileKind::ExecutableContainer | FileKind::DynamicLibrary => styled.green(),
            FileKind::Package | FileKind::Archive => styled.cyan(),
            FileKind::Certificate | FileKind::ProvisioningProfile => styled.magenta(),
            FileKind::Unknown => styled.dim(),
            _ => styled,
        }
        .to_string()
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_file_record(&self, record: &FileRecord) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading("●", &record.path.display().to_string(), true);
        self.field(
            "Kind:",
            if record.is_directory {
                "directory".to_string()
            } else {
                self.styled_kind(record.kind)
            },
        );
        self.field("Size:", Self::format_size(record.size));
        if !record.magic.is_empty() {
            self.field("Magic:", &record.magic);
        }
        self.field("Executable:", Self::yes_no(record.is_executable));
        self.field("Signed:", Self::yes_no(record.is_signed));

        if self.verbose {
            if let Some(mode) = record.mode {
                self.field("Mode:", format!("{:o}", mode & 0o7777));
            }
            self.field("Bytes:", record.size);
        }

        Ok(())
    }

    fn format_classification(&self, results: &[(PathBuf, FileKind)]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for (path, kind) in results {
            self.line(&format!(
                "{:<22} {}",
                self.styled_kind(*kind),
                path.display()
            ));
        }

        Ok(())
    }

    fn format_scan(&self, root: &Path, records: &[FileRecord]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut total_size = 0u64;
        for record in records {
            let type_char = if record.is_directory { "d" } else { "-" };
            let size = if self.verbose {
                record.size.to_string()
            } else {
                Self::format_size(record.size)
            };
            let kind = if record.is_directory {
                String::new()
            } else {
                self.styled_kind(record.kind)
            };
            let rel = record.path.strip_prefix(root).unwrap_or(&record.path);

            self.line(&format!(
                "{type_char} {size:>10}  {kind:<22} {}",
                rel.display()
            ));
            if !record.is_directory {
                total_size += record.size;
            }
        }

        self.line("");
        self.line(&format!(
            "Total: {} entries, {}",
            Self::format_number(records.len()),
            Self::format_size(total_size)
        ));

        Ok(())
    }

    fn format_digests(&self, path: &Path, digests: &DigestSet) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading("●", &path.display().to_string(), true);
        self.field("MD5:", &digests.md5);
        self.field("SHA-1:", &digests.sha1);
        self.field("SHA-256:", &digests.sha256);

        Ok(())
    }

    fn format_container(&self, path: &Path, record: &ContainerRecord) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if !record.is_valid {
            self.heading(
                "✗",
                &format!("{}: not an executable container", path.display()),
                false,
            );
            return Ok(());
        }

        self.heading("✓", &path.display().to_string(), true);
        self.field("Architecture:", &record.architecture_summary);
        self.field("Slices:", record.architecture_count);
        self.field("64-bit:", Self::yes_no(record.is_64_bit));
        self.field("arm64e:", Self::yes_no(record.is_arm64e));
        self.field("Encrypted:", Self::yes_no(record.has_encryption));
        self.field("PIE:", Self::yes_no(record.is_position_independent));
        self.field("Load commands:", record.load_command_count);

        Ok(())
    }

    fn format_package(&self, path: &Path, record: &PackageRecord) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if record.is_stub() {
            self.format_warning(&format!(
                "{}: package could not be read, showing placeholder values",
                path.display()
            ));
        } else {
            self.heading("✓", &path.display().to_string(), true);
        }

        self.field("Name:", &record.display_name);
        self.field("Bundle ID:", &record.bundle_id);
        self.field("Version:", &record.version);
        self.field("Minimum OS:", &record.minimum_platform_version);
        self.field(
            "Provisioning:",
            Self::yes_no(record.has_embedded_provisioning),
        );
        self.field("Signed:", Self::yes_no(record.is_signed));
        self.field("Executables:", record.executable_count);

        Ok(())
    }

    fn format_comparison(&self, a: &Path, b: &Path, result: &Comparison) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if result.identical {
            self.heading("✓", "Files are identical", true);
        } else {
            self.heading("✗", "Files differ", false);
            self.field("Difference:", Self::format_size(result.diff_size));
        }
        if self.verbose {
            self.field("A:", a.display());
            self.field("B:", b.display());
        }

        Ok(())
    }

    fn format_verification(&self, path: &Path, expected: &str, matched: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if matched {
            self.heading("✓", &format!("{}: OK", path.display()), true);
        } else {
            self.heading("✗", &format!("{}: FAILED", path.display()), false);
        }
        if self.verbose {
            self.field("Expected:", expected.to_ascii_lowercase());
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            self.line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            self.line(&format!("WARNING: {message}"));
        }
    }
}
