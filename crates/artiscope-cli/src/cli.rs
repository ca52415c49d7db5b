//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "artiscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Never run external platform tools
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show metadata for a file or directory
    Info(PathArgs),
    /// Classify files by content
    Classify(ClassifyArgs),
    /// List the entries of a directory
    Scan(ScanArgs),
    /// Compute MD5, SHA-1 and SHA-256 digests
    Hash(PathArgs),
    /// Analyze a native executable container
    Container(PathArgs),
    /// Analyze an application package
    Package(PathArgs),
    /// Compare two files byte for byte
    Compare(CompareArgs),
    /// Verify a file against an expected SHA-256 digest
    Verify(VerifyArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct PathArgs {
    /// Path to inspect
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(clap::Args)]
pub struct ClassifyArgs {
    /// Files to classify
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(value_name = "DIR")]
    pub root: PathBuf,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}

#[derive(clap::Args)]
pub struct CompareArgs {
    /// First file
    #[arg(value_name = "A")]
    pub a: PathBuf,

    /// Second file
    #[arg(value_name = "B")]
    pub b: PathBuf,
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// File to verify
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Expected SHA-256 digest (hex, any case)
    #[arg(value_name = "SHA256", value_parser = parse_sha256)]
    pub expected: String,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_name = "SHELL", value_enum)]
    pub shell: Shell,
}

/// Accepts a 64-digit hex string, trimming surrounding whitespace.
fn parse_sha256(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.len() != 64 {
        return Err(format!("expected 64 hex digits, got {}", s.len()));
    }
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err("digest contains non-hex characters".to_string());
    }
    Ok(s.to_string())
}
