//! Scan command implementation

use crate::cli::ScanArgs;
use crate::output::OutputFormatter;
use crate::progress::CliSpinner;
use anyhow::Result;
use anyhow::bail;
use artiscope_core::Inspector;
use artiscope_core::ScanMode;

pub fn execute(
    args: &ScanArgs,
    inspector: &Inspector,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    if !args.root.is_dir() {
        bail!(
            "Not a directory: '{}'\n\
             HINT: Use `artiscope info` to inspect a single file.",
            args.root.display()
        );
    }

    let mode = if args.recursive {
        ScanMode::Recursive
    } else {
        ScanMode::Shallow
    };

    let records = {
        let _spinner = CliSpinner::start(
            &format!("Scanning {}", args.root.display()),
            show_progress && args.recursive,
        );
        inspector.scan(&args.root, mode)
    };

    formatter.format_scan(&args.root, &records)
}
