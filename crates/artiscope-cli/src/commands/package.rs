//! Package command implementation

use crate::cli::PathArgs;
use crate::error;
use crate::output::OutputFormatter;
use crate::progress::CliSpinner;
use anyhow::Result;
use artiscope_core::Inspector;

pub fn execute(
    args: &PathArgs,
    inspector: &Inspector,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    if !args.path.is_file() {
        return Err(error::unreadable(&args.path));
    }

    let record = {
        let _spinner = CliSpinner::start(
            &format!("Analyzing {}", args.path.display()),
            show_progress,
        );
        inspector.analyze_package(&args.path)
    };

    formatter.format_package(&args.path, &record)
}
