//! Container command implementation

use crate::cli::PathArgs;
use crate::error;
use crate::output::OutputFormatter;
use anyhow::Result;
use artiscope_core::Inspector;

pub fn execute(
    args: &PathArgs,
    inspector: &Inspector,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    if !args.path.is_file() {
        return Err(error::unreadable(&args.path));
    }

    if !inspector.capabilities().structure_dump {
        formatter.format_warning(
            "structure dump tool unavailable, load-command facts are defaults",
        );
    }

    let record = inspector.analyze_container(&args.path);
    formatter.format_container(&args.path, &record)
}
