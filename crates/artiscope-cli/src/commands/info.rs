//! Info command implementation

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
    let record = inspector
        .probe(&args.path)
        .ok_or_else(|| error::unreadable(&args.path))?;

    formatter.format_file_record(&record)
}
