//! Verify command implementation

use crate::cli::VerifyArgs;
use crate::error;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use artiscope_core::Inspector;

pub fn execute(
    args: &VerifyArgs,
    inspector: &Inspector,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    if !args.path.is_file() {
        return Err(error::unreadable(&args.path));
    }

    let matched = inspector.verify_integrity(&args.path, &args.expected);
    formatter.format_verification(&args.path, &args.expected, matched)?;

    if !matched {
        bail!("Integrity check failed for '{}'", args.path.display());
    }
    Ok(())
}
