//! Compare command implementation

use crate::cli::CompareArgs;
use crate::error;
use crate::output::OutputFormatter;
use anyhow::Result;
use artiscope_core::Inspector;

pub fn execute(
    args: &CompareArgs,
    inspector: &Inspector,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    for path in [&args.a, &args.b] {
        if !path.is_file() {
            return Err(error::unreadable(path));
        }
    }

    let result = inspector.compare(&args.a, &args.b);
    formatter.format_comparison(&args.a, &args.b, &result)
}
