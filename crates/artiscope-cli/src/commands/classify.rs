//! Classify command implementation

use crate::cli::ClassifyArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use artiscope_core::Inspector;

pub fn execute(
    args: &ClassifyArgs,
    inspector: &Inspector,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    for path in args.paths.iter().filter(|p| !p.exists()) {
        formatter.format_warning(&format!(
            "{} does not exist, classified by extension only",
            path.display()
        ));
    }

    let results: Vec<_> = args
        .paths
        .iter()
        .map(|path| (path.clone(), inspector.classify(path)))
        .collect();

    formatter.format_classification(&results)
}
