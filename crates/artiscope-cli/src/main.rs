//! Artiscope CLI - Command-line utility for classifying, hashing and
//! inspecting application artifacts.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use artiscope_core::InspectConfig;
use artiscope_core::Inspector;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = if cli.offline {
        InspectConfig::offline()
    } else {
        InspectConfig::default()
    };
    let inspector = Inspector::new(&config);
    debug!(capabilities = ?inspector.capabilities(), "inspector ready");

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.json && !cli.quiet;

    match &cli.command {
        cli::Commands::Info(args) => commands::info::execute(args, &inspector, &*formatter),
        cli::Commands::Classify(args) => {
            commands::classify::execute(args, &inspector, &*formatter)
        }
        cli::Commands::Scan(args) => {
            commands::scan::execute(args, &inspector, &*formatter, show_progress)
        }
        cli::Commands::Hash(args) => commands::hash::execute(args, &inspector, &*formatter),
        cli::Commands::Container(args) => {
            commands::container::execute(args, &inspector, &*formatter)
        }
        cli::Commands::Package(args) => {
            commands::package::execute(args, &inspector, &*formatter, show_progress)
        }
        cli::Commands::Compare(args) => commands::compare::execute(args, &inspector, &*formatter),
        cli::Commands::Verify(args) => commands::verify::execute(args, &inspector, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("artiscope_core=debug,artiscope=debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
