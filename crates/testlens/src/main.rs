//! testlens: extract, categorize and compare test results
//!
//! This binary crate reads test reports of unknown shape, writes JSON exports
//! of the extracted records and their failure categories, and diffs runs.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;

use testlens::commands::{AnalyzeOptions, analyze, compare_runs};
use testlens::config::{Command, Config};
use testlens_triage::Change;

fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the summary
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;
    debug!(?config, "starting testlens");

    let Some(command) = config.command.clone() else {
        Config::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Analyze {
            input,
            rules,
            flatten_cap,
        } => {
            let options = AnalyzeOptions {
                input,
                rules,
                flatten_cap,
                output: config.output_dir(),
            };
            let analysis = analyze(&options)
                .with_context(|| format!("failed to analyze {}", options.input.display()))?;

            if analysis.is_empty() {
                println!("No test cases detected in file. Please verify the file format.");
                return Ok(());
            }

            let summary = &analysis.summary;
            println!(
                "{} tests: {} passed, {} failed, {} skipped",
                summary.total, summary.passed, summary.failed, summary.skipped
            );
            for row in &analysis.categories {
                println!("  {:<24} {}", row.category, row.count);
            }
            println!("Saved {} files to {}", analysis.written.len(), options.output.display());
        }
        Command::Compare {
            baseline,
            candidate,
        } => {
            let comparison = compare_runs(&baseline, &candidate, &config.output_dir())
                .context("failed to compare runs")?;

            let summary = &comparison.report.summary;
            println!("{} tests compared", summary.total);
            for change in [
                Change::NewFailure,
                Change::Fixed,
                Change::PersistentFailure,
                Change::StillPassing,
                Change::Other,
            ] {
                println!("  {:<20} {}", change.label(), summary.count(change));
            }
            println!("Saved {}", comparison.written.display());
        }
    }

    Ok(())
}
