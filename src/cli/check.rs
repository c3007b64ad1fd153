//! Check command - regression test of an event against a recorded summary.
//!
//! The text summary of the match is compared byte for byte with the reference
//! file. When a change in the output is expected, rerun with `--update` to
//! rewrite the reference.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::summary::render_text;
use crate::cli::{match_event_file, MatcherArgs, OutputFormat};

#[derive(Args)]
pub struct CheckArgs {
    /// Event file (JSON) with jets, partons, optional FSRs and options
    #[arg(required = true)]
    pub event: PathBuf,

    /// Reference summary to compare with
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Overwrite the reference with the current summary instead of comparing
    #[arg(long)]
    pub update: bool,

    #[command(flatten)]
    pub matcher: MatcherArgs,
}

/// Execute the check command
///
/// # Errors
///
/// Returns an error if matching fails, the reference cannot be read or
/// written, or the summary differs from the reference.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (config, outcomes) = match_event_file(&args.event, &args.matcher, verbose)?;
    let summary = render_text(&outcomes);

    if args.update {
        std::fs::write(&args.reference, &summary).with_context(|| {
            format!("Failed to write reference {}", args.reference.display())
        })?;
        info!("Updated reference {}", args.reference.display());
        println!("Updated {}", args.reference.display());
        return Ok(());
    }

    let expected = std::fs::read_to_string(&args.reference)
        .with_context(|| format!("Failed to read reference {}", args.reference.display()))?;

    if summary == expected {
        match format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({
                    "event": args.event.display().to_string(),
                    "criteria": config.criteria.as_str(),
                    "passed": true,
                })
            ),
            OutputFormat::Tsv => println!(
                "{}\t{}\tpassed",
                args.event.display(),
                config.criteria
            ),
            OutputFormat::Text => {
                println!("Check passed for MatchingCriteria == {}", config.criteria);
            }
        }
        return Ok(());
    }

    eprintln!("Content of new summary:\n{summary}");
    eprintln!(
        "Content of {}:\n{expected}",
        args.reference.display()
    );
    eprintln!("If the changes are expected, update the reference with --update");
    anyhow::bail!(
        "Check NOT passed for MatchingCriteria == {} ({})",
        config.criteria,
        args.event.display()
    )
}
