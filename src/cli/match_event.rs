use std::path::PathBuf;

use clap::Args;

use crate::cli::summary::{render_json, render_text, render_tsv};
use crate::cli::{match_event_file, MatcherArgs, OutputFormat};

#[derive(Args)]
pub struct MatchArgs {
    /// Event file (JSON) with jets, partons, optional FSRs and options
    #[arg(required = true)]
    pub event: PathBuf,

    #[command(flatten)]
    pub matcher: MatcherArgs,
}

/// Execute the match command
///
/// # Errors
///
/// Returns an error if the event cannot be read or matching fails.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (config, outcomes) = match_event_file(&args.event, &args.matcher, verbose)?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&outcomes)),
        OutputFormat::Json => println!("{}", render_json(&config, &outcomes)?),
        OutputFormat::Tsv => print!("{}", render_tsv(&outcomes)),
    }

    Ok(())
}
