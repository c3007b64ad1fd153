use clap::Parser;
use tracing_subscriber::EnvFilter;

use jet_parton_matcher::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("jet_parton_matcher=debug,info")
    } else {
        EnvFilter::new("jet_parton_matcher=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Match(args) => {
            cli::match_event::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Check(args) => {
            cli::check::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
