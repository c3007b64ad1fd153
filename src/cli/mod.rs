//! Command-line interface for jet-parton-matcher.
//!
//! Available commands:
//!
//! - **match**: Match the jets of an event file and print the result
//! - **check**: Match an event file and compare the summary with a reference file
//!
//! ## Usage
//!
//! ```text
//! # Match with the options stored in the event file
//! jet-parton-matcher match event.json
//!
//! # Override the strategy and cut
//! jet-parton-matcher match event.json --criteria RecomputeDeltaRvalues_ptPriority --delta-r-cut 0.5
//!
//! # Any option by name
//! jet-parton-matcher match event.json --set MatchFSRsFromMatchedGluinoDecays=true
//!
//! # Regression check against a recorded summary, or rewrite it
//! jet-parton-matcher check event.json event.ref
//! jet-parton-matcher check event.json event.ref --update
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::matching::config::{MatcherConfig, MatchingCriteria};
use crate::matching::engine::Matcher;
use crate::matching::outcome::MatchOutcome;
use crate::parsing::event::parse_event_file;

pub mod check;
pub mod match_event;
pub mod summary;

#[derive(Parser)]
#[command(name = "jet-parton-matcher")]
#[command(version)]
#[command(about = "Match reconstructed jets to truth partons and FSR quarks")]
#[command(
    long_about = "jet-parton-matcher labels the jets of an event with the truth parton or FSR quark they originate from.\n\nJets are matched greedily by angular distance (or from hints computed upstream), each parton lineage is used at most once, and competing FSR matches are resolved by jet pt, by DeltaR, or by FSR pt for hints."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging and the Debug option)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match the jets of an event file
    Match(match_event::MatchArgs),

    /// Compare the match summary of an event file with a reference
    Check(check::CheckArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Matcher options that can be given on the command line.
/// They override options stored in the event file.
#[derive(Args, Debug, Clone, Default)]
pub struct MatcherArgs {
    /// Matching strategy: UseFTDeltaRvalues, RecomputeDeltaRvalues_ptPriority
    /// or RecomputeDeltaRvalues_drPriority
    #[arg(long)]
    pub criteria: Option<MatchingCriteria>,

    /// Maximum DeltaR between a jet and its match (recompute strategies only)
    #[arg(long)]
    pub delta_r_cut: Option<f64>,

    /// Only report matched jets
    #[arg(long)]
    pub only_matched: bool,

    /// Allow more than six matched jets
    #[arg(long)]
    pub disable_ceiling: bool,

    /// Let FSRs match even when their parton is already matched
    #[arg(long)]
    pub fsrs_from_matched_decays: bool,

    /// Set an option by name (repeatable), e.g. --set DeltaRcut=0.5
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub assignments: Vec<String>,
}

impl MatcherArgs {
    /// Layer these arguments on top of `base`
    ///
    /// # Errors
    ///
    /// Returns an error if an assignment names an unknown option or has a
    /// value of the wrong type.
    pub fn apply(&self, mut base: MatcherConfig, verbose: bool) -> anyhow::Result<MatcherConfig> {
        for assignment in &self.assignments {
            base.apply_assignment(assignment)?;
        }
        if let Some(criteria) = self.criteria {
            base.criteria = criteria;
        }
        if let Some(cut) = self.delta_r_cut {
            base.delta_r_cut = cut;
        }
        base.return_only_matched |= self.only_matched;
        base.disable_n_matched_jet_protection |= self.disable_ceiling;
        base.match_fsrs_from_matched_gluino_decays |= self.fsrs_from_matched_decays;
        base.debug |= verbose;
        Ok(base)
    }
}

/// Read an event file and run the matcher on it
///
/// # Errors
///
/// Returns an error if the event cannot be read, the options are invalid, or
/// matching fails.
pub fn match_event_file(
    path: &Path,
    args: &MatcherArgs,
    verbose: bool,
) -> anyhow::Result<(MatcherConfig, Vec<MatchOutcome>)> {
    let event = parse_event_file(path)
        .with_context(|| format!("Failed to read event file {}", path.display()))?;

    let config = args.apply(event.config.unwrap_or_default(), verbose)?;

    if verbose {
        eprintln!(
            "Event: {} jets, {} partons, {} FSRs",
            event.jets.len(),
            event.partons.len(),
            event.fsrs.as_ref().map_or(0, Vec::len)
        );
        eprintln!(
            "Options: MatchingCriteria={} DeltaRcut={}",
            config.criteria, config.delta_r_cut
        );
    }

    let matcher = Matcher::with_event(config.clone(), event.jets, event.partons, event.fsrs);
    let outcomes = matcher
        .match_jets()
        .with_context(|| format!("Matching failed for {}", path.display()))?;

    Ok((config, outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_match_command() {
        let cli = Cli::try_parse_from([
            "jet-parton-matcher",
            "match",
            "event.json",
            "--criteria",
            "RecomputeDeltaRvalues_ptPriority",
            "--delta-r-cut",
            "0.5",
            "--set",
            "Debug=true",
        ])
        .unwrap();
        let Commands::Match(args) = cli.command else {
            panic!("expected match command");
        };
        assert_eq!(
            args.matcher.criteria,
            Some(MatchingCriteria::RecomputePtPriority)
        );
        assert_eq!(args.matcher.delta_r_cut, Some(0.5));
        assert_eq!(args.matcher.assignments, vec!["Debug=true".to_string()]);
    }

    #[test]
    fn test_cli_rejects_unknown_criteria() {
        let result = Cli::try_parse_from([
            "jet-parton-matcher",
            "match",
            "event.json",
            "--criteria",
            "Closest",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_override_event_options() {
        let base = MatcherConfig {
            criteria: MatchingCriteria::UseFtDeltaRValues,
            ..MatcherConfig::default()
        };
        let args = MatcherArgs {
            criteria: Some(MatchingCriteria::RecomputeDrPriority),
            delta_r_cut: Some(0.5),
            only_matched: true,
            assignments: vec!["DisableNmatchedJetProtection=true".to_string()],
            ..MatcherArgs::default()
        };
        let config = args.apply(base, true).unwrap();
        assert_eq!(config.criteria, MatchingCriteria::RecomputeDrPriority);
        assert!((config.delta_r_cut - 0.5).abs() < f64::EPSILON);
        assert!(config.return_only_matched);
        assert!(config.disable_n_matched_jet_protection);
        assert!(config.debug);
    }

    #[test]
    fn test_args_reject_unknown_assignment() {
        let args = MatcherArgs {
            assignments: vec!["Verbose=true".to_string()],
            ..MatcherArgs::default()
        };
        assert!(args.apply(MatcherConfig::default(), false).is_err());
    }
}
