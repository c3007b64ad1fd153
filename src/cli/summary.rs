//! Rendering of match outcomes.

use std::fmt::Write as _;

use crate::matching::config::MatcherConfig;
use crate::matching::outcome::MatchOutcome;

/// Plain-text summary, one block per reported jet.
///
/// This is the format stored in reference files, so it only contains values
/// that are stable across platforms (no floating point).
#[must_use]
pub fn render_text(outcomes: &[MatchOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        match &outcome.decoration {
            Some(decoration) => {
                let _ = writeln!(out, "Jet {} is matched", outcome.jet_index);
                let _ = writeln!(out, "  match_type = {}", decoration.match_type);
                let _ = writeln!(out, "  match_barcode = {}", decoration.barcode);
            }
            None => {
                let _ = writeln!(out, "Jet {} is not matched", outcome.jet_index);
            }
        }
    }
    out
}

/// Tab-separated table with a header row
#[must_use]
pub fn render_tsv(outcomes: &[MatchOutcome]) -> String {
    let mut out = String::from(
        "jet_index\tpt\teta\tphi\tmatch_type\ttruth_index\tbarcode\tgluino_barcode\tpdgid\tdelta_r\n",
    );
    for outcome in outcomes {
        let momentum = &outcome.jet.momentum;
        let _ = write!(
            out,
            "{}\t{:.3}\t{:.3}\t{:.3}\t{}",
            outcome.jet_index,
            momentum.pt,
            momentum.eta,
            momentum.phi,
            outcome.match_type()
        );
        match &outcome.decoration {
            Some(d) => {
                let _ = writeln!(
                    out,
                    "\t{}\t{}\t{}\t{}\t{:.4}",
                    d.truth_index, d.barcode, d.gluino_barcode, d.pdgid, d.delta_r
                );
            }
            None => out.push_str("\t\t\t\t\t\n"),
        }
    }
    out
}

/// JSON document with the options used and every reported outcome
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(config: &MatcherConfig, outcomes: &[MatchOutcome]) -> anyhow::Result<String> {
    let n_matched = outcomes.iter().filter(|o| o.is_matched()).count();
    let output = serde_json::json!({
        "options": config,
        "n_matched": n_matched,
        "jets": outcomes,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
