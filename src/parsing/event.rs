//! Parser for JSON event files.
//!
//! An event file holds one event's jets, partons, optional FSRs and optional
//! matcher options:
//!
//! ```json
//! {
//!   "jets":    [{"pt": 35, "eta": 0, "phi": 1.2, "e": 20, "matched_parton_barcode": 1}],
//!   "partons": [{"pt": 30, "eta": 0, "phi": 1.3, "e": 15,
//!                "barcode": 1, "gluino_barcode": 1, "pdgid": 1}],
//!   "fsrs":    [],
//!   "options": {"MatchingCriteria": "UseFTDeltaRvalues"}
//! }
//! ```
//!
//! Files written by older tools mark unset fields with `-1` (jet hints) or
//! `-999` (truth identity); both are read as absent.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::jet::Jet;
use crate::core::momentum::FourMomentum;
use crate::core::particle::TruthParticle;
use crate::core::types::PdgId;
use crate::matching::config::MatcherConfig;
use crate::utils::validation::{hint_from_legacy, identity_from_legacy};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid event file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid event format: {0}")]
    InvalidFormat(String),
}

/// One event read from a file
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub jets: Vec<Jet>,
    pub partons: Vec<TruthParticle>,
    pub fsrs: Option<Vec<TruthParticle>>,
    /// Options stored alongside the event, if any
    pub config: Option<MatcherConfig>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EventRecord {
    jets: Vec<JetRecord>,
    partons: Vec<ParticleRecord>,
    #[serde(default)]
    fsrs: Option<Vec<ParticleRecord>>,
    #[serde(default)]
    options: Option<MatcherConfig>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JetRecord {
    pt: f64,
    eta: f64,
    phi: f64,
    e: f64,
    #[serde(default)]
    matched_parton_barcode: Option<i64>,
    #[serde(default)]
    matched_fsr_barcode: Option<i64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ParticleRecord {
    pt: f64,
    eta: f64,
    phi: f64,
    e: f64,
    #[serde(default)]
    barcode: Option<i64>,
    #[serde(default)]
    gluino_barcode: Option<i64>,
    #[serde(default)]
    pdgid: Option<i64>,
    #[serde(default)]
    quark_barcode: Option<i64>,
}

impl From<JetRecord> for Jet {
    fn from(record: JetRecord) -> Self {
        Self {
            momentum: FourMomentum::from_pt_eta_phi_e(record.pt, record.eta, record.phi, record.e),
            matched_parton_barcode: hint_from_legacy(record.matched_parton_barcode),
            matched_fsr_barcode: hint_from_legacy(record.matched_fsr_barcode),
        }
    }
}

impl TryFrom<ParticleRecord> for TruthParticle {
    type Error = ParseError;

    fn try_from(record: ParticleRecord) -> Result<Self, Self::Error> {
        let pdgid = identity_from_legacy(record.pdgid)
            .map(|id| {
                PdgId::try_from(id)
                    .map_err(|_| ParseError::InvalidFormat(format!("pdgid {id} is out of range")))
            })
            .transpose()?;

        Ok(Self {
            momentum: FourMomentum::from_pt_eta_phi_e(record.pt, record.eta, record.phi, record.e),
            barcode: identity_from_legacy(record.barcode),
            gluino_barcode: identity_from_legacy(record.gluino_barcode),
            pdgid,
            quark_barcode: identity_from_legacy(record.quark_barcode),
        })
    }
}

fn convert_particles(records: Vec<ParticleRecord>) -> Result<Vec<TruthParticle>, ParseError> {
    records.into_iter().map(TruthParticle::try_from).collect()
}

/// Parse an event from JSON text
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON, unknown fields or unknown
/// option names, and `ParseError::InvalidFormat` for out-of-range values.
pub fn parse_event_text(text: &str) -> Result<Event, ParseError> {
    let record: EventRecord = serde_json::from_str(text)?;

    Ok(Event {
        jets: record.jets.into_iter().map(Jet::from).collect(),
        partons: convert_particles(record.partons)?,
        fsrs: record.fsrs.map(convert_particles).transpose()?,
        config: record.options,
    })
}

/// Parse an event file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, otherwise whatever
/// [`parse_event_text`] returns.
pub fn parse_event_file(path: &Path) -> Result<Event, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_event_text(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::config::MatchingCriteria;

    const EVENT: &str = r#"{
        "jets": [
            {"pt": 35, "eta": 0, "phi": 1.2, "e": 20, "matched_parton_barcode": 1},
            {"pt": 23, "eta": 0, "phi": 0.01, "e": 23,
             "matched_parton_barcode": -1, "matched_fsr_barcode": 1}
        ],
        "partons": [
            {"pt": 30, "eta": 0, "phi": 1.3, "e": 15, "barcode": 1, "gluino_barcode": 1, "pdgid": -3}
        ],
        "fsrs": [
            {"pt": 22, "eta": 0, "phi": 0.02, "e": 22,
             "barcode": 1, "gluino_barcode": 1, "pdgid": 1, "quark_barcode": 3}
        ],
        "options": {"MatchingCriteria": "UseFTDeltaRvalues"}
    }"#;

    #[test]
    fn test_parse_event() {
        let event = parse_event_text(EVENT).unwrap();
        assert_eq!(event.jets.len(), 2);
        assert_eq!(event.jets[0].matched_parton_barcode, Some(1));
        assert_eq!(event.jets[0].matched_fsr_barcode, None);
        assert_eq!(event.jets[1].matched_parton_barcode, None);
        assert_eq!(event.jets[1].matched_fsr_barcode, Some(1));
        assert!((event.jets[0].momentum.phi - 1.2).abs() < f64::EPSILON);

        assert_eq!(event.partons[0].pdgid, Some(-3));
        let fsrs = event.fsrs.unwrap();
        assert_eq!(fsrs[0].quark_barcode, Some(3));

        let config = event.config.unwrap();
        assert_eq!(config.criteria, MatchingCriteria::UseFtDeltaRValues);
    }

    #[test]
    fn test_legacy_identity_marker() {
        let text = r#"{
            "jets": [{"pt": 1, "eta": 0, "phi": 0, "e": 1}],
            "partons": [{"pt": 1, "eta": 0, "phi": 0, "e": 1,
                         "barcode": 1, "gluino_barcode": -999, "pdgid": 1}]
        }"#;
        let event = parse_event_text(text).unwrap();
        assert_eq!(event.partons[0].gluino_barcode, None);
        assert!(event.fsrs.is_none());
        assert!(event.config.is_none());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let text = r#"{
            "jets": [], "partons": [],
            "options": {"DeltaRCut": 0.5}
        }"#;
        assert!(matches!(parse_event_text(text), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_pdgid_out_of_range() {
        let text = r#"{
            "jets": [],
            "partons": [{"pt": 1, "eta": 0, "phi": 0, "e": 1, "pdgid": 4294967296}]
        }"#;
        assert!(matches!(
            parse_event_text(text),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_event_file(Path::new("/nonexistent/event.json"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}
