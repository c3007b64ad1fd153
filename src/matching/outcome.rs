use serde::Serialize;

use crate::core::jet::Jet;
use crate::core::momentum::FourMomentum;
use crate::core::types::{Barcode, MatchType, PdgId, TruthRole};

/// A parton or FSR whose identity has been checked and is ready for matching
#[derive(Debug, Clone, PartialEq)]
pub struct TruthCandidate {
    pub role: TruthRole,
    /// Position in the collection the record came from
    pub index: usize,
    pub momentum: FourMomentum,
    pub barcode: Barcode,
    pub gluino_barcode: Barcode,
    pub pdgid: PdgId,
    /// Lineage the record belongs to: its own barcode for partons, the
    /// radiating quark's barcode for FSRs
    pub lineage: Barcode,
}

/// Truth information attached to a matched jet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoration {
    pub match_type: MatchType,
    /// Index into the parton or FSR collection that produced the match
    pub truth_index: usize,
    pub pdgid: PdgId,
    pub barcode: Barcode,
    pub gluino_barcode: Barcode,
    pub delta_r: f64,
}

impl Decoration {
    pub fn from_candidate(candidate: &TruthCandidate, delta_r: f64) -> Self {
        Self {
            match_type: candidate.role.into(),
            truth_index: candidate.index,
            pdgid: candidate.pdgid,
            barcode: candidate.barcode,
            gluino_barcode: candidate.gluino_barcode,
            delta_r,
        }
    }
}

/// Matching result for one input jet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    /// Position of the jet in the input collection
    pub jet_index: usize,
    pub jet: Jet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<Decoration>,
}

impl MatchOutcome {
    pub fn is_matched(&self) -> bool {
        self.decoration.is_some()
    }

    pub fn match_type(&self) -> MatchType {
        self.decoration
            .as_ref()
            .map_or(MatchType::None, |d| d.match_type)
    }

    pub fn match_barcode(&self) -> Option<Barcode> {
        self.decoration.as_ref().map(|d| d.barcode)
    }

    pub fn match_pdgid(&self) -> Option<PdgId> {
        self.decoration.as_ref().map(|d| d.pdgid)
    }

    pub fn match_gluino_barcode(&self) -> Option<Barcode> {
        self.decoration.as_ref().map(|d| d.gluino_barcode)
    }

    pub fn match_index(&self) -> Option<usize> {
        self.decoration.as_ref().map(|d| d.truth_index)
    }
}
