use serde::{Deserialize, Serialize};

use crate::core::momentum::FourMomentum;
use crate::core::types::{Barcode, PdgId};

/// A truth-level quark, used both for partons and for FSR quarks
///
/// Identity fields are optional here because upstream producers fill them in
/// one at a time; the engine refuses to match while any required field is
/// still missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TruthParticle {
    #[serde(flatten)]
    pub momentum: FourMomentum,

    /// Unique identifier within its collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<Barcode>,

    /// Barcode of the parent gluino
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gluino_barcode: Option<Barcode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdgid: Option<PdgId>,

    /// Barcode of the last quark in the decay chain that radiated this FSR.
    /// Required for FSRs, ignored for partons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quark_barcode: Option<Barcode>,
}

impl TruthParticle {
    pub fn new(momentum: FourMomentum) -> Self {
        Self {
            momentum,
            ..Self::default()
        }
    }

    pub fn from_pt_eta_phi_e(pt: f64, eta: f64, phi: f64, e: f64) -> Self {
        Self::new(FourMomentum::from_pt_eta_phi_e(pt, eta, phi, e))
    }

    #[must_use]
    pub fn with_barcode(mut self, barcode: Barcode) -> Self {
        self.barcode = Some(barcode);
        self
    }

    #[must_use]
    pub fn with_gluino_barcode(mut self, barcode: Barcode) -> Self {
        self.gluino_barcode = Some(barcode);
        self
    }

    #[must_use]
    pub fn with_pdgid(mut self, pdgid: PdgId) -> Self {
        self.pdgid = Some(pdgid);
        self
    }

    #[must_use]
    pub fn with_quark_barcode(mut self, barcode: Barcode) -> Self {
        self.quark_barcode = Some(barcode);
        self
    }
}
