use serde::{Deserialize, Serialize};

use crate::core::momentum::FourMomentum;
use crate::core::types::Barcode;

/// A reconstructed jet, the detector-level object to be labeled
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Jet {
    #[serde(flatten)]
    pub momentum: FourMomentum,

    /// Barcode of the parton an upstream tool already matched to this jet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_parton_barcode: Option<Barcode>,

    /// Barcode of the FSR an upstream tool already matched to this jet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_fsr_barcode: Option<Barcode>,
}

impl Jet {
    pub fn new(momentum: FourMomentum) -> Self {
        Self {
            momentum,
            matched_parton_barcode: None,
            matched_fsr_barcode: None,
        }
    }

    pub fn from_pt_eta_phi_e(pt: f64, eta: f64, phi: f64, e: f64) -> Self {
        Self::new(FourMomentum::from_pt_eta_phi_e(pt, eta, phi, e))
    }

    #[must_use]
    pub fn with_matched_parton_barcode(mut self, barcode: Barcode) -> Self {
        self.matched_parton_barcode = Some(barcode);
        self
    }

    #[must_use]
    pub fn with_matched_fsr_barcode(mut self, barcode: Barcode) -> Self {
        self.matched_fsr_barcode = Some(barcode);
        self
    }

    pub fn pt(&self) -> f64 {
        self.momentum.pt
    }

    pub fn delta_r(&self, other: &FourMomentum) -> f64 {
        self.momentum.delta_r(other)
    }
}
