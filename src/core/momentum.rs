//! Four-momentum in collider coordinates.
//!
//! Momenta are stored as (pt, eta, phi, E), the natural parametrisation for
//! objects coming out of a reconstruction or truth record. Only the quantities
//! needed for angular matching are derived.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// A four-momentum given by transverse momentum, pseudorapidity, azimuth and energy
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourMomentum {
    /// Transverse momentum
    pub pt: f64,
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuthal angle in radians
    pub phi: f64,
    /// Energy
    pub e: f64,
}

impl FourMomentum {
    #[must_use]
    pub fn from_pt_eta_phi_e(pt: f64, eta: f64, phi: f64, e: f64) -> Self {
        Self { pt, eta, phi, e }
    }

    /// Azimuthal separation wrapped into [-π, π)
    #[must_use]
    pub fn delta_phi(&self, other: &Self) -> f64 {
        wrap_phi(self.phi - other.phi)
    }

    /// Angular distance `sqrt(Δη² + Δφ²)`
    ///
    /// # Examples
    ///
    /// ```
    /// use jet_parton_matcher::core::momentum::FourMomentum;
    ///
    /// let a = FourMomentum::from_pt_eta_phi_e(35.0, 0.0, 1.2, 35.0);
    /// let b = FourMomentum::from_pt_eta_phi_e(30.0, 0.0, 1.3, 30.0);
    /// assert!((a.delta_r(&b) - 0.1).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn delta_r(&self, other: &Self) -> f64 {
        let deta = self.eta - other.eta;
        let dphi = self.delta_phi(other);
        deta.hypot(dphi)
    }
}

fn wrap_phi(dphi: f64) -> f64 {
    if !dphi.is_finite() || (-PI..PI).contains(&dphi) {
        return dphi;
    }
    let wrapped = (dphi + PI).rem_euclid(TAU) - PI;
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}
