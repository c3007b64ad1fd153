//! Input checks run before any matching work is done.

use crate::core::particle::TruthParticle;
use crate::core::types::TruthRole;
use crate::matching::error::MatchError;
use crate::matching::outcome::TruthCandidate;

/// Legacy marker for an unset jet hint
pub const UNSET_HINT: i64 = -1;

/// Legacy marker for an unset truth identity field
pub const UNSET_IDENTITY: i64 = -999;

/// Map a legacy hint value to an optional barcode.
///
/// # Examples
///
/// ```
/// use jet_parton_matcher::utils::validation::hint_from_legacy;
///
/// assert_eq!(hint_from_legacy(Some(4)), Some(4));
/// assert_eq!(hint_from_legacy(Some(-1)), None);
/// assert_eq!(hint_from_legacy(None), None);
/// ```
#[must_use]
pub fn hint_from_legacy(value: Option<i64>) -> Option<i64> {
    value.filter(|&v| v != UNSET_HINT)
}

/// Map a legacy identity value to an optional field
#[must_use]
pub fn identity_from_legacy(value: Option<i64>) -> Option<i64> {
    value.filter(|&v| v != UNSET_IDENTITY)
}

/// Check that a truth record carries every identity field its role requires.
///
/// # Errors
///
/// Returns `MatchError::IncompleteTruthRecord` naming the first missing field.
pub fn check_truth_record(
    role: TruthRole,
    index: usize,
    particle: &TruthParticle,
) -> Result<TruthCandidate, MatchError> {
    let missing = |field| MatchError::IncompleteTruthRecord { role, index, field };

    let quark_barcode = match role {
        TruthRole::Fsr => Some(particle.quark_barcode.ok_or_else(|| missing("quark_barcode"))?),
        TruthRole::Parton => None,
    };
    let gluino_barcode = particle
        .gluino_barcode
        .ok_or_else(|| missing("gluino_barcode"))?;
    let barcode = particle.barcode.ok_or_else(|| missing("barcode"))?;
    let pdgid = particle.pdgid.ok_or_else(|| missing("pdgid"))?;

    Ok(TruthCandidate {
        role,
        index,
        momentum: particle.momentum,
        barcode,
        gluino_barcode,
        pdgid,
        lineage: quark_barcode.unwrap_or(barcode),
    })
}

/// Check a whole collection, preserving order.
///
/// # Errors
///
/// Returns the error for the first incomplete record.
pub fn check_truth_collection(
    role: TruthRole,
    particles: &[TruthParticle],
) -> Result<Vec<TruthCandidate>, MatchError> {
    particles
        .iter()
        .enumerate()
        .map(|(index, particle)| check_truth_record(role, index, particle))
        .collect()
}
