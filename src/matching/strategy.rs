//! Matching strategies.
//!
//! Every strategy runs two passes over the jets: first against partons, then
//! against FSRs. Jets matched in the parton pass are never revisited, and a
//! parton lineage claimed in the first pass shuts out the FSRs of that lineage
//! in the second (unless `MatchFSRsFromMatchedGluinoDecays` is set).

use tracing::debug;

use crate::core::jet::Jet;
use crate::core::types::{Barcode, TruthRole};
use crate::matching::config::{MatcherConfig, MatchingCriteria};
use crate::matching::error::MatchError;
use crate::matching::outcome::{Decoration, TruthCandidate};
use crate::matching::resolver::{resolve_fsr, FsrProposal, Priority, SlotKey};
use crate::matching::state::MatchingState;

/// Everything a strategy may read during one `match_jets` call
pub(crate) struct MatchContext<'a> {
    pub(crate) jets: &'a [Jet],
    pub(crate) partons: &'a [TruthCandidate],
    pub(crate) fsrs: &'a [TruthCandidate],
    pub(crate) config: &'a MatcherConfig,
}

impl MatchContext<'_> {
    /// Slot key used for collision resolution of an FSR
    fn slot_key(&self, fsr: &TruthCandidate) -> SlotKey {
        if self.config.match_fsrs_from_matched_gluino_decays {
            SlotKey::Record(fsr.index)
        } else {
            SlotKey::Lineage(fsr.lineage)
        }
    }

    /// Whether an FSR can still be matched given the lineages claimed so far
    fn fsr_is_eligible(&self, state: &MatchingState, fsr: &TruthCandidate) -> bool {
        self.config.match_fsrs_from_matched_gluino_decays || !state.is_claimed(fsr.lineage)
    }

    fn submit_fsr(
        &self,
        state: &mut MatchingState,
        jet_index: usize,
        fsr: &TruthCandidate,
        delta_r: f64,
        priority: Priority,
    ) {
        let proposal = FsrProposal {
            jet_index,
            jet_pt: self.jets[jet_index].pt(),
            fsr,
            delta_r,
            key: self.slot_key(fsr),
        };
        resolve_fsr(state, proposal, priority, self.config.debug);
    }
}

/// A way of assigning jets to partons and FSRs
pub(crate) trait MatchStrategy {
    /// First pass: match jets to partons
    fn match_partons(
        &self,
        ctx: &MatchContext<'_>,
        state: &mut MatchingState,
    ) -> Result<(), MatchError>;

    /// Second pass: match still-unmatched jets to FSRs
    fn match_fsrs(&self, ctx: &MatchContext<'_>, state: &mut MatchingState)
        -> Result<(), MatchError>;
}

/// Select the strategy implementing `criteria`
pub(crate) fn strategy_for(criteria: MatchingCriteria) -> Box<dyn MatchStrategy> {
    match criteria {
        MatchingCriteria::UseFtDeltaRValues => Box::new(HintStrategy),
        MatchingCriteria::RecomputePtPriority => Box::new(GeometricStrategy {
            priority: Priority::Pt,
        }),
        MatchingCriteria::RecomputeDrPriority => Box::new(GeometricStrategy {
            priority: Priority::DeltaR,
        }),
    }
}

/// Uses the `matched_parton_barcode` / `matched_fsr_barcode` hints computed
/// upstream instead of looking at geometry. Two jets hinting FSRs of the same
/// quark are settled in favour of the harder FSR.
pub(crate) struct HintStrategy;

fn find_by_barcode<'a>(
    candidates: &'a [TruthCandidate],
    role: TruthRole,
    barcode: Barcode,
    jet_index: usize,
) -> Result<&'a TruthCandidate, MatchError> {
    candidates
        .iter()
        .find(|c| c.barcode == barcode)
        .ok_or(MatchError::TruthRecordNotFound {
            role,
            barcode,
            jet_index,
        })
}

impl MatchStrategy for HintStrategy {
    fn match_partons(
        &self,
        ctx: &MatchContext<'_>,
        state: &mut MatchingState,
    ) -> Result<(), MatchError> {
        for (jet_index, jet) in ctx.jets.iter().enumerate() {
            if state.is_decorated(jet_index) {
                continue;
            }
            let Some(barcode) = jet.matched_parton_barcode else {
                continue;
            };
            let parton = find_by_barcode(ctx.partons, TruthRole::Parton, barcode, jet_index)?;
            if !state.claim(parton.lineage) {
                if ctx.config.debug {
                    debug!(
                        "Parton with barcode {} is already matched, jet {} stays unmatched",
                        barcode, jet_index
                    );
                }
                continue;
            }
            if ctx.config.debug {
                debug!("Jet {} matched to parton {}", jet_index, parton.index);
            }
            let delta_r = jet.delta_r(&parton.momentum);
            state.decorate(jet_index, Decoration::from_candidate(parton, delta_r));
        }
        Ok(())
    }

    fn match_fsrs(
        &self,
        ctx: &MatchContext<'_>,
        state: &mut MatchingState,
    ) -> Result<(), MatchError> {
        for (jet_index, jet) in ctx.jets.iter().enumerate() {
            if state.is_decorated(jet_index) {
                continue;
            }
            let Some(barcode) = jet.matched_fsr_barcode else {
                continue;
            };
            let fsr = find_by_barcode(ctx.fsrs, TruthRole::Fsr, barcode, jet_index)?;
            if !ctx.fsr_is_eligible(state, fsr) {
                if ctx.config.debug {
                    debug!(
                        "Quark with barcode {} is already matched, skipping FSR {} for jet {}",
                        fsr.lineage, fsr.index, jet_index
                    );
                }
                continue;
            }
            let delta_r = jet.delta_r(&fsr.momentum);
            ctx.submit_fsr(state, jet_index, fsr, delta_r, Priority::FsrPt);
        }
        Ok(())
    }
}

/// Recomputes ΔR between every jet and every eligible candidate and takes the
/// closest one within `DeltaRcut`
pub(crate) struct GeometricStrategy {
    pub(crate) priority: Priority,
}

/// Closest candidate accepted by `eligible`, with its ΔR. The first of equally
/// close candidates wins. Candidates whose ΔR is NaN are never picked.
fn nearest_candidate<'a>(
    jet: &Jet,
    candidates: &'a [TruthCandidate],
    eligible: impl Fn(&TruthCandidate) -> bool,
) -> Option<(&'a TruthCandidate, f64)> {
    candidates
        .iter()
        .filter(|c| eligible(c))
        .map(|c| (c, jet.delta_r(&c.momentum)))
        .filter(|(_, dr)| !dr.is_nan())
        .fold(None, |best, (c, dr)| match best {
            None => Some((c, dr)),
            Some((_, best_dr)) if dr < best_dr => Some((c, dr)),
            Some(_) => best,
        })
}

impl MatchStrategy for GeometricStrategy {
    fn match_partons(
        &self,
        ctx: &MatchContext<'_>,
        state: &mut MatchingState,
    ) -> Result<(), MatchError> {
        let cut = ctx.config.delta_r_cut;
        for (jet_index, jet) in ctx.jets.iter().enumerate() {
            if state.is_decorated(jet_index) {
                continue;
            }
            let nearest = nearest_candidate(jet, ctx.partons, |p| !state.is_claimed(p.lineage));
            match nearest {
                Some((parton, delta_r)) if delta_r < cut => {
                    state.claim(parton.lineage);
                    if ctx.config.debug {
                        debug!(
                            "Jet {} matched to parton {} (dR = {:.3})",
                            jet_index, parton.index, delta_r
                        );
                    }
                    state.decorate(jet_index, Decoration::from_candidate(parton, delta_r));
                }
                _ => {
                    if ctx.config.debug {
                        debug!("Jet {} has no parton within dR < {}", jet_index, cut);
                    }
                }
            }
        }
        Ok(())
    }

    fn match_fsrs(
        &self,
        ctx: &MatchContext<'_>,
        state: &mut MatchingState,
    ) -> Result<(), MatchError> {
        let cut = ctx.config.delta_r_cut;
        for (jet_index, jet) in ctx.jets.iter().enumerate() {
            if state.is_decorated(jet_index) {
                continue;
            }
            let nearest = nearest_candidate(jet, ctx.fsrs, |f| ctx.fsr_is_eligible(&*state, f));
            if let Some((fsr, delta_r)) = nearest.filter(|&(_, dr)| dr < cut) {
                ctx.submit_fsr(state, jet_index, fsr, delta_r, self.priority);
            }
        }
        if ctx.config.debug {
            debug!("{} FSR slots assigned", state.fsr_slots.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::momentum::FourMomentum;

    fn candidate(role: TruthRole, index: usize, phi: f64, lineage: Barcode) -> TruthCandidate {
        TruthCandidate {
            role,
            index,
            momentum: FourMomentum::from_pt_eta_phi_e(20.0, 0.0, phi, 20.0),
            barcode: index as Barcode + 1,
            gluino_barcode: 1,
            pdgid: 1,
            lineage,
        }
    }

    #[test]
    fn test_nearest_candidate_picks_minimum() {
        let jet = Jet::from_pt_eta_phi_e(30.0, 0.0, 1.0, 30.0);
        let partons = vec![
            candidate(TruthRole::Parton, 0, 2.0, 1),
            candidate(TruthRole::Parton, 1, 1.1, 2),
            candidate(TruthRole::Parton, 2, 0.5, 3),
        ];
        let (best, dr) = nearest_candidate(&jet, &partons, |_| true).unwrap();
        assert_eq!(best.index, 1);
        assert!((dr - 0.1).abs() < 1e-9);

        let (best, _) = nearest_candidate(&jet, &partons, |p| p.index != 1).unwrap();
        assert_eq!(best.index, 2);

        assert!(nearest_candidate(&jet, &partons, |_| false).is_none());
    }

    #[test]
    fn test_nearest_candidate_keeps_first_on_tie() {
        let jet = Jet::from_pt_eta_phi_e(30.0, 0.0, 1.0, 30.0);
        let partons = vec![
            candidate(TruthRole::Parton, 0, 1.25, 1),
            candidate(TruthRole::Parton, 1, 0.75, 2),
        ];
        let (best, _) = nearest_candidate(&jet, &partons, |_| true).unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn test_nearest_candidate_ignores_nan() {
        let jet = Jet::from_pt_eta_phi_e(30.0, 0.0, 1.0, 30.0);
        let mut broken = candidate(TruthRole::Parton, 1, 1.0, 2);
        broken.momentum.eta = f64::NAN;

        // A NaN candidate after the closest one must not take its place
        let partons = vec![candidate(TruthRole::Parton, 0, 1.05, 1), broken.clone()];
        let (best, dr) = nearest_candidate(&jet, &partons, |_| true).unwrap();
        assert_eq!(best.index, 0);
        assert!((dr - 0.05).abs() < 1e-9);

        // Nor when it comes first
        broken.index = 0;
        let partons = vec![broken.clone(), candidate(TruthRole::Parton, 1, 1.05, 1)];
        let (best, _) = nearest_candidate(&jet, &partons, |_| true).unwrap();
        assert_eq!(best.index, 1);

        assert!(nearest_candidate(&jet, &[broken], |_| true).is_none());
    }

    #[test]
    fn test_geometric_parton_pass_claims_once() {
        // Both jets prefer the same parton; the second falls back to the other one
        let jets = vec![
            Jet::from_pt_eta_phi_e(30.0, 0.0, 1.0, 30.0),
            Jet::from_pt_eta_phi_e(25.0, 0.0, 1.05, 25.0),
        ];
        let partons = vec![
            candidate(TruthRole::Parton, 0, 1.02, 1),
            candidate(TruthRole::Parton, 1, 1.3, 2),
        ];
        let config = MatcherConfig::default();
        let ctx = MatchContext {
            jets: &jets,
            partons: &partons,
            fsrs: &[],
            config: &config,
        };
        let mut state = MatchingState::new(jets.len());
        GeometricStrategy {
            priority: Priority::DeltaR,
        }
        .match_partons(&ctx, &mut state)
        .unwrap();

        let decorations = state.into_decorations();
        assert_eq!(decorations[0].as_ref().unwrap().truth_index, 0);
        assert_eq!(decorations[1].as_ref().unwrap().truth_index, 1);
    }

    #[test]
    fn test_hint_parton_pass_missing_barcode() {
        let jets = vec![Jet::from_pt_eta_phi_e(30.0, 0.0, 1.0, 30.0).with_matched_parton_barcode(9)];
        let partons = vec![candidate(TruthRole::Parton, 0, 1.0, 1)];
        let config = MatcherConfig::default();
        let ctx = MatchContext {
            jets: &jets,
            partons: &partons,
            fsrs: &[],
            config: &config,
        };
        let mut state = MatchingState::new(1);
        let err = HintStrategy.match_partons(&ctx, &mut state).unwrap_err();
        assert_eq!(
            err,
            MatchError::TruthRecordNotFound {
                role: TruthRole::Parton,
                barcode: 9,
                jet_index: 0
            }
        );
    }

    #[test]
    fn test_strategy_for_each_criteria() {
        // Smoke test that every criteria maps onto a strategy that can run
        let jets = vec![Jet::from_pt_eta_phi_e(30.0, 0.0, 1.0, 30.0)];
        let partons = vec![candidate(TruthRole::Parton, 0, 1.1, 1)];
        let config = MatcherConfig::default();
        let ctx = MatchContext {
            jets: &jets,
            partons: &partons,
            fsrs: &[],
            config: &config,
        };
        for criteria in MatchingCriteria::ALL {
            let mut state = MatchingState::new(1);
            let strategy = strategy_for(criteria);
            strategy.match_partons(&ctx, &mut state).unwrap();
            strategy.match_fsrs(&ctx, &mut state).unwrap();
            assert_eq!(state.n_matched(), usize::from(criteria.recomputes_delta_r()));
        }
    }
}
