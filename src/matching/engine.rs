use tracing::{debug, warn};

use crate::core::jet::Jet;
use crate::core::particle::TruthParticle;
use crate::core::types::TruthRole;
use crate::matching::config::{MatcherConfig, PropertyValue};
use crate::matching::error::MatchError;
use crate::matching::outcome::MatchOutcome;
use crate::matching::state::MatchingState;
use crate::matching::strategy::{strategy_for, MatchContext};
use crate::utils::validation::check_truth_collection;

/// Maximum number of matched jets: two gluinos, each decaying to three quarks
pub const MAX_MATCHED_JETS: usize = 6;

/// The main matching engine
///
/// Holds one event's jets and truth records plus the options. Each call to
/// [`Matcher::match_jets`] starts from fresh bookkeeping and never modifies the
/// inputs, so the same matcher can be re-run (or shared between threads).
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
    jets: Vec<Jet>,
    partons: Vec<TruthParticle>,
    fsrs: Vec<TruthParticle>,
}

impl Matcher {
    /// Create a matcher with the given options and no inputs
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a matcher for a full event
    pub fn with_event(
        config: MatcherConfig,
        jets: Vec<Jet>,
        partons: Vec<TruthParticle>,
        fsrs: Option<Vec<TruthParticle>>,
    ) -> Self {
        Self {
            config,
            jets,
            partons,
            fsrs: fsrs.unwrap_or_default(),
        }
    }

    pub fn add_jets(&mut self, jets: Vec<Jet>) {
        self.jets = jets;
    }

    pub fn add_partons(&mut self, partons: Vec<TruthParticle>) {
        self.partons = partons;
    }

    pub fn add_fsrs(&mut self, fsrs: Vec<TruthParticle>) {
        self.fsrs = fsrs;
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MatcherConfig {
        &mut self.config
    }

    /// Set an option by name, see [`MatcherConfig::set_property`]
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown names or ill-typed values.
    pub fn set_property(
        &mut self,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), MatchError> {
        self.config.set_property(name, value)
    }

    /// Match jets to partons and FSRs
    ///
    /// Returns one outcome per jet in input order, or only the matched ones
    /// when `ReturnOnlyMatched` is set.
    ///
    /// # Errors
    ///
    /// Configuration and input errors are reported before any matching is
    /// done. `MatchError::TruthRecordNotFound` can be raised mid-pass by the
    /// hint strategy, and `MatchError::TooManyMatchedJets` after matching when
    /// more than [`MAX_MATCHED_JETS`] jets matched and the protection is on.
    /// No outcomes are returned on error.
    pub fn match_jets(&self) -> Result<Vec<MatchOutcome>, MatchError> {
        let config = &self.config;
        config.validate()?;

        if self.jets.is_empty() {
            return Err(MatchError::NoJets);
        }
        if self.partons.is_empty() {
            return Err(MatchError::NoPartons);
        }
        let partons = check_truth_collection(TruthRole::Parton, &self.partons)?;
        let fsrs = check_truth_collection(TruthRole::Fsr, &self.fsrs)?;

        debug!(
            "Matching {} jets to {} partons{} with {} (DeltaRcut = {})",
            self.jets.len(),
            partons.len(),
            if fsrs.is_empty() { "" } else { " and FSRs" },
            config.criteria,
            config.delta_r_cut,
        );
        debug!(
            "Will return {} jets",
            if config.return_only_matched {
                "only matched"
            } else {
                "all"
            }
        );

        let ctx = MatchContext {
            jets: &self.jets,
            partons: &partons,
            fsrs: &fsrs,
            config,
        };
        let strategy = strategy_for(config.criteria);
        let mut state = MatchingState::new(self.jets.len());

        debug!("Matching {} to jets", TruthRole::Parton.plural());
        strategy.match_partons(&ctx, &mut state)?;

        if !fsrs.is_empty() {
            if state.n_matched() >= MAX_MATCHED_JETS {
                debug!(
                    "{} jets already matched, skipping {}",
                    state.n_matched(),
                    TruthRole::Fsr.plural()
                );
            } else {
                debug!("Matching {} to jets", TruthRole::Fsr.plural());
                strategy.match_fsrs(&ctx, &mut state)?;
            }
        }

        let n_matched = state.n_matched();
        if n_matched > MAX_MATCHED_JETS {
            if !config.disable_n_matched_jet_protection {
                return Err(MatchError::TooManyMatchedJets {
                    matched: n_matched,
                    limit: MAX_MATCHED_JETS,
                });
            }
            warn!("{n_matched} jets are matched, more than {MAX_MATCHED_JETS}");
        }
        debug!("{} of {} jets matched", n_matched, self.jets.len());

        let outcomes = state
            .into_decorations()
            .into_iter()
            .zip(&self.jets)
            .enumerate()
            .map(|(jet_index, (decoration, jet))| MatchOutcome {
                jet_index,
                jet: jet.clone(),
                decoration,
            })
            .filter(|outcome| !config.return_only_matched || outcome.is_matched())
            .collect();

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MatchType;
    use crate::matching::config::MatchingCriteria;

    fn parton(phi: f64, barcode: i64) -> TruthParticle {
        TruthParticle::from_pt_eta_phi_e(20.0, 0.0, phi, 20.0)
            .with_barcode(barcode)
            .with_gluino_barcode(1)
            .with_pdgid(1)
    }

    fn make_matcher(jets: Vec<Jet>, partons: Vec<TruthParticle>) -> Matcher {
        Matcher::with_event(MatcherConfig::default(), jets, partons, None)
    }

    #[test]
    fn test_no_jets() {
        let matcher = make_matcher(vec![], vec![parton(0.0, 1)]);
        assert_eq!(matcher.match_jets(), Err(MatchError::NoJets));
    }

    #[test]
    fn test_no_partons() {
        let matcher = make_matcher(vec![Jet::from_pt_eta_phi_e(20.0, 0.0, 0.0, 20.0)], vec![]);
        assert_eq!(matcher.match_jets(), Err(MatchError::NoPartons));
    }

    #[test]
    fn test_config_checked_before_inputs() {
        let mut matcher = Matcher::new(MatcherConfig::default());
        matcher
            .set_property("MatchingCriteria", "UseFTDeltaRvalues")
            .unwrap();
        matcher.set_property("DeltaRcut", 0.5).unwrap();
        assert!(matches!(
            matcher.match_jets(),
            Err(MatchError::DeltaRCutWithoutRecompute { .. })
        ));
    }

    #[test]
    fn test_incomplete_parton_is_rejected() {
        let incomplete = TruthParticle::from_pt_eta_phi_e(20.0, 0.0, 0.0, 20.0).with_barcode(1);
        let matcher = make_matcher(
            vec![Jet::from_pt_eta_phi_e(20.0, 0.0, 0.0, 20.0)],
            vec![incomplete],
        );
        assert!(matches!(
            matcher.match_jets(),
            Err(MatchError::IncompleteTruthRecord {
                role: TruthRole::Parton,
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_output_preserves_input_order() {
        let jets = vec![
            Jet::from_pt_eta_phi_e(30.0, 0.0, 2.5, 30.0),
            Jet::from_pt_eta_phi_e(25.0, 0.0, 1.0, 25.0),
            Jet::from_pt_eta_phi_e(20.0, 0.0, -2.0, 20.0),
        ];
        let matcher = make_matcher(jets, vec![parton(1.1, 1)]);
        let outcomes = matcher.match_jets().unwrap();

        let indices: Vec<usize> = outcomes.iter().map(|o| o.jet_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(outcomes[1].match_type(), MatchType::Parton);
        assert!(!outcomes[0].is_matched());
        assert!(!outcomes[2].is_matched());
    }

    #[test]
    fn test_return_only_matched() {
        let jets = vec![
            Jet::from_pt_eta_phi_e(30.0, 0.0, 2.5, 30.0),
            Jet::from_pt_eta_phi_e(25.0, 0.0, 1.0, 25.0),
        ];
        let mut matcher = make_matcher(jets, vec![parton(1.1, 1)]);
        matcher.config_mut().return_only_matched = true;
        let outcomes = matcher.match_jets().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].jet_index, 1);
        assert_eq!(outcomes[0].match_barcode(), Some(1));
    }

    #[test]
    fn test_fsr_pass_skipped_at_ceiling() {
        let jets: Vec<Jet> = (0..7)
            .map(|i| Jet::from_pt_eta_phi_e(20.0, 0.0, f64::from(i) * 0.8 - 2.4, 20.0))
            .collect();
        let partons: Vec<TruthParticle> = (0..6)
            .map(|i| parton(f64::from(i) * 0.8 - 2.4, i64::from(i) + 1))
            .collect();
        // The seventh jet sits exactly on an FSR but the FSR pass never runs
        let fsr = parton(6.0 * 0.8 - 2.4, 10).with_quark_barcode(1);
        let matcher = Matcher::with_event(
            MatcherConfig {
                criteria: MatchingCriteria::RecomputePtPriority,
                match_fsrs_from_matched_gluino_decays: true,
                ..MatcherConfig::default()
            },
            jets,
            partons,
            Some(vec![fsr]),
        );
        let outcomes = matcher.match_jets().unwrap();
        assert_eq!(outcomes.iter().filter(|o| o.is_matched()).count(), 6);
        assert!(!outcomes[6].is_matched());
    }
}
