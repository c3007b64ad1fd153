//! Jet/truth matching engine.
//!
//! - [`Matcher`](engine::Matcher): main entry point, validates inputs and runs a strategy
//! - [`MatcherConfig`](config::MatcherConfig): the named options and their defaults
//! - [`MatchOutcome`](outcome::MatchOutcome): per-jet result with its optional decoration
//! - [`MatchError`](error::MatchError): everything that can abort a call
//!
//! ## Matching Algorithm
//!
//! Matching runs two greedy passes over the jets in input order:
//!
//! 1. **Parton pass**: each unmatched jet takes the closest unclaimed parton
//!    (or the parton named by its upstream hint), claiming the parton's barcode.
//! 2. **FSR pass**: each still-unmatched jet proposes the closest FSR whose
//!    lineage is unclaimed. Proposals go through the collision resolver, which
//!    keeps one jet per lineage according to the strategy's priority.
//!
//! Afterwards at most [`MAX_MATCHED_JETS`](engine::MAX_MATCHED_JETS) jets may be
//! matched unless the protection is disabled.
//!
//! ## Example
//!
//! ```rust
//! use jet_parton_matcher::{Jet, Matcher, MatcherConfig, TruthParticle};
//!
//! let jets = vec![Jet::from_pt_eta_phi_e(35.0, 0.0, 1.2, 20.0)];
//! let partons = vec![TruthParticle::from_pt_eta_phi_e(30.0, 0.0, 1.3, 15.0)
//!     .with_barcode(1)
//!     .with_gluino_barcode(1)
//!     .with_pdgid(1)];
//!
//! let matcher = Matcher::with_event(MatcherConfig::default(), jets, partons, None);
//! let outcomes = matcher.match_jets().unwrap();
//! assert_eq!(outcomes[0].match_barcode(), Some(1));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod resolver;
pub(crate) mod state;
pub(crate) mod strategy;
