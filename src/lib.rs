//! # jet-parton-matcher
//!
//! Truth labeling of reconstructed jets for multijet resonance searches.
//!
//! In an event with two pair-produced gluinos, each decaying to three quarks,
//! up to six reconstructed jets originate from those quarks. To study mass
//! reconstruction with truth information, every jet needs to be labeled with
//! the quark it comes from, or with a final-state-radiation (FSR) quark
//! radiated along the same decay chain.
//!
//! `jet-parton-matcher` does this per event by angular proximity, with a few
//! rules on top:
//!
//! - **Uniqueness**: a jet gets at most one truth match, and each parton
//!   lineage is used by at most one jet
//! - **Two passes**: partons are matched first, FSR quarks only fill the
//!   remaining jets
//! - **Collision resolution**: when two jets pick FSRs from the same quark,
//!   the higher-pt (or closer) jet keeps the match, or with upstream hints
//!   the jet holding the harder FSR
//! - **Ceiling**: more than six matched jets is reported as an error
//!
//! ## Example
//!
//! ```rust
//! use jet_parton_matcher::{Jet, Matcher, MatcherConfig, MatchType, TruthParticle};
//!
//! let jets = vec![
//!     Jet::from_pt_eta_phi_e(35.0, 0.0, 1.2, 20.0),
//!     Jet::from_pt_eta_phi_e(23.0, 0.0, 0.01, 23.0),
//! ];
//! let partons = vec![TruthParticle::from_pt_eta_phi_e(30.0, 0.0, 1.3, 15.0)
//!     .with_barcode(1)
//!     .with_gluino_barcode(1)
//!     .with_pdgid(1)];
//! let fsrs = vec![TruthParticle::from_pt_eta_phi_e(22.0, 0.0, 0.02, 22.0)
//!     .with_barcode(1)
//!     .with_gluino_barcode(1)
//!     .with_pdgid(1)
//!     .with_quark_barcode(3)];
//!
//! let mut config = MatcherConfig::default();
//! config.delta_r_cut = 0.5;
//!
//! let matcher = Matcher::with_event(config, jets, partons, Some(fsrs));
//! for outcome in matcher.match_jets().unwrap() {
//!     println!("Jet {}: {}", outcome.jet_index, outcome.match_type());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Four-momenta, jets and truth particles
//! - [`matching`]: Matching engine, strategies and collision resolution
//! - [`parsing`]: JSON event files
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::jet::Jet;
pub use crate::core::momentum::FourMomentum;
pub use crate::core::particle::TruthParticle;
pub use crate::core::types::*;
pub use crate::matching::config::{MatcherConfig, MatchingCriteria, PropertyValue};
pub use crate::matching::engine::{Matcher, MAX_MATCHED_JETS};
pub use crate::matching::error::{ErrorCategory, MatchError};
pub use crate::matching::outcome::{Decoration, MatchOutcome};
