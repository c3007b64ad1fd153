//! Core data types for jet/parton matching.
//!
//! - [`FourMomentum`](momentum::FourMomentum): pt, eta, phi, E and the ΔR metric
//! - [`Jet`](jet::Jet): a reconstructed jet with optional upstream match hints
//! - [`TruthParticle`](particle::TruthParticle): a parton or FSR quark with its identity
//! - [`MatchType`](types::MatchType), [`TruthRole`](types::TruthRole): classification types
//!
//! ## Lineages
//!
//! Each parton starts a decay lineage identified by its own barcode. FSR quarks
//! point back at that lineage through `quark_barcode`, so a parton with barcode
//! 3 and every FSR with `quark_barcode == 3` compete for the same jet slot.

pub mod jet;
pub mod momentum;
pub mod particle;
pub mod types;
