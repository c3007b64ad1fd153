//! Resolution of FSR collisions.
//!
//! Several FSR records can descend from the same quark, and several jets can
//! independently pick FSRs of that lineage. Only one jet may keep a lineage, so
//! every provisional FSR match goes through [`resolve_fsr`], which keeps a slot
//! per lineage and decides between the current holder and the challenger.
//!
//! Because a later jet can evict an earlier one, FSR decorations are only final
//! once the whole pass has run.

use std::collections::HashMap;

use tracing::debug;

use crate::core::types::Barcode;
use crate::matching::outcome::{Decoration, TruthCandidate};
use crate::matching::state::MatchingState;

/// Which jet wins when two jets compete for the same slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Keep the jet with the higher transverse momentum
    Pt,
    /// Keep the jet closer to its FSR
    DeltaR,
    /// Keep the jet whose FSR has the higher transverse momentum
    FsrPt,
}

impl Priority {
    /// Whether the challenger beats the holder. Ties keep the holder.
    fn prefers_challenger(self, challenger: &FsrSlot, holder: &FsrSlot) -> bool {
        match self {
            Self::Pt => challenger.jet_pt > holder.jet_pt,
            Self::DeltaR => challenger.delta_r < holder.delta_r,
            Self::FsrPt => challenger.fsr_pt > holder.fsr_pt,
        }
    }
}

/// What a slot is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    /// One jet per radiating quark
    Lineage(Barcode),
    /// One jet per FSR record
    Record(usize),
}

/// Current holder of a slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FsrSlot {
    pub(crate) fsr_index: usize,
    pub(crate) jet_index: usize,
    pub(crate) quark_barcode: Barcode,
    pub(crate) fsr_pt: f64,
    pub(crate) jet_pt: f64,
    pub(crate) delta_r: f64,
}

#[derive(Debug, Default)]
pub(crate) struct FsrSlots {
    slots: HashMap<SlotKey, FsrSlot>,
}

impl FsrSlots {
    pub(crate) fn get(&self, key: SlotKey) -> Option<&FsrSlot> {
        self.slots.get(&key)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    fn insert(&mut self, key: SlotKey, slot: FsrSlot) -> Option<FsrSlot> {
        self.slots.insert(key, slot)
    }
}

/// A jet's provisional claim on an FSR
#[derive(Debug, Clone, Copy)]
pub(crate) struct FsrProposal<'a> {
    pub(crate) jet_index: usize,
    pub(crate) jet_pt: f64,
    pub(crate) fsr: &'a TruthCandidate,
    pub(crate) delta_r: f64,
    pub(crate) key: SlotKey,
}

impl FsrProposal<'_> {
    fn as_slot(&self) -> FsrSlot {
        FsrSlot {
            fsr_index: self.fsr.index,
            jet_index: self.jet_index,
            quark_barcode: self.fsr.lineage,
            fsr_pt: self.fsr.momentum.pt,
            jet_pt: self.jet_pt,
            delta_r: self.delta_r,
        }
    }
}

/// Outcome of submitting a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The slot was free and now belongs to the proposing jet
    Assigned,
    /// The proposing jet took the slot and the previous holder was unmatched
    Replaced { evicted_jet: usize },
    /// The holder kept the slot; the proposing jet stays unmatched
    Rejected { holder_jet: usize },
}

/// Submit a provisional FSR match and apply the decision to `state`.
/// Decisions are traced when `trace` is set.
pub(crate) fn resolve_fsr(
    state: &mut MatchingState,
    proposal: FsrProposal<'_>,
    priority: Priority,
    trace: bool,
) -> Resolution {
    let challenger = proposal.as_slot();
    let holder = state.fsr_slots.get(proposal.key).copied();

    let resolution = match holder {
        Some(holder) if holder.jet_index != challenger.jet_index => {
            if priority.prefers_challenger(&challenger, &holder) {
                if trace {
                    debug!(
                        jet = holder.jet_index,
                        fsr = holder.fsr_index,
                        quark_barcode = holder.quark_barcode,
                        "Unmatching jet in favour of jet {}",
                        challenger.jet_index
                    );
                }
                state.clear(holder.jet_index);
                Resolution::Replaced {
                    evicted_jet: holder.jet_index,
                }
            } else {
                Resolution::Rejected {
                    holder_jet: holder.jet_index,
                }
            }
        }
        _ => Resolution::Assigned,
    };

    if !matches!(resolution, Resolution::Rejected { .. }) {
        state.fsr_slots.insert(proposal.key, challenger);
        state.decorate(
            proposal.jet_index,
            Decoration::from_candidate(proposal.fsr, proposal.delta_r),
        );
    }

    if trace {
        debug!(
            jet = proposal.jet_index,
            fsr = proposal.fsr.index,
            quark_barcode = proposal.fsr.lineage,
            ?resolution,
            "Resolved FSR proposal"
        );
    }

    resolution
}
