use std::collections::HashSet;

use crate::core::types::Barcode;
use crate::matching::outcome::Decoration;
use crate::matching::resolver::FsrSlots;

/// Bookkeeping for a single `match_jets` call
///
/// Decorations are collected here and only handed out once both passes and the
/// ceiling check succeed, so a failed call never exposes partial results.
#[derive(Debug)]
pub(crate) struct MatchingState {
    decorations: Vec<Option<Decoration>>,
    claimed: HashSet<Barcode>,
    pub(crate) fsr_slots: FsrSlots,
}

impl MatchingState {
    pub(crate) fn new(n_jets: usize) -> Self {
        Self {
            decorations: vec![None; n_jets],
            claimed: HashSet::new(),
            fsr_slots: FsrSlots::default(),
        }
    }

    pub(crate) fn is_decorated(&self, jet_index: usize) -> bool {
        self.decorations
            .get(jet_index)
            .is_some_and(Option::is_some)
    }

    pub(crate) fn decorate(&mut self, jet_index: usize, decoration: Decoration) {
        if let Some(slot) = self.decorations.get_mut(jet_index) {
            *slot = Some(decoration);
        }
    }

    pub(crate) fn clear(&mut self, jet_index: usize) {
        if let Some(slot) = self.decorations.get_mut(jet_index) {
            *slot = None;
        }
    }

    /// Record a lineage as matched. Returns false if it already was.
    pub(crate) fn claim(&mut self, lineage: Barcode) -> bool {
        self.claimed.insert(lineage)
    }

    pub(crate) fn is_claimed(&self, lineage: Barcode) -> bool {
        self.claimed.contains(&lineage)
    }

    pub(crate) fn n_matched(&self) -> usize {
        self.decorations.iter().filter(|d| d.is_some()).count()
    }

    pub(crate) fn into_decorations(self) -> Vec<Option<Decoration>> {
        self.decorations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MatchType;

    fn decoration(barcode: Barcode) -> Decoration {
        Decoration {
            match_type: MatchType::Parton,
            truth_index: 0,
            pdgid: 1,
            barcode,
            gluino_barcode: 1,
            delta_r: 0.1,
        }
    }

    #[test]
    fn test_decorate_and_clear() {
        let mut state = MatchingState::new(3);
        assert_eq!(state.n_matched(), 0);

        state.decorate(1, decoration(5));
        assert!(state.is_decorated(1));
        assert!(!state.is_decorated(0));
        assert_eq!(state.n_matched(), 1);

        state.clear(1);
        assert!(!state.is_decorated(1));
        assert_eq!(state.n_matched(), 0);

        // Out of range indices are ignored
        state.decorate(10, decoration(5));
        assert!(!state.is_decorated(10));
    }

    #[test]
    fn test_claim_is_unique() {
        let mut state = MatchingState::new(1);
        assert!(state.claim(3));
        assert!(!state.claim(3));
        assert!(state.is_claimed(3));
        assert!(!state.is_claimed(4));
    }
}
