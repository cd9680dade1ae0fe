//! The active board: which cards are in play and in what order.

use rustc_hash::FxHashMap;

use crate::cards::{CardHandle, CardPool, FaceId, PairId};
use crate::core::Level;

/// Cards currently in play, in grid order.
///
/// Slot `i` of the board is grid cell `i` (row-major). When the level's
/// cell count is odd the last grid cell has no card; see `hidden_slot`.
#[derive(Clone, Debug)]
pub struct Board {
    level: Level,
    cards: Vec<CardHandle>,
    /// Face assigned to each pair, indexed by pair id.
    pair_faces: Vec<FaceId>,
    /// Reverse lookup: handle -> slot.
    slots: FxHashMap<CardHandle, usize>,
}

impl Board {
    pub(crate) fn new(level: Level, cards: Vec<CardHandle>, pair_faces: Vec<FaceId>) -> Self {
        let slots = cards.iter().enumerate().map(|(slot, &h)| (h, slot)).collect();
        Self {
            level,
            cards,
            pair_faces,
            slots,
        }
    }

    /// Level this board was generated for.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Card handles in slot order.
    #[must_use]
    pub fn cards(&self) -> &[CardHandle] {
        &self.cards
    }

    /// Number of cards in play. Always even.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.pair_faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Grid cell left unpopulated when `rows * columns` is odd.
    #[must_use]
    pub fn hidden_slot(&self) -> Option<usize> {
        self.level.hidden_slot()
    }

    /// Is this card on the board?
    #[must_use]
    pub fn contains(&self, handle: CardHandle) -> bool {
        self.slots.contains_key(&handle)
    }

    /// Grid slot of a card.
    #[must_use]
    pub fn slot_of(&self, handle: CardHandle) -> Option<usize> {
        self.slots.get(&handle).copied()
    }

    /// Card at a grid slot.
    #[must_use]
    pub fn card_at(&self, slot: usize) -> Option<CardHandle> {
        self.cards.get(slot).copied()
    }

    /// Face assigned to a pair.
    #[must_use]
    pub fn face_of(&self, pair: PairId) -> Option<FaceId> {
        self.pair_faces.get(pair.raw() as usize).copied()
    }

    /// How many cards carry each pair id.
    #[must_use]
    pub fn pair_counts(&self, pool: &CardPool) -> FxHashMap<PairId, usize> {
        let mut counts = FxHashMap::default();
        for card in self.cards.iter().filter_map(|&h| pool.get(h)) {
            *counts.entry(card.pair).or_insert(0) += 1;
        }
        counts
    }

    /// Check the pairing invariant: every pair id appears exactly twice and
    /// every slot holds a distinct card.
    #[must_use]
    pub fn is_well_paired(&self, pool: &CardPool) -> bool {
        let counts = self.pair_counts(pool);
        self.cards.len() % 2 == 0
            && self.slots.len() == self.cards.len()
            && counts.len() == self.total_pairs()
            && counts.values().all(|&c| c == 2)
    }

    /// Remove every card, handing them back to the pool.
    pub(crate) fn recycle_into(&mut self, pool: &mut CardPool) {
        for handle in self.cards.drain(..) {
            pool.release(handle);
        }
        self.slots.clear();
        self.pair_faces.clear();
    }
}
