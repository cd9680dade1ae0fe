//! Card pool - recycles card objects between levels.
//!
//! The pool owns every card allocated during a session. Handles index into
//! that arena; released handles go on a LIFO free list and are handed out
//! again before anything new is allocated.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardHandle};

/// Arena of card objects plus a free list of inactive handles.
///
/// ```
/// use rust_twins::cards::CardPool;
///
/// let mut pool = CardPool::new();
/// let a = pool.acquire();
/// pool.release(a);
///
/// // Released cards are reused before allocating.
/// assert_eq!(pool.acquire(), a);
/// assert_eq!(pool.allocated(), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardPool {
    cards: Vec<Card>,
    free: Vec<CardHandle>,
}

impl CardPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an idle card, allocating one if none is idle.
    ///
    /// The caller resets the card (see `Card::deal`).
    pub fn acquire(&mut self) -> CardHandle {
        if let Some(handle) = self.free.pop() {
            return handle;
        }

        let handle = CardHandle(self.cards.len() as u32);
        self.cards.push(Card::new(handle));
        handle
    }

    /// Deactivate a card and return it to the pool.
    ///
    /// Releasing an unknown or already idle handle is ignored.
    pub fn release(&mut self, handle: CardHandle) {
        let Some(card) = self.cards.get_mut(handle.index()) else {
            return;
        };
        if !card.active && self.free.contains(&handle) {
            return;
        }
        card.deactivate();
        self.free.push(handle);
    }

    /// Look up a card by handle.
    #[must_use]
    pub fn get(&self, handle: CardHandle) -> Option<&Card> {
        self.cards.get(handle.index())
    }

    /// Look up a card mutably by handle.
    pub fn get_mut(&mut self, handle: CardHandle) -> Option<&mut Card> {
        self.cards.get_mut(handle.index())
    }

    /// Total card objects ever allocated.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.cards.len()
    }

    /// Cards currently idle in the pool.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Cards currently handed out.
    #[must_use]
    pub fn in_use(&self) -> usize {
        self.cards.len() - self.free.len()
    }
}
