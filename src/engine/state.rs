//! Selection state of the match engine.

use serde::{Deserialize, Serialize};

use crate::cards::CardHandle;

/// Where the engine is in the flip-two cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No card flipped.
    Idle,
    /// First card flipped, waiting for the second.
    OneSelected,
    /// Two cards flipped, resolution scheduled. Input is ignored.
    Resolving,
}

/// Currently selected cards.
///
/// `second` is only ever set while `first` is, and `processing` is true
/// exactly while a resolve is pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub first: Option<CardHandle>,
    pub second: Option<CardHandle>,
    pub processing: bool,
}

impl Selection {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.first, self.processing) {
            (_, true) => Phase::Resolving,
            (Some(_), false) => Phase::OneSelected,
            (None, false) => Phase::Idle,
        }
    }

    /// Record a selection. Returns the new phase.
    pub(crate) fn select(&mut self, card: CardHandle) -> Phase {
        if self.first.is_none() {
            self.first = Some(card);
        } else {
            self.second = Some(card);
            self.processing = true;
        }
        self.phase()
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
