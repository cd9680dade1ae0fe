//! Engine output events.
//!
//! The engine never calls audio, rendering or storage itself. Each
//! transition returns the events it produced; adapters (see `session`)
//! turn them into sounds, redraws and saves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardHandle, PairId};
use crate::core::Level;

/// Something that happened during a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card was turned face up by a selection.
    CardFlipped { card: CardHandle },

    /// Two selected cards formed a pair and are retired face up.
    Matched {
        first: CardHandle,
        second: CardHandle,
        pair: PairId,
    },

    /// Two selected cards differed and were turned back down.
    Failed { first: CardHandle, second: CardHandle },

    /// The score was updated (even if flooring left it unchanged).
    ScoreChanged { score: u32, delta: i64 },

    /// Every pair on the board is matched; the next level is scheduled.
    LevelComplete { level_index: usize },

    /// A fresh board was dealt.
    LevelStarted { level_index: usize, level: Level },
}

impl GameEvent {
    /// Cards whose visible state this event changed.
    #[must_use]
    pub fn touched_cards(&self) -> SmallVec<[CardHandle; 2]> {
        match self {
            GameEvent::CardFlipped { card } => smallvec::smallvec![*card],
            GameEvent::Matched { first, second, .. } | GameEvent::Failed { first, second } => {
                smallvec::smallvec![*first, *second]
            }
            _ => SmallVec::new(),
        }
    }
}

/// Events from one transition. Most transitions emit at most a handful.
pub type EventBatch = SmallVec<[GameEvent; 4]>;
