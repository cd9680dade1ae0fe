//! Cards - one grid cell's runtime state.
//!
//! A `Card` knows which pair it belongs to, which face it shows, and whether
//! it is face up and clickable. Cards are never freed during a session:
//! between levels they sit inactive in the `CardPool` and are handed out
//! again with new pair/face values.

use serde::{Deserialize, Serialize};

/// Pair identifier. Exactly two active cards share each pair id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairId(pub u32);

impl PairId {
    /// Create a new pair ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// Visible face (image, symbol) of a card.
///
/// Indexes `GameConfig::faces`. Faces are reused cyclically when a level
/// has more pairs than faces, so two pairs may share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u16);

impl FaceId {
    /// Create a new face ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Stable identity of a card object.
///
/// Two handles are equal only if they refer to the same card object, which
/// is how "clicking the already-flipped card" is detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardHandle(pub u32);

impl CardHandle {
    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card on (or waiting to return to) the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Identity of this object within its pool.
    pub handle: CardHandle,

    /// Pair this card belongs to.
    pub pair: PairId,

    /// Face shown when flipped up.
    pub face: FaceId,

    /// Is the face currently visible?
    pub face_up: bool,

    /// Does the card accept clicks? False once matched.
    pub interactable: bool,

    /// Is the card on the board (as opposed to idle in the pool)?
    pub active: bool,
}

impl Card {
    /// Create an inactive card with placeholder pair and face.
    #[must_use]
    pub fn new(handle: CardHandle) -> Self {
        Self {
            handle,
            pair: PairId::new(0),
            face: FaceId::new(0),
            face_up: false,
            interactable: false,
            active: false,
        }
    }

    /// Prepare the card for a fresh board: face down and clickable.
    pub fn deal(&mut self, pair: PairId, face: FaceId) {
        self.pair = pair;
        self.face = face;
        self.face_up = false;
        self.interactable = true;
        self.active = true;
    }

    pub fn flip_up(&mut self) {
        self.face_up = true;
    }

    pub fn flip_down(&mut self) {
        self.face_up = false;
    }

    /// Retire a matched card: stays face up, ignores clicks.
    pub fn disable(&mut self) {
        self.interactable = false;
    }

    /// Take the card off the board.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.interactable = false;
        self.face_up = false;
    }

    /// Can the player select this card right now?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.active && self.interactable
    }

    /// Do two cards form a pair?
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.pair == other.pair
    }
}
