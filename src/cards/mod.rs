//! Card system: card state and the recycling pool.
//!
//! ## Key Types
//!
//! - `PairId`: Which pair a card belongs to
//! - `FaceId`: Which face a card shows
//! - `CardHandle`: Stable identity of one card object
//! - `Card`: Runtime card state (face up, interactable, active)
//! - `CardPool`: Arena + free list, reused across levels

pub mod card;
pub mod pool;

pub use card::{Card, CardHandle, FaceId, PairId};
pub use pool::CardPool;
