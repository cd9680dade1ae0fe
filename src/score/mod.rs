//! Scoring: the floored running score and its persistence slot.

#[allow(clippy::module_inception)]
pub mod score;
pub mod store;

pub use score::Score;
pub use store::{JsonFileScoreStore, MemoryScoreStore, ScoreStore, SCORE_KEY};
