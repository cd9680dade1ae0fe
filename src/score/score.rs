//! Running score, floored at zero.

use serde::{Deserialize, Serialize};

/// Non-negative running score.
///
/// Carried across levels and restarts for the whole session; only its
/// persistence slot outlives the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(u32);

impl Score {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Apply a delta, flooring at zero. Returns the new value.
    ///
    /// ```
    /// use rust_twins::score::Score;
    ///
    /// let mut score = Score::new(3);
    /// assert_eq!(score.apply(-5), 0);
    /// assert_eq!(score.apply(10), 10);
    /// ```
    pub fn apply(&mut self, delta: i64) -> u32 {
        let next = (i64::from(self.0) + delta).clamp(0, i64::from(u32::MAX));
        self.0 = next as u32;
        self.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score: {}", self.0)
    }
}
