//! Game configuration types.
//!
//! A session is configured once at startup:
//! - `Level`: grid dimensions, selected by index and cycled forever
//! - `Timings`: delays for the two scheduled transitions
//! - `Scoring`: reward and penalty per resolved pair
//! - `GameConfig`: combines all of the above plus faces and layout
//!
//! Configs load from JSON and must pass `GameConfig::validate` before a
//! board is ever built.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Error};
use crate::board::layout::GridLayout;
use crate::cards::FaceId;

/// Largest face list a `FaceId` can index.
pub const MAX_FACES: usize = u16::MAX as usize + 1;

/// Grid dimensions for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Level {
    pub rows: u32,
    pub columns: u32,
}

impl Level {
    /// Create a level.
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of grid cells, including one that may stay empty.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Largest even card count that fits the grid.
    #[must_use]
    pub const fn card_count(self) -> usize {
        self.cell_count() & !1
    }

    /// Number of pairs on a board of this level.
    #[must_use]
    pub const fn pair_count(self) -> usize {
        self.card_count() / 2
    }

    /// Grid slot left empty when the cell count is odd.
    #[must_use]
    pub const fn hidden_slot(self) -> Option<usize> {
        if self.cell_count() % 2 == 1 {
            Some(self.cell_count() - 1)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Delays for scheduled transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// Time both flipped faces stay visible before the pair is judged.
    pub resolve_delay_ms: u64,
    /// Pause between the final match and the next level.
    pub advance_delay_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            resolve_delay_ms: 500,
            advance_delay_ms: 1000,
        }
    }
}

impl Timings {
    #[must_use]
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

/// Score deltas for resolved pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoring {
    /// Added on a match.
    pub match_reward: u32,
    /// Subtracted on a mismatch (floored at zero).
    pub mismatch_penalty: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            match_reward: 10,
            mismatch_penalty: 5,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Levels in play order. Play wraps to the first after the last.
    pub levels: Vec<Level>,

    /// Face keys (sprite names, symbols). `FaceId(i)` is `faces[i]`.
    pub faces: Vec<String>,

    /// Index of the first level played.
    #[serde(default)]
    pub starting_level: usize,

    #[serde(default)]
    pub timings: Timings,

    #[serde(default)]
    pub scoring: Scoring,

    #[serde(default)]
    pub layout: GridLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels: vec![
                Level::new(2, 2),
                Level::new(2, 3),
                Level::new(3, 4),
                Level::new(4, 4),
                Level::new(4, 5),
                Level::new(5, 6),
            ],
            faces: [
                "apple", "banana", "cherry", "grape", "lemon", "mango", "melon", "orange",
                "peach", "pear", "plum", "kiwi", "lime", "fig", "coconut",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            starting_level: 0,
            timings: Timings::default(),
            scoring: Scoring::default(),
            layout: GridLayout::default(),
        }
    }
}

impl GameConfig {
    /// Create an empty configuration. Add levels and faces before use.
    pub fn new() -> Self {
        Self {
            levels: Vec::new(),
            faces: Vec::new(),
            starting_level: 0,
            timings: Timings::default(),
            scoring: Scoring::default(),
            layout: GridLayout::default(),
        }
    }

    /// Add a level.
    #[must_use]
    pub fn with_level(mut self, rows: u32, columns: u32) -> Self {
        self.levels.push(Level::new(rows, columns));
        self
    }

    /// Add a face.
    #[must_use]
    pub fn with_face(mut self, face: impl Into<String>) -> Self {
        self.faces.push(face.into());
        self
    }

    /// Add `count` generated faces named `face-N`.
    #[must_use]
    pub fn with_generated_faces(mut self, count: usize) -> Self {
        let start = self.faces.len();
        self.faces.extend((start..start + count).map(|i| format!("face-{}", i)));
        self
    }

    /// Set the starting level index.
    #[must_use]
    pub fn with_starting_level(mut self, index: usize) -> Self {
        self.starting_level = index;
        self
    }

    /// Set transition delays.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Set score deltas.
    #[must_use]
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set grid layout geometry.
    #[must_use]
    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Get a level by index.
    pub fn level(&self, index: usize) -> Result<Level, ConfigError> {
        self.levels.get(index).copied().ok_or(ConfigError::LevelOutOfRange {
            index,
            len: self.levels.len(),
        })
    }

    /// Index of the level after `index`, wrapping to the first.
    #[must_use]
    pub fn next_level_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next >= self.levels.len() {
            0
        } else {
            next
        }
    }

    /// Face ids in configuration order, capped at `MAX_FACES`.
    #[must_use]
    pub fn face_ids(&self) -> Vec<FaceId> {
        (0..self.faces.len())
            .map_while(|i| u16::try_from(i).ok())
            .map(FaceId::new)
            .collect()
    }

    /// Face key for an id.
    #[must_use]
    pub fn face_name(&self, face: FaceId) -> Option<&str> {
        self.faces.get(face.raw() as usize).map(String::as_str)
    }

    /// Check every level and the face set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        self.level(self.starting_level)?;

        for (index, level) in self.levels.iter().enumerate() {
            if level.pair_count() == 0 {
                return Err(ConfigError::LevelTooSmall {
                    index,
                    rows: level.rows,
                    columns: level.columns,
                });
            }
        }

        if self.faces.is_empty() {
            return Err(ConfigError::NoFaces);
        }
        if self.faces.len() > MAX_FACES {
            return Err(ConfigError::TooManyFaces {
                count: self.faces.len(),
                max: MAX_FACES,
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
