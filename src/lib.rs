//! # rust-twins
//!
//! Game-state core for a memory pairs ("twins") card game: a grid of
//! face-down cards, the player flips two at a time, matching pairs score,
//! and clearing the board advances to the next grid size.
//!
//! ## Design Principles
//!
//! 1. **Pure State Machine**: The `MatchEngine` mutates only its own state
//!    and reports what happened as `GameEvent`s. Audio, rendering and
//!    storage live behind traits in `session`.
//!
//! 2. **Deterministic**: A seeded `GameRng` drives every shuffle, and time
//!    only moves when the host calls `advance`.
//!
//! 3. **Configuration Over Convention**: Levels, faces, delays, score
//!    deltas and layout all come from `GameConfig`.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: Card state and the recycling pool
//! - `board`: Board generation and grid layout
//! - `engine`: Selection/resolution state machine and scheduler
//! - `score`: Floored score and its persistence slot
//! - `session`: Adapter wiring the engine to audio, presenter and store

pub mod board;
pub mod cards;
pub mod core;
pub mod engine;
pub mod score;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Error, GameConfig, GameRng, Level, Scoring, StoreError, Timings,
};

pub use crate::cards::{Card, CardHandle, CardPool, FaceId, PairId};

pub use crate::board::{Board, GridLayout, GridSpec};

pub use crate::engine::{EventBatch, GameEvent, MatchEngine, Phase, Selection, Task};

pub use crate::score::{JsonFileScoreStore, MemoryScoreStore, Score, ScoreStore};

pub use crate::session::{AudioCues, GameSession, NullPresenter, Presenter, SilentAudio};
