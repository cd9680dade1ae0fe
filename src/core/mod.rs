//! Core types: RNG, configuration, errors.
//!
//! Everything here is independent of the board and the match rules.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GameConfig, Level, Scoring, Timings, MAX_FACES};
pub use error::{ConfigError, Error, StoreError};
pub use rng::GameRng;
