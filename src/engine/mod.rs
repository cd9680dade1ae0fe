//! Match engine: the flip-two state machine and its timers.
//!
//! ## Key Types
//!
//! - `MatchEngine`: Owns board, pool, score and scheduler
//! - `GameEvent` / `EventBatch`: What each transition produced
//! - `Phase` / `Selection`: Idle, one card up, or resolving
//! - `Scheduler` / `Task`: Deferred resolve and level advance

#[allow(clippy::module_inception)]
pub mod engine;
pub mod events;
pub mod scheduler;
pub mod state;

pub use engine::MatchEngine;
pub use events::{EventBatch, GameEvent};
pub use scheduler::{CancelToken, Scheduler, Task};
pub use state::{Phase, Selection};
