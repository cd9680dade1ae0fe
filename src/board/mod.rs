//! Boards: generation, the active card set, and grid layout.
//!
//! ## Key Types
//!
//! - `Board`: Active cards in grid order with the pair/face mapping
//! - `generate` / `generate_level`: Build a shuffled, paired board
//! - `GridLayout`: Cell sizing for the renderer

#[allow(clippy::module_inception)]
pub mod board;
pub mod generator;
pub mod layout;

pub use board::Board;
pub use generator::{face_for_pair, generate, generate_level};
pub use layout::{GridLayout, GridSpec, Padding, Size, Spacing};
