//! Board generation: pairing, face assignment and shuffling.
//!
//! ## Algorithm
//!
//! 1. Truncate the cell count to the largest even number.
//! 2. Assign faces to pairs cyclically: pair `i` gets
//!    `faces[i % min(pairs, faces.len())]`.
//! 3. Lay out every pair id twice and shuffle with Fisher–Yates.
//! 4. Deal one pooled card per slot.

use log::debug;

use super::board::Board;
use crate::cards::{CardPool, FaceId, PairId};
use crate::core::{ConfigError, GameConfig, GameRng, Level};

/// Face for a pair under cyclic assignment.
///
/// When a level has more pairs than faces, pair ids wrap around the face
/// list, so distinct pairs can look identical.
#[must_use]
pub fn face_for_pair(pair: PairId, faces: &[FaceId], total_pairs: usize) -> Option<FaceId> {
    let unique = total_pairs.min(faces.len());
    if unique == 0 {
        return None;
    }
    Some(faces[pair.raw() as usize % unique])
}

/// Build a shuffled board for `level`.
///
/// Cards are drawn from `pool`, reusing idle cards before allocating.
/// Fails only if the level needs pairs but `faces` is empty.
pub fn generate(
    level: Level,
    faces: &[FaceId],
    pool: &mut CardPool,
    rng: &mut GameRng,
) -> Result<Board, ConfigError> {
    let total_pairs = level.pair_count();
    if total_pairs > 0 && faces.is_empty() {
        return Err(ConfigError::NoFaces);
    }

    let pair_faces: Vec<FaceId> = (0..total_pairs)
        .filter_map(|i| face_for_pair(PairId::new(i as u32), faces, total_pairs))
        .collect();

    let mut ids: Vec<PairId> = (0..total_pairs as u32)
        .flat_map(|i| [PairId::new(i), PairId::new(i)])
        .collect();
    rng.shuffle(&mut ids);

    let mut cards = Vec::with_capacity(ids.len());
    for pair in ids {
        let handle = pool.acquire();
        if let Some(card) = pool.get_mut(handle) {
            card.deal(pair, pair_faces[pair.raw() as usize]);
        }
        cards.push(handle);
    }

    debug!(
        "generated {} board: {} cards, {} pairs, {} faces in use",
        level,
        cards.len(),
        total_pairs,
        total_pairs.min(faces.len())
    );

    Ok(Board::new(level, cards, pair_faces))
}

/// Build a board for the configured level at `index`.
///
/// Rejects out-of-range indices and levels too small to hold a pair.
pub fn generate_level(
    config: &GameConfig,
    index: usize,
    pool: &mut CardPool,
    rng: &mut GameRng,
) -> Result<Board, ConfigError> {
    if config.levels.is_empty() {
        return Err(ConfigError::NoLevels);
    }
    let level = config.level(index)?;
    if level.pair_count() == 0 {
        return Err(ConfigError::LevelTooSmall {
            index,
            rows: level.rows,
            columns: level.columns,
        });
    }
    generate(level, &config.face_ids(), pool, rng)
}
