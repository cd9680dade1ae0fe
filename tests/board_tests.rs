//! Board generation integration tests.
//!
//! These tests verify pairing invariants across level sizes, cyclic face
//! assignment, and the statistical uniformity of the shuffle.

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use rust_twins::board::{face_for_pair, generate, generate_level};
use rust_twins::cards::{CardPool, FaceId, PairId};
use rust_twins::core::{GameConfig, GameRng, Level};

fn faces(n: u16) -> Vec<FaceId> {
    (0..n).map(FaceId::new).collect()
}

// =============================================================================
// Pairing Invariants
// =============================================================================

proptest! {
    /// Every board has an even card count and each pair id exactly twice.
    #[test]
    fn prop_board_is_well_paired(rows in 1u32..9, columns in 1u32..9, n_faces in 1u16..12, seed in any::<u64>()) {
        let level = Level::new(rows, columns);
        let mut pool = CardPool::new();
        let mut rng = GameRng::new(seed);

        let board = generate(level, &faces(n_faces), &mut pool, &mut rng).unwrap();

        prop_assert_eq!(board.total_cards() % 2, 0);
        prop_assert_eq!(board.total_cards(), (rows * columns) as usize & !1);
        prop_assert_eq!(board.total_pairs(), board.total_cards() / 2);
        prop_assert!(board.is_well_paired(&pool));

        for (pair, count) in board.pair_counts(&pool) {
            prop_assert_eq!(count, 2, "pair {} appears {} times", pair, count);
            prop_assert!((pair.raw() as usize) < board.total_pairs());
        }
    }

    /// Partners are distinct card objects.
    #[test]
    fn prop_partners_are_distinct_cards(rows in 2u32..7, columns in 2u32..7, seed in any::<u64>()) {
        let mut pool = CardPool::new();
        let mut rng = GameRng::new(seed);
        let board = generate(Level::new(rows, columns), &faces(4), &mut pool, &mut rng).unwrap();

        let mut by_pair: FxHashMap<PairId, Vec<_>> = FxHashMap::default();
        for &h in board.cards() {
            by_pair.entry(pool.get(h).unwrap().pair).or_default().push(h);
        }
        for handles in by_pair.values() {
            prop_assert_eq!(handles.len(), 2);
            prop_assert_ne!(handles[0], handles[1]);
        }
    }

    /// The face of every card is `faces[pair % min(pairs, faces)]`.
    #[test]
    fn prop_faces_follow_cyclic_rule(rows in 1u32..8, columns in 1u32..8, n_faces in 1u16..10, seed in any::<u64>()) {
        let f = faces(n_faces);
        let mut pool = CardPool::new();
        let mut rng = GameRng::new(seed);
        let board = generate(Level::new(rows, columns), &f, &mut pool, &mut rng).unwrap();

        let unique = board.total_pairs().min(f.len());
        for &h in board.cards() {
            let card = pool.get(h).unwrap();
            prop_assert_eq!(card.face, f[card.pair.raw() as usize % unique]);
        }
    }
}

/// Test that an odd grid drops exactly one slot.
#[test]
fn test_odd_grid_hides_last_slot() {
    let mut pool = CardPool::new();
    let mut rng = GameRng::new(5);
    let board = generate(Level::new(5, 5), &faces(20), &mut pool, &mut rng).unwrap();

    assert_eq!(board.total_cards(), 24);
    assert_eq!(board.hidden_slot(), Some(24));
    assert!(board.card_at(23).is_some());
    assert!(board.card_at(24).is_none());
}

// =============================================================================
// Face Assignment
// =============================================================================

/// Test that more pairs than faces makes distinct pairs share a face.
#[test]
fn test_faces_shared_when_exhausted() {
    let f = faces(3);
    let mut pool = CardPool::new();
    let mut rng = GameRng::new(11);
    // 4x4 = 8 pairs over 3 faces
    let board = generate(Level::new(4, 4), &f, &mut pool, &mut rng).unwrap();

    assert_eq!(board.face_of(PairId::new(0)), Some(FaceId::new(0)));
    assert_eq!(board.face_of(PairId::new(3)), Some(FaceId::new(0)));
    assert_eq!(board.face_of(PairId::new(7)), Some(FaceId::new(1)));

    let mut pairs_per_face: FxHashMap<FaceId, usize> = FxHashMap::default();
    for pair in 0..board.total_pairs() as u32 {
        *pairs_per_face.entry(board.face_of(PairId::new(pair)).unwrap()).or_insert(0) += 1;
    }
    assert!(pairs_per_face.values().any(|&n| n >= 2));
    assert_eq!(pairs_per_face.len(), 3);
}

/// Test that the id -> face mapping does not depend on the seed.
#[test]
fn test_face_mapping_deterministic_across_seeds() {
    let f = faces(5);
    for seed in [1, 2, 3] {
        let mut pool = CardPool::new();
        let mut rng = GameRng::new(seed);
        let board = generate(Level::new(4, 4), &f, &mut pool, &mut rng).unwrap();
        for pair in 0..8u32 {
            assert_eq!(
                board.face_of(PairId::new(pair)),
                face_for_pair(PairId::new(pair), &f, 8)
            );
        }
    }
}

/// Test that fewer pairs than faces uses distinct faces.
#[test]
fn test_faces_unique_when_plenty() {
    let mut pool = CardPool::new();
    let mut rng = GameRng::new(2);
    let board = generate(Level::new(2, 3), &faces(10), &mut pool, &mut rng).unwrap();

    let used: Vec<_> = (0..3).map(|p| board.face_of(PairId::new(p)).unwrap()).collect();
    assert_eq!(used, vec![FaceId::new(0), FaceId::new(1), FaceId::new(2)]);
}

// =============================================================================
// Shuffle Uniformity
// =============================================================================

/// Test that each pair id is equally likely in each board slot.
///
/// 2x3 board: 3 pair ids over 6 slots, so each (slot, id) cell expects
/// 1/3 of the trials. Chi-square over 6 slots x 3 ids with 12 degrees of
/// freedom (2 free per slot).
#[test]
fn test_shuffle_position_uniformity() {
    let level = Level::new(2, 3);
    let f = faces(3);
    let mut pool = CardPool::new();
    let mut rng = GameRng::new(77);
    let trials = 30_000;

    let mut counts = [[0u32; 3]; 6];
    for _ in 0..trials {
        let board = generate(level, &f, &mut pool, &mut rng).unwrap();
        for (slot, &h) in board.cards().iter().enumerate() {
            counts[slot][pool.get(h).unwrap().pair.raw() as usize] += 1;
        }
        // Return the cards so the pool does not grow without bound.
        for &h in board.cards() {
            pool.release(h);
        }
    }

    let expected = trials as f64 / 3.0;
    let chi_square: f64 = counts
        .iter()
        .flat_map(|row| row.iter())
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();

    // 12 degrees of freedom, p = 0.001 critical value is 32.91
    assert!(chi_square < 32.91, "chi-square too large: {}", chi_square);
    assert!(pool.allocated() <= 6);
}

/// Test that all permutations of a small board appear.
#[test]
fn test_shuffle_reaches_every_arrangement() {
    // 2x2: ids [0,0,1,1] have 6 distinct arrangements.
    let level = Level::new(2, 2);
    let f = faces(2);
    let mut rng = GameRng::new(3);
    let mut seen = std::collections::HashSet::new();

    for _ in 0..500 {
        let mut pool = CardPool::new();
        let board = generate(level, &f, &mut pool, &mut rng).unwrap();
        let ids: Vec<u32> = board.cards().iter().map(|&h| pool.get(h).unwrap().pair.raw()).collect();
        seen.insert(ids);
    }

    assert_eq!(seen.len(), 6);
}

// =============================================================================
// Configured Levels
// =============================================================================

/// Test that every default level generates a valid board.
#[test]
fn test_default_levels_generate() {
    let config = GameConfig::default();
    let mut pool = CardPool::new();
    let mut rng = GameRng::new(8);

    for index in 0..config.levels.len() {
        let board = generate_level(&config, index, &mut pool, &mut rng).unwrap();
        assert_eq!(board.level(), config.levels[index]);
        assert!(board.is_well_paired(&pool));
        for &h in board.cards() {
            pool.release(h);
        }
    }
}
