//! Match engine integration tests.
//!
//! These tests drive full games through the engine: selection guards,
//! resolution and scoring, level completion and wrap-around, and timer
//! cancellation on level reset.

use std::time::Duration;

use rust_twins::cards::{CardHandle, FaceId, PairId};
use rust_twins::core::{ConfigError, GameConfig, Level, Scoring, Timings};
use rust_twins::engine::{GameEvent, MatchEngine, Phase, Task};

const RESOLVE: Duration = Duration::from_millis(500);
const ADVANCE: Duration = Duration::from_millis(1000);

fn partners(engine: &MatchEngine, pair: u32) -> (CardHandle, CardHandle) {
    let handles: Vec<_> = engine
        .cards()
        .filter(|c| c.pair == PairId::new(pair))
        .map(|c| c.handle)
        .collect();
    assert_eq!(handles.len(), 2, "pair {} should have two cards", pair);
    (handles[0], handles[1])
}

fn match_pair(engine: &mut MatchEngine, pair: u32) -> Vec<GameEvent> {
    let (a, b) = partners(engine, pair);
    engine.select_card(a);
    engine.select_card(b);
    engine.advance(RESOLVE).into_vec()
}

fn clear_board(engine: &mut MatchEngine) {
    for pair in 0..engine.total_pairs() as u32 {
        match_pair(engine, pair);
    }
}

// =============================================================================
// End-to-End
// =============================================================================

/// 2x2 level with two faces: two pairs, faces assigned in order, and
/// matching both pairs advances the level.
#[test]
fn test_two_by_two_scenario() {
    let config = GameConfig::new().with_level(2, 2).with_level(3, 4).with_face("sun").with_face("moon");
    let mut engine = MatchEngine::new(config, 2024).unwrap();

    assert_eq!(engine.total_pairs(), 2);
    assert_eq!(engine.board().face_of(PairId::new(0)), Some(FaceId::new(0)));
    assert_eq!(engine.board().face_of(PairId::new(1)), Some(FaceId::new(1)));

    let events = match_pair(&mut engine, 0);
    assert_eq!(engine.matched_pairs(), 1);
    assert!(!engine.is_level_complete());
    assert!(!events.iter().any(|e| matches!(e, GameEvent::LevelComplete { .. })));

    let events = match_pair(&mut engine, 1);
    assert_eq!(engine.matched_pairs(), engine.total_pairs());
    assert!(events.contains(&GameEvent::LevelComplete { level_index: 0 }));
    assert!(engine.is_scheduled(Task::AdvanceLevel));

    // Board stays up until the completion delay passes.
    assert!(engine.advance(ADVANCE - Duration::from_millis(1)).is_empty());
    assert_eq!(engine.level_index(), 0);

    let events = engine.advance(Duration::from_millis(1));
    assert_eq!(
        events.as_slice(),
        &[GameEvent::LevelStarted { level_index: 1, level: Level::new(3, 4) }]
    );
    assert_eq!(engine.total_pairs(), 6);
    assert_eq!(engine.score(), 20);
}

/// The level list cycles forever; there is no terminal state.
#[test]
fn test_levels_cycle_forever() {
    let config = GameConfig::new().with_level(2, 2).with_level(2, 3).with_generated_faces(4);
    let mut engine = MatchEngine::new(config, 9).unwrap();

    let mut visited = Vec::new();
    for _ in 0..5 {
        visited.push(engine.level_index());
        clear_board(&mut engine);
        engine.advance(ADVANCE);
    }

    assert_eq!(visited, vec![0, 1, 0, 1, 0]);
    // 2 + 3 + 2 + 3 + 2 pairs matched, 10 points each
    assert_eq!(engine.score(), 120);
}

/// Matches and mismatches across a level accumulate into the running score.
#[test]
fn test_score_carries_across_levels() {
    let config = GameConfig::new().with_level(2, 2).with_generated_faces(2);
    let mut engine = MatchEngine::with_score(config, 50, 1).unwrap();

    clear_board(&mut engine);
    engine.advance(ADVANCE);
    assert_eq!(engine.score(), 70);
    assert_eq!(engine.level_index(), 0);
}

// =============================================================================
// Guards
// =============================================================================

/// Test that clicking during the resolve delay neither flips nor queues.
#[test]
fn test_third_click_rejected_until_resolved() {
    let config = GameConfig::new().with_level(2, 3).with_generated_faces(3);
    let mut engine = MatchEngine::new(config, 4).unwrap();
    let (a, _) = partners(&engine, 0);
    let (b, _) = partners(&engine, 1);
    let (c, _) = partners(&engine, 2);

    engine.select_card(a);
    engine.select_card(b);
    assert_eq!(engine.phase(), Phase::Resolving);

    assert!(engine.select_card(c).is_empty());
    assert!(engine.select_card(a).is_empty());
    assert_eq!(engine.pending_tasks(), 1);

    engine.advance(RESOLVE);
    assert_eq!(engine.phase(), Phase::Idle);

    // Input is accepted again, including the previously rejected card.
    let events = engine.select_card(c);
    assert_eq!(events.as_slice(), &[GameEvent::CardFlipped { card: c }]);
}

/// Test that the second card can be the partner of an already matched card
/// only if it is still interactable.
#[test]
fn test_matched_cards_stay_retired() {
    let config = GameConfig::new().with_level(2, 3).with_generated_faces(3);
    let mut engine = MatchEngine::new(config, 4).unwrap();
    let (a, b) = partners(&engine, 0);
    match_pair(&mut engine, 0);

    assert!(engine.select_card(a).is_empty());
    assert!(engine.select_card(b).is_empty());
    assert_eq!(engine.phase(), Phase::Idle);
    assert!(engine.card(a).unwrap().face_up);
}

/// Test that clicks during the level-complete pause are ignored.
#[test]
fn test_clicks_ignored_while_level_completes() {
    let config = GameConfig::new().with_level(2, 2).with_generated_faces(2);
    let mut engine = MatchEngine::new(config, 4).unwrap();
    clear_board(&mut engine);

    let handles: Vec<_> = engine.board().cards().to_vec();
    for h in handles {
        assert!(engine.select_card(h).is_empty());
    }
}

// =============================================================================
// Scoring
// =============================================================================

/// Test mismatch penalty with a floor at zero, then recovery.
#[test]
fn test_mismatch_penalty_floor() {
    let config = GameConfig::new().with_level(2, 2).with_generated_faces(2);
    let mut engine = MatchEngine::with_score(config, 3, 6).unwrap();
    let (a, _) = partners(&engine, 0);
    let (b, _) = partners(&engine, 1);

    engine.select_card(a);
    engine.select_card(b);
    let events = engine.advance(RESOLVE);

    assert_eq!(
        events.as_slice(),
        &[
            GameEvent::Failed { first: a, second: b },
            GameEvent::ScoreChanged { score: 0, delta: -5 },
        ]
    );
    assert_eq!(engine.score(), 0);

    match_pair(&mut engine, 0);
    assert_eq!(engine.score(), 10);
}

/// Test custom score deltas.
#[test]
fn test_custom_scoring() {
    let config = GameConfig::new()
        .with_level(2, 2)
        .with_generated_faces(2)
        .with_scoring(Scoring { match_reward: 25, mismatch_penalty: 1 });
    let mut engine = MatchEngine::new(config, 6).unwrap();

    match_pair(&mut engine, 1);
    assert_eq!(engine.score(), 25);
}

// =============================================================================
// Timers
// =============================================================================

/// Test custom delays are respected.
#[test]
fn test_custom_timings() {
    let config = GameConfig::new()
        .with_level(2, 2)
        .with_generated_faces(2)
        .with_timings(Timings { resolve_delay_ms: 100, advance_delay_ms: 200 });
    let mut engine = MatchEngine::new(config, 6).unwrap();
    let (a, b) = partners(&engine, 0);

    engine.select_card(a);
    engine.select_card(b);
    assert!(engine.advance(Duration::from_millis(99)).is_empty());
    assert!(!engine.advance(Duration::from_millis(1)).is_empty());
}

/// Test that one long advance fires resolve and the level advance in order.
#[test]
fn test_single_long_advance_fires_chained_tasks() {
    let config = GameConfig::new().with_level(2, 2).with_level(2, 3).with_generated_faces(3);
    let mut engine = MatchEngine::new(config, 12).unwrap();
    match_pair(&mut engine, 0);

    let (a, b) = partners(&engine, 1);
    engine.select_card(a);
    engine.select_card(b);
    let events = engine.advance(Duration::from_secs(10));

    let kinds: Vec<_> = events
        .iter()
        .map(|e| match e {
            GameEvent::Matched { .. } => "matched",
            GameEvent::ScoreChanged { .. } => "score",
            GameEvent::LevelComplete { .. } => "complete",
            GameEvent::LevelStarted { .. } => "started",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["matched", "score", "complete", "started"]);
    assert_eq!(engine.level_index(), 1);
}

/// Test that skipping a level while a completion is pending does not
/// advance twice.
#[test]
fn test_stale_advance_cancelled_by_manual_advance() {
    let config = GameConfig::new()
        .with_level(2, 2)
        .with_level(2, 3)
        .with_level(3, 4)
        .with_generated_faces(6);
    let mut engine = MatchEngine::new(config, 12).unwrap();
    clear_board(&mut engine);
    assert!(engine.is_scheduled(Task::AdvanceLevel));

    engine.advance_level().unwrap();
    assert_eq!(engine.level_index(), 1);
    assert_eq!(engine.pending_tasks(), 0);

    assert!(engine.advance(Duration::from_secs(5)).is_empty());
    assert_eq!(engine.level_index(), 1);
}

/// Test that a restart mid-resolve leaves no stale resolve behind.
#[test]
fn test_restart_mid_resolve() {
    let config = GameConfig::new().with_level(2, 3).with_generated_faces(3);
    let mut engine = MatchEngine::new(config, 3).unwrap();
    let (a, b) = partners(&engine, 0);
    engine.select_card(a);
    engine.select_card(b);

    let events = engine.restart().unwrap();
    assert_eq!(
        events.as_slice(),
        &[GameEvent::LevelStarted { level_index: 0, level: Level::new(2, 3) }]
    );

    // Flip one card on the new board, then let the old delay elapse.
    let (c, _) = partners(&engine, 1);
    engine.select_card(c);
    assert!(engine.advance(RESOLVE * 4).is_empty());
    assert_eq!(engine.phase(), Phase::OneSelected);
    assert_eq!(engine.score(), 0);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_engine_rejects_invalid_configs() {
    assert_eq!(
        MatchEngine::new(GameConfig::new().with_face("a"), 1).unwrap_err(),
        ConfigError::NoLevels
    );
    assert_eq!(
        MatchEngine::new(GameConfig::new().with_level(2, 2), 1).unwrap_err(),
        ConfigError::NoFaces
    );
    assert_eq!(
        MatchEngine::new(GameConfig::new().with_level(2, 2).with_face("a").with_starting_level(1), 1)
            .unwrap_err(),
        ConfigError::LevelOutOfRange { index: 1, len: 1 }
    );
}

/// Same seed, same boards.
#[test]
fn test_engine_deterministic() {
    let config = GameConfig::default();
    let mut e1 = MatchEngine::new(config.clone(), 77).unwrap();
    let mut e2 = MatchEngine::new(config, 77).unwrap();

    for _ in 0..3 {
        let p1: Vec<_> = e1.cards().map(|c| c.pair).collect();
        let p2: Vec<_> = e2.cards().map(|c| c.pair).collect();
        assert_eq!(p1, p2);
        e1.advance_level().unwrap();
        e2.advance_level().unwrap();
    }
}
