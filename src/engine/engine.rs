//! The match engine: selection, resolution, scoring and level flow.
//!
//! ## Transitions
//!
//! - `select_card`: Idle -> OneSelected -> Resolving (schedules `Resolve`)
//! - `Resolve` task: Resolving -> Idle, scores the pair, and schedules
//!   `AdvanceLevel` once every pair is matched
//! - `AdvanceLevel` task: next level (wrapping), fresh board
//!
//! The engine is deterministic for a given seed and sequence of calls.

use std::time::Duration;

use log::{debug, error, trace};

use super::events::{EventBatch, GameEvent};
use super::scheduler::{CancelToken, Scheduler, Task};
use super::state::{Phase, Selection};
use crate::board::{generate_level, Board, GridSpec};
use crate::cards::{Card, CardHandle, CardPool};
use crate::core::{ConfigError, GameConfig, GameRng, Level};
use crate::score::Score;

/// Memory pairs state machine.
///
/// ```
/// use std::time::Duration;
/// use rust_twins::core::GameConfig;
/// use rust_twins::engine::{GameEvent, MatchEngine};
///
/// let config = GameConfig::new().with_level(2, 2).with_face("a").with_face("b");
/// let mut engine = MatchEngine::new(config, 42).unwrap();
///
/// let first = engine.board().cards()[0];
/// let events = engine.select_card(first);
/// assert_eq!(events.as_slice(), &[GameEvent::CardFlipped { card: first }]);
///
/// // Nothing pending until a second card is flipped.
/// assert!(engine.advance(Duration::from_secs(5)).is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: GameConfig,
    pool: CardPool,
    board: Board,
    rng: GameRng,
    level_index: usize,
    selection: Selection,
    matched_pairs: usize,
    score: Score,
    scheduler: Scheduler,
    /// Board generation counter; tags scheduled tasks.
    epoch: u64,
}

impl MatchEngine {
    /// Create an engine starting from a zero score.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_score(config, 0, seed)
    }

    /// Create an engine resuming from a previously saved score.
    ///
    /// Validates the configuration and deals the starting level.
    pub fn with_score(config: GameConfig, score: u32, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let level_index = config.starting_level;
        let mut pool = CardPool::new();
        let mut rng = GameRng::new(seed);
        let board = generate_level(&config, level_index, &mut pool, &mut rng)?;

        debug!(
            "engine started at level {} ({}), score {}",
            level_index,
            board.level(),
            score
        );

        Ok(Self {
            config,
            pool,
            board,
            rng,
            level_index,
            selection: Selection::default(),
            matched_pairs: 0,
            score: Score::new(score),
            scheduler: Scheduler::new(),
            epoch: 0,
        })
    }

    // === Input ===

    /// Handle a click on a card.
    ///
    /// Ignored (empty batch) while a pair is being resolved, when the card
    /// is the already-flipped first card, when it is no longer interactable,
    /// or when it is not on the current board.
    pub fn select_card(&mut self, handle: CardHandle) -> EventBatch {
        let mut events = EventBatch::new();

        if self.selection.processing {
            trace!("ignored {}: resolving", handle);
            return events;
        }
        if self.selection.first == Some(handle) {
            trace!("ignored {}: already selected", handle);
            return events;
        }
        if !self.board.contains(handle) {
            trace!("ignored {}: not on board", handle);
            return events;
        }
        let Some(card) = self.pool.get_mut(handle) else {
            return events;
        };
        if !card.is_selectable() {
            trace!("ignored {}: not interactable", handle);
            return events;
        }

        card.flip_up();
        events.push(GameEvent::CardFlipped { card: handle });

        if self.selection.select(handle) == Phase::Resolving {
            let delay = self.config.timings.resolve_delay();
            let token = self.token();
            self.scheduler.schedule(delay, Task::Resolve, token);
        }

        events
    }

    // === Time ===

    /// Advance virtual time, firing every task that comes due.
    ///
    /// The clock saturates at `Duration::MAX`.
    pub fn advance(&mut self, elapsed: Duration) -> EventBatch {
        let deadline = self.scheduler.now().saturating_add(elapsed);
        let mut events = EventBatch::new();

        while let Some((task, token)) = self.scheduler.pop_due(deadline) {
            if token != self.token() {
                trace!("dropped stale {:?} from {:?}", task, token);
                continue;
            }
            match task {
                Task::Resolve => self.resolve(&mut events),
                Task::AdvanceLevel => match self.advance_level() {
                    Ok(started) => events.extend(started),
                    Err(e) => error!("failed to advance level: {}", e),
                },
            }
        }

        self.scheduler.advance_to(deadline);
        events
    }

    fn resolve(&mut self, events: &mut EventBatch) {
        let (Some(first), Some(second)) = (self.selection.first, self.selection.second) else {
            self.selection.clear();
            return;
        };

        let pair = match (self.pool.get(first), self.pool.get(second)) {
            (Some(a), Some(b)) if a.matches(b) => Some(a.pair),
            _ => None,
        };

        if let Some(pair) = pair {
            for handle in [first, second] {
                if let Some(card) = self.pool.get_mut(handle) {
                    card.disable();
                }
            }
            self.matched_pairs += 1;
            debug!("matched {} ({}/{})", pair, self.matched_pairs, self.board.total_pairs());
            events.push(GameEvent::Matched { first, second, pair });
            self.apply_score(i64::from(self.config.scoring.match_reward), events);
        } else {
            for handle in [first, second] {
                if let Some(card) = self.pool.get_mut(handle) {
                    card.flip_down();
                }
            }
            debug!("mismatch {} / {}", first, second);
            events.push(GameEvent::Failed { first, second });
            self.apply_score(-i64::from(self.config.scoring.mismatch_penalty), events);
        }

        self.selection.clear();

        if pair.is_some() && self.is_level_complete() {
            debug!("level {} complete", self.level_index);
            events.push(GameEvent::LevelComplete {
                level_index: self.level_index,
            });
            let delay = self.config.timings.advance_delay();
            let token = self.token();
            self.scheduler.schedule(delay, Task::AdvanceLevel, token);
        }
    }

    fn apply_score(&mut self, delta: i64, events: &mut EventBatch) {
        let score = self.score.apply(delta);
        events.push(GameEvent::ScoreChanged { score, delta });
    }

    // === Level flow ===

    /// Move to the next level, wrapping to the first after the last.
    ///
    /// Normally fired by the scheduler after the final match; callable
    /// directly to skip a level.
    pub fn advance_level(&mut self) -> Result<EventBatch, ConfigError> {
        let next = self.config.next_level_index(self.level_index);
        debug!("advancing level {} -> {}", self.level_index, next);
        self.deal(next)
    }

    /// Re-deal the current level. Score is kept.
    pub fn restart(&mut self) -> Result<EventBatch, ConfigError> {
        debug!("restarting level {}", self.level_index);
        self.deal(self.level_index)
    }

    fn deal(&mut self, level_index: usize) -> Result<EventBatch, ConfigError> {
        // Validate before tearing down the current board.
        self.config.level(level_index)?;

        let cancelled = self.scheduler.cancel(self.token());
        if cancelled > 0 {
            trace!("cancelled {} pending task(s)", cancelled);
        }
        self.epoch += 1;

        self.board.recycle_into(&mut self.pool);
        self.selection.clear();
        self.matched_pairs = 0;

        self.board = generate_level(&self.config, level_index, &mut self.pool, &mut self.rng)?;
        self.level_index = level_index;

        let mut events = EventBatch::new();
        events.push(GameEvent::LevelStarted {
            level_index,
            level: self.board.level(),
        });
        Ok(events)
    }

    fn token(&self) -> CancelToken {
        CancelToken(self.epoch)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn pool(&self) -> &CardPool {
        &self.pool
    }

    /// Look up a card by handle.
    #[must_use]
    pub fn card(&self, handle: CardHandle) -> Option<&Card> {
        self.pool.get(handle)
    }

    /// Active cards in grid order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.board.cards().iter().filter_map(|&h| self.pool.get(h))
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.selection.phase()
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.selection.processing
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.value()
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.board.total_pairs()
    }

    #[must_use]
    pub fn is_level_complete(&self) -> bool {
        self.matched_pairs == self.board.total_pairs()
    }

    #[must_use]
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.board.level()
    }

    /// Layout for the current board.
    #[must_use]
    pub fn grid_spec(&self) -> GridSpec {
        let level = self.board.level();
        GridSpec {
            rows: level.rows,
            columns: level.columns,
            cell: self.config.layout.cell_size(level.rows, level.columns),
            hidden_slot: self.board.hidden_slot(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Scheduled tasks not yet fired.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Is a task of this kind scheduled?
    #[must_use]
    pub fn is_scheduled(&self, task: Task) -> bool {
        self.scheduler.is_pending(task)
    }
}
