//! Session adapter: connects the pure engine to the host.
//!
//! The session forwards input to the `MatchEngine` and translates the
//! returned events into:
//! - audio cues (`AudioCues`)
//! - presentation updates (`Presenter`)
//! - score persistence (`ScoreStore`)
//!
//! All collaborators are injected at construction; there is no global state.

use std::time::Duration;

use log::{info, warn};

use crate::board::GridSpec;
use crate::cards::{Card, CardHandle};
use crate::core::{Error, GameConfig};
use crate::engine::{EventBatch, GameEvent, MatchEngine};
use crate::score::ScoreStore;

/// Fire-and-forget sound effects.
pub trait AudioCues {
    fn play_flip(&mut self);
    fn play_match(&mut self);
    fn play_fail(&mut self);
}

/// Audio sink that plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play_flip(&mut self) {}
    fn play_match(&mut self) {}
    fn play_fail(&mut self) {}
}

/// Rendering hooks. Every method defaults to doing nothing.
pub trait Presenter {
    /// A new board was dealt. `cards` are in grid order; the slot named by
    /// `grid.hidden_slot` (if any) has no card and should be hidden.
    fn level_started(&mut self, _level_index: usize, _grid: &GridSpec, _cards: &[Card]) {}

    /// A card's face or interactability changed.
    fn card_changed(&mut self, _card: &Card) {}

    /// The displayed score should read `score`.
    fn score_changed(&mut self, _score: u32) {}

    /// Every pair is matched; the next level follows shortly.
    fn level_complete(&mut self, _level_index: usize) {}
}

/// Presenter that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// A running game wired to its host collaborators.
pub struct GameSession<A, S, P> {
    engine: MatchEngine,
    audio: A,
    store: S,
    presenter: P,
}

impl<A: AudioCues, S: ScoreStore, P: Presenter> GameSession<A, S, P> {
    /// Load the saved score, deal the starting level and present it.
    ///
    /// Configuration errors abort. A missing saved score starts at zero; an
    /// unreadable one is logged and also starts at zero.
    pub fn new(
        config: GameConfig,
        audio: A,
        mut store: S,
        mut presenter: P,
        seed: u64,
    ) -> Result<Self, Error> {
        let score = match store.load_or_default() {
            Ok(score) => score,
            Err(e) => {
                warn!("could not read saved score, starting from 0: {}", e);
                0
            }
        };

        let engine = MatchEngine::with_score(config, score, seed)?;
        info!(
            "session started: level {} ({}), score {}, seed {}",
            engine.level_index(),
            engine.level(),
            score,
            seed
        );

        presenter.score_changed(score);
        let mut session = Self {
            engine,
            audio,
            store,
            presenter,
        };
        session.present_level();
        Ok(session)
    }

    /// Input entry point: the player clicked a card.
    pub fn card_selected(&mut self, handle: CardHandle) -> EventBatch {
        let events = self.engine.select_card(handle);
        self.dispatch(&events);
        events
    }

    /// Frame tick: advance virtual time by `elapsed`.
    pub fn update(&mut self, elapsed: Duration) -> EventBatch {
        let events = self.engine.advance(elapsed);
        self.dispatch(&events);
        events
    }

    /// Re-deal the current level, keeping the score.
    pub fn restart(&mut self) -> Result<EventBatch, Error> {
        let events = self.engine.restart()?;
        self.dispatch(&events);
        Ok(events)
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        // Cards touched before a re-deal in the same batch now belong to the
        // new board; `level_started` redraws them instead.
        let redealt_at = events
            .iter()
            .rposition(|e| matches!(e, GameEvent::LevelStarted { .. }));

        for (index, event) in events.iter().enumerate() {
            match event {
                GameEvent::CardFlipped { .. } => self.audio.play_flip(),
                GameEvent::Matched { .. } => self.audio.play_match(),
                GameEvent::Failed { .. } => self.audio.play_fail(),
                GameEvent::ScoreChanged { score, .. } => {
                    if let Err(e) = self.store.save(*score) {
                        warn!("failed to save score {}: {}", score, e);
                    }
                    self.presenter.score_changed(*score);
                }
                GameEvent::LevelComplete { level_index } => {
                    self.presenter.level_complete(*level_index);
                }
                GameEvent::LevelStarted { .. } => self.present_level(),
            }

            if redealt_at.is_some_and(|at| index < at) {
                continue;
            }
            for handle in event.touched_cards() {
                if let Some(card) = self.engine.card(handle) {
                    self.presenter.card_changed(card);
                }
            }
        }
    }

    fn present_level(&mut self) {
        let grid = self.engine.grid_spec();
        let cards: Vec<Card> = self.engine.cards().cloned().collect();
        self.presenter.level_started(self.engine.level_index(), &grid, &cards);
    }

    // === Queries ===

    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Tear down, handing back the collaborators.
    pub fn into_parts(self) -> (MatchEngine, A, S, P) {
        (self.engine, self.audio, self.store, self.presenter)
    }
}
