//! Headless twins runner.
//!
//! Plays a session with a bot that remembers every face it has seen and
//! logs progress. Useful for smoke-testing configs.
//!
//! ```text
//! twins-autoplay [CONFIG.json] [--seed N] [--levels N] [--score-file PATH]
//! ```
//!
//! Set `RUST_LOG=debug` for per-move output.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use rustc_hash::FxHashMap;

use rust_twins::session::{AudioCues, Presenter};
use rust_twins::{
    Card, CardHandle, GameConfig, GameEvent, GameSession, GridSpec, JsonFileScoreStore, PairId,
};

/// Frame length fed to the session while waiting on timers.
const FRAME: Duration = Duration::from_millis(16);

struct LogAudio;

impl AudioCues for LogAudio {
    fn play_flip(&mut self) {
        debug!("[sfx] flip");
    }
    fn play_match(&mut self) {
        debug!("[sfx] match");
    }
    fn play_fail(&mut self) {
        debug!("[sfx] fail");
    }
}

#[derive(Default)]
struct LogPresenter {
    levels_started: usize,
}

impl Presenter for LogPresenter {
    fn level_started(&mut self, level_index: usize, grid: &GridSpec, cards: &[Card]) {
        self.levels_started += 1;
        info!(
            "level {}: {}x{} grid, {} cards, cell {:.1}x{:.1}{}",
            level_index,
            grid.rows,
            grid.columns,
            cards.len(),
            grid.cell.width,
            grid.cell.height,
            match grid.hidden_slot {
                Some(slot) => format!(", slot {} hidden", slot),
                None => String::new(),
            }
        );
    }

    fn score_changed(&mut self, score: u32) {
        debug!("score: {}", score);
    }

    fn level_complete(&mut self, level_index: usize) {
        info!("level {} cleared", level_index);
    }
}

struct Args {
    config: Option<String>,
    seed: u64,
    levels: usize,
    score_file: String,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        seed: 42,
        levels: 3,
        score_file: "twins-score.json".to_string(),
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                args.seed = it.next().context("--seed needs a value")?.parse()?;
            }
            "--levels" => {
                args.levels = it.next().context("--levels needs a value")?.parse()?;
            }
            "--score-file" => {
                args.score_file = it.next().context("--score-file needs a value")?;
            }
            flag if flag.starts_with("--") => bail!("unknown flag {}", flag),
            path => args.config = Some(path.to_string()),
        }
    }

    Ok(args)
}

/// Remembers which pair each revealed card belongs to.
#[derive(Default)]
struct Memory {
    seen: FxHashMap<CardHandle, PairId>,
}

impl Memory {
    fn forget_all(&mut self) {
        self.seen.clear();
    }

    fn note(&mut self, card: &Card) {
        self.seen.insert(card.handle, card.pair);
    }

    /// Two open cards already seen to share a pair.
    fn known_pair(&self, open: &[&Card]) -> Option<(CardHandle, CardHandle)> {
        let mut by_pair: FxHashMap<PairId, CardHandle> = FxHashMap::default();
        for card in open {
            if let Some(&pair) = self.seen.get(&card.handle) {
                if let Some(&other) = by_pair.get(&pair) {
                    return Some((other, card.handle));
                }
                by_pair.insert(pair, card.handle);
            }
        }
        None
    }

    fn partner_of(&self, card: &Card, open: &[&Card]) -> Option<CardHandle> {
        open.iter()
            .find(|c| c.handle != card.handle && self.seen.get(&c.handle) == Some(&card.pair))
            .map(|c| c.handle)
    }
}

type Session = GameSession<LogAudio, JsonFileScoreStore, LogPresenter>;

/// Let timers fire until the engine accepts input again.
fn settle(session: &mut Session, memory: &mut Memory) {
    while session.engine().pending_tasks() > 0 {
        for event in session.update(FRAME) {
            if let GameEvent::LevelStarted { .. } = event {
                memory.forget_all();
            }
        }
    }
}

fn flip(session: &mut Session, memory: &mut Memory, handle: CardHandle) {
    session.card_selected(handle);
    if let Some(card) = session.engine().card(handle) {
        memory.note(card);
    }
}

fn play_turn(session: &mut Session, memory: &mut Memory) {
    let open: Vec<Card> = session.engine().cards().filter(|c| c.interactable).cloned().collect();
    let refs: Vec<&Card> = open.iter().collect();
    if refs.len() < 2 {
        return;
    }

    if let Some((first, second)) = memory.known_pair(&refs) {
        flip(session, memory, first);
        flip(session, memory, second);
        return;
    }

    let first = refs
        .iter()
        .find(|c| !memory.seen.contains_key(&c.handle))
        .map_or(refs[0].handle, |c| c.handle);
    flip(session, memory, first);

    let Some(first_card) = session.engine().card(first).cloned() else {
        return;
    };
    let second = memory
        .partner_of(&first_card, &refs)
        .or_else(|| {
            refs.iter()
                .find(|c| c.handle != first && !memory.seen.contains_key(&c.handle))
                .map(|c| c.handle)
        })
        .or_else(|| refs.iter().find(|c| c.handle != first).map(|c| c.handle));

    if let Some(second) = second {
        flip(session, memory, second);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path))?,
        None => GameConfig::default(),
    };

    let mut session = GameSession::new(
        config,
        LogAudio,
        JsonFileScoreStore::new(&args.score_file),
        LogPresenter::default(),
        args.seed,
    )?;

    let mut memory = Memory::default();
    let mut turns = 0usize;

    // levels_started counts the initial deal, so stop once `levels` more
    // boards have been dealt after it.
    while session.presenter().levels_started <= args.levels {
        play_turn(&mut session, &mut memory);
        settle(&mut session, &mut memory);
        turns += 1;
    }

    info!(
        "cleared {} level(s) in {} turns, final score {}",
        args.levels,
        turns,
        session.score()
    );
    Ok(())
}
