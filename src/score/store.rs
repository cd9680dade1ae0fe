//! Score persistence.
//!
//! A store holds one named integer slot (`"HighScore"`). Reads happen once
//! at session start; every score change is written straight through.
//! Last write wins.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::core::StoreError;

/// Key of the persisted score slot.
pub const SCORE_KEY: &str = "HighScore";

/// Single-slot score persistence.
pub trait ScoreStore {
    /// Read the saved score. `Ok(None)` if nothing was ever saved.
    fn load(&mut self) -> Result<Option<u32>, StoreError>;

    /// Overwrite the saved score.
    fn save(&mut self, value: u32) -> Result<(), StoreError>;

    /// Saved score, with absence treated as zero.
    fn load_or_default(&mut self) -> Result<u32, StoreError> {
        Ok(self.load()?.unwrap_or(0))
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&mut self) -> Result<Option<u32>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, value: u32) -> Result<(), StoreError> {
        (**self).save(value)
    }
}

/// In-process store. Survives nothing, useful for tests and headless runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    value: Option<u32>,
    writes: usize,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a saved value.
    #[must_use]
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            writes: 0,
        }
    }

    /// Current slot contents.
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, value: u32) -> Result<(), StoreError> {
        self.value = Some(value);
        self.writes += 1;
        Ok(())
    }
}

/// JSON file store: `{"HighScore": 120}`.
///
/// Other keys in the file are preserved. Writes go to a sibling temp file
/// which is then renamed over the original.
#[derive(Clone, Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Option<BTreeMap<String, serde_json::Value>>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(None),
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load(&mut self) -> Result<Option<u32>, StoreError> {
        let Some(doc) = self.read_document()? else {
            return Ok(None);
        };
        match doc.get(SCORE_KEY) {
            None => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
        }
    }

    fn save(&mut self, value: u32) -> Result<(), StoreError> {
        let mut doc = match self.read_document() {
            Ok(doc) => doc.unwrap_or_default(),
            Err(StoreError::Parse(e)) => {
                warn!("replacing malformed score file {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        doc.insert(SCORE_KEY.to_string(), serde_json::Value::from(value));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_vec_pretty(&doc)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
