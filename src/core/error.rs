//! Error types.
//!
//! Configuration problems are fatal: a session refuses to start rather than
//! play on a half-built board. Store failures are reported but the session
//! decides whether they matter (see `session`).

use std::fmt;
use std::io;

/// Invalid game configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The level list is empty.
    NoLevels,
    /// A level index points past the end of the level list.
    LevelOutOfRange { index: usize, len: usize },
    /// A level has fewer than two cells, so it cannot hold a single pair.
    LevelTooSmall { index: usize, rows: u32, columns: u32 },
    /// No faces configured but the board needs at least one pair.
    NoFaces,
    /// More faces than `FaceId` can address.
    TooManyFaces { count: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoLevels => write!(f, "no levels configured"),
            ConfigError::LevelOutOfRange { index, len } => {
                write!(f, "level index {} out of range ({} levels)", index, len)
            }
            ConfigError::LevelTooSmall { index, rows, columns } => write!(
                f,
                "level {} is {}x{}, which cannot hold a pair",
                index, rows, columns
            ),
            ConfigError::NoFaces => write!(f, "no card faces configured"),
            ConfigError::TooManyFaces { count, max } => {
                write!(f, "{} faces configured, at most {} supported", count, max)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Score persistence failure.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    Io(io::Error),
    /// The backing file exists but is not a valid score document.
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "score store I/O error: {}", e),
            StoreError::Parse(e) => write!(f, "score store parse error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e)
    }
}

/// Crate-level error.
#[derive(Debug)]
pub enum Error {
    /// Invalid configuration.
    Config(ConfigError),
    /// Score persistence failure.
    Store(StoreError),
    /// A configuration file could not be read.
    Io(io::Error),
    /// A configuration document is malformed.
    Parse(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
            Error::Store(e) => write!(f, "{}", e),
            Error::Io(e) => write!(f, "failed to read configuration: {}", e),
            Error::Parse(e) => write!(f, "malformed configuration: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::Store(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e)
    }
}
