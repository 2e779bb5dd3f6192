//! Search errors

use hashhunt_keyspace::KeyspaceError;
use thiserror::Error;

/// A configuration rejected by `SearchConfig::verify`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("alphabet empty")]
    AlphabetEmpty,
    #[error("length unset")]
    LengthUnset,
    #[error("algorithm unset")]
    AlgorithmUnset,
    #[error("unknown algorithm {0}")]
    UnknownAlgorithm(String),
    #[error("digest size mismatch: expected {expected} bits, got {actual}")]
    DigestSizeMismatch { expected: usize, actual: usize },
    #[error("length range inverted: min {min} > max {max}")]
    LengthRangeInverted { min: usize, max: usize },
}

impl From<KeyspaceError> for ConfigError {
    fn from(err: KeyspaceError) -> Self {
        match err {
            KeyspaceError::EmptyAlphabet => ConfigError::AlphabetEmpty,
            KeyspaceError::ZeroLength => ConfigError::LengthUnset,
            KeyspaceError::InvertedRange { min, max } => {
                ConfigError::LengthRangeInverted { min, max }
            }
        }
    }
}

/// Failure to start a search. Once a search is running it cannot fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    UnsupportedCombination(&'static str),
}

impl From<KeyspaceError> for SearchError {
    fn from(err: KeyspaceError) -> Self {
        SearchError::Config(err.into())
    }
}
