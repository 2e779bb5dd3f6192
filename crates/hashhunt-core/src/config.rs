//! Search configuration

use std::time::Duration;

use hashhunt_crypto::{normalize_name, DigestRegistry, Encoding, EncodingError};
use hashhunt_keyspace::{keyspace_size, Alphabet, ByteText, Direction};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default progress reporting period
pub const DEFAULT_REPORT_INTERVAL_MS: u64 = 1000;

/// Parameters of one search run
///
/// Built with the chained setters, validated by [`SearchConfig::verify`] when
/// a search starts, then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Digest algorithm name, normalized
    pub algorithm: String,
    /// Target digest
    #[serde(with = "hex_bytes")]
    pub expected: Vec<u8>,
    /// Shortest generated prefix
    pub min_length: usize,
    /// Longest generated prefix
    pub max_length: usize,
    /// Symbols allowed in the generated prefix
    pub alphabet: Alphabet,
    /// Fixed bytes after the prefix
    #[serde(with = "text_bytes")]
    pub suffix: Vec<u8>,
    /// Enumerate sequential search in descending order
    pub reverse: bool,
    /// Stop after this many attempts (None = unlimited)
    pub max_attempts: Option<u64>,
    /// Stop after this many milliseconds (None = unlimited)
    pub max_time_ms: Option<u64>,
    /// Progress reporting period in milliseconds
    pub report_interval_ms: u64,
    /// Run the progress reporter
    pub progress: bool,
    /// Seed for random search (None = from entropy)
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: String::new(),
            expected: Vec::new(),
            min_length: 0,
            max_length: 0,
            alphabet: Alphabet::default(),
            suffix: Vec::new(),
            reverse: false,
            max_attempts: None,
            max_time_ms: None,
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            progress: true,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the digest algorithm (`sha512_256` and `SHA512-256` are the same)
    pub fn algorithm(mut self, name: &str) -> Self {
        self.algorithm = normalize_name(name);
        self
    }

    /// Set the target digest from raw bytes
    pub fn expected_digest(mut self, digest: impl Into<Vec<u8>>) -> Self {
        self.expected = digest.into();
        self
    }

    /// Set the target digest from hex
    pub fn expected_hex(self, digest: &str) -> Result<Self, EncodingError> {
        self.expected_encoded(digest, Encoding::Hex)
    }

    /// Set the target digest from any supported encoding
    pub fn expected_encoded(mut self, digest: &str, encoding: Encoding) -> Result<Self, EncodingError> {
        self.expected = encoding.decode(digest)?;
        Ok(self)
    }

    /// Fixed prefix length
    pub fn length(mut self, len: usize) -> Self {
        self.min_length = len;
        self.max_length = len;
        self
    }

    /// Shortest prefix; raises the longest to match if it was shorter
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = len;
        self.max_length = self.max_length.max(len);
        self
    }

    /// Longest prefix
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }

    /// Allowed prefix symbols; duplicates dropped, sorted
    pub fn alphabet(mut self, symbols: &str) -> Self {
        self.alphabet = Alphabet::from(symbols);
        self
    }

    /// Allowed prefix symbols as raw bytes
    pub fn alphabet_bytes(mut self, symbols: &[u8]) -> Self {
        self.alphabet = Alphabet::new(symbols);
        self
    }

    pub fn suffix(mut self, suffix: impl Into<Vec<u8>>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Wall-clock limit, kept to the millisecond
    pub fn max_time(mut self, limit: Duration) -> Self {
        self.max_time_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn max_time_duration(&self) -> Option<Duration> {
        self.max_time_ms.map(Duration::from_millis)
    }

    pub fn report_interval(mut self, interval: Duration) -> Self {
        self.report_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Canonical rendering of the alphabet
    pub fn allowed_alphabet(&self) -> String {
        self.alphabet.render()
    }

    pub fn direction(&self) -> Direction {
        if self.reverse {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }

    /// Reporting period; zero falls back to the default
    pub fn report_interval_duration(&self) -> Duration {
        match self.report_interval_ms {
            0 => Duration::from_millis(DEFAULT_REPORT_INTERVAL_MS),
            ms => Duration::from_millis(ms),
        }
    }

    /// Number of prefixes sequential search walks through
    pub fn keyspace_size(&self) -> Option<u128> {
        keyspace_size(self.alphabet.len(), self.min_length, self.max_length)
    }

    /// Check the configuration against `registry`. Does not modify anything.
    pub fn verify(&self, registry: &dyn DigestRegistry) -> Result<(), ConfigError> {
        if self.alphabet.is_empty() {
            return Err(ConfigError::AlphabetEmpty);
        }

        if self.min_length == 0 {
            return Err(ConfigError::LengthUnset);
        }

        if self.algorithm.is_empty() {
            return Err(ConfigError::AlgorithmUnset);
        }

        let required = registry
            .bit_width(&self.algorithm)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(self.algorithm.clone()))?;

        let actual = self.expected.len() * 8;
        if actual != required {
            return Err(ConfigError::DigestSizeMismatch {
                expected: required,
                actual,
            });
        }

        if self.max_length < self.min_length {
            return Err(ConfigError::LengthRangeInverted {
                min: self.min_length,
                max: self.max_length,
            });
        }

        Ok(())
    }
}

mod hex_bytes {
    use hashhunt_crypto::hex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(text.trim()).map_err(serde::de::Error::custom)
    }
}

mod text_bytes {
    use super::ByteText;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        ByteText::from(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        ByteText::deserialize(deserializer)?
            .into_bytes()
            .map_err(serde::de::Error::custom)
    }
}
