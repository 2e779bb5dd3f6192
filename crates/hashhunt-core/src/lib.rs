//! hashhunt core engine
//!
//! Digest preimage search over a constrained keyspace: sequential odometer
//! enumeration or random sampling, with a scoped progress reporter.

mod config;
mod error;
mod reporter;
mod search;
mod stats;

pub use config::{SearchConfig, DEFAULT_REPORT_INTERVAL_MS};
pub use error::{ConfigError, SearchError};
pub use reporter::{stderr_sink, ProgressLine, ProgressReporter, ProgressSink};
pub use search::{
    digest_matches, Attempt, Attempts, HashSearch, Outcome, SearchResult, SearchSummary,
};
pub use stats::{CancelToken, SearchStats};

// Re-exports for convenience
pub use hashhunt_crypto::{
    all_algorithms, get_algorithm, BuiltinRegistry, DigestFunction, DigestRegistry, Encoding,
};
pub use hashhunt_keyspace::{format_count, keyspace_size_f64, Alphabet, Direction, ONION_ALPHABET};
