//! hashhunt keyspace
//!
//! Alphabets and the two ways of walking a keyspace: the sequential
//! odometer and the random sampler.

mod alphabet;
mod difficulty;
mod odometer;
mod sampler;
mod text;

use thiserror::Error;

pub use alphabet::{Alphabet, Step};
pub use difficulty::{format_count, keyspace_size, keyspace_size_f64};
pub use odometer::{Direction, Odometer};
pub use sampler::RandomSampler;
pub use text::ByteText;

/// Printable symbols usable in an onion-service name
pub const ONION_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz234567";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyspaceError {
    #[error("Alphabet is empty")]
    EmptyAlphabet,
    #[error("Prefix length must be at least 1")]
    ZeroLength,
    #[error("Length range inverted: min {min} > max {max}")]
    InvertedRange { min: usize, max: usize },
}

/// A stream of candidates held in a reusable buffer
pub trait CandidateSource {
    /// The candidate under test: generated prefix followed by the suffix
    fn current(&self) -> &[u8];

    /// Length of the generated prefix of the current candidate
    fn prefix_len(&self) -> usize;

    /// Move to the next candidate. `false` means the keyspace is used up.
    fn advance(&mut self) -> bool;
}

fn check_bounds(alphabet: &Alphabet, min_length: usize, max_length: usize) -> Result<(), KeyspaceError> {
    if alphabet.is_empty() {
        return Err(KeyspaceError::EmptyAlphabet);
    }
    if min_length == 0 {
        return Err(KeyspaceError::ZeroLength);
    }
    if max_length < min_length {
        return Err(KeyspaceError::InvertedRange { min: min_length, max: max_length });
    }
    Ok(())
}
