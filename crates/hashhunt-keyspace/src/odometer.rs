//! Sequential candidate enumeration
//!
//! The prefix is a mixed-radix counter whose digits are the alphabet's
//! symbols in sorted order. Each step increments (or decrements) the
//! rightmost position and carries left on wrap.

use serde::{Deserialize, Serialize};

use crate::alphabet::{Alphabet, Step};
use crate::{CandidateSource, KeyspaceError};

/// Enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Mixed-radix counter over an alphabet, lengths visited shortest first
#[derive(Debug, Clone)]
pub struct Odometer {
    alphabet: Alphabet,
    min_length: usize,
    max_length: usize,
    prefix_len: usize,
    suffix: Vec<u8>,
    direction: Direction,
    buffer: Vec<u8>,
}

impl Odometer {
    /// Start at the initial state of the shortest length
    pub fn new(
        alphabet: Alphabet,
        min_length: usize,
        max_length: usize,
        suffix: &[u8],
        direction: Direction,
    ) -> Result<Self, KeyspaceError> {
        crate::check_bounds(&alphabet, min_length, max_length)?;

        let mut odometer = Self {
            alphabet,
            min_length,
            max_length,
            prefix_len: min_length,
            suffix: suffix.to_vec(),
            direction,
            buffer: Vec::new(),
        };
        odometer.reset(min_length);
        Ok(odometer)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    // Every position at the start symbol for the direction, suffix after
    fn reset(&mut self, prefix_len: usize) {
        let start = match self.direction {
            Direction::Ascending => self.alphabet.first(),
            Direction::Descending => self.alphabet.last(),
        };
        // check_bounds rejected empty alphabets
        let start = start.unwrap_or_default();

        self.prefix_len = prefix_len;
        self.buffer.clear();
        self.buffer.resize(prefix_len, start);
        self.buffer.extend_from_slice(&self.suffix);
    }

    /// Move the prefix to the next combination of the current length.
    ///
    /// Returns `false` when the carry ran past the leftmost position; the
    /// prefix is then back at its initial state.
    pub fn step(&mut self) -> bool {
        for pos in (0..self.prefix_len).rev() {
            let symbol = self.buffer[pos];
            let step = match self.direction {
                Direction::Ascending => self.alphabet.successor(symbol),
                Direction::Descending => self.alphabet.predecessor(symbol),
            };
            match step {
                Some(Step::Next(next)) => {
                    self.buffer[pos] = next;
                    return true;
                }
                Some(Step::Wrap(wrapped)) => self.buffer[pos] = wrapped,
                // Not reachable while the buffer only holds alphabet symbols
                None => return false,
            }
        }
        false
    }
}

impl CandidateSource for Odometer {
    fn current(&self) -> &[u8] {
        &self.buffer
    }

    fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Step the counter; when a length is used up move on to the next one.
    /// Returns `false` once the longest length has wrapped.
    fn advance(&mut self) -> bool {
        if self.step() {
            return true;
        }
        if self.prefix_len < self.max_length {
            self.reset(self.prefix_len + 1);
            return true;
        }
        false
    }
}
