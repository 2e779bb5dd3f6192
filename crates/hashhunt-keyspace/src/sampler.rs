//! Random candidate sampling

use rand::Rng;

use crate::alphabet::Alphabet;
use crate::{CandidateSource, KeyspaceError};

/// Draws every prefix position independently and uniformly from the
/// alphabet. Keeps no memory of earlier draws and never runs out.
#[derive(Debug, Clone)]
pub struct RandomSampler<R> {
    alphabet: Alphabet,
    min_length: usize,
    max_length: usize,
    prefix_len: usize,
    suffix: Vec<u8>,
    buffer: Vec<u8>,
    rng: R,
}

impl<R: Rng> RandomSampler<R> {
    /// Create a sampler holding its first draw
    pub fn new(
        alphabet: Alphabet,
        min_length: usize,
        max_length: usize,
        suffix: &[u8],
        rng: R,
    ) -> Result<Self, KeyspaceError> {
        crate::check_bounds(&alphabet, min_length, max_length)?;

        let mut sampler = Self {
            alphabet,
            min_length,
            max_length,
            prefix_len: min_length,
            suffix: suffix.to_vec(),
            buffer: Vec::with_capacity(max_length + suffix.len()),
            rng,
        };
        sampler.draw();
        Ok(sampler)
    }

    fn draw(&mut self) {
        self.prefix_len = if self.min_length == self.max_length {
            self.min_length
        } else {
            self.rng.gen_range(self.min_length..=self.max_length)
        };

        self.buffer.clear();
        for _ in 0..self.prefix_len {
            let symbol = self.alphabet.sample(&mut self.rng);
            self.buffer.push(symbol);
        }
        self.buffer.extend_from_slice(&self.suffix);
    }
}

impl<R: Rng> CandidateSource for RandomSampler<R> {
    fn current(&self) -> &[u8] {
        &self.buffer
    }

    fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    fn advance(&mut self) -> bool {
        self.draw();
        true
    }
}
