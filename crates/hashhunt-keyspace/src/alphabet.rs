//! Canonical candidate alphabet

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::text::ByteText;

const ABSENT: u16 = u16::MAX;

/// Result of moving one symbol along the sorted alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The neighbouring symbol; no carry
    Next(u8),
    /// Ran off the end; the wrapped-around symbol, carry into the next position
    Wrap(u8),
}

/// A deduplicated, ascending set of byte symbols
///
/// Symbol positions are kept in a 256-entry table so successor and
/// predecessor are index arithmetic instead of scans.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ByteText", into = "ByteText")]
pub struct Alphabet {
    symbols: Vec<u8>,
    positions: [u16; 256],
}

impl Alphabet {
    /// Normalize raw input: drop repeated bytes, sort ascending
    pub fn new(raw: &[u8]) -> Self {
        let mut seen = [false; 256];
        let mut symbols = Vec::with_capacity(raw.len().min(256));
        for &b in raw {
            if !seen[b as usize] {
                seen[b as usize] = true;
                symbols.push(b);
            }
        }
        symbols.sort_unstable();

        let mut positions = [ABSENT; 256];
        for (i, &b) in symbols.iter().enumerate() {
            positions[b as usize] = i as u16;
        }

        Self { symbols, positions }
    }

    /// The sorted symbols
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Smallest symbol
    pub fn first(&self) -> Option<u8> {
        self.symbols.first().copied()
    }

    /// Largest symbol
    pub fn last(&self) -> Option<u8> {
        self.symbols.last().copied()
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.positions[symbol as usize] != ABSENT
    }

    /// Index of `symbol` in sorted order
    pub fn position(&self, symbol: u8) -> Option<usize> {
        match self.positions[symbol as usize] {
            ABSENT => None,
            i => Some(i as usize),
        }
    }

    /// Next symbol in sorted order, wrapping to the first after the last.
    /// `None` if `symbol` is not in the alphabet.
    pub fn successor(&self, symbol: u8) -> Option<Step> {
        let i = self.position(symbol)?;
        Some(match self.symbols.get(i + 1) {
            Some(&next) => Step::Next(next),
            None => Step::Wrap(self.symbols[0]),
        })
    }

    /// Previous symbol in sorted order, wrapping to the last before the first.
    /// `None` if `symbol` is not in the alphabet.
    pub fn predecessor(&self, symbol: u8) -> Option<Step> {
        let i = self.position(symbol)?;
        Some(match i.checked_sub(1) {
            Some(prev) => Step::Next(self.symbols[prev]),
            None => Step::Wrap(self.symbols[self.symbols.len() - 1]),
        })
    }

    /// Uniformly drawn symbol. Panics on an empty alphabet.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        self.symbols[rng.gen_range(0..self.symbols.len())]
    }

    /// Lossy text rendering of the canonical alphabet
    pub fn render(&self) -> String {
        String::from_utf8_lossy(&self.symbols).into_owned()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl From<&str> for Alphabet {
    fn from(raw: &str) -> Self {
        Self::new(raw.as_bytes())
    }
}

impl From<String> for Alphabet {
    fn from(raw: String) -> Self {
        Self::new(raw.as_bytes())
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.render()
    }
}

impl TryFrom<ByteText> for Alphabet {
    type Error = hex::FromHexError;

    fn try_from(text: ByteText) -> Result<Self, Self::Error> {
        Ok(Self::new(&text.into_bytes()?))
    }
}

impl From<Alphabet> for ByteText {
    fn from(alphabet: Alphabet) -> Self {
        ByteText::from(alphabet.symbols())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.render()).finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
