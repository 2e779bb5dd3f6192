//! Digest registry
//!
//! One table maps every algorithm name to its digest function and output
//! width. Validation and the search loop both resolve through it.

use std::fmt;

use blake2::{Blake2b512, Blake2s256};
use gost94::Gost94Test;
use md2::Md2;
use md4::Md4;
use md5::Md5;
use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use skein::digest::consts::{U32, U64};
use skein::Skein512;
use tiger::Tiger;
use whirlpool::Whirlpool;

use crate::hash::{self, digest_with};

/// A digest function with a fixed output width
pub trait DigestFunction: Send + Sync {
    /// Canonical algorithm name
    fn name(&self) -> &str;

    /// Output width in bits
    fn output_bits(&self) -> usize;

    /// Digest `input`
    fn compute(&self, input: &[u8]) -> Vec<u8>;
}

/// Lookup from algorithm name to digest function
pub trait DigestRegistry: Send + Sync {
    /// Resolve a (possibly aliased) algorithm name
    fn lookup(&self, name: &str) -> Option<&dyn DigestFunction>;

    /// Canonical names of every registered algorithm, sorted
    fn names(&self) -> Vec<String>;

    /// Declared output width of `name`
    fn bit_width(&self, name: &str) -> Option<usize> {
        self.lookup(name).map(|d| d.output_bits())
    }

    /// Digest `input` with `name`
    fn digest(&self, name: &str, input: &[u8]) -> Option<Vec<u8>> {
        self.lookup(name).map(|d| d.compute(input))
    }
}

/// A built-in algorithm entry
#[derive(Clone, Copy)]
pub struct DigestAlgorithm {
    /// Canonical name
    pub name: &'static str,
    /// Output width in bits
    pub bits: usize,
    compute: fn(&[u8]) -> Vec<u8>,
}

impl fmt::Debug for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestAlgorithm")
            .field("name", &self.name)
            .field("bits", &self.bits)
            .finish()
    }
}

impl DigestFunction for DigestAlgorithm {
    fn name(&self) -> &str {
        self.name
    }

    fn output_bits(&self) -> usize {
        self.bits
    }

    fn compute(&self, input: &[u8]) -> Vec<u8> {
        (self.compute)(input)
    }
}

const fn algo(name: &'static str, bits: usize, compute: fn(&[u8]) -> Vec<u8>) -> DigestAlgorithm {
    DigestAlgorithm { name, bits, compute }
}

// Sorted by name
static ALGORITHMS: [DigestAlgorithm; 33] = [
    algo("adler32", 32, hash::adler32),
    algo("blake2b-512", 512, digest_with::<Blake2b512>),
    algo("blake2s-256", 256, digest_with::<Blake2s256>),
    algo("crc32", 32, hash::crc32),
    algo("crc32c", 32, hash::crc32c),
    algo("crc32k", 32, hash::crc32k),
    algo("fnv1-32", 32, hash::fnv1_32),
    algo("fnv1-64", 64, hash::fnv1_64),
    algo("fnv1a-32", 32, hash::fnv1a_32),
    algo("fnv1a-64", 64, hash::fnv1a_64),
    algo("gost", 256, digest_with::<Gost94Test>),
    algo("md2", 128, digest_with::<Md2>),
    algo("md4", 128, digest_with::<Md4>),
    algo("md5", 128, digest_with::<Md5>),
    algo("ripemd160", 160, digest_with::<Ripemd160>),
    algo("sha1", 160, digest_with::<Sha1>),
    algo("sha224", 224, digest_with::<Sha224>),
    algo("sha256", 256, digest_with::<Sha256>),
    algo("sha3-224", 224, digest_with::<Sha3_224>),
    algo("sha3-256", 256, digest_with::<Sha3_256>),
    algo("sha3-384", 384, digest_with::<Sha3_384>),
    algo("sha3-512", 512, digest_with::<Sha3_512>),
    algo("sha384", 384, digest_with::<Sha384>),
    algo("sha512", 512, digest_with::<Sha512>),
    algo("sha512-224", 224, digest_with::<Sha512_224>),
    algo("sha512-256", 256, digest_with::<Sha512_256>),
    algo("shake128-256", 256, hash::shake128_256),
    algo("shake256-512", 512, hash::shake256_512),
    algo("siphash-2-4", 64, hash::siphash24),
    algo("skein512-256", 256, digest_with::<Skein512<U32>>),
    algo("skein512-512", 512, digest_with::<Skein512<U64>>),
    algo("tiger192", 192, digest_with::<Tiger>),
    algo("whirlpool", 512, digest_with::<Whirlpool>),
];

/// Normalize a user-supplied algorithm name: trimmed, lowercase, `_` as `-`
pub fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('_', "-")
}

// Names used by rhash and sphsum
fn resolve_alias(name: &str) -> &str {
    match name {
        "tiger" => "tiger192",
        "skein256" => "skein512-256",
        "skein512" => "skein512-512",
        other => other,
    }
}

/// Every built-in algorithm, sorted by name
pub fn all_algorithms() -> &'static [DigestAlgorithm] {
    &ALGORITHMS
}

/// Find a built-in algorithm by name or alias
pub fn get_algorithm(name: &str) -> Option<&'static DigestAlgorithm> {
    let name = normalize_name(name);
    let name = resolve_alias(&name);
    ALGORITHMS.iter().find(|a| a.name == name)
}

/// Registry over the built-in algorithm table
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRegistry;

impl DigestRegistry for BuiltinRegistry {
    fn lookup(&self, name: &str) -> Option<&dyn DigestFunction> {
        get_algorithm(name).map(|a| a as &dyn DigestFunction)
    }

    fn names(&self) -> Vec<String> {
        ALGORITHMS.iter().map(|a| a.name.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_width_matches_declaration() {
        for algorithm in all_algorithms() {
            let out = algorithm.compute(b"width check");
            assert_eq!(
                out.len() * 8,
                algorithm.bits,
                "{} produced {} bytes",
                algorithm.name,
                out.len()
            );
        }
    }

    #[test]
    fn test_table_sorted_and_unique() {
        let names: Vec<&str> = all_algorithms().iter().map(|a| a.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_known_vectors() {
        let registry = BuiltinRegistry;
        let vectors = [
            ("md5", "", "d41d8cd98f00b204e9800998ecf8427e"),
            ("md5", "abc", "900150983cd24fb0d6963f7d28e17f72"),
            ("sha1", "abc", "a9993e364706816aba3e25717850c26c9cd0d89d"),
            (
                "sha3-256",
                "",
                "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a",
            ),
            ("crc32", "123456789", "cbf43926"),
        ];
        for (name, input, expected) in vectors {
            let out = registry.digest(name, input.as_bytes()).unwrap();
            assert_eq!(hex::encode(out), expected, "{name}");
        }
    }

    #[test]
    fn test_aliases_and_normalization() {
        assert_eq!(get_algorithm("SHA512_256").unwrap().name, "sha512-256");
        assert_eq!(get_algorithm("tiger").unwrap().name, "tiger192");
        assert_eq!(get_algorithm("skein256").unwrap().name, "skein512-256");
        assert_eq!(get_algorithm(" sha1 ").unwrap().name, "sha1");
        assert!(get_algorithm("sha0").is_none());
    }

    #[test]
    fn test_registry_bit_width() {
        let registry = BuiltinRegistry;
        assert_eq!(registry.bit_width("sha256"), Some(256));
        assert_eq!(registry.bit_width("siphash-2-4"), Some(64));
        assert_eq!(registry.bit_width("nope"), None);
        assert_eq!(registry.names().len(), all_algorithms().len());
    }
}
