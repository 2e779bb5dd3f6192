//! hashhunt crypto primitives
//!
//! The digest registry consulted by the search engine, plus the text
//! encodings used to read target digests and render results.

pub mod encoding;
pub mod hash;
pub mod registry;

pub use encoding::{Encoding, EncodingError};
pub use registry::{
    all_algorithms, get_algorithm, normalize_name, BuiltinRegistry, DigestAlgorithm,
    DigestFunction, DigestRegistry,
};

// Re-export dependencies for use by other crates
pub use hex;
