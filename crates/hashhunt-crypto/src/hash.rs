//! Digest primitives backing the registry

use std::hash::Hasher;

use sha2::Digest;
use sha3::digest::{ExtendableOutput, Update};
use siphasher::sip::SipHasher24;

/// Any fixed-output digest from the RustCrypto family
pub fn digest_with<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

/// SHAKE128 squeezed to 256 bits
pub fn shake128_256(data: &[u8]) -> Vec<u8> {
    shake::<sha3::Shake128>(data, 32)
}

/// SHAKE256 squeezed to 512 bits
pub fn shake256_512(data: &[u8]) -> Vec<u8> {
    shake::<sha3::Shake256>(data, 64)
}

fn shake<X: Default + Update + ExtendableOutput>(data: &[u8], len: usize) -> Vec<u8> {
    let mut hasher = X::default();
    Update::update(&mut hasher, data);
    let mut out = vec![0u8; len];
    hasher.finalize_xof_into(&mut out);
    out
}

/// SipHash-2-4 with an all-zero key, little-endian output
pub fn siphash24(data: &[u8]) -> Vec<u8> {
    let mut hasher = SipHasher24::new_with_keys(0, 0);
    hasher.write(data);
    hasher.finish().to_le_bytes().to_vec()
}

/// Adler-32, big-endian output
pub fn adler32(data: &[u8]) -> Vec<u8> {
    const MOD_ADLER: u32 = 65521;

    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for byte in data {
        a = (a + *byte as u32) % MOD_ADLER;
        b = (b + a) % MOD_ADLER;
    }
    ((b << 16) | a).to_be_bytes().to_vec()
}

// Reversed polynomials
const CRC32_IEEE: u32 = 0xedb8_8320;
const CRC32_CASTAGNOLI: u32 = 0x82f6_3b78;
const CRC32_KOOPMAN: u32 = 0xeb31_d82e;

// Bitwise reflected CRC-32, init and final xor of 0xFFFFFFFF
fn crc32_reflected(poly: u32, data: &[u8]) -> u32 {
    let mut crc = !0u32;
    for byte in data {
        crc ^= *byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ poly;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}

/// CRC-32 (IEEE), big-endian output
pub fn crc32(data: &[u8]) -> Vec<u8> {
    crc32_reflected(CRC32_IEEE, data).to_be_bytes().to_vec()
}

/// CRC-32C (Castagnoli), big-endian output
pub fn crc32c(data: &[u8]) -> Vec<u8> {
    crc32_reflected(CRC32_CASTAGNOLI, data).to_be_bytes().to_vec()
}

/// CRC-32K (Koopman), big-endian output
pub fn crc32k(data: &[u8]) -> Vec<u8> {
    crc32_reflected(CRC32_KOOPMAN, data).to_be_bytes().to_vec()
}

const FNV32_OFFSET: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;
const FNV64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1 32-bit
pub fn fnv1_32(data: &[u8]) -> Vec<u8> {
    let hash = data.iter().fold(FNV32_OFFSET, |h, b| {
        h.wrapping_mul(FNV32_PRIME) ^ *b as u32
    });
    hash.to_be_bytes().to_vec()
}

/// FNV-1a 32-bit
pub fn fnv1a_32(data: &[u8]) -> Vec<u8> {
    let hash = data.iter().fold(FNV32_OFFSET, |h, b| {
        (h ^ *b as u32).wrapping_mul(FNV32_PRIME)
    });
    hash.to_be_bytes().to_vec()
}

/// FNV-1 64-bit
pub fn fnv1_64(data: &[u8]) -> Vec<u8> {
    let hash = data.iter().fold(FNV64_OFFSET, |h, b| {
        h.wrapping_mul(FNV64_PRIME) ^ *b as u64
    });
    hash.to_be_bytes().to_vec()
}

/// FNV-1a 64-bit
pub fn fnv1a_64(data: &[u8]) -> Vec<u8> {
    let hash = data.iter().fold(FNV64_OFFSET, |h, b| {
        (h ^ *b as u64).wrapping_mul(FNV64_PRIME)
    });
    hash.to_be_bytes().to_vec()
}
