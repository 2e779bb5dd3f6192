//! Binary-to-text encodings for digests: hex, base32, base58, base64 and
//! space-separated numeric forms

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
    #[error("Invalid character '{0}' in input")]
    InvalidCharacter(char),
    #[error("Invalid token '{0}' in input")]
    InvalidToken(String),
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),
}

/// Supported text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Hex,
    HexUpper,
    Base32,
    Base58,
    Base64,
    Binary,
    Decimal,
    Octal,
}

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

impl Encoding {
    /// Every encoding, in display order
    pub const ALL: [Encoding; 8] = [
        Encoding::Base32,
        Encoding::Base58,
        Encoding::Base64,
        Encoding::Binary,
        Encoding::Decimal,
        Encoding::Hex,
        Encoding::HexUpper,
        Encoding::Octal,
    ];

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Hex => "hex",
            Encoding::HexUpper => "hexup",
            Encoding::Base32 => "base32",
            Encoding::Base58 => "base58",
            Encoding::Base64 => "base64",
            Encoding::Binary => "binary",
            Encoding::Decimal => "decimal",
            Encoding::Octal => "octal",
        }
    }

    /// Render bytes as text
    pub fn encode(&self, data: &[u8]) -> String {
        match self {
            Encoding::Hex => hex::encode(data),
            Encoding::HexUpper => hex::encode_upper(data),
            Encoding::Base32 => base32_encode(data),
            Encoding::Base58 => bs58::encode(data).into_string(),
            Encoding::Base64 => BASE64.encode(data),
            Encoding::Binary => join_bytes(data, |b| format!("{b:08b}")),
            Encoding::Decimal => join_bytes(data, |b| b.to_string()),
            Encoding::Octal => join_bytes(data, |b| {
                if b == 0 {
                    "0".to_string()
                } else {
                    format!("0{b:o}")
                }
            }),
        }
    }

    /// Parse text back into bytes
    pub fn decode(&self, input: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Encoding::Hex | Encoding::HexUpper => Ok(hex::decode(strip_whitespace(input))?),
            Encoding::Base32 => base32_decode(input.trim()),
            Encoding::Base58 => Ok(bs58::decode(input.trim()).into_vec()?),
            Encoding::Base64 => Ok(BASE64.decode(input.trim())?),
            Encoding::Binary => split_bytes(input, 2),
            Encoding::Decimal => split_bytes(input, 10),
            Encoding::Octal => split_bytes(input, 8),
        }
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    /// Accepts canonical names and common aliases; empty means hex
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "hex" | "base16" | "hexadecimal" => Ok(Encoding::Hex),
            "hexup" => Ok(Encoding::HexUpper),
            "base32" => Ok(Encoding::Base32),
            "base58" => Ok(Encoding::Base58),
            "base64" => Ok(Encoding::Base64),
            "binary" | "bin" => Ok(Encoding::Binary),
            "decimal" | "dec" => Ok(Encoding::Decimal),
            "octal" | "oct" => Ok(Encoding::Octal),
            other => Err(EncodingError::UnknownEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

fn join_bytes(data: &[u8], render: impl Fn(u8) -> String) -> String {
    data.iter().map(|b| render(*b)).collect::<Vec<_>>().join(" ")
}

fn split_bytes(input: &str, radix: u32) -> Result<Vec<u8>, EncodingError> {
    input
        .split_whitespace()
        .map(|token| {
            u8::from_str_radix(token, radix).map_err(|_| EncodingError::InvalidToken(token.to_string()))
        })
        .collect()
}

/// RFC 4648 base32 with padding
fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(5) * 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for byte in data {
        buffer = (buffer << 8) | *byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    while out.len() % 8 != 0 {
        out.push('=');
    }
    out
}

fn base32_decode(input: &str) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for c in input.trim_end_matches('=').chars() {
        let upper = c.to_ascii_uppercase();
        let value = BASE32_ALPHABET
            .iter()
            .position(|&a| a as char == upper)
            .ok_or(EncodingError::InvalidCharacter(c))?;
        buffer = (buffer << 5) | value as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
        buffer &= (1 << bits) - 1;
    }
    Ok(out)
}
