//! Serialized form of raw byte strings

use serde::{Deserialize, Serialize};

/// Bytes as they appear in a config file
///
/// UTF-8 bytes are written as a plain string. Anything else is written as
/// `{"hex": "..."}` so it survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByteText {
    Text(String),
    Hex { hex: String },
}

impl ByteText {
    pub fn into_bytes(self) -> Result<Vec<u8>, hex::FromHexError> {
        match self {
            ByteText::Text(text) => Ok(text.into_bytes()),
            ByteText::Hex { hex } => hex::decode(hex.trim()),
        }
    }
}

impl From<&[u8]> for ByteText {
    fn from(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => ByteText::Text(text.to_string()),
            Err(_) => ByteText::Hex {
                hex: hex::encode(bytes),
            },
        }
    }
}
