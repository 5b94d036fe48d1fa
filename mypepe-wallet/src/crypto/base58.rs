//! Base58Check encoding

use sha2::{Digest, Sha256};

/// Failure modes of `decode_check`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// Not valid Base58
    Encoding(String),
    /// Shorter than the 4-byte checksum
    TooShort,
    /// Checksum does not match the payload
    Checksum,
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encoding(e) => write!(f, "invalid base58: {}", e),
            Self::TooShort => write!(f, "payload too short"),
            Self::Checksum => write!(f, "checksum mismatch"),
        }
    }
}

/// SHA256(SHA256(data))
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Encode `payload` followed by its 4-byte double-SHA256 checksum
pub fn encode_check(payload: &[u8]) -> String {
    let checksum = double_sha256(payload);

    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).into_string()
}

/// Decode a Base58Check string and return the payload without checksum
pub fn decode_check(encoded: &str) -> Result<Vec<u8>, CheckError> {
    let mut data = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| CheckError::Encoding(e.to_string()))?;

    if data.len() < 4 {
        return Err(CheckError::TooShort);
    }

    let payload_len = data.len() - 4;
    let expected = double_sha256(&data[..payload_len]);
    if data[payload_len..] != expected[..4] {
        return Err(CheckError::Checksum);
    }

    data.truncate(payload_len);
    Ok(data)
}
