//! secp256k1 key pairs

use std::fmt;

use bitcoin::hashes::{hash160, Hash};
use secp256k1::{PublicKey, Secp256k1, SecretKey};

use crate::error::{Error, Result};

/// A secp256k1 key pair together with its public key encoding
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    secret_key: SecretKey,
    public_key: PublicKey,
    compressed: bool,
}

impl KeyPair {
    /// Create a key pair from a secret key
    pub fn from_secret_key(secret_key: SecretKey, compressed: bool) -> Self {
        let secp = Secp256k1::signing_only();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        Self {
            secret_key,
            public_key,
            compressed,
        }
    }

    /// Create a key pair from raw 32-byte secret
    pub fn from_bytes(bytes: &[u8], compressed: bool) -> Result<Self> {
        let secret_key = SecretKey::from_slice(bytes)
            .map_err(|e| Error::KeyDerivation(format!("Invalid secret key: {}", e)))?;
        Ok(Self::from_secret_key(secret_key, compressed))
    }

    /// Get the raw private key bytes
    pub fn private_key_bytes(&self) -> [u8; 32] {
        self.secret_key.secret_bytes()
    }

    /// Get the secret key
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Get the public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Whether the public key is serialized in compressed form
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Public key bytes in the encoding used for addresses (33 or 65 bytes)
    pub fn public_key_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.public_key.serialize().to_vec()
        } else {
            self.public_key.serialize_uncompressed().to_vec()
        }
    }

    /// HASH160 of the public key
    pub fn public_key_hash(&self) -> [u8; 20] {
        hash160::Hash::hash(&self.public_key_bytes()).to_byte_array()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .field("compressed", &self.compressed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        bytes
    }

    #[test]
    fn test_generator_point() {
        let pair = KeyPair::from_bytes(&one(), true).unwrap();
        assert_eq!(
            hex::encode(pair.public_key_bytes()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            hex::encode(pair.public_key_hash()),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_uncompressed_encoding() {
        let pair = KeyPair::from_bytes(&one(), false).unwrap();
        let bytes = pair.public_key_bytes();
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 0x04);
    }

    #[test]
    fn test_rejects_zero_key() {
        assert!(matches!(KeyPair::from_bytes(&[0u8; 32], true), Err(Error::KeyDerivation(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let pair = KeyPair::from_bytes(&one(), true).unwrap();
        let debug = format!("{:?}", pair);
        assert!(!debug.contains(&hex::encode(one())));
        assert!(debug.contains("0279be667e"));
    }
}
