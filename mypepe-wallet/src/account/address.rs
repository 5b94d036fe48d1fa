//! Address generation and validation

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::config::NetworkParams;
use crate::crypto::base58;
use crate::crypto::keys::{ChildKey, KeyPair};
use crate::error::{Error, Result};

/// Payload length of a legacy address: version byte + HASH160
const ADDRESS_PAYLOAD_LEN: usize = 21;

/// Script template an address pays to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressKind {
    /// Pay to public key hash
    PubKeyHash,
    /// Pay to script hash
    ScriptHash,
}

/// A chain address in its native Base58Check encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    /// The address string
    address: String,
    /// The address type
    kind: AddressKind,
    #[serde(skip)]
    hash: [u8; 20],
}

impl Address {
    /// Build a pay-to-pubkey-hash address from a HASH160
    pub fn from_public_key_hash(hash: [u8; 20], params: &NetworkParams) -> Self {
        Self::encode(AddressKind::PubKeyHash, params.pub_key_hash, hash)
    }

    /// Build a pay-to-script-hash address from a HASH160
    pub fn from_script_hash(hash: [u8; 20], params: &NetworkParams) -> Self {
        Self::encode(AddressKind::ScriptHash, params.script_hash, hash)
    }

    fn encode(kind: AddressKind, version: u8, hash: [u8; 20]) -> Self {
        let mut payload = [0u8; ADDRESS_PAYLOAD_LEN];
        payload[0] = version;
        payload[1..].copy_from_slice(&hash);

        Self {
            address: base58::encode_check(&payload),
            kind,
            hash,
        }
    }

    /// Parse and validate an address for the given network
    pub fn parse(address: &str, params: &NetworkParams) -> Result<Self> {
        let payload = base58::decode_check(address)
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", address, e)))?;

        if payload.len() != ADDRESS_PAYLOAD_LEN {
            return Err(Error::InvalidAddress(format!(
                "{}: payload length {}",
                address,
                payload.len()
            )));
        }

        let kind = match payload[0] {
            v if v == params.pub_key_hash => AddressKind::PubKeyHash,
            v if v == params.script_hash => AddressKind::ScriptHash,
            v => {
                return Err(Error::InvalidAddress(format!(
                    "{}: version {:#04x} is not a {} address",
                    address, v, params.name
                )))
            }
        };

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&payload[1..]);

        Ok(Self {
            address: address.to_string(),
            kind,
            hash,
        })
    }

    /// Get the address string
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Get the address type
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// HASH160 carried by the address
    pub fn hash(&self) -> &[u8; 20] {
        &self.hash
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.address
    }
}

impl KeyPair {
    /// Pay-to-pubkey-hash address of this key pair
    pub fn address(&self, params: &NetworkParams) -> Address {
        Address::from_public_key_hash(self.public_key_hash(), params)
    }
}

/// Derive the public address of a child key
pub fn generate_address(child: &ChildKey, params: &NetworkParams) -> Address {
    let address = child.key_pair().address(params);
    trace!(index = child.index(), %address, "generated address");
    address
}

/// Check that `address` is a well-formed address of the given network
pub fn validate_address(address: &str, params: &NetworkParams) -> bool {
    Address::parse(address, params).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_point_address() {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let pair = KeyPair::from_bytes(&secret, true).unwrap();

        let params = NetworkParams {
            pub_key_hash: 0x00,
            script_hash: 0x05,
            ..NetworkParams::mainnet()
        };
        assert_eq!(
            pair.address(&params).as_str(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }

    #[test]
    fn test_mainnet_prefix() {
        let pair = KeyPair::from_bytes(&[9u8; 32], true).unwrap();
        let address = pair.address(&NetworkParams::mainnet());

        assert!(address.as_str().starts_with('D'));
        assert_eq!(address.as_str().len(), 34);
        assert_eq!(address.kind(), AddressKind::PubKeyHash);
    }

    #[test]
    fn test_parse_round_trip() {
        let params = NetworkParams::mainnet();
        let address = Address::from_script_hash([3u8; 20], &params);
        assert!(address.as_str().starts_with('9') || address.as_str().starts_with('A'));

        let parsed = Address::parse(address.as_str(), &params).unwrap();
        assert_eq!(parsed, address);
        assert_eq!(parsed.kind(), AddressKind::ScriptHash);
    }

    #[test]
    fn test_validate_address() {
        let params = NetworkParams::mainnet();
        let address = KeyPair::from_bytes(&[9u8; 32], true).unwrap().address(&params);

        assert!(validate_address(address.as_str(), &params));
        assert!(!validate_address(address.as_str(), &NetworkParams::testnet()));
        assert!(!validate_address("not-an-address", &params));
        assert!(!validate_address("", &params));
        assert!(!validate_address("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", &params));
    }

    #[test]
    fn test_validate_rejects_corrupted_checksum() {
        let params = NetworkParams::mainnet();
        let address = KeyPair::from_bytes(&[9u8; 32], true).unwrap().address(&params);

        let mut corrupted = address.as_str().to_string();
        let last = corrupted.pop().unwrap();
        corrupted.push(if last == 'z' { 'y' } else { 'z' });
        assert!(!validate_address(&corrupted, &params));
    }
}
