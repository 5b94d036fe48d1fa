//! Wallet Import Format

use tracing::debug;

use super::derivation::KeyPair;
use crate::config::NetworkParams;
use crate::crypto::base58;
use crate::error::{Error, Result};

const COMPRESSION_FLAG: u8 = 0x01;

/// Import a private key serialized in WIF
pub fn from_wif(wif: &str, params: &NetworkParams) -> Result<KeyPair> {
    let payload = base58::decode_check(wif.trim()).map_err(|e| Error::InvalidWif(e.to_string()))?;

    // version || key || [compression flag]
    let compressed = match payload.len() {
        33 => false,
        34 if payload[33] == COMPRESSION_FLAG => true,
        34 => {
            return Err(Error::InvalidWif(format!(
                "Invalid compression flag: {:#04x}",
                payload[33]
            )))
        }
        len => return Err(Error::InvalidWif(format!("Invalid payload length: {}", len))),
    };

    if payload[0] != params.wif {
        return Err(Error::InvalidWif(format!(
            "Unexpected version byte {:#04x} for {}",
            payload[0], params.name
        )));
    }

    let key_pair = KeyPair::from_bytes(&payload[1..33], compressed)
        .map_err(|e| Error::InvalidWif(e.to_string()))?;

    debug!(compressed, "imported WIF key");
    Ok(key_pair)
}

impl KeyPair {
    /// Serialize the private key in WIF
    pub fn to_wif(&self, params: &NetworkParams) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(params.wif);
        payload.extend_from_slice(&self.private_key_bytes());
        if self.is_compressed() {
            payload.push(COMPRESSION_FLAG);
        }
        base58::encode_check(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_uncompressed_wif() {
        let pair = from_wif(
            "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ",
            &NetworkParams::mainnet(),
        )
        .unwrap();

        assert!(!pair.is_compressed());
        assert_eq!(
            hex::encode(pair.private_key_bytes()),
            "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d"
        );
    }

    #[test]
    fn test_round_trip_compressed() {
        let params = NetworkParams::mainnet();
        let pair = KeyPair::from_bytes(&[7u8; 32], true).unwrap();

        let wif = pair.to_wif(&params);
        let imported = from_wif(&wif, &params).unwrap();
        assert_eq!(imported, pair);
        assert_eq!(imported.to_wif(&params), wif);
    }

    #[test]
    fn test_rejects_wrong_network() {
        let pair = KeyPair::from_bytes(&[7u8; 32], true).unwrap();
        let wif = pair.to_wif(&NetworkParams::testnet());

        let err = from_wif(&wif, &NetworkParams::mainnet()).unwrap_err();
        assert!(matches!(err, Error::InvalidWif(_)));
    }

    #[test]
    fn test_rejects_malformed() {
        let params = NetworkParams::mainnet();
        for bad in ["", "not-a-wif", "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTK"] {
            assert!(matches!(from_wif(bad, &params), Err(Error::InvalidWif(_))), "accepted {:?}", bad);
        }

        // valid checksum, bad compression flag
        let mut payload = vec![params.wif];
        payload.extend_from_slice(&[7u8; 32]);
        payload.push(0x02);
        let wif = base58::encode_check(&payload);
        assert!(matches!(from_wif(&wif, &params), Err(Error::InvalidWif(_))));
    }
}
