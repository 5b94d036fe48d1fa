//! Network parameters and wallet configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transaction::{Amount, DEFAULT_FEE};

/// Version bytes used when serializing BIP32 extended keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bip32Versions {
    /// Prefix for extended public keys
    pub public: u32,
    /// Prefix for extended private keys
    pub private: u32,
}

/// Chain constants for address, WIF and extended key encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkParams {
    /// Human readable network name
    pub name: String,
    /// Prefix used when signing messages
    pub message_prefix: String,
    /// BIP44 coin type (hardened at derivation time)
    pub bip44: u32,
    /// Extended key version bytes
    pub bip32: Bip32Versions,
    /// Version byte of pay-to-pubkey-hash addresses
    pub pub_key_hash: u8,
    /// Version byte of pay-to-script-hash addresses
    pub script_hash: u8,
    /// Version byte of WIF private keys
    pub wif: u8,
}

impl NetworkParams {
    /// Mainnet parameters
    pub fn mainnet() -> Self {
        Self {
            name: "mainnet".to_string(),
            message_prefix: "\x19Dogecoin Signed Message:\n".to_string(),
            bip44: 3,
            bip32: Bip32Versions {
                public: 0x02fa_cafd,
                private: 0x02fa_c398,
            },
            pub_key_hash: 0x1e,
            script_hash: 0x16,
            wif: 0x80,
        }
    }

    /// Testnet parameters
    pub fn testnet() -> Self {
        Self {
            name: "testnet".to_string(),
            message_prefix: "\x19Dogecoin Signed Message:\n".to_string(),
            bip44: 1,
            bip32: Bip32Versions {
                public: 0x0435_87cf,
                private: 0x0435_8394,
            },
            pub_key_hash: 0x71,
            script_hash: 0xc4,
            wif: 0xf1,
        }
    }

    /// Look up a built-in network by name
    pub fn by_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "prod" => Ok(Self::mainnet()),
            "testnet" | "test" => Ok(Self::testnet()),
            other => Err(Error::Config(format!("Unknown network: {}", other))),
        }
    }

    /// Parse network parameters from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.check()?;
        Ok(params)
    }

    /// Load network parameters from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    fn check(&self) -> Result<()> {
        if self.bip44 >= 0x8000_0000 {
            return Err(Error::Config(format!("Coin type out of range: {}", self.bip44)));
        }
        if self.pub_key_hash == self.script_hash {
            return Err(Error::Config(
                "pubKeyHash and scriptHash must differ".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

/// Wallet configuration resolved from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Network parameters
    pub network: NetworkParams,
    /// Fee attached to outgoing transfers
    pub fee: Amount,
}

impl WalletConfig {
    /// Build a configuration from `MYPEPE_NETWORK` and `MYPEPE_FEE`
    pub fn from_env() -> Result<Self> {
        let network = match std::env::var("MYPEPE_NETWORK") {
            Ok(name) => NetworkParams::by_name(&name)?,
            Err(_) => NetworkParams::mainnet(),
        };

        let fee = match std::env::var("MYPEPE_FEE") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Amount::from_base_units)
                .map_err(|e| Error::Config(format!("Invalid MYPEPE_FEE: {}", e)))?,
            Err(_) => DEFAULT_FEE,
        };

        Ok(Self { network, fee })
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: NetworkParams::mainnet(),
            fee: DEFAULT_FEE,
        }
    }
}
