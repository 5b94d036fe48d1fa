//! Wallet implementation

use std::ops::Range;

use tracing::info;

use super::address::{generate_address, Address};
use crate::config::NetworkParams;
use crate::crypto::entropy::{EntropySource, OsEntropy};
use crate::crypto::keys::{generate_child, generate_root, DerivationPath, KeyPair, RootKey};
use crate::crypto::mnemonic::{generate_phrase_with, Mnemonic, MnemonicStrength};
use crate::error::Result;

/// One receiving index of a wallet
#[derive(Debug, Clone)]
pub struct DerivedAccount {
    /// Address index
    pub index: u32,
    /// Full derivation path
    pub path: DerivationPath,
    /// Public address
    pub address: Address,
    /// Key pair controlling the address
    pub key_pair: KeyPair,
}

/// A wallet rooted at a single mnemonic phrase
///
/// The phrase itself is not kept; callers own its storage and rebuild the
/// wallet from it when needed.
#[derive(Debug, Clone)]
pub struct Wallet {
    root: RootKey,
    params: NetworkParams,
}

impl Wallet {
    /// Create a new wallet with a freshly generated 12-word phrase
    pub fn generate(params: NetworkParams) -> Result<(Self, Mnemonic)> {
        Self::generate_with(&OsEntropy, params)
    }

    /// Create a new wallet drawing entropy from `source`
    pub fn generate_with(source: &dyn EntropySource, params: NetworkParams) -> Result<(Self, Mnemonic)> {
        let mnemonic = generate_phrase_with(source, MnemonicStrength::Words12)?;
        let wallet = Self::from_phrase(&mnemonic.to_string(), params)?;
        Ok((wallet, mnemonic))
    }

    /// Restore a wallet from an existing phrase
    pub fn from_phrase(phrase: &str, params: NetworkParams) -> Result<Self> {
        let root = generate_root(phrase)?;
        info!(network = %params.name, "wallet restored from phrase");
        Ok(Self { root, params })
    }

    /// Network this wallet derives addresses for
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// Root key of the wallet
    pub fn root(&self) -> &RootKey {
        &self.root
    }

    /// Derive the key pair and address at `index`
    pub fn derive(&self, index: u32) -> Result<DerivedAccount> {
        let child = generate_child(&self.root, &self.params, index)?;
        let address = generate_address(&child, &self.params);

        Ok(DerivedAccount {
            index,
            path: child.path().clone(),
            address,
            key_pair: child.key_pair(),
        })
    }

    /// Address at `index`
    pub fn address(&self, index: u32) -> Result<Address> {
        self.derive(index).map(|account| account.address)
    }

    /// Addresses for every index in `range`
    pub fn addresses(&self, range: Range<u32>) -> Result<Vec<Address>> {
        range.map(|index| self.address(index)).collect()
    }

    /// Extended public key of the wallet root
    pub fn extended_public_key(&self) -> String {
        self.root.to_extended_public(&self.params)
    }
}
