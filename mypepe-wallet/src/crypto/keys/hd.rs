//! BIP32 hierarchical key derivation
//!
//! A `RootKey` is the master extended private key of a BIP39 seed. A
//! `ChildKey` is the extended key at `m/44'/<coin_type>'/0'/0/<index>`;
//! each index yields exactly one key pair and one address.

use std::fmt;

use bitcoin::hashes::{hash160, Hash};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::Sha512;
use tracing::{debug, instrument, warn};

use super::derivation::KeyPair;
use super::path::{DerivationPath, HARDENED_OFFSET};
use crate::config::{Bip32Versions, NetworkParams};
use crate::crypto::base58;
use crate::crypto::mnemonic::parse_phrase;
use crate::error::{Error, Result};

/// Length of a serialized extended key before the checksum
const EXTENDED_KEY_LEN: usize = 78;

/// A BIP32 extended private key
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPrivateKey {
    secret_key: SecretKey,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
}

impl ExtendedPrivateKey {
    /// Derive the master key from a seed
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if !(16..=64).contains(&seed.len()) {
            return Err(Error::KeyDerivation(format!(
                "Seed must be 16 to 64 bytes, got {}",
                seed.len()
            )));
        }

        let (il, ir) = hmac_sha512(b"Bitcoin seed", &[seed])?;
        let secret_key = SecretKey::from_slice(&il)
            .map_err(|e| Error::KeyDerivation(format!("Unusable seed: {}", e)))?;

        Ok(Self {
            secret_key,
            chain_code: ir,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
        })
    }

    /// Derive a child key. An index whose tweak is out of range is skipped
    /// in favour of the next one within the same hardened class.
    pub fn derive_child(&self, secp: &Secp256k1<All>, index: u32) -> Result<Self> {
        let hardened = index >= HARDENED_OFFSET;
        let mut index = index;

        loop {
            match self.try_derive_child(secp, index)? {
                Some(child) => return Ok(child),
                None => {
                    warn!(index, "invalid child key, moving to next index");
                    index = index
                        .checked_add(1)
                        .filter(|next| (*next >= HARDENED_OFFSET) == hardened)
                        .ok_or(Error::InvalidIndex(index))?;
                }
            }
        }
    }

    fn try_derive_child(&self, secp: &Secp256k1<All>, index: u32) -> Result<Option<Self>> {
        if self.depth == u8::MAX {
            return Err(Error::KeyDerivation("Maximum derivation depth reached".to_string()));
        }

        let index_bytes = index.to_be_bytes();
        let (il, ir) = if index >= HARDENED_OFFSET {
            hmac_sha512(
                &self.chain_code,
                &[&[0u8][..], &self.secret_key.secret_bytes()[..], &index_bytes[..]],
            )?
        } else {
            let public_key = PublicKey::from_secret_key(secp, &self.secret_key);
            hmac_sha512(&self.chain_code, &[&public_key.serialize()[..], &index_bytes[..]])?
        };

        let tweak = match Scalar::from_be_bytes(il) {
            Ok(tweak) => tweak,
            Err(_) => return Ok(None),
        };
        let secret_key = match self.secret_key.add_tweak(&tweak) {
            Ok(key) => key,
            Err(_) => return Ok(None),
        };

        Ok(Some(Self {
            secret_key,
            chain_code: ir,
            depth: self.depth + 1,
            parent_fingerprint: self.fingerprint(secp),
            child_number: index,
        }))
    }

    /// Derive every component of `path` starting from this key
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let secp = Secp256k1::new();
        let mut key = self.clone();
        for &component in path.components() {
            key = key.derive_child(&secp, component)?;
        }
        Ok(key)
    }

    /// First four bytes of HASH160 of the compressed public key
    pub fn fingerprint(&self, secp: &Secp256k1<All>) -> [u8; 4] {
        let public_key = PublicKey::from_secret_key(secp, &self.secret_key);
        let hash = hash160::Hash::hash(&public_key.serialize()).to_byte_array();
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Depth in the derivation tree
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Child number this key was derived with
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    /// Chain code
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Key pair with a compressed public key
    pub fn key_pair(&self) -> KeyPair {
        KeyPair::from_secret_key(self.secret_key, true)
    }

    /// Base58Check serialization of the extended private key
    pub fn to_extended_private(&self, versions: &Bip32Versions) -> String {
        let mut key = [0u8; 33];
        key[1..].copy_from_slice(&self.secret_key.secret_bytes());
        self.serialize(versions.private, &key)
    }

    /// Base58Check serialization of the matching extended public key
    pub fn to_extended_public(&self, versions: &Bip32Versions) -> String {
        let secp = Secp256k1::signing_only();
        let public_key = PublicKey::from_secret_key(&secp, &self.secret_key);
        self.serialize(versions.public, &public_key.serialize())
    }

    fn serialize(&self, version: u32, key: &[u8; 33]) -> String {
        let mut data = Vec::with_capacity(EXTENDED_KEY_LEN);
        data.extend_from_slice(&version.to_be_bytes());
        data.push(self.depth);
        data.extend_from_slice(&self.parent_fingerprint);
        data.extend_from_slice(&self.child_number.to_be_bytes());
        data.extend_from_slice(&self.chain_code);
        data.extend_from_slice(key);
        base58::encode_check(&data)
    }
}

impl fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .finish_non_exhaustive()
    }
}

/// Master key of a wallet, regenerated from its phrase when needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootKey(ExtendedPrivateKey);

impl RootKey {
    /// Build a root key directly from a BIP39 seed
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        ExtendedPrivateKey::from_seed(seed).map(Self)
    }

    /// Underlying extended key
    pub fn as_extended(&self) -> &ExtendedPrivateKey {
        &self.0
    }

    /// Derive an arbitrary path below the root
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedPrivateKey> {
        self.0.derive_path(path)
    }

    /// Extended private key in the network's encoding
    pub fn to_extended_private(&self, params: &NetworkParams) -> String {
        self.0.to_extended_private(&params.bip32)
    }

    /// Extended public key in the network's encoding
    pub fn to_extended_public(&self, params: &NetworkParams) -> String {
        self.0.to_extended_public(&params.bip32)
    }
}

/// Key at a receiving index of the first account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildKey {
    key: ExtendedPrivateKey,
    path: DerivationPath,
    index: u32,
}

impl ChildKey {
    /// Address index this key was derived for
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Full derivation path
    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Underlying extended key
    pub fn as_extended(&self) -> &ExtendedPrivateKey {
        &self.key
    }

    /// Key pair with a compressed public key
    pub fn key_pair(&self) -> KeyPair {
        self.key.key_pair()
    }

    /// Compressed public key bytes
    pub fn public_key_bytes(&self) -> [u8; 33] {
        let secp = Secp256k1::signing_only();
        PublicKey::from_secret_key(&secp, &self.key.secret_key).serialize()
    }
}

/// Map a phrase to its root key
pub fn generate_root(phrase: &str) -> Result<RootKey> {
    generate_root_with_passphrase(phrase, "")
}

/// Map a phrase and BIP39 passphrase to a root key
#[instrument(skip_all)]
pub fn generate_root_with_passphrase(phrase: &str, passphrase: &str) -> Result<RootKey> {
    let mnemonic = parse_phrase(phrase)?;
    let seed = mnemonic.to_seed(passphrase);
    let root = RootKey::from_seed(&seed)?;

    debug!(words = mnemonic.word_count(), "derived root key");
    Ok(root)
}

/// Derive the key at `m/44'/<coin_type>'/0'/0/<index>`
#[instrument(skip(root, params), fields(coin_type = params.bip44))]
pub fn generate_child(root: &RootKey, params: &NetworkParams, index: u32) -> Result<ChildKey> {
    if index >= HARDENED_OFFSET {
        return Err(Error::InvalidIndex(index));
    }

    let path = DerivationPath::bip44(params.bip44, 0, 0, index)?;
    let key = root.derive_path(&path)?;

    debug!(%path, "derived child key");
    Ok(ChildKey { key, path, index })
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(key)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;
    for part in parts {
        hmac.update(part);
    }
    let result = hmac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&result[0..32]);
    right.copy_from_slice(&result[32..64]);
    Ok((left, right))
}
