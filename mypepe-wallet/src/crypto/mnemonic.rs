//! Mnemonic phrase generation and handling

pub use bip39::Mnemonic;
use tracing::debug;

use super::entropy::{EntropySource, OsEntropy};
use crate::error::{Error, Result};

/// Supported mnemonic strengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicStrength {
    /// 12 words (128 bits)
    Words12,
    /// 24 words (256 bits)
    Words24,
}

impl MnemonicStrength {
    /// Get entropy length in bytes
    fn entropy_bytes(&self) -> usize {
        match self {
            Self::Words12 => 16, // 128 bits = 16 bytes
            Self::Words24 => 32, // 256 bits = 32 bytes
        }
    }

    /// Number of words in a phrase of this strength
    pub fn word_count(&self) -> usize {
        match self {
            Self::Words12 => 12,
            Self::Words24 => 24,
        }
    }
}

/// Generate a new 12-word phrase from the operating system CSPRNG
pub fn generate_phrase() -> Result<Mnemonic> {
    generate_phrase_with(&OsEntropy, MnemonicStrength::Words12)
}

/// Generate a phrase of the given strength from an explicit entropy source
pub fn generate_phrase_with(
    source: &dyn EntropySource,
    strength: MnemonicStrength,
) -> Result<Mnemonic> {
    let mut entropy = vec![0u8; strength.entropy_bytes()];
    source.fill(&mut entropy)?;

    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| Error::InvalidMnemonic(e.to_string()))?;

    debug!(words = mnemonic.word_count(), "generated mnemonic");
    Ok(mnemonic)
}

/// Parse a phrase, checking the wordlist and checksum
pub fn parse_phrase(phrase: &str) -> Result<Mnemonic> {
    Mnemonic::parse_normalized(phrase.trim()).map_err(|e| Error::InvalidMnemonic(e.to_string()))
}

/// Validate a mnemonic phrase
pub fn validate_mnemonic(phrase: &str) -> bool {
    parse_phrase(phrase).is_ok()
}

/// Generate a seed from a mnemonic phrase and optional passphrase
pub fn mnemonic_to_seed(phrase: &str, passphrase: Option<&str>) -> Result<[u8; 64]> {
    let mnemonic = parse_phrase(phrase)?;
    Ok(mnemonic.to_seed(passphrase.unwrap_or("")))
}
