//! BIP32 derivation paths

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// First hardened child index
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// BIP44 purpose component
pub const BIP44_PURPOSE: u32 = 44;

/// A parsed derivation path such as `m/44'/3'/0'/0/7`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// The master path `m`
    pub fn master() -> Self {
        Self(Vec::new())
    }

    /// `m/44'/coin_type'/account'/change/index`
    pub fn bip44(coin_type: u32, account: u32, change: u32, index: u32) -> Result<Self> {
        for hardened in [coin_type, account] {
            if hardened >= HARDENED_OFFSET {
                return Err(Error::InvalidIndex(hardened));
            }
        }
        for normal in [change, index] {
            if normal >= HARDENED_OFFSET {
                return Err(Error::InvalidIndex(normal));
            }
        }

        Ok(Self(vec![
            BIP44_PURPOSE | HARDENED_OFFSET,
            coin_type | HARDENED_OFFSET,
            account | HARDENED_OFFSET,
            change,
            index,
        ]))
    }

    /// Raw child numbers, hardened ones with the high bit set
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Number of derivation steps
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Last child number, if any
    pub fn last(&self) -> Option<u32> {
        self.0.last().copied()
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        let path = path.trim();
        let rest = match path.strip_prefix('m') {
            Some(rest) => rest,
            None => return Err(Error::InvalidPath(path.to_string())),
        };
        if rest.is_empty() {
            return Ok(Self::master());
        }
        let rest = rest
            .strip_prefix('/')
            .ok_or_else(|| Error::InvalidPath(path.to_string()))?;

        let mut result = Vec::new();
        for component in rest.split('/') {
            let (digits, hardened) = match component
                .strip_suffix('\'')
                .or_else(|| component.strip_suffix('h'))
            {
                Some(digits) => (digits, true),
                None => (component, false),
            };

            let index = digits
                .parse::<u32>()
                .map_err(|_| Error::InvalidPath(format!("{} (component {:?})", path, component)))?;
            if index >= HARDENED_OFFSET {
                return Err(Error::InvalidPath(format!("{} (component {:?} out of range)", path, component)));
            }

            result.push(if hardened { index | HARDENED_OFFSET } else { index });
        }

        Ok(Self(result))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for &component in &self.0 {
            if component >= HARDENED_OFFSET {
                write!(f, "/{}'", component - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", component)?;
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for DerivationPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DerivationPath> for String {
    fn from(path: DerivationPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bip44() {
        let path: DerivationPath = "m/44'/3'/0'/0/7".parse().unwrap();
        assert_eq!(path, DerivationPath::bip44(3, 0, 0, 7).unwrap());
        assert_eq!(path.components()[0], 44 | HARDENED_OFFSET);
        assert_eq!(path.last(), Some(7));
        assert_eq!(path.to_string(), "m/44'/3'/0'/0/7");
    }

    #[test]
    fn test_parse_h_suffix_and_master() {
        let path: DerivationPath = "m/0h/1".parse().unwrap();
        assert_eq!(path.to_string(), "m/0'/1");
        assert_eq!("m".parse::<DerivationPath>().unwrap(), DerivationPath::master());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "44'/0'", "m/", "m//1", "m/x", "m/-1", "m/2147483648'", "n/0"] {
            assert!(bad.parse::<DerivationPath>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_bip44_rejects_hardened_index() {
        assert!(matches!(
            DerivationPath::bip44(3, 0, 0, HARDENED_OFFSET),
            Err(Error::InvalidIndex(HARDENED_OFFSET))
        ));
    }
}
