//! Coin amounts
//!
//! Balances are integers in the smallest unit; users type amounts in the
//! display unit. 1 display unit = 100,000,000 smallest units.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Why a display-unit string is not an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountParseError {
    /// Nothing but whitespace
    Empty,
    /// Not a decimal number
    Malformed,
    /// More fractional digits than the smallest unit allows
    TooPrecise,
    /// Larger than `u64::MAX` smallest units
    Overflow,
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty amount"),
            Self::Malformed => write!(f, "not a decimal number"),
            Self::TooPrecise => write!(f, "more than {} decimal places", Amount::DECIMALS),
            Self::Overflow => write!(f, "amount too large"),
        }
    }
}

impl std::error::Error for AmountParseError {}

/// An amount in smallest units
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Smallest units per display unit
    pub const COIN: u64 = 100_000_000;

    /// Decimal places of the display unit
    pub const DECIMALS: usize = 8;

    /// Create from smallest units
    pub const fn from_base_units(value: u64) -> Self {
        Self(value)
    }

    /// Value in smallest units
    pub const fn to_base_units(&self) -> u64 {
        self.0
    }

    /// Parse a display-unit decimal such as `"12.5"`, `".001"` or `"5e-1"` exactly
    ///
    /// An exponent moves the decimal point before the precision check, so
    /// `"1e-8"` is one smallest unit and `"1e-9"` is too precise.
    pub fn from_display_str(text: &str) -> Result<Self, AmountParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
            Some(at) => (&text[..at], parse_exponent(&text[at + 1..])?),
            None => (text, 0),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(AmountParseError::Malformed);
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(AmountParseError::Malformed);
        }

        if exponent == 0 {
            return Self::from_parts(whole, fraction);
        }

        let digits = format!("{}{}", whole, fraction);
        let significant = digits.trim_start_matches('0');
        let leading = (digits.len() - significant.len()) as i64;
        let significant = significant.trim_end_matches('0');
        if significant.is_empty() {
            return Ok(Self::ZERO);
        }

        // Position of the decimal point relative to the first significant digit
        let point = (whole.len() as i64 - leading).saturating_add(exponent);
        if point > 20 {
            return Err(AmountParseError::Overflow);
        }
        if point < -(Self::DECIMALS as i64) {
            return Err(AmountParseError::TooPrecise);
        }

        if point <= 0 {
            let fraction = format!("{}{}", "0".repeat(point.unsigned_abs() as usize), significant);
            Self::from_parts("", &fraction)
        } else if point as usize >= significant.len() {
            let whole = format!("{}{}", significant, "0".repeat(point as usize - significant.len()));
            Self::from_parts(&whole, "")
        } else {
            let (whole, fraction) = significant.split_at(point as usize);
            Self::from_parts(whole, fraction)
        }
    }

    fn from_parts(whole: &str, fraction: &str) -> Result<Self, AmountParseError> {
        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > Self::DECIMALS {
            return Err(AmountParseError::TooPrecise);
        }

        let mut value: u64 = 0;
        for digit in whole.bytes() {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(digit - b'0')))
                .ok_or(AmountParseError::Overflow)?;
        }
        value = value.checked_mul(Self::COIN).ok_or(AmountParseError::Overflow)?;

        let mut scaled: u64 = 0;
        for (i, digit) in fraction.bytes().enumerate() {
            let place = 10u64.pow((Self::DECIMALS - 1 - i) as u32);
            scaled += u64::from(digit - b'0') * place;
        }

        value.checked_add(scaled).map(Self).ok_or(AmountParseError::Overflow)
    }

    /// Format in display units without trailing zeros
    pub fn to_display_string(&self) -> String {
        let whole = self.0 / Self::COIN;
        let fraction = self.0 % Self::COIN;
        if fraction == 0 {
            return whole.to_string();
        }

        let digits = format!("{:0width$}", fraction, width = Self::DECIMALS);
        format!("{}.{}", whole, digits.trim_end_matches('0'))
    }

    /// Checked addition
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Whether the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Exponent of `1.5e-3` style input, clamped so shifting cannot overflow
fn parse_exponent(text: &str) -> Result<i64, AmountParseError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountParseError::Malformed);
    }

    let magnitude = digits
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')))
        .min(i64::from(i32::MAX));
    Ok(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact() {
        let cases = [
            ("1", 100_000_000),
            ("0.5", 50_000_000),
            (".5", 50_000_000),
            ("2.", 200_000_000),
            ("0.00000001", 1),
            ("0.100000000", 10_000_000),
            (" 12.34 ", 1_234_000_000),
            ("0", 0),
            ("5e-1", 50_000_000),
            ("1E8", 10_000_000_000_000_000),
            ("1.5e+2", 15_000_000_000),
            ("0.05e1", 50_000_000),
            ("1e-8", 1),
            ("250e-8", 250),
            ("0e99999999999", 0),
        ];
        for (text, expected) in cases {
            assert_eq!(Amount::from_display_str(text).unwrap().to_base_units(), expected, "{}", text);
        }
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(Amount::from_display_str(""), Err(AmountParseError::Empty));
        assert_eq!(Amount::from_display_str("   "), Err(AmountParseError::Empty));
        for text in ["abc", ".", "1.2.3", "-1", "+1", "NaN", "Infinity", "1,5", "0x10", "e5", "1e", "1e+", "1e-x", "1e2.5", "-5e-1"] {
            assert_eq!(Amount::from_display_str(text), Err(AmountParseError::Malformed), "{}", text);
        }
        assert_eq!(Amount::from_display_str("0.000000001"), Err(AmountParseError::TooPrecise));
        assert_eq!(Amount::from_display_str("1e-9"), Err(AmountParseError::TooPrecise));
        assert_eq!(Amount::from_display_str("1e-99999999999"), Err(AmountParseError::TooPrecise));
        assert_eq!(Amount::from_display_str("1e12"), Err(AmountParseError::Overflow));
        assert_eq!(Amount::from_display_str("1e99999999999"), Err(AmountParseError::Overflow));
        assert_eq!(
            Amount::from_display_str("184467440737.09551616"),
            Err(AmountParseError::Overflow)
        );
        assert_eq!(
            Amount::from_display_str("99999999999999999999"),
            Err(AmountParseError::Overflow)
        );
    }

    #[test]
    fn test_parse_max() {
        let max = Amount::from_display_str("184467440737.09551615").unwrap();
        assert_eq!(max.to_base_units(), u64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_base_units(100_000_000).to_string(), "1");
        assert_eq!(Amount::from_base_units(150_000_000).to_string(), "1.5");
        assert_eq!(Amount::from_base_units(1).to_string(), "0.00000001");
        assert_eq!(Amount::ZERO.to_string(), "0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::from_base_units(5);
        let b = Amount::from_base_units(7);
        assert_eq!(a + b, Amount::from_base_units(12));
        assert_eq!(a - b, Amount::ZERO);
        assert_eq!(a.checked_sub(b), None);
        assert_eq!(Amount::from_base_units(u64::MAX).checked_add(a), None);
    }
}
