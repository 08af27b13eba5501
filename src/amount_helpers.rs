//! Helper methods for [`Amount`] and [`Currency`].
//!
//! Amount values travel as decimal strings of atomic units so that they can
//! exceed any fixed-width integer. These helpers format and convert them
//! without going through floating point.

use crate::types::{Amount, Currency};

// ---------------------------------------------------------------------------
// Currency helpers
// ---------------------------------------------------------------------------

impl Currency {
    pub fn new(symbol: impl Into<String>, decimals: u32) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            metadata: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Amount helpers
// ---------------------------------------------------------------------------

impl Amount {
    /// Create an [`Amount`] from an atomic-unit decimal string.
    pub fn new(value: impl Into<String>, currency: Currency) -> Self {
        Self {
            value: value.into(),
            currency,
            metadata: None,
        }
    }

    /// Create an [`Amount`] from an atomic-unit integer.
    pub fn from_atomic(value: i128, currency: Currency) -> Self {
        Self::new(value.to_string(), currency)
    }

    /// Parse the value as an `i128`. `None` if it is malformed or too large.
    pub fn as_i128(&self) -> Option<i128> {
        self.value.parse().ok()
    }

    /// Returns `true` for values below zero. `-0` is not negative.
    pub fn is_negative(&self) -> bool {
        split_value(&self.value)
            .is_some_and(|(negative, digits)| negative && digits.bytes().any(|b| b != b'0'))
    }

    /// Render the value in standard units, applying `currency.decimals`.
    ///
    /// All fractional digits are kept, so `"-1234500"` with 4 decimals
    /// becomes `"-123.4500"`. Returns `None` if the value is not an integer
    /// string or `currency.decimals` exceeds [`MAX_DECIMALS`].
    pub fn to_decimal_string(&self) -> Option<String> {
        if self.currency.decimals > MAX_DECIMALS {
            return None;
        }
        let (negative, digits) = split_value(&self.value)?;
        let decimals = self.currency.decimals as usize;

        let padded = if digits.len() <= decimals {
            format!("{}{digits}", "0".repeat(decimals + 1 - digits.len()))
        } else {
            digits.to_string()
        };
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let whole = whole.trim_start_matches('0');
        let whole = if whole.is_empty() { "0" } else { whole };

        let is_zero = whole == "0" && fraction.bytes().all(|b| b == b'0');
        let sign = if negative && !is_zero { "-" } else { "" };

        Some(if fraction.is_empty() {
            format!("{sign}{whole}")
        } else {
            format!("{sign}{whole}.{fraction}")
        })
    }
}

/// Largest `decimals` that [`Amount::to_decimal_string`] will render.
/// Bounds the zero padding for currencies reported by untrusted servers.
pub const MAX_DECIMALS: u32 = 256;

/// Split an integer string into its sign and digit run.
fn split_value(value: &str) -> Option<(bool, &str)> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((negative, digits))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
