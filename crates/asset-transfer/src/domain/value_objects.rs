//! # Value Objects
//!
//! Account keys, balances and transfer amounts. Balances are persisted as
//! the decimal text of an `i64`.

use crate::errors::ChaincodeError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ACCOUNT KEY
// =============================================================================

/// A non-empty world-state key identifying an account.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountKey(String);

impl AccountKey {
    /// Wraps `raw`, rejecting the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ChaincodeError::EmptyKey`] for `""`.
    pub fn parse(raw: &str) -> Result<Self, ChaincodeError> {
        if raw.is_empty() {
            return Err(ChaincodeError::EmptyKey);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// AMOUNT
// =============================================================================

/// A signed integer amount taken from an invocation parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(i64);

impl Amount {
    /// Parses decimal integer text. Fractions, blanks and overflow yield `None`.
    ///
    /// Deliberately narrower than a float parse: surrounding whitespace,
    /// trailing garbage (`10abc`) and exponents (`1e3`) are rejected too.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse::<i64>().ok().map(Self)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns true for `0`.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// BALANCE
// =============================================================================

/// An account balance. No lower bound: balances may go negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Balance(i64);

impl Balance {
    /// Creates a balance.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Decodes the stored bytes of `key`.
    ///
    /// # Errors
    ///
    /// [`ChaincodeError::InvalidStoredBalance`] when the bytes are not the
    /// UTF-8 decimal text of an `i64`.
    pub fn decode(key: &AccountKey, bytes: &[u8]) -> Result<Self, ChaincodeError> {
        std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .map(Self)
            .ok_or_else(|| ChaincodeError::InvalidStoredBalance {
                key: key.to_string(),
                value: String::from_utf8_lossy(bytes).into_owned(),
            })
    }

    /// Encodes the balance as decimal text bytes.
    #[must_use]
    pub fn encode(self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }

    /// `self - amount`, or `None` on overflow.
    #[must_use]
    pub fn checked_debit(self, amount: Amount) -> Option<Self> {
        self.0.checked_sub(amount.value()).map(Self)
    }

    /// `self + amount`, or `None` on overflow.
    #[must_use]
    pub fn checked_credit(self, amount: Amount) -> Option<Self> {
        self.0.checked_add(amount.value()).map(Self)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
