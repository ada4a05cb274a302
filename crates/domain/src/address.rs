//! Canonical EVM address handling.
//!
//! Every address that crosses a boundary (user input, indexer records, catalog
//! data, map keys) goes through [`Address`], which stores the lower-cased form.
//! Comparisons and hashing are therefore case-insensitive by construction.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The zero address, used by the registry to denote a network's native asset.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Lower-cased EVM address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Normalizes any string into its canonical address form.
    ///
    /// No format validation is performed; use [`Address::parse`] for user input
    /// that must be a well-formed EVM address.
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_lowercase())
    }

    /// Parses a well-formed `0x`-prefixed, 40 hex digit address.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidAddress`] if the input is not an EVM address.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if !is_evm_address(trimmed) {
            return Err(DomainError::InvalidAddress(value.to_string()));
        }
        Ok(Self::new(trimmed))
    }

    /// Returns the zero (native asset) address.
    #[must_use]
    pub fn zero() -> Self {
        Self(ZERO_ADDRESS.to_string())
    }

    /// Whether this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_ADDRESS
    }

    /// Returns the canonical string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl FromStr for Address {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `value` is `0x` followed by exactly 40 hex digits.
#[must_use]
pub fn is_evm_address(value: &str) -> bool {
    let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Whether `value` identifies a pool: a V3 pool address or a 32-byte V4 pool id.
#[must_use]
pub fn is_pool_id(value: &str) -> bool {
    if is_evm_address(value) {
        return true;
    }
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .is_some_and(|hex| hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
