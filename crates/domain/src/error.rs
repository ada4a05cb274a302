//! Domain error types.

use thiserror::Error;

/// Errors raised by pure domain lookups and conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The chain id is not part of the network registry.
    #[error("unknown network: chain id {0} is not supported")]
    UnknownNetwork(u64),

    /// A pool record declared a pool type outside `{V3, V4}`.
    #[error("unsupported pool type: {0}")]
    UnsupportedPoolType(String),

    /// A string could not be interpreted as an EVM address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A decimal string from an external source could not be parsed.
    #[error("invalid decimal value for {field}: {value}")]
    InvalidDecimal {
        /// Field the value was read from.
        field: &'static str,
        /// Offending raw value.
        value: String,
    },
}
