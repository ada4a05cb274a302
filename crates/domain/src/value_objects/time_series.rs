use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Fees and TVL aggregated over one hourly or daily bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesSample {
    /// Bucket start, unix seconds.
    pub period_start_timestamp: i64,
    pub fees_usd: Decimal,
    pub total_value_locked_usd: Decimal,
}

impl TimeSeriesSample {
    pub fn new(
        period_start_timestamp: i64,
        fees_usd: Decimal,
        total_value_locked_usd: Decimal,
    ) -> Self {
        Self {
            period_start_timestamp,
            fees_usd,
            total_value_locked_usd,
        }
    }
}

/// Parses a USD decimal string as produced by subgraph `BigDecimal` fields.
///
/// Accepts plain and scientific notation.
///
/// # Errors
/// Returns [`DomainError::InvalidDecimal`] when the value is not a number.
pub fn parse_usd(field: &'static str, value: &str) -> Result<Decimal, DomainError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DomainError::InvalidDecimal {
            field,
            value: value.to_string(),
        })
}
