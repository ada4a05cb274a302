//! Raw pool records as returned by the indexer.
//!
//! Numeric amounts arrive as decimal strings and are parsed lazily so that a
//! single malformed value only rejects the record that carries it.

use lp_yield_domain::prelude::{DomainError, TimeSeriesSample, parse_usd};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProtocol {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub position_manager: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawToken {
    /// Token address.
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawV3PoolData {
    pub tick_spacing: i32,
    pub tick: i32,
    #[serde(default, rename = "sqrtPriceX96")]
    pub sqrt_price_x96: Option<String>,
    #[serde(default)]
    pub deployer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawV4PoolData {
    pub tick_spacing: i32,
    pub tick: i32,
    #[serde(default, rename = "sqrtPriceX96")]
    pub sqrt_price_x96: Option<String>,
    pub hooks: String,
    pub pool_manager: String,
    pub state_view: String,
    #[serde(default)]
    pub permit2: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDailySample {
    #[serde(deserialize_with = "int_or_string")]
    pub day_start_timestamp: i64,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
}

impl RawDailySample {
    /// Parses the sample's amounts.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidDecimal`] when an amount is not a number.
    pub fn to_sample(&self) -> Result<TimeSeriesSample, DomainError> {
        Ok(TimeSeriesSample::new(
            self.day_start_timestamp,
            parse_usd("feesUSD", &self.fees_usd)?,
            parse_usd("totalValueLockedUSD", &self.total_value_locked_usd)?,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHourlySample {
    #[serde(deserialize_with = "int_or_string")]
    pub hour_start_timestamp: i64,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    /// Not every deployment reports hourly TVL.
    #[serde(default, rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: Option<String>,
}

impl RawHourlySample {
    /// Parses the sample's amounts. A missing TVL is read as zero.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidDecimal`] when an amount is not a number.
    pub fn to_sample(&self) -> Result<TimeSeriesSample, DomainError> {
        let tvl = match &self.total_value_locked_usd {
            Some(value) => parse_usd("totalValueLockedUSD", value)?,
            None => rust_decimal::Decimal::ZERO,
        };
        Ok(TimeSeriesSample::new(
            self.hour_start_timestamp,
            parse_usd("feesUSD", &self.fees_usd)?,
            tvl,
        ))
    }
}

/// One pool as reported by a network's indexer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPoolRecord {
    /// Pool address (V3) or pool id (V4).
    pub id: String,
    /// Declared pool type tag; validated during normalization.
    pub pool_type: String,
    #[serde(deserialize_with = "int_or_string")]
    pub fee_tier: i64,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
    pub protocol: RawProtocol,
    pub token0: RawToken,
    pub token1: RawToken,
    #[serde(default)]
    pub v3_pool_data: Option<RawV3PoolData>,
    #[serde(default)]
    pub v4_pool_data: Option<RawV4PoolData>,
    #[serde(default)]
    pub daily_data: Vec<RawDailySample>,
    #[serde(default)]
    pub hourly_data: Vec<RawHourlySample>,
}

impl RawPoolRecord {
    /// Parses the current TVL.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidDecimal`] when the value is not a number.
    pub fn tvl_usd(&self) -> Result<rust_decimal::Decimal, DomainError> {
        parse_usd("totalValueLockedUSD", &self.total_value_locked_usd)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(value) => Ok(value),
        IntOrString::Str(value) => value.trim().parse().map_err(serde::de::Error::custom),
    }
}
