//! Indexer-facing query description.

use lp_yield_domain::prelude::{PoolType, TokenPair};
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything an indexer needs to select pools and their bounded history.
///
/// Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolQueryFilter {
    /// Accepted `(token0, token1)` combinations; a pool matches any of them.
    pub pairs: Vec<TokenPair>,
    pub min_tvl_usd: Decimal,
    /// Sanity ceiling; pools reporting more are ignored.
    pub max_tvl_usd: Decimal,
    pub pool_types: Vec<PoolType>,
    pub blocked_protocol_ids: Vec<String>,
    /// Pools without a daily sample after this are considered inactive.
    pub active_since: i64,
    pub daily_since: i64,
    pub daily_limit: usize,
    /// Daily samples with fees at or above this are discarded.
    pub max_daily_fees_usd: Decimal,
    pub hourly_since: i64,
    pub hourly_limit: usize,
    /// Hourly samples with fees at or above this are discarded.
    pub max_hourly_fees_usd: Decimal,
}
