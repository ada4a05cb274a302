use crate::enums::PoolType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Request-level constraints applied to a pool search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoolSearchFilters {
    /// Pools (and individual days) below this TVL are ignored.
    #[serde(with = "rust_decimal::serde::float")]
    pub min_tvl_usd: Decimal,
    /// Search testnets instead of mainnets.
    pub testnet_mode: bool,
    /// Pool families to include. An empty set is treated as "all".
    pub allowed_pool_types: BTreeSet<PoolType>,
    /// Protocol ids whose pools are excluded.
    #[serde(alias = "blockedProtocols")]
    pub blocked_protocol_ids: BTreeSet<String>,
}

impl Default for PoolSearchFilters {
    fn default() -> Self {
        Self {
            min_tvl_usd: Decimal::ZERO,
            testnet_mode: false,
            allowed_pool_types: PoolType::ALL.into_iter().collect(),
            blocked_protocol_ids: BTreeSet::new(),
        }
    }
}

impl PoolSearchFilters {
    #[must_use]
    pub fn with_min_tvl_usd(mut self, min_tvl_usd: Decimal) -> Self {
        self.min_tvl_usd = min_tvl_usd;
        self
    }

    #[must_use]
    pub fn with_testnet_mode(mut self, testnet_mode: bool) -> Self {
        self.testnet_mode = testnet_mode;
        self
    }

    #[must_use]
    pub fn with_pool_types(mut self, pool_types: impl IntoIterator<Item = PoolType>) -> Self {
        self.allowed_pool_types = pool_types.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_blocked_protocols<S: Into<String>>(
        mut self,
        ids: impl IntoIterator<Item = S>,
    ) -> Self {
        self.blocked_protocol_ids = ids
            .into_iter()
            .map(|id| id.into().to_lowercase())
            .collect();
        self
    }

    /// Pool types to request; all types when the allow-list is empty.
    #[must_use]
    pub fn effective_pool_types(&self) -> Vec<PoolType> {
        if self.allowed_pool_types.is_empty() {
            PoolType::ALL.to_vec()
        } else {
            self.allowed_pool_types.iter().copied().collect()
        }
    }

    #[must_use]
    pub fn allows_pool_type(&self, pool_type: PoolType) -> bool {
        self.allowed_pool_types.is_empty() || self.allowed_pool_types.contains(&pool_type)
    }

    /// Case-insensitive check against the blocked protocol ids.
    #[must_use]
    pub fn is_protocol_blocked(&self, protocol_id: &str) -> bool {
        self.blocked_protocol_ids
            .iter()
            .any(|blocked| blocked.eq_ignore_ascii_case(protocol_id))
    }
}
