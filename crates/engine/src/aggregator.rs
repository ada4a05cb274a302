//! Cross-chain orchestration.
//!
//! Catalog selectors are expanded to per-network address lists, every eligible
//! network is queried at once, each network's records are normalized on their
//! own, and the pools are flattened in registry order. Pools with the same
//! address on different networks are distinct and are all kept.

use crate::dispatcher::QueryDispatcher;
use crate::error::{NormalizeError, SearchError};
use crate::filter_builder::build_token_pairs;
use crate::normalizer::{NormalizedPools, PoolNormalizer, RequestedTokens};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use lp_yield_data::error::IndexerError;
use lp_yield_domain::prelude::{Address, Network, Pool, PoolSearchFilters, TokenCatalog};
use tracing::{debug, info, warn};

/// Addresses to search on one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSearch {
    pub network: Network,
    pub token0: Vec<Address>,
    pub token1: Vec<Address>,
}

impl NetworkSearch {
    pub fn new(network: Network, token0: Vec<Address>, token1: Vec<Address>) -> Self {
        Self {
            network,
            token0,
            token1,
        }
    }

    #[must_use]
    pub fn requested(&self) -> RequestedTokens {
        RequestedTokens::new([self.token0.as_slice(), self.token1.as_slice()])
    }
}

/// Merged outcome of a multi-network search.
#[derive(Debug, Default)]
pub struct AggregatedPools {
    pub pools: Vec<Pool>,
    pub rejected: Vec<NormalizeError>,
    /// Networks whose query failed, with the failure message.
    pub failed_networks: Vec<(Network, String)>,
}

/// Addresses of the selected catalog tokens on `network`, without duplicates.
fn addresses_on(catalog: &TokenCatalog, ids: &[String], network: Network) -> Vec<Address> {
    let mut addresses: Vec<Address> = Vec::new();
    for id in ids {
        let Some(selector) = catalog.resolve_selector(id) else {
            continue;
        };
        for token in selector.tokens() {
            if let Some(address) = token.address(network) {
                if !addresses.contains(address) {
                    addresses.push(address.clone());
                }
            }
        }
    }
    addresses
}

/// Networks where both sides resolve to at least one address.
///
/// Only testnets are considered in testnet mode and only mainnets otherwise.
/// Unknown ids contribute nothing.
#[must_use]
pub fn plan_cross_chain(
    catalog: &TokenCatalog,
    token0_ids: &[String],
    token1_ids: &[String],
    testnet_mode: bool,
) -> Vec<NetworkSearch> {
    for id in token0_ids.iter().chain(token1_ids) {
        if catalog.resolve_selector(id).is_none() {
            debug!(id = %id, "unknown token or group id");
        }
    }

    Network::list()
        .iter()
        .filter(|network| network.is_testnet() == testnet_mode)
        .filter_map(|network| {
            let token0 = addresses_on(catalog, token0_ids, *network);
            let token1 = addresses_on(catalog, token1_ids, *network);
            (!token0.is_empty() && !token1.is_empty())
                .then(|| NetworkSearch::new(*network, token0, token1))
        })
        .collect()
}

/// Runs filter building, dispatch and normalization for one or many networks.
#[derive(Clone)]
pub struct CrossChainAggregator {
    dispatcher: QueryDispatcher,
    normalizer: PoolNormalizer,
}

impl CrossChainAggregator {
    pub fn new(dispatcher: QueryDispatcher, normalizer: PoolNormalizer) -> Self {
        Self {
            dispatcher,
            normalizer,
        }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &QueryDispatcher {
        &self.dispatcher
    }

    #[must_use]
    pub fn normalizer(&self) -> &PoolNormalizer {
        &self.normalizer
    }

    #[must_use]
    pub fn plan(
        &self,
        token0_ids: &[String],
        token1_ids: &[String],
        testnet_mode: bool,
    ) -> Vec<NetworkSearch> {
        let catalog = self.normalizer.catalog();
        plan_cross_chain(catalog, token0_ids, token1_ids, testnet_mode)
    }

    /// Searches a single network.
    ///
    /// # Errors
    /// Returns the network's [`IndexerError`] if its query fails.
    pub async fn search_network(
        &self,
        search: &NetworkSearch,
        filters: &PoolSearchFilters,
        now: DateTime<Utc>,
    ) -> Result<NormalizedPools, IndexerError> {
        let pairs = build_token_pairs(&search.token0, &search.token1, search.network);
        let query = self.dispatcher.build_query(pairs, filters, now);
        let records = self.dispatcher.dispatch(search.network, &query).await?;
        Ok(self
            .normalizer
            .normalize(search.network, records, &search.requested(), filters)
            .await)
    }

    /// Searches every planned network concurrently and flattens the results.
    ///
    /// Failed networks contribute no pools.
    ///
    /// # Errors
    /// Returns [`SearchError::AllNetworksFailed`] when every planned network failed.
    pub async fn search(
        &self,
        searches: &[NetworkSearch],
        filters: &PoolSearchFilters,
        now: DateTime<Utc>,
    ) -> Result<AggregatedPools, SearchError> {
        if searches.is_empty() {
            debug!("no network holds both sides, nothing to search");
            return Ok(AggregatedPools::default());
        }

        let requests = searches
            .iter()
            .map(|search| {
                let pairs = build_token_pairs(&search.token0, &search.token1, search.network);
                (search.network, self.dispatcher.build_query(pairs, filters, now))
            })
            .collect();
        let results = self.dispatcher.dispatch_many(requests).await;

        let requested: Vec<RequestedTokens> =
            searches.iter().map(NetworkSearch::requested).collect();
        let mut failed_networks = Vec::new();
        let mut normalizations = Vec::new();
        for ((search, wanted), outcome) in searches.iter().zip(&requested).zip(results) {
            match outcome.result {
                Ok(records) => normalizations.push(self.normalizer.normalize(
                    search.network,
                    records,
                    wanted,
                    filters,
                )),
                Err(e) => failed_networks.push((outcome.network, e.to_string())),
            }
        }

        if failed_networks.len() == searches.len() {
            warn!(networks = searches.len(), "every network query failed");
            return Err(SearchError::AllNetworksFailed {
                failures: failed_networks,
            });
        }

        let mut aggregated = AggregatedPools {
            failed_networks,
            ..AggregatedPools::default()
        };
        for normalized in join_all(normalizations).await {
            aggregated.pools.extend(normalized.pools);
            aggregated.rejected.extend(normalized.rejected);
        }
        info!(
            networks = searches.len(),
            failed = aggregated.failed_networks.len(),
            pools = aggregated.pools.len(),
            "cross-chain search finished"
        );
        Ok(aggregated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::dispatcher::tests::{MockIndexer, now, raw_pool};
    use crate::normalizer::tests::{USDC_ETH, WETH_ETH, normalizer};
    use lp_yield_data::indexer::PoolIndexer;
    use lp_yield_domain::prelude::{NetworkMap, ZERO_ADDRESS};
    use std::sync::Arc;

    const USDC_BASE: &str = "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913";
    const WETH_BASE: &str = "0x4200000000000000000000000000000000000006";

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn indexer_with(id: &str, token0: &str, token1: &str) -> MockIndexer {
        MockIndexer::with_records(vec![raw_pool(id, token0, token1, 30)])
    }

    fn search(network: Network, token0: &str, token1: &str) -> NetworkSearch {
        let (token0, token1) = (Address::new(token0), Address::new(token1));
        NetworkSearch::new(network, vec![token0], vec![token1])
    }

    fn aggregator(entries: Vec<(Network, MockIndexer)>) -> CrossChainAggregator {
        let map = NetworkMap::sparse(
            entries
                .into_iter()
                .map(|(network, indexer)| (network, Arc::new(indexer) as Arc<dyn PoolIndexer>)),
        );
        let dispatcher = QueryDispatcher::new(map, SearchConfig::default());
        CrossChainAggregator::new(dispatcher, normalizer(None))
    }

    #[test]
    fn test_plan_only_networks_with_both_sides() {
        let catalog = TokenCatalog::builtin();
        // SCR exists only on Scroll, cbBTC never on Scroll
        assert!(plan_cross_chain(&catalog, &ids(&["13"]), &ids(&["6"]), false).is_empty());

        let plan = plan_cross_chain(&catalog, &ids(&["5"]), &ids(&["4"]), false);
        let networks: Vec<Network> = plan.iter().map(|s| s.network).collect();
        assert_eq!(networks, vec![Network::Ethereum, Network::Scroll]);
    }

    #[test]
    fn test_plan_separates_testnets() {
        let catalog = TokenCatalog::builtin();
        let mainnets = plan_cross_chain(&catalog, &ids(&["1"]), &ids(&["4"]), false);
        assert!(mainnets.iter().all(|s| !s.network.is_testnet()));
        assert!(!mainnets.is_empty());

        let testnets = plan_cross_chain(&catalog, &ids(&["1"]), &ids(&["4"]), true);
        assert_eq!(testnets.len(), 1);
        assert_eq!(testnets[0].network, Network::Sepolia);
        assert!(testnets[0].token0[0].is_zero());
    }

    #[test]
    fn test_plan_expands_groups() {
        let catalog = TokenCatalog::builtin();
        let plan = plan_cross_chain(&catalog, &ids(&["1"]), &ids(&["group-1"]), false);
        let ethereum = plan
            .iter()
            .find(|s| s.network == Network::Ethereum)
            .unwrap();
        assert_eq!(ethereum.token1.len(), 3);
    }

    #[test]
    fn test_unknown_ids_plan_nothing() {
        let catalog = TokenCatalog::builtin();
        assert!(plan_cross_chain(&catalog, &ids(&["404"]), &ids(&["4"]), false).is_empty());
    }

    #[tokio::test]
    async fn test_failed_network_does_not_hide_others() {
        let aggregator = aggregator(vec![
            (Network::Ethereum, MockIndexer::failing()),
            (Network::Base, indexer_with("0xbase", WETH_BASE, USDC_BASE)),
        ]);
        let plan = aggregator.plan(&ids(&["1"]), &ids(&["4"]), false);
        let result = aggregator
            .search(&plan, &PoolSearchFilters::default(), now())
            .await
            .unwrap();

        assert_eq!(result.pools.len(), 1);
        assert_eq!(result.pools[0].network(), Network::Base);
        assert_eq!(result.pools[0].common().token0.symbol, "ETH");
        assert!(result.failed_networks.iter().any(|(n, _)| *n == Network::Ethereum));
    }

    #[tokio::test]
    async fn test_all_failed_is_an_error() {
        let aggregator = aggregator(vec![]);
        let plan = aggregator.plan(&ids(&["1"]), &ids(&["4"]), false);
        let result = aggregator
            .search(&plan, &PoolSearchFilters::default(), now())
            .await;
        assert!(matches!(result, Err(SearchError::AllNetworksFailed { .. })));
    }

    #[tokio::test]
    async fn test_empty_plan_returns_no_pools() {
        let aggregator = aggregator(vec![]);
        let result = aggregator
            .search(&[], &PoolSearchFilters::default(), now())
            .await
            .unwrap();
        assert!(result.pools.is_empty());
        assert!(result.failed_networks.is_empty());
    }

    #[tokio::test]
    async fn test_same_address_on_two_networks_is_kept_twice() {
        let aggregator = aggregator(vec![
            (Network::Ethereum, indexer_with("0xsame", WETH_ETH, USDC_ETH)),
            (Network::Base, indexer_with("0xsame", WETH_BASE, USDC_BASE)),
        ]);
        let plan = vec![
            search(Network::Ethereum, WETH_ETH, USDC_ETH),
            search(Network::Base, WETH_BASE, USDC_BASE),
        ];
        let result = aggregator
            .search(&plan, &PoolSearchFilters::default(), now())
            .await
            .unwrap();
        let networks: Vec<Network> = result.pools.iter().map(Pool::network).collect();
        assert_eq!(networks, vec![Network::Ethereum, Network::Base]);
    }

    #[tokio::test]
    async fn test_native_and_wrapped_search_match_same_v3_pools() {
        let pools = vec![raw_pool("0xp", WETH_ETH, USDC_ETH, 30)];
        let aggregator = aggregator(vec![(Network::Ethereum, MockIndexer::with_records(pools))]);

        let native = search(Network::Ethereum, ZERO_ADDRESS, USDC_ETH);
        let wrapped = search(Network::Ethereum, WETH_ETH, USDC_ETH);
        let filters = PoolSearchFilters::default();

        let via_native = aggregator
            .search_network(&native, &filters, now())
            .await
            .unwrap();
        let via_wrapped = aggregator
            .search_network(&wrapped, &filters, now())
            .await
            .unwrap();
        let addresses = |pools: &[Pool]| -> Vec<Address> {
            pools.iter().map(|p| p.address().clone()).collect()
        };
        assert_eq!(addresses(&via_native.pools), addresses(&via_wrapped.pools));
        assert_eq!(via_native.pools.len(), 1);
    }
}
