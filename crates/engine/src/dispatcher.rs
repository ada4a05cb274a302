//! Per-network query execution.
//!
//! One indexer handle per network is injected at construction. Cross-chain
//! requests are launched together and awaited as a group; each network's
//! outcome is reported separately so one failure never hides the others.

use crate::config::SearchConfig;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use lp_yield_data::error::IndexerError;
use lp_yield_data::indexer::PoolIndexer;
use lp_yield_data::query::PoolQueryFilter;
use lp_yield_data::records::RawPoolRecord;
use lp_yield_domain::prelude::{
    Address, Network, NetworkMap, PoolSearchFilters, TokenPair, parse_usd,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one network's query.
#[derive(Debug)]
pub struct NetworkResult {
    pub network: Network,
    pub result: Result<Vec<RawPoolRecord>, IndexerError>,
}

/// Sends pool queries to the configured per-network indexers.
#[derive(Clone)]
pub struct QueryDispatcher {
    indexers: Arc<NetworkMap<Option<Arc<dyn PoolIndexer>>>>,
    config: SearchConfig,
}

impl QueryDispatcher {
    pub fn new(indexers: NetworkMap<Option<Arc<dyn PoolIndexer>>>, config: SearchConfig) -> Self {
        Self {
            indexers: Arc::new(indexers),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Indexer for `network`, if one is configured.
    #[must_use]
    pub fn indexer(&self, network: Network) -> Option<&Arc<dyn PoolIndexer>> {
        self.indexers.value(network)
    }

    /// Builds the indexer filter for `pairs` under the request `filters`.
    #[must_use]
    pub fn build_query(
        &self,
        pairs: Vec<TokenPair>,
        filters: &PoolSearchFilters,
        now: DateTime<Utc>,
    ) -> PoolQueryFilter {
        PoolQueryFilter {
            pairs,
            min_tvl_usd: filters.min_tvl_usd,
            max_tvl_usd: self.config.max_tvl_usd,
            pool_types: filters.effective_pool_types(),
            blocked_protocol_ids: filters.blocked_protocol_ids.iter().cloned().collect(),
            active_since: self.config.active_since(now),
            daily_since: self.config.daily_since(now),
            daily_limit: self.config.daily_sample_limit,
            max_daily_fees_usd: self.config.max_daily_fees_usd,
            hourly_since: self.config.hourly_since(now),
            hourly_limit: self.config.hourly_sample_limit,
            max_hourly_fees_usd: self.config.max_hourly_fees_usd,
        }
    }

    /// Queries one network.
    ///
    /// An empty pair set excludes everything, so no request is sent.
    ///
    /// # Errors
    /// Returns the indexer's error, or [`IndexerError::NotConfigured`] when
    /// the network has no indexer.
    pub async fn dispatch(
        &self,
        network: Network,
        filter: &PoolQueryFilter,
    ) -> Result<Vec<RawPoolRecord>, IndexerError> {
        if filter.pairs.is_empty() {
            debug!(network = %network, "no token pairs, skipping query");
            return Ok(Vec::new());
        }
        let indexer = self
            .indexer(network)
            .ok_or_else(|| IndexerError::NotConfigured(network.name().to_string()))?;

        let started = Instant::now();
        debug!(network = %network, pairs = filter.pairs.len(), "dispatching pool query");
        let records = indexer.query_pools(filter).await?;
        let received = records.len();
        let records = sanitize_records(records, filter);
        info!(
            network = %network,
            received,
            kept = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pool query finished"
        );
        Ok(records)
    }

    /// Fetches one pool by id with its history trimmed to `filter`'s windows.
    ///
    /// # Errors
    /// Returns the indexer's error, or [`IndexerError::NotConfigured`] when
    /// the network has no indexer.
    pub async fn dispatch_pool(
        &self,
        network: Network,
        pool_id: &Address,
        filter: &PoolQueryFilter,
    ) -> Result<Option<RawPoolRecord>, IndexerError> {
        let indexer = self
            .indexer(network)
            .ok_or_else(|| IndexerError::NotConfigured(network.name().to_string()))?;
        let record = indexer.query_pool(pool_id, filter).await?;
        debug!(
            network = %network,
            pool = %pool_id,
            found = record.is_some(),
            "pool lookup finished"
        );
        Ok(record.map(|record| trim_history(record, filter)))
    }

    /// Queries every `(network, filter)` concurrently.
    ///
    /// Results come back in request order; failures are logged and returned
    /// per network.
    pub async fn dispatch_many(
        &self,
        requests: Vec<(Network, PoolQueryFilter)>,
    ) -> Vec<NetworkResult> {
        let futures = requests.iter().map(|(network, filter)| async move {
            let result = self.dispatch(*network, filter).await;
            if let Err(e) = &result {
                warn!(network = %network, error = %e, "network query failed");
            }
            NetworkResult {
                network: *network,
                result,
            }
        });
        join_all(futures).await
    }
}

/// Re-applies the query's sanity bounds to what the indexer returned.
///
/// Records whose TVL is not positive, above the ceiling or below the minimum
/// are dropped, as are records without a daily sample after `active_since`.
/// Samples outside the history windows or at or above the fee ceilings are
/// removed. Unparseable values are left for normalization to report.
fn sanitize_records(records: Vec<RawPoolRecord>, filter: &PoolQueryFilter) -> Vec<RawPoolRecord> {
    records
        .into_iter()
        .filter(|record| {
            let active = record
                .daily_data
                .iter()
                .any(|sample| sample.day_start_timestamp > filter.active_since);
            if !active {
                debug!(pool = %record.id, "no activity since the activity window, dropping pool");
            }
            active
        })
        .filter(|record| match record.tvl_usd() {
            Ok(tvl) => {
                let keep = tvl > Decimal::ZERO
                    && tvl <= filter.max_tvl_usd
                    && tvl >= filter.min_tvl_usd;
                if !keep {
                    debug!(pool = %record.id, %tvl, "pool outside TVL bounds");
                }
                keep
            }
            Err(_) => true,
        })
        .map(|record| trim_history(record, filter))
        .collect()
}

/// Drops samples outside the history windows or at or above the fee ceilings.
fn trim_history(mut record: RawPoolRecord, filter: &PoolQueryFilter) -> RawPoolRecord {
    record.daily_data.retain(|sample| {
        sample.day_start_timestamp > filter.daily_since
            && below_ceiling(&sample.fees_usd, filter.max_daily_fees_usd)
    });
    record.daily_data.truncate(filter.daily_limit);
    record.hourly_data.retain(|sample| {
        sample.hour_start_timestamp > filter.hourly_since
            && below_ceiling(&sample.fees_usd, filter.max_hourly_fees_usd)
    });
    record.hourly_data.truncate(filter.hourly_limit);
    record
}

fn below_ceiling(fees_usd: &str, ceiling: Decimal) -> bool {
    parse_usd("feesUSD", fees_usd).map_or(true, |fees| fees < ceiling)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use lp_yield_data::records::{
        RawDailySample, RawHourlySample, RawProtocol, RawToken, RawV3PoolData,
    };
    use lp_yield_domain::prelude::{PoolType, Protocol};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) const NOW: i64 = 1_735_689_600;

    /// Indexer double returning canned records and recording calls.
    #[derive(Default)]
    pub(crate) struct MockIndexer {
        pub records: Vec<RawPoolRecord>,
        pub protocols: Vec<Protocol>,
        pub fail: bool,
        pub calls: AtomicUsize,
        pub last_filter: Mutex<Option<PoolQueryFilter>>,
    }

    impl MockIndexer {
        pub(crate) fn with_records(records: Vec<RawPoolRecord>) -> Self {
            Self {
                records,
                ..Self::default()
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl PoolIndexer for MockIndexer {
        async fn query_pools(
            &self,
            filter: &PoolQueryFilter,
        ) -> Result<Vec<RawPoolRecord>, IndexerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut last) = self.last_filter.lock() {
                *last = Some(filter.clone());
            }
            if self.fail {
                return Err(IndexerError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            Ok(self.records.clone())
        }

        async fn query_pool(
            &self,
            pool_id: &Address,
            filter: &PoolQueryFilter,
        ) -> Result<Option<RawPoolRecord>, IndexerError> {
            let records = self.query_pools(filter).await?;
            Ok(records
                .into_iter()
                .find(|record| Address::new(&record.id) == *pool_id))
        }

        async fn protocols(&self) -> Result<Vec<Protocol>, IndexerError> {
            if self.fail {
                return Err(IndexerError::MissingData);
            }
            Ok(self.protocols.clone())
        }
    }

    pub(crate) fn raw_token(address: &str, symbol: &str) -> RawToken {
        RawToken {
            id: address.to_string(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            decimals: 18,
        }
    }

    /// A V3 record with `days` days and 24 hours of steady fees.
    pub(crate) fn raw_pool(id: &str, token0: &str, token1: &str, days: i64) -> RawPoolRecord {
        RawPoolRecord {
            id: id.to_string(),
            pool_type: "V3".to_string(),
            fee_tier: 500,
            total_value_locked_usd: "100000".to_string(),
            protocol: RawProtocol {
                id: "uniswap-v3".to_string(),
                name: "Uniswap V3".to_string(),
                url: "https://app.uniswap.org".to_string(),
                logo: String::new(),
                position_manager: Some("0xC36442b4a4522E871399CD717aBDD847Ab11FE88".to_string()),
            },
            token0: raw_token(token0, "T0"),
            token1: raw_token(token1, "T1"),
            v3_pool_data: Some(RawV3PoolData {
                tick_spacing: 10,
                tick: 100,
                sqrt_price_x96: Some("79228162514264337593543950336".to_string()),
                deployer: None,
            }),
            v4_pool_data: None,
            daily_data: (0..days)
                .map(|day| RawDailySample {
                    day_start_timestamp: NOW - (day + 1) * 86_400,
                    fees_usd: "10".to_string(),
                    total_value_locked_usd: "100000".to_string(),
                })
                .collect(),
            hourly_data: (0..24)
                .map(|hour| RawHourlySample {
                    hour_start_timestamp: NOW - hour * 3600,
                    fees_usd: "1".to_string(),
                    total_value_locked_usd: None,
                })
                .collect(),
        }
    }

    pub(crate) fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(NOW, 0).unwrap()
    }

    fn dispatcher(entries: Vec<(Network, MockIndexer)>) -> QueryDispatcher {
        let map = NetworkMap::sparse(
            entries
                .into_iter()
                .map(|(network, indexer)| (network, Arc::new(indexer) as Arc<dyn PoolIndexer>)),
        );
        QueryDispatcher::new(map, SearchConfig::default())
    }

    fn pair() -> Vec<TokenPair> {
        vec![TokenPair::new(Address::new("0xa"), Address::new("0xb"))]
    }

    #[test]
    fn test_build_query_carries_request_filters() {
        let dispatcher = dispatcher(vec![]);
        let filters = PoolSearchFilters::default()
            .with_min_tvl_usd(dec!(5000))
            .with_pool_types([PoolType::V4])
            .with_blocked_protocols(["Sushi"]);
        let query = dispatcher.build_query(pair(), &filters, now());

        assert_eq!(query.min_tvl_usd, dec!(5000));
        assert_eq!(query.max_tvl_usd, dec!(10000000000));
        assert_eq!(query.pool_types, vec![PoolType::V4]);
        assert_eq!(query.blocked_protocol_ids, vec!["sushi".to_string()]);
        assert_eq!(query.active_since, NOW - 30 * 86_400);
        assert_eq!(query.daily_since, NOW - 90 * 86_400);
        assert_eq!(query.hourly_since, NOW - 86_400);
        assert_eq!(query.daily_limit, 100);
        assert_eq!(query.hourly_limit, 24);
    }

    #[tokio::test]
    async fn test_empty_pairs_skip_the_indexer() {
        let indexer = Arc::new(MockIndexer::with_records(vec![raw_pool("0xp", "0xa", "0xb", 30)]));
        let map = NetworkMap::sparse([(Network::Base, indexer.clone() as Arc<dyn PoolIndexer>)]);
        let dispatcher = QueryDispatcher::new(map, SearchConfig::default());

        let query = dispatcher.build_query(vec![], &PoolSearchFilters::default(), now());
        let records = dispatcher.dispatch(Network::Base, &query).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(indexer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_network() {
        let dispatcher = dispatcher(vec![]);
        let query = dispatcher.build_query(pair(), &PoolSearchFilters::default(), now());
        let result = dispatcher.dispatch(Network::Scroll, &query).await;
        assert!(matches!(result, Err(IndexerError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_sanity_bounds_are_reapplied() {
        let mut huge = raw_pool("0xhuge", "0xa", "0xb", 30);
        huge.total_value_locked_usd = "20000000000".to_string();
        let mut empty = raw_pool("0xempty", "0xa", "0xb", 30);
        empty.total_value_locked_usd = "0".to_string();
        let mut noisy = raw_pool("0xnoisy", "0xa", "0xb", 30);
        noisy.daily_data[0].fees_usd = "5000000000".to_string();
        noisy.hourly_data[0].fees_usd = "10000000".to_string();
        noisy.daily_data.push(RawDailySample {
            day_start_timestamp: NOW - 200 * 86_400,
            fees_usd: "1".to_string(),
            total_value_locked_usd: "1".to_string(),
        });

        let indexer = MockIndexer::with_records(vec![huge, empty, noisy]);
        let dispatcher = dispatcher(vec![(Network::Ethereum, indexer)]);
        let query = dispatcher.build_query(pair(), &PoolSearchFilters::default(), now());
        let records = dispatcher
            .dispatch(Network::Ethereum, &query)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "0xnoisy");
        assert_eq!(records[0].daily_data.len(), 29);
        assert_eq!(records[0].hourly_data.len(), 23);
    }

    #[tokio::test]
    async fn test_inactive_pools_are_dropped() {
        let mut stale = raw_pool("0xstale", "0xa", "0xb", 60);
        for sample in &mut stale.daily_data {
            sample.day_start_timestamp -= 31 * 86_400;
        }
        let fresh = raw_pool("0xfresh", "0xa", "0xb", 60);

        let dispatcher = dispatcher(vec![(
            Network::Ethereum,
            MockIndexer::with_records(vec![stale, fresh]),
        )]);
        let query = dispatcher.build_query(pair(), &PoolSearchFilters::default(), now());
        let records = dispatcher
            .dispatch(Network::Ethereum, &query)
            .await
            .unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["0xfresh"]);
    }

    #[tokio::test]
    async fn test_dispatch_pool_trims_history_only() {
        let mut stale = raw_pool("0xStale", "0xa", "0xb", 120);
        for sample in &mut stale.daily_data {
            sample.day_start_timestamp -= 31 * 86_400;
        }
        let dispatcher = dispatcher(vec![(
            Network::Ethereum,
            MockIndexer::with_records(vec![stale]),
        )]);
        let query = dispatcher.build_query(vec![], &PoolSearchFilters::default(), now());

        let record = dispatcher
            .dispatch_pool(Network::Ethereum, &Address::new("0xstale"), &query)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.daily_data.len(), 58);
        assert_eq!(record.hourly_data.len(), 24);

        let missing = dispatcher
            .dispatch_pool(Network::Ethereum, &Address::new("0xother"), &query)
            .await
            .unwrap();
        assert!(missing.is_none());
        let unconfigured = dispatcher
            .dispatch_pool(Network::Base, &Address::new("0xstale"), &query)
            .await;
        assert!(matches!(unconfigured, Err(IndexerError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_dispatch_many_isolates_failures() {
        let dispatcher = dispatcher(vec![
            (Network::Ethereum, MockIndexer::failing()),
            (Network::Base, MockIndexer::with_records(vec![raw_pool("0xp", "0xa", "0xb", 30)])),
        ]);
        let query = dispatcher.build_query(pair(), &PoolSearchFilters::default(), now());
        let results = dispatcher
            .dispatch_many(vec![(Network::Ethereum, query.clone()), (Network::Base, query)])
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].network, Network::Ethereum);
        assert!(results[0].result.is_err());
        assert_eq!(results[1].result.as_ref().unwrap().len(), 1);
    }
}
